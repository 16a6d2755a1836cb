// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Progress of a single optimistic mutation.
///
/// `Idle → Applying → Pending → {Committed | RolledBack}`. There is no
/// edge back to `Pending`: a failed remote call is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// The local mutation is being applied.
    Applying,
    /// The local mutation is visible; the remote call is outstanding.
    Pending,
    /// The remote call succeeded; the optimistic state is confirmed.
    Committed,
    /// The remote call failed; the snapshot has been restored.
    RolledBack,
}

impl Phase {
    /// Converts this phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Applying => "applying",
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }

    /// Checks if a transition from this phase to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::Applying)
                | (Self::Applying, Self::Pending)
                | (Self::Pending, Self::Committed | Self::RolledBack)
        )
    }

    /// Returns true once no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
