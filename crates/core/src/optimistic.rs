// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Apply-then-confirm orchestration around a single remote call.

use crate::phase::Phase;
use crate::store::Snapshot;
use std::fmt::Display;
use tracing::{debug, error, warn};

const DEFAULT_LABEL: &str = "optimistic mutation";

type SuccessHandler<'a, R> = Box<dyn FnOnce(R) + Send + 'a>;
type FailureHandler<'a, E> = Box<dyn FnOnce(E) + Send + 'a>;
type PhaseObserver<'a> = Box<dyn FnMut(Phase) + Send + 'a>;

/// Optional hooks invoked as a mutation settles.
///
/// # Usage
///
/// ```ignore
/// let callbacks = Callbacks::labelled("confirm booking")
///     .on_success(|booking| notifier.success(format!("Booking {} confirmed", booking.id)))
///     .on_failure(|err| notifier.error(err.to_string()));
/// ```
pub struct Callbacks<'a, R, E> {
    label: String,
    on_success: Option<SuccessHandler<'a, R>>,
    on_failure: Option<FailureHandler<'a, E>>,
    on_phase: Option<PhaseObserver<'a>>,
}

impl<R, E> Default for Callbacks<'_, R, E> {
    fn default() -> Self {
        Self {
            label: String::from(DEFAULT_LABEL),
            on_success: None,
            on_failure: None,
            on_phase: None,
        }
    }
}

impl<'a, R, E> Callbacks<'a, R, E> {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set of callbacks with a label used in log output.
    #[must_use]
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Called with the remote result once the remote call succeeds.
    #[must_use]
    pub fn on_success(mut self, handler: impl FnOnce(R) + Send + 'a) -> Self {
        self.on_success = Some(Box::new(handler));
        self
    }

    /// Called with the remote error, unmodified, after the rollback.
    #[must_use]
    pub fn on_failure(mut self, handler: impl FnOnce(E) + Send + 'a) -> Self {
        self.on_failure = Some(Box::new(handler));
        self
    }

    /// Called on every phase transition, including the terminal one.
    #[must_use]
    pub fn on_phase(mut self, observer: impl FnMut(Phase) + Send + 'a) -> Self {
        self.on_phase = Some(Box::new(observer));
        self
    }

    /// The label used in log output.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn advance(&mut self, phase: &mut Phase, next: Phase) {
        debug_assert!(
            phase.can_transition_to(next),
            "illegal phase transition {phase} -> {next}"
        );
        *phase = next;
        if let Some(observer) = self.on_phase.as_mut() {
            observer(next);
        }
    }
}

/// Applies a local mutation, awaits the remote one, and rolls back on failure.
///
/// 1. `apply_local` runs synchronously and returns the snapshot; the new
///    state is visible before any I/O starts.
/// 2. `apply_remote` is awaited exactly once.
/// 3. On success, `on_success` receives the result and the optimistic state
///    stands.
/// 4. On failure, the snapshot is rolled back first and `on_failure` then
///    receives the error. Without a failure handler the error is logged.
///
/// There is no retry, timeout or cancellation. Concurrent calls on
/// overlapping records are not coordinated; use [`crate::Mutator`] when
/// that matters.
///
/// Returns `true` if the remote call succeeded, `false` if it was rolled back.
pub async fn run_optimistic<L, S, F, Fut, R, E>(
    apply_local: L,
    apply_remote: F,
    callbacks: Callbacks<'_, R, E>,
) -> bool
where
    L: FnOnce() -> S,
    S: Snapshot,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    settle(apply_local, apply_remote, callbacks).await == Phase::Committed
}

/// Same as [`run_optimistic`], returning the terminal [`Phase`].
pub async fn settle<L, S, F, Fut, R, E>(
    apply_local: L,
    apply_remote: F,
    mut callbacks: Callbacks<'_, R, E>,
) -> Phase
where
    L: FnOnce() -> S,
    S: Snapshot,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let mut phase: Phase = Phase::Idle;

    callbacks.advance(&mut phase, Phase::Applying);
    let snapshot: S = apply_local();
    callbacks.advance(&mut phase, Phase::Pending);
    debug!(mutation = %callbacks.label, "Applied optimistic update");

    match apply_remote().await {
        Ok(result) => {
            debug!(mutation = %callbacks.label, "Remote mutation confirmed");
            callbacks.advance(&mut phase, Phase::Committed);
            if let Some(handler) = callbacks.on_success.take() {
                handler(result);
            }
        }
        Err(err) => {
            snapshot.rollback();
            callbacks.advance(&mut phase, Phase::RolledBack);
            match callbacks.on_failure.take() {
                Some(handler) => {
                    warn!(mutation = %callbacks.label, error = %err, "Remote mutation failed, rolled back");
                    handler(err);
                }
                None => {
                    error!(
                        mutation = %callbacks.label,
                        error = %err,
                        "Remote mutation failed with no failure handler, rolled back"
                    );
                }
            }
        }
    }

    phase
}
