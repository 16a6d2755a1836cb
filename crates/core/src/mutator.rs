// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::MutationError;
use crate::in_flight::{Claim, InFlightRegistry};
use crate::optimistic::{Callbacks, settle};
use crate::phase::Phase;
use crate::store::Snapshot;
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, info};

/// What to do when a mutation names a record that is already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Refuse the second mutation. Local state is left untouched.
    #[default]
    Reject,
    /// Wait until every earlier mutation on the same records has settled.
    Queue,
}

impl ConflictPolicy {
    /// Converts this policy to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Queue => "queue",
        }
    }
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runs optimistic mutations with per-record mutual exclusion.
///
/// Each mutation names the record keys it touches. The snapshot is taken
/// only after those keys are claimed, so a rollback can never restore state
/// captured underneath another unsettled mutation on the same records.
///
/// Mutations on disjoint keys run concurrently. That is only sound when
/// their snapshots are record-scoped, as with [`crate::Store::update_records`]:
/// a whole-collection snapshot would put back the other mutation's records
/// as well.
#[derive(Debug)]
pub struct Mutator<K> {
    registry: InFlightRegistry<K>,
    policy: ConflictPolicy,
}

impl<K> Clone for Mutator<K> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            policy: self.policy,
        }
    }
}

impl<K> Mutator<K>
where
    K: Ord + Hash + Clone + Display,
{
    /// Creates a mutator with an empty registry.
    #[must_use]
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            registry: InFlightRegistry::new(),
            policy,
        }
    }

    /// The policy applied to conflicting mutations.
    #[must_use]
    pub const fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// The registry tracking claimed keys.
    #[must_use]
    pub const fn registry(&self) -> &InFlightRegistry<K> {
        &self.registry
    }

    /// Returns true if a mutation currently holds `key`.
    #[must_use]
    pub fn is_in_flight(&self, key: &K) -> bool {
        self.registry.is_in_flight(key)
    }

    async fn claim(&self, keys: &[K], label: &str) -> Result<Claim<K>, MutationError> {
        let claim: Claim<K> = match self.policy {
            ConflictPolicy::Reject => self.registry.try_claim(keys).map_err(|key| {
                info!(mutation = %label, key = %key, "Rejected mutation on in-flight record");
                MutationError::InFlight {
                    key: key.to_string(),
                }
            })?,
            ConflictPolicy::Queue => self.registry.claim(keys).await,
        };
        debug!(mutation = %label, keys = claim.keys().count(), "Claimed records");
        Ok(claim)
    }

    /// Claims `keys`, then runs the optimistic protocol.
    ///
    /// The claim is released once the mutation has committed or rolled back.
    /// Returns `Ok(true)` on commit and `Ok(false)` on rollback.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::InFlight` under [`ConflictPolicy::Reject`] when
    /// any key is already claimed. Neither `apply_local` nor `apply_remote`
    /// is called in that case.
    pub async fn run<L, S, F, Fut, R, E>(
        &self,
        keys: &[K],
        apply_local: L,
        apply_remote: F,
        callbacks: Callbacks<'_, R, E>,
    ) -> Result<bool, MutationError>
    where
        L: FnOnce() -> S,
        S: Snapshot,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        self.run_prepared(
            keys,
            || Ok::<(), MutationError>(()),
            |_| apply_local(),
            |_| apply_remote(),
            callbacks,
        )
        .await
    }

    /// Claims `keys`, runs `prepare`, then runs the optimistic protocol.
    ///
    /// `prepare` sees the state left by every earlier mutation on the same
    /// keys, after they settled. It is the place for lookups and checks that
    /// depend on the records. Its output is handed to both `apply_local` and
    /// `apply_remote`.
    ///
    /// # Errors
    ///
    /// Returns the `prepare` error, or `MutationError::InFlight` converted
    /// into `X` under [`ConflictPolicy::Reject`]. Nothing is applied and no
    /// remote call is made in either case.
    pub async fn run_prepared<P, C, X, L, S, F, Fut, R, E>(
        &self,
        keys: &[K],
        prepare: P,
        apply_local: L,
        apply_remote: F,
        callbacks: Callbacks<'_, R, E>,
    ) -> Result<bool, X>
    where
        P: FnOnce() -> Result<C, X>,
        X: From<MutationError>,
        L: FnOnce(&C) -> S,
        S: Snapshot,
        F: FnOnce(&C) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        let label: String = callbacks.label().to_string();
        let claim: Claim<K> = self.claim(keys, &label).await?;

        let plan: C = prepare().inspect_err(|_| {
            debug!(mutation = %label, "Mutation refused after claiming records");
        })?;

        let phase: Phase = settle(|| apply_local(&plan), || apply_remote(&plan), callbacks).await;
        drop(claim);

        Ok(phase == Phase::Committed)
    }
}
