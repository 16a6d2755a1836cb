// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    /// Tickets holding or waiting on `lock`.
    users: usize,
    held: bool,
}

/// Per-record claims for mutations that have not settled yet.
///
/// One async mutex is created lazily per key and handed out to every
/// mutation naming that key. Waiters are served in FIFO order. A slot is
/// removed from the map once no claim or waiter uses it, including waiters
/// that were dropped before their turn came.
#[derive(Debug)]
pub struct InFlightRegistry<K> {
    slots: Arc<Mutex<HashMap<K, Slot>>>,
}

impl<K> Clone for InFlightRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<K> Default for InFlightRegistry<K> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> InFlightRegistry<K> {
    fn slots(&self) -> MutexGuard<'_, HashMap<K, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> InFlightRegistry<K>
where
    K: Ord + Hash + Clone,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&self, key: &K) -> Ticket<K> {
        let mut slots = self.slots();
        let slot: &mut Slot = slots.entry(key.clone()).or_default();
        slot.users += 1;
        Ticket {
            registry: self.clone(),
            key: key.clone(),
            lock: Arc::clone(&slot.lock),
            guard: None,
        }
    }

    /// Claims every key without waiting.
    ///
    /// Keys are claimed in sorted order. If any key is already claimed, the
    /// keys taken so far are released and that key is returned as the error.
    ///
    /// # Errors
    ///
    /// Returns the first contested key.
    pub fn try_claim(&self, keys: &[K]) -> Result<Claim<K>, K> {
        let mut claim: Claim<K> = Claim::empty();
        for key in sorted_unique(keys) {
            let mut ticket: Ticket<K> = self.enter(&key);
            match Arc::clone(&ticket.lock).try_lock_owned() {
                Ok(guard) => {
                    ticket.hold(guard);
                    claim.tickets.push(ticket);
                }
                Err(_) => return Err(key),
            }
        }
        Ok(claim)
    }

    /// Claims every key, waiting behind earlier claims in arrival order.
    ///
    /// Keys are claimed in sorted order so that two mutations naming the
    /// same keys cannot deadlock. Dropping the returned future before it
    /// resolves gives up its place in every queue it joined.
    pub async fn claim(&self, keys: &[K]) -> Claim<K> {
        let mut claim: Claim<K> = Claim::empty();
        for key in sorted_unique(keys) {
            let mut ticket: Ticket<K> = self.enter(&key);
            let guard: OwnedMutexGuard<()> = Arc::clone(&ticket.lock).lock_owned().await;
            ticket.hold(guard);
            claim.tickets.push(ticket);
        }
        claim
    }

    /// Returns true if a mutation currently holds `key`.
    ///
    /// Waiters alone do not count.
    #[must_use]
    pub fn is_in_flight(&self, key: &K) -> bool {
        self.slots().get(key).is_some_and(|slot| slot.held)
    }

    /// Number of keys that are held or waited on.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.slots().len()
    }
}

fn sorted_unique<K: Ord + Clone>(keys: &[K]) -> Vec<K> {
    let mut keys: Vec<K> = keys.to_vec();
    keys.sort();
    keys.dedup();
    keys
}

/// One claimant's use of one slot, held or still waiting.
#[derive(Debug)]
struct Ticket<K>
where
    K: Eq + Hash,
{
    registry: InFlightRegistry<K>,
    key: K,
    lock: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Ticket<K>
where
    K: Eq + Hash,
{
    fn hold(&mut self, guard: OwnedMutexGuard<()>) {
        if let Some(slot) = self.registry.slots().get_mut(&self.key) {
            slot.held = true;
        }
        self.guard = Some(guard);
    }
}

impl<K> Drop for Ticket<K>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        let released: Option<OwnedMutexGuard<()>> = self.guard.take();
        let mut slots = self.registry.slots();
        let unused: bool = slots.get_mut(&self.key).is_some_and(|slot| {
            if released.is_some() {
                slot.held = false;
            }
            slot.users = slot.users.saturating_sub(1);
            slot.users == 0
        });
        if unused {
            slots.remove(&self.key);
        }
        // The next waiter marks the slot held again under the map lock
        drop(slots);
        drop(released);
    }
}

/// Keys held by one mutation. Dropping the claim releases them.
#[derive(Debug)]
pub struct Claim<K>
where
    K: Eq + Hash,
{
    tickets: Vec<Ticket<K>>,
}

impl<K> Claim<K>
where
    K: Eq + Hash,
{
    const fn empty() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    /// The keys this claim holds, in claim order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.tickets.iter().map(|ticket| &ticket.key)
    }
}
