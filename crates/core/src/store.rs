// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! UI-visible state and the snapshots taken before mutating it.

use crate::keyed::Keyed;
use crate::patch::Patch;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Captured prior state that can be written back.
pub trait Snapshot {
    /// Restores the captured state.
    ///
    /// Calling this more than once writes the same state again.
    fn rollback(&self);
}

/// Shared handle to a piece of UI-visible state.
///
/// Cloning the handle shares the same underlying value, so a screen can give
/// one clone to each action while they all mutate the same list. The lock is
/// held only for the duration of a single synchronous mutation and is never
/// held across an await.
#[derive(Debug)]
pub struct Store<S> {
    state: Arc<Mutex<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store<S> {
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    // A panic while holding the lock cannot leave `S` half-written: every
    // mutation below computes the next value before swapping it in.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the current value without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock())
    }

    /// Overwrites the current value.
    pub fn set(&self, next: S) {
        *self.lock() = next;
    }

    fn rewrite(&self, f: impl FnOnce(&S) -> S) {
        let mut state = self.lock();
        let next: S = f(&state);
        *state = next;
    }
}

impl<S: Clone> Store<S> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> S {
        self.lock().clone()
    }

    /// Replaces the whole value, snapshotting the prior one.
    pub fn replace_all(&self, next: S) -> StoreSnapshot<S> {
        let previous_state: S = std::mem::replace(&mut *self.lock(), next);
        StoreSnapshot::new(self.clone(), previous_state)
    }

    /// Merges `patch` into the whole value, snapshotting the prior one.
    ///
    /// This is the single-record form of [`Store::update_where`].
    pub fn patch<P: Patch<S>>(&self, patch: &P) -> StoreSnapshot<S> {
        let mut state = self.lock();
        let previous_state: S = state.clone();
        let mut next: S = previous_state.clone();
        patch.apply_to(&mut next);
        *state = next;
        drop(state);
        StoreSnapshot::new(self.clone(), previous_state)
    }
}

impl<T: Clone> Store<Vec<T>> {
    /// Drops every record matching `predicate`, snapshotting the prior list.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> StoreSnapshot<Vec<T>> {
        let mut state = self.lock();
        let previous_state: Vec<T> = state.clone();
        let next: Vec<T> = previous_state
            .iter()
            .filter(|record| !predicate(record))
            .cloned()
            .collect();
        *state = next;
        drop(state);
        StoreSnapshot::new(self.clone(), previous_state)
    }

    /// Merges `patch` into every record matching `predicate`, snapshotting
    /// the prior list. Order is preserved.
    pub fn update_where<P: Patch<T>>(
        &self,
        predicate: impl Fn(&T) -> bool,
        patch: &P,
    ) -> StoreSnapshot<Vec<T>> {
        let mut state = self.lock();
        let previous_state: Vec<T> = state.clone();
        let next: Vec<T> = previous_state
            .iter()
            .map(|record| {
                let mut record: T = record.clone();
                if predicate(&record) {
                    patch.apply_to(&mut record);
                }
                record
            })
            .collect();
        *state = next;
        drop(state);
        StoreSnapshot::new(self.clone(), previous_state)
    }

    /// Appends `record`, snapshotting the prior list.
    pub fn add_record(&self, record: T) -> StoreSnapshot<Vec<T>> {
        let mut state = self.lock();
        let previous_state: Vec<T> = state.clone();
        state.push(record);
        drop(state);
        StoreSnapshot::new(self.clone(), previous_state)
    }

    /// Number of records currently visible.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no record is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of the first record matching `predicate`.
    #[must_use]
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.lock().iter().find(|record| predicate(record)).cloned()
    }
}

impl<T: Keyed + Clone> Store<Vec<T>> {
    /// Merges `patch` into every record matching `predicate`, snapshotting
    /// only the matched records.
    ///
    /// Rolling back writes those records back by key. Records the mutation
    /// did not touch keep whatever value they hold at rollback time.
    pub fn update_records<P: Patch<T>>(
        &self,
        predicate: impl Fn(&T) -> bool,
        patch: &P,
    ) -> RecordSnapshot<T> {
        let mut state = self.lock();
        let mut previous: Vec<T> = Vec::new();
        let next: Vec<T> = state
            .iter()
            .map(|record| {
                let mut record: T = record.clone();
                if predicate(&record) {
                    previous.push(record.clone());
                    patch.apply_to(&mut record);
                }
                record
            })
            .collect();
        *state = next;
        drop(state);
        RecordSnapshot::new(self.clone(), RecordChange::Updated(previous))
    }

    /// Drops every record matching `predicate`, snapshotting the dropped
    /// records with their positions.
    pub fn remove_records(&self, predicate: impl Fn(&T) -> bool) -> RecordSnapshot<T> {
        let mut state = self.lock();
        let (removed, kept): (Vec<(usize, T)>, Vec<(usize, T)>) = state
            .iter()
            .cloned()
            .enumerate()
            .partition(|(_, record)| predicate(record));
        *state = kept.into_iter().map(|(_, record)| record).collect();
        drop(state);
        RecordSnapshot::new(self.clone(), RecordChange::Removed(removed))
    }

    /// Appends `record`. Rolling back removes that record again.
    pub fn insert_record(&self, record: T) -> RecordSnapshot<T> {
        let key: T::Key = record.key();
        let mut state = self.lock();
        let existing: usize = state.iter().filter(|r| r.key() == key).count();
        state.push(record);
        drop(state);
        RecordSnapshot::new(self.clone(), RecordChange::Inserted { key, existing })
    }
}

/// The value a [`Store`] held right before an optimistic mutation.
#[derive(Debug, Clone)]
pub struct StoreSnapshot<S> {
    store: Store<S>,
    previous_state: S,
}

impl<S> StoreSnapshot<S> {
    const fn new(store: Store<S>, previous_state: S) -> Self {
        Self {
            store,
            previous_state,
        }
    }

    /// The value captured before the mutation.
    #[must_use]
    pub const fn previous_state(&self) -> &S {
        &self.previous_state
    }
}

impl<S: Clone> Snapshot for StoreSnapshot<S> {
    fn rollback(&self) {
        self.store.set(self.previous_state.clone());
    }
}

#[derive(Debug, Clone)]
enum RecordChange<T: Keyed> {
    Updated(Vec<T>),
    Removed(Vec<(usize, T)>),
    Inserted { key: T::Key, existing: usize },
}

/// The records one mutation touched, as they were before it.
///
/// Unlike [`StoreSnapshot`], rolling back leaves every other record alone,
/// so mutations on disjoint records can settle in any order.
#[derive(Clone)]
pub struct RecordSnapshot<T: Keyed> {
    store: Store<Vec<T>>,
    change: RecordChange<T>,
}

impl<T: Keyed + std::fmt::Debug> std::fmt::Debug for RecordSnapshot<T>
where
    T::Key: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSnapshot")
            .field("store", &self.store)
            .field("change", &self.change)
            .finish()
    }
}

impl<T: Keyed> RecordSnapshot<T> {
    const fn new(store: Store<Vec<T>>, change: RecordChange<T>) -> Self {
        Self { store, change }
    }

    /// Number of records this snapshot restores or withdraws.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.change {
            RecordChange::Updated(records) => records.len(),
            RecordChange::Removed(records) => records.len(),
            RecordChange::Inserted { .. } => 1,
        }
    }

    /// Returns true if the mutation matched no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Keyed + Clone> Snapshot for RecordSnapshot<T> {
    fn rollback(&self) {
        self.store.rewrite(|records| match &self.change {
            RecordChange::Updated(previous) => records
                .iter()
                .map(|record| {
                    previous
                        .iter()
                        .find(|p| p.key() == record.key())
                        .unwrap_or(record)
                        .clone()
                })
                .collect(),
            RecordChange::Removed(previous) => {
                let mut next: Vec<T> = records.clone();
                // Positions ascend, so each reinsert lands where it was
                for (index, record) in previous {
                    if !next.iter().any(|r| r.key() == record.key()) {
                        next.insert((*index).min(next.len()), record.clone());
                    }
                }
                next
            }
            RecordChange::Inserted { key, existing } => {
                let mut next: Vec<T> = records.clone();
                let present: usize = next.iter().filter(|r| r.key() == *key).count();
                let inserted: Option<usize> = next
                    .iter()
                    .rposition(|r| r.key() == *key)
                    .filter(|_| present > *existing);
                if let Some(at) = inserted {
                    next.remove(at);
                }
                next
            }
        });
    }
}
