// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{RemoteError, booking_ids, create_test_bookings, has_id};
use crate::{Callbacks, Phase, Store, run_optimistic, settle};
use innkeep_domain::{Booking, BookingPatch, BookingStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

fn confirm(id: i64) -> (impl Fn(&Booking) -> bool, BookingPatch) {
    (has_id(id), BookingPatch::status(BookingStatus::Confirmed))
}

#[tokio::test]
async fn test_success_keeps_optimistic_state_and_calls_on_success_once() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1, 2]));
    let (predicate, patch) = confirm(1);
    let mut successes: Vec<u32> = Vec::new();
    let mut failures: usize = 0;

    let committed: bool = run_optimistic(
        || store.update_where(predicate, &patch),
        || async { Ok::<u32, RemoteError>(200) },
        Callbacks::new()
            .on_success(|status| successes.push(status))
            .on_failure(|_| failures += 1),
    )
    .await;

    assert!(committed);
    assert_eq!(successes, vec![200]);
    assert_eq!(failures, 0);

    let mut expected: Vec<Booking> = create_test_bookings(&[1, 2]);
    expected[0].status = BookingStatus::Confirmed;
    assert_eq!(store.get(), expected);
}

#[tokio::test]
async fn test_failure_restores_collection_and_passes_error_through() {
    let original: Vec<Booking> = create_test_bookings(&[1, 2, 3]);
    let store: Store<Vec<Booking>> = Store::new(original.clone());
    let mut received: Vec<RemoteError> = Vec::new();
    let mut successes: usize = 0;

    let committed: bool = run_optimistic(
        || store.remove_where(has_id(2)),
        || async { Err::<(), _>(RemoteError::network()) },
        Callbacks::new()
            .on_success(|()| successes += 1)
            .on_failure(|err| received.push(err)),
    )
    .await;

    assert!(!committed);
    assert_eq!(successes, 0);
    assert_eq!(received, vec![RemoteError::network()]);
    assert_eq!(store.get(), original);
}

#[tokio::test]
async fn test_rollback_happens_before_on_failure_runs() {
    let original: Vec<Booking> = create_test_bookings(&[1]);
    let store: Store<Vec<Booking>> = Store::new(original.clone());
    let reader: Store<Vec<Booking>> = store.clone();
    let mut seen_by_handler: Option<Vec<Booking>> = None;
    let (predicate, patch) = confirm(1);

    let _committed: bool = run_optimistic(
        || store.update_where(predicate, &patch),
        || async { Err::<(), _>(RemoteError::network()) },
        Callbacks::new().on_failure(|_| seen_by_handler = Some(reader.get())),
    )
    .await;

    assert_eq!(seen_by_handler, Some(original));
}

#[tokio::test]
async fn test_failure_without_handler_still_rolls_back() {
    let original: Vec<Booking> = create_test_bookings(&[1, 2]);
    let store: Store<Vec<Booking>> = Store::new(original.clone());

    let committed: bool = run_optimistic(
        || store.replace_all(Vec::new()),
        || async { Err::<(), _>(RemoteError(String::from("HTTP 500"))) },
        Callbacks::new(),
    )
    .await;

    assert!(!committed);
    assert_eq!(store.get(), original);
}

#[tokio::test]
async fn test_remote_is_called_exactly_once_on_success() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1]));
    let calls: AtomicUsize = AtomicUsize::new(0);
    let (predicate, patch) = confirm(1);

    let _committed: bool = run_optimistic(
        || store.update_where(predicate, &patch),
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<(), RemoteError>(()) }
        },
        Callbacks::new(),
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_remote_is_called_exactly_once_on_failure() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1]));
    let calls: AtomicUsize = AtomicUsize::new(0);

    let _committed: bool = run_optimistic(
        || store.remove_where(has_id(1)),
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(RemoteError::network()) }
        },
        Callbacks::new(),
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_match_is_unchanged_before_remote_and_after_rollback() {
    let original: Vec<Booking> = create_test_bookings(&[1, 2]);
    let store: Store<Vec<Booking>> = Store::new(original.clone());
    let reader: Store<Vec<Booking>> = store.clone();
    let mut seen_by_remote: Option<Vec<Booking>> = None;
    let (predicate, patch) = confirm(42);

    let committed: bool = run_optimistic(
        || store.update_where(predicate, &patch),
        || {
            seen_by_remote = Some(reader.get());
            async { Err::<(), _>(RemoteError::network()) }
        },
        Callbacks::new(),
    )
    .await;

    assert!(!committed);
    assert_eq!(seen_by_remote, Some(original.clone()));
    assert_eq!(store.get(), original);
}

#[tokio::test]
async fn test_local_update_is_visible_before_remote_resolves() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1]));
    let (tx, rx) = oneshot::channel::<Result<(), RemoteError>>();
    let (predicate, patch) = confirm(1);

    let mutation = run_optimistic(
        || store.update_where(predicate, &patch),
        || async move { rx.await.unwrap() },
        Callbacks::new(),
    );
    let observer = async {
        tokio::task::yield_now().await;
        let visible: BookingStatus = store.find(has_id(1)).unwrap().status;
        tx.send(Ok(())).unwrap();
        visible
    };

    let (committed, visible_while_pending) = futures::join!(mutation, observer);

    assert!(committed);
    assert_eq!(visible_while_pending, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_phase_observer_sees_commit_path() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1]));
    let mut phases: Vec<Phase> = Vec::new();
    let (predicate, patch) = confirm(1);

    let terminal: Phase = settle(
        || store.update_where(predicate, &patch),
        || async { Ok::<(), RemoteError>(()) },
        Callbacks::labelled("confirm booking").on_phase(|phase| phases.push(phase)),
    )
    .await;

    assert_eq!(terminal, Phase::Committed);
    assert_eq!(
        phases,
        vec![Phase::Applying, Phase::Pending, Phase::Committed]
    );
}

#[tokio::test]
async fn test_phase_observer_sees_rollback_path() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1]));
    let mut phases: Vec<Phase> = Vec::new();

    let terminal: Phase = settle(
        || store.remove_where(has_id(1)),
        || async { Err::<(), _>(RemoteError::network()) },
        Callbacks::new().on_phase(|phase| phases.push(phase)),
    )
    .await;

    assert_eq!(terminal, Phase::RolledBack);
    assert_eq!(
        phases,
        vec![Phase::Applying, Phase::Pending, Phase::RolledBack]
    );
    assert_eq!(booking_ids(&store.get()), vec![1]);
}

#[tokio::test]
async fn test_unkeyed_overlapping_rollback_restores_stale_snapshot() {
    let store: Store<Vec<Booking>> = Store::new(create_test_bookings(&[1, 2]));
    let (tx_first, rx_first) = oneshot::channel::<Result<(), RemoteError>>();
    let (tx_second, rx_second) = oneshot::channel::<Result<(), RemoteError>>();
    let (predicate, patch) = confirm(1);

    let first = run_optimistic(
        || store.update_where(predicate, &patch),
        || async move { rx_first.await.unwrap() },
        Callbacks::labelled("confirm 1"),
    );
    let second = run_optimistic(
        || store.remove_where(has_id(2)),
        || async move { rx_second.await.unwrap() },
        Callbacks::labelled("remove 2"),
    );
    let driver = async {
        tokio::task::yield_now().await;
        tx_second.send(Ok(())).unwrap();
        tokio::task::yield_now().await;
        tx_first.send(Err(RemoteError::network())).unwrap();
    };

    let (first_committed, second_committed, ()) = futures::join!(first, second, driver);

    assert!(!first_committed);
    assert!(second_committed);
    // The first snapshot predates the removal, so its rollback resurrects booking 2
    assert_eq!(store.get(), create_test_bookings(&[1, 2]));
}
