// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bookings screen: status changes and deletions.

use std::sync::Arc;
use tracing::{debug, info};

use innkeep::{Callbacks, ConflictPolicy, Mutator, Store};
use innkeep_domain::{Booking, BookingId, BookingPatch, BookingStatus, find_booking};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::pipeline::RequestPipeline;
use crate::session::SessionAccessor;
use crate::transport::{Request, Transport};

/// Controller for the bookings list shown on the dashboards.
///
/// Every action is authorized and checked against the booking lifecycle
/// before anything is applied. Accepted actions update the visible list
/// at once and roll it back if the backend refuses.
pub struct BookingBoard<T, A> {
    pipeline: Arc<RequestPipeline<T, A>>,
    bookings: Store<Vec<Booking>>,
    mutator: Mutator<BookingId>,
    notifier: Notifier,
}

impl<T, A> BookingBoard<T, A>
where
    T: Transport,
    A: SessionAccessor,
{
    #[must_use]
    pub fn new(
        pipeline: Arc<RequestPipeline<T, A>>,
        notifier: Notifier,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            pipeline,
            bookings: Store::default(),
            mutator: Mutator::new(policy),
            notifier,
        }
    }

    /// The visible bookings.
    #[must_use]
    pub const fn bookings(&self) -> &Store<Vec<Booking>> {
        &self.bookings
    }

    /// Returns true while a change to booking `id` is being saved.
    #[must_use]
    pub fn is_saving(&self, id: BookingId) -> bool {
        self.mutator.is_in_flight(&id)
    }

    /// Fetches the bookings the actor may see and replaces the visible list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load(&self, actor: &AuthenticatedActor) -> Result<usize, ApiError> {
        let fetched: Vec<Booking> = self
            .pipeline
            .fetch(Request::get("/bookings"))
            .await
            .inspect_err(|err| self.notifier.error(format!("Could not load bookings: {err}")))?;

        let visible: Vec<Booking> = AuthorizationService::visible_bookings(actor, fetched);
        let count: usize = visible.len();
        let _previous = self.bookings.replace_all(visible);

        debug!(count, actor = %actor.id, "Loaded bookings");
        Ok(count)
    }

    fn check_transition(
        &self,
        actor: &AuthenticatedActor,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(), ApiError> {
        let current: Booking = self
            .bookings
            .read(|bookings| find_booking(bookings, id).cloned())?;

        if status == BookingStatus::Cancelled {
            AuthorizationService::authorize_cancel_booking(actor, &current)?;
        } else {
            AuthorizationService::authorize_update_booking_status(actor)?;
        }
        current.status.validate_transition(status)?;

        info!(
            booking_id = %id,
            from = %current.status,
            to = %status,
            actor = %actor.id,
            "Updating booking status"
        );
        Ok(())
    }

    /// Moves a booking to `status`.
    ///
    /// Cancelling is open to the booking's own guest; every other transition
    /// needs Staff or Admin. The checks run once the booking is claimed, so a
    /// change queued behind another one is judged on the status that change
    /// left behind.
    ///
    /// Returns `Ok(true)` once the backend confirmed, `Ok(false)` if it
    /// refused and the change was rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if:
    /// - the booking is not visible
    /// - the actor may not perform the transition
    /// - the lifecycle does not allow it
    /// - another change to the booking is still being saved
    pub async fn set_status(
        &self,
        actor: &AuthenticatedActor,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<bool, ApiError> {
        let patch: BookingPatch = BookingPatch::status(status);
        let request: Request = Request::patch(format!("/bookings/{id}"), &patch)?;

        self.mutator
            .run_prepared(
                &[id],
                || self.check_transition(actor, id, status),
                |_| self.bookings.update_records(|b: &Booking| b.id == id, &patch),
                |_| self.pipeline.fetch::<Booking>(request),
                Callbacks::labelled(format!("booking {id} status {status}"))
                    .on_success(|saved: Booking| {
                        self.notifier
                            .success(format!("Booking #{} is now {}", saved.id, saved.status));
                    })
                    .on_failure(|err: ApiError| {
                        self.notifier
                            .error(format!("Could not update booking #{id}: {err}"));
                    }),
            )
            .await
    }

    /// Cancels a booking. Shorthand for [`BookingBoard::set_status`].
    ///
    /// # Errors
    ///
    /// See [`BookingBoard::set_status`].
    pub async fn cancel(
        &self,
        actor: &AuthenticatedActor,
        id: BookingId,
    ) -> Result<bool, ApiError> {
        self.set_status(actor, id, BookingStatus::Cancelled).await
    }

    /// Deletes a booking outright.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the list, if the booking is not
    /// visible, the actor is not an admin, or the booking is being saved.
    pub async fn remove(
        &self,
        actor: &AuthenticatedActor,
        id: BookingId,
    ) -> Result<bool, ApiError> {
        AuthorizationService::authorize_delete_booking(actor)?;
        let request: Request = Request::delete(format!("/bookings/{id}"));

        let committed: bool = self
            .mutator
            .run_prepared(
                &[id],
                || {
                    self.bookings
                        .read(|bookings| find_booking(bookings, id).map(|_| ()))?;
                    info!(booking_id = %id, actor = %actor.id, "Deleting booking");
                    Ok::<(), ApiError>(())
                },
                |_| self.bookings.remove_records(|b: &Booking| b.id == id),
                |_| self.pipeline.send(request),
                Callbacks::labelled(format!("delete booking {id}"))
                    .on_success(|_| self.notifier.success(format!("Booking #{id} deleted")))
                    .on_failure(|err: ApiError| {
                        self.notifier
                            .error(format!("Could not delete booking #{id}: {err}"));
                    }),
            )
            .await?;

        Ok(committed)
    }
}
