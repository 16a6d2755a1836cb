// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::MutationError;
use innkeep_domain::{Booking, BookingId, BookingStatus, RoomId, User, UserId, UserRole};
use time::macros::date;

pub fn create_test_booking(id: i64, status: BookingStatus) -> Booking {
    Booking {
        id: BookingId::new(id),
        guest_id: UserId::new(100 + id),
        room_id: RoomId::new(10),
        check_in: date!(2026 - 03 - 14),
        check_out: date!(2026 - 03 - 17),
        guests: 2,
        status,
        total_cents: 45_000,
    }
}

pub fn create_test_bookings(ids: &[i64]) -> Vec<Booking> {
    ids.iter()
        .map(|id| create_test_booking(*id, BookingStatus::Pending))
        .collect()
}

pub fn create_test_user(id: i64, is_active: bool) -> User {
    User {
        id: UserId::new(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        role: UserRole::Staff,
        is_active,
    }
}

pub fn booking_ids(bookings: &[Booking]) -> Vec<i64> {
    bookings.iter().map(|b| b.id.value()).collect()
}

pub fn has_id(id: i64) -> impl Fn(&Booking) -> bool {
    move |booking| booking.id == BookingId::new(id)
}

/// Stand-in for a rejected backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError(pub String);

impl RemoteError {
    pub fn network() -> Self {
        Self(String::from("network"))
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MutationError> for RemoteError {
    fn from(err: MutationError) -> Self {
        Self(err.to_string())
    }
}
