// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Booking, BookingId, Room, User, UserId};

/// Validates that a user's basic field constraints are met.
///
/// This function checks field shape only. It does NOT check for email
/// uniqueness (that requires the backend).
///
/// # Arguments
///
/// * `user` - The user to validate
///
/// # Errors
///
/// Returns an error if:
/// - The user's name is blank
/// - The user's email has no `@`, an empty local part, or a domain that is
///   not made of two or more non-empty dot-separated labels
pub fn validate_user_fields(user: &User) -> Result<(), DomainError> {
    if user.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let Some((local, domain)) = user.email.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' is missing '@'",
            user.email
        )));
    };

    if local.is_empty() {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' has an empty local part",
            user.email
        )));
    }

    // Rule: at least two dot-separated labels, none of them empty
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' has an invalid domain",
            user.email
        )));
    }

    Ok(())
}

/// Validates a booking's stay against the room it reserves.
///
/// # Errors
///
/// Returns an error if:
/// - Check-out is not strictly after check-in
/// - The guest count is zero or exceeds the room capacity
pub fn validate_stay(booking: &Booking, room: &Room) -> Result<(), DomainError> {
    if booking.check_out <= booking.check_in {
        return Err(DomainError::InvalidStayDates {
            check_in: booking.check_in,
            check_out: booking.check_out,
        });
    }

    if booking.guests == 0 || booking.guests > room.capacity {
        return Err(DomainError::InvalidGuestCount {
            guests: booking.guests,
            capacity: room.capacity,
        });
    }

    Ok(())
}

/// Finds a booking by id in a visible collection.
///
/// # Errors
///
/// Returns `DomainError::BookingNotFound` if no booking has the id.
pub fn find_booking(bookings: &[Booking], id: BookingId) -> Result<&Booking, DomainError> {
    bookings
        .iter()
        .find(|b| b.id == id)
        .ok_or(DomainError::BookingNotFound(id))
}

/// Finds a user by id in a visible collection.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if no user has the id.
pub fn find_user(users: &[User], id: UserId) -> Result<&User, DomainError> {
    users
        .iter()
        .find(|u| u.id == id)
        .ok_or(DomainError::UserNotFound(id))
}
