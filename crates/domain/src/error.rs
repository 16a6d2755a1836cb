// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BookingId, RoomId, UserId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User name is empty or invalid.
    InvalidName(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// User role string is not recognized.
    InvalidUserRole(String),
    /// Room type string is not recognized.
    InvalidRoomType(String),
    /// Booking status string is not recognized.
    InvalidBookingStatus {
        /// The unrecognized status value.
        status: String,
    },
    /// A booking status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Check-out must fall strictly after check-in.
    InvalidStayDates {
        /// The check-in date.
        check_in: time::Date,
        /// The check-out date.
        check_out: time::Date,
    },
    /// Guest count is zero or exceeds the room capacity.
    InvalidGuestCount {
        /// The requested guest count.
        guests: u8,
        /// The room capacity.
        capacity: u8,
    },
    /// A content section could not be decoded.
    InvalidSection {
        /// The decoder's description of the problem.
        reason: String,
    },
    /// Booking does not exist.
    BookingNotFound(BookingId),
    /// User does not exist.
    UserNotFound(UserId),
    /// Room does not exist.
    RoomNotFound(RoomId),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidUserRole(role) => write!(f, "Invalid user role: {role}"),
            Self::InvalidRoomType(room_type) => write!(f, "Invalid room type: {room_type}"),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move booking from '{from}' to '{to}': {reason}")
            }
            Self::InvalidStayDates {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-out date {check_out} must be after check-in date {check_in}"
                )
            }
            Self::InvalidGuestCount { guests, capacity } => {
                write!(
                    f,
                    "Invalid guest count: {guests}. Must be between 1 and {capacity}"
                )
            }
            Self::InvalidSection { reason } => write!(f, "Invalid content section: {reason}"),
            Self::BookingNotFound(id) => write!(f, "Booking {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::RoomNotFound(id) => write!(f, "Room {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
