// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw backend identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw backend identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Backend identifier of a booking.
    BookingId
);
record_id!(
    /// Backend identifier of a user account.
    UserId
);
record_id!(
    /// Backend identifier of a room.
    RoomId
);

/// Role attached to a user account.
///
/// Staff and admins reach the management dashboard; guests only see their
/// own bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    #[default]
    Guest,
}

impl UserRole {
    /// Converts this role to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Guest => "guest",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "guest" => Ok(Self::Guest),
            _ => Err(DomainError::InvalidUserRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room category as listed on the rooms page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
}

impl RoomType {
    /// Converts this room type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "deluxe" => Ok(Self::Deluxe),
            "suite" => Ok(Self::Suite),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub room_type: RoomType,
    /// Nightly rate in the smallest currency unit.
    pub price_per_night_cents: u64,
    /// Maximum number of guests.
    pub capacity: u8,
    pub is_available: bool,
}

/// A guest's reservation of a room for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub guest_id: UserId,
    pub room_id: RoomId,
    #[serde(with = "iso_date")]
    pub check_in: Date,
    #[serde(with = "iso_date")]
    pub check_out: Date,
    pub guests: u8,
    pub status: BookingStatus,
    pub total_cents: u64,
}

impl Booking {
    /// Number of nights between check-in and check-out.
    ///
    /// Returns zero for an inverted or empty range; `validate_stay` rejects
    /// such bookings before they reach this point.
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days: i64 = (self.check_out - self.check_in).whole_days();
        u32::try_from(days).unwrap_or(0)
    }
}

/// A registered account, as shown on the user-management screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Partial update of a booking.
///
/// Only the fields that are `Some` overwrite the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    /// Creates a patch that only changes the status.
    #[must_use]
    pub const fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Overwrites the fields of `booking` that this patch carries.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(status) = self.status {
            booking.status = status;
        }
    }
}

/// Partial update of a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Creates a patch that only changes the active flag.
    #[must_use]
    pub const fn active(is_active: bool) -> Self {
        Self {
            name: None,
            role: None,
            is_active: Some(is_active),
        }
    }

    /// Creates a patch that only changes the role.
    #[must_use]
    pub const fn role(role: UserRole) -> Self {
        Self {
            name: None,
            role: Some(role),
            is_active: None,
        }
    }

    /// Overwrites the fields of `user` that this patch carries.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}
