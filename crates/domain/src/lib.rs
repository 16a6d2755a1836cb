// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking_status;
mod error;
mod media;
mod section;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_status::BookingStatus;
pub use media::{Crop, MediaTransform, card_image_url};
pub use section::{Amenity, GalleryImage, Page, Section, Testimonial, parse_page, parse_section};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Booking, BookingId, BookingPatch, Room, RoomId, RoomType, User, UserId, UserPatch, UserRole,
};
pub use validation::{find_booking, find_user, validate_stay, validate_user_fields};
