// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingId, BookingStatus, DomainError, Room, RoomId, RoomType, User, UserId,
    UserRole, find_booking, find_user, validate_stay, validate_user_fields,
};
use time::macros::date;

fn create_test_user(name: &str, email: &str) -> User {
    User {
        id: UserId::new(1),
        name: String::from(name),
        email: String::from(email),
        role: UserRole::Staff,
        is_active: true,
    }
}

fn create_test_room() -> Room {
    Room {
        id: RoomId::new(100),
        name: String::from("Garden Suite"),
        room_type: RoomType::Suite,
        price_per_night_cents: 25_000,
        capacity: 3,
        is_available: true,
    }
}

fn create_test_booking(guests: u8) -> Booking {
    Booking {
        id: BookingId::new(1),
        guest_id: UserId::new(10),
        room_id: RoomId::new(100),
        check_in: date!(2026 - 06 - 10),
        check_out: date!(2026 - 06 - 12),
        guests,
        status: BookingStatus::Pending,
        total_cents: 50_000,
    }
}

#[test]
fn test_valid_user_passes() {
    let user: User = create_test_user("Grace", "grace@hotel.example");
    assert!(validate_user_fields(&user).is_ok());
}

#[test]
fn test_blank_name_rejected() {
    let user: User = create_test_user("   ", "grace@hotel.example");
    assert!(matches!(
        validate_user_fields(&user),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_malformed_emails_rejected() {
    for email in ["grace", "@hotel.example", "grace@hotel", "grace@.example", "grace@hotel."] {
        let user: User = create_test_user("Grace", email);
        assert!(
            matches!(validate_user_fields(&user), Err(DomainError::InvalidEmail(_))),
            "expected {email} to be rejected"
        );
    }
}

#[test]
fn test_email_domain_with_empty_labels_rejected() {
    for email in ["a@b..", "grace@hotel..example", "grace@hotel.example.", "grace@..example"] {
        let user: User = create_test_user("Grace", email);
        assert!(
            matches!(validate_user_fields(&user), Err(DomainError::InvalidEmail(_))),
            "expected {email} to be rejected"
        );
    }
}

#[test]
fn test_multi_label_email_domain_passes() {
    let user: User = create_test_user("Grace", "grace@mail.hotel.example");
    assert!(validate_user_fields(&user).is_ok());
}

#[test]
fn test_valid_stay_passes() {
    assert!(validate_stay(&create_test_booking(2), &create_test_room()).is_ok());
}

#[test]
fn test_same_day_checkout_rejected() {
    let mut booking: Booking = create_test_booking(2);
    booking.check_out = booking.check_in;
    assert!(matches!(
        validate_stay(&booking, &create_test_room()),
        Err(DomainError::InvalidStayDates { .. })
    ));
}

#[test]
fn test_guest_count_bounds() {
    let room: Room = create_test_room();
    assert!(matches!(
        validate_stay(&create_test_booking(0), &room),
        Err(DomainError::InvalidGuestCount {
            guests: 0,
            capacity: 3
        })
    ));
    assert!(validate_stay(&create_test_booking(3), &room).is_ok());
    assert!(matches!(
        validate_stay(&create_test_booking(4), &room),
        Err(DomainError::InvalidGuestCount { guests: 4, .. })
    ));
}

#[test]
fn test_find_booking_and_user() {
    let bookings: Vec<Booking> = vec![create_test_booking(1)];
    assert_eq!(find_booking(&bookings, BookingId::new(1)).unwrap().guests, 1);
    assert_eq!(
        find_booking(&bookings, BookingId::new(9)),
        Err(DomainError::BookingNotFound(BookingId::new(9)))
    );

    let users: Vec<User> = vec![create_test_user("Grace", "grace@hotel.example")];
    assert!(find_user(&users, UserId::new(1)).is_ok());
    assert_eq!(
        find_user(&users, UserId::new(2)),
        Err(DomainError::UserNotFound(UserId::new(2)))
    );
}
