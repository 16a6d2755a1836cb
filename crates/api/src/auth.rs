// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authenticated actors and role-based authorization.

use innkeep_domain::{Booking, User, UserId, UserRole};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// - Admin: full access, including user management and deleting bookings.
/// - Staff: front-desk operations on any booking.
/// - Guest: may view and cancel only their own bookings.
pub type Role = UserRole;

/// A signed-in user acting on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user account behind this actor.
    pub id: UserId,
    /// Display name, used in toasts and logs.
    pub name: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: UserId, name: String, role: Role) -> Self {
        Self { id, name, role }
    }

    /// Creates the actor for a user account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.name.clone(), user.role)
    }

    /// Returns true if this actor reaches the management dashboard.
    #[must_use]
    pub const fn is_staff_or_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Staff)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may move a booking through its lifecycle.
    ///
    /// Admin and Staff actors may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a guest.
    pub fn authorize_update_booking_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Guest => Err(AuthError::Unauthorized {
                action: String::from("update_booking_status"),
                required_role: String::from("Staff"),
            }),
        }
    }

    /// Checks if an actor may cancel a booking.
    ///
    /// Admin and Staff actors may cancel any booking; guests only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if a guest targets someone else's booking.
    pub fn authorize_cancel_booking(
        actor: &AuthenticatedActor,
        booking: &Booking,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Guest if booking.guest_id == actor.id => Ok(()),
            Role::Guest => Err(AuthError::Unauthorized {
                action: String::from("cancel_booking"),
                required_role: String::from("Staff"),
            }),
        }
    }

    /// Checks if an actor may delete a booking outright.
    ///
    /// Only Admin actors may delete bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_delete_booking(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff | Role::Guest => Err(AuthError::Unauthorized {
                action: String::from("delete_booking"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may list, create, update or delete user accounts.
    ///
    /// Only Admin actors may manage users.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_users(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff | Role::Guest => Err(AuthError::Unauthorized {
                action: String::from("manage_users"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may see a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if a guest asks for someone else's booking.
    pub fn authorize_view_booking(
        actor: &AuthenticatedActor,
        booking: &Booking,
    ) -> Result<(), AuthError> {
        if actor.is_staff_or_admin() || booking.guest_id == actor.id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("view_booking"),
            required_role: String::from("Staff"),
        })
    }

    /// Keeps only the bookings the actor may see.
    #[must_use]
    pub fn visible_bookings(actor: &AuthenticatedActor, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|booking| Self::authorize_view_booking(actor, booking).is_ok())
            .collect()
    }
}
