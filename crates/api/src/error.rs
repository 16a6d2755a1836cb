// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use innkeep::MutationError;
use innkeep_domain::DomainError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are what dashboard actions report to the UI. Each one is rendered
/// verbatim in an error toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The backend rejected the session token. The session has been cleared.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    /// The actor's role does not permit the action.
    #[error("Forbidden: '{action}' requires {required_role} role")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Another change to the same record has not settled yet.
    #[error("Another change to record {key} is still being saved")]
    InFlight {
        /// The contested record key.
        key: String,
    },
    /// The backend answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Remote {
        /// The HTTP status code.
        status: u16,
        /// The backend's message, if any.
        message: String,
    },
    /// The request never produced a response.
    #[error("Transport error: {message}")]
    Transport {
        /// A description of the failure.
        message: String,
    },
    /// A response or request body could not be (de)serialized.
    #[error("Malformed body: {message}")]
    Decode {
        /// The decoder's description of the problem.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
        }
    }
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::InFlight { key } => Self::InFlight { key },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}

/// Translates a domain error into an API error.
///
/// Lookups that miss become `NotFound`; everything else is a rule violation
/// named after the rule that failed.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    let rule: &str = match err {
        DomainError::BookingNotFound(id) => {
            return ApiError::NotFound {
                resource_type: String::from("Booking"),
                message: format!("Booking #{id} does not exist"),
            };
        }
        DomainError::UserNotFound(id) => {
            return ApiError::NotFound {
                resource_type: String::from("User"),
                message: format!("User #{id} does not exist"),
            };
        }
        DomainError::RoomNotFound(id) => {
            return ApiError::NotFound {
                resource_type: String::from("Room"),
                message: format!("Room #{id} does not exist"),
            };
        }
        DomainError::InvalidName(_) | DomainError::InvalidEmail(_) => "user_fields",
        DomainError::InvalidUserRole(_) => "user_role",
        DomainError::InvalidRoomType(_) => "room_type",
        DomainError::InvalidBookingStatus { .. } => "booking_status",
        DomainError::InvalidStatusTransition { .. } => "status_transition",
        DomainError::InvalidStayDates { .. } | DomainError::InvalidGuestCount { .. } => "stay",
        DomainError::InvalidSection { .. } => "section",
    };

    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}
