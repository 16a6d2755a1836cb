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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod booking_board;
mod error;
mod notify;
mod pipeline;
mod session;
mod simulated;
mod transport;
mod user_board;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use booking_board::BookingBoard;
pub use error::{ApiError, AuthError, translate_domain_error};
pub use notify::{Notifier, Toast, ToastLevel};
pub use pipeline::RequestPipeline;
pub use session::{DEFAULT_SESSION_TTL, Session, SessionAccessor, SessionStore};
pub use simulated::{SimulatedBackend, SimulationConfig};
pub use transport::{AUTHORIZATION, Method, Request, Response, Transport};
pub use user_board::UserBoard;
