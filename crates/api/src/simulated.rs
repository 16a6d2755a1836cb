// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process stand-in for the REST backend.
//!
//! Serves `/bookings` and `/users` from memory, checks bearer tokens, and can
//! be told to fail so rollbacks can be exercised without a network.

use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

use innkeep_domain::{Booking, BookingId, BookingPatch, User, UserId, UserPatch};

use crate::error::ApiError;
use crate::transport::{Method, Request, Response, Transport};

/// Failure injection and latency settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Probability in `0.0..=1.0` that any authorized request fails with 500.
    pub failure_rate: f64,
    /// Delay before each request is handled.
    pub latency: Duration,
    /// Number of upcoming authorized requests that fail with 503.
    pub fail_next: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.0,
            latency: Duration::ZERO,
            fail_next: 0,
        }
    }
}

#[derive(Debug, Default)]
struct BackendState {
    bookings: Vec<Booking>,
    users: Vec<User>,
    tokens: HashSet<String>,
    config: SimulationConfig,
    requests: Vec<(Method, String)>,
}

/// In-memory backend implementing [`Transport`].
///
/// Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    state: Arc<Mutex<BackendState>>,
}

impl SimulatedBackend {
    /// Creates a backend seeded with `bookings` and `users`.
    #[must_use]
    pub fn new(bookings: Vec<Booking>, users: Vec<User>, config: SimulationConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(BackendState {
                bookings,
                users,
                config,
                ..BackendState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accepts `token` as a valid bearer token.
    pub fn accept_token(&self, token: impl Into<String>) {
        self.state().tokens.insert(token.into());
    }

    /// Forgets every token, as if all sessions expired server-side.
    pub fn revoke_tokens(&self) {
        self.state().tokens.clear();
    }

    /// Makes the next `count` authorized requests fail with 503.
    pub fn fail_next(&self, count: u32) {
        self.state().config.fail_next = count;
    }

    pub fn set_failure_rate(&self, failure_rate: f64) {
        self.state().config.failure_rate = failure_rate.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        self.state().bookings.clone()
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    /// Method and path of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state().requests.clone()
    }

    fn handle(&self, request: &Request) -> Response {
        let mut state = self.state();
        state.requests.push((request.method, request.path.clone()));

        let authorized: bool = request
            .bearer_token()
            .is_some_and(|token| state.tokens.contains(token));
        if !authorized {
            debug!(path = %request.path, "Missing or unknown bearer token");
            return Response::with_message(401, "Unauthorized");
        }

        if state.config.fail_next > 0 {
            state.config.fail_next -= 1;
            warn!(method = %request.method, path = %request.path, "Injected failure");
            return Response::with_message(503, "Service unavailable");
        }
        if state.config.failure_rate > 0.0 && rand::random::<f64>() < state.config.failure_rate {
            warn!(method = %request.method, path = %request.path, "Injected random failure");
            return Response::with_message(500, "Internal server error");
        }

        route(&mut state, request).unwrap_or_else(|response| response)
    }
}

impl Transport for SimulatedBackend {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let latency: Duration = self.state().config.latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(self.handle(&request))
    }
}

type Handled = Result<Response, Response>;

fn route(state: &mut BackendState, request: &Request) -> Handled {
    let segments: Vec<&str> = request
        .path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match (request.method, segments.as_slice()) {
        (Method::Get, ["bookings"]) => to_response(&state.bookings),
        (Method::Patch, ["bookings", id]) => {
            let id: BookingId = BookingId::new(parse_id(id)?);
            let patch: BookingPatch = decode_body(request)?;
            patch_booking(state, id, &patch)
        }
        (Method::Delete, ["bookings", id]) => {
            let id: BookingId = BookingId::new(parse_id(id)?);
            let before: usize = state.bookings.len();
            state.bookings.retain(|b| b.id != id);
            if state.bookings.len() == before {
                return Err(not_found("Booking", id));
            }
            Ok(Response::ok(Value::Null))
        }
        (Method::Get, ["users"]) => to_response(&state.users),
        (Method::Post, ["users"]) => {
            let user: User = decode_body(request)?;
            if state
                .users
                .iter()
                .any(|u| u.id == user.id || u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(Response::with_message(409, "User already exists"));
            }
            state.users.push(user.clone());
            to_response(&user)
        }
        (Method::Patch, ["users", id]) => {
            let id: UserId = UserId::new(parse_id(id)?);
            let patch: UserPatch = decode_body(request)?;
            let user: &mut User = state
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| not_found("User", id))?;
            patch.apply_to(user);
            to_response(&*user)
        }
        (Method::Delete, ["users", id]) => {
            let id: UserId = UserId::new(parse_id(id)?);
            let before: usize = state.users.len();
            state.users.retain(|u| u.id != id);
            if state.users.len() == before {
                return Err(not_found("User", id));
            }
            Ok(Response::ok(Value::Null))
        }
        _ => Err(Response::with_message(
            404,
            format!("No route for {} {}", request.method, request.path),
        )),
    }
}

fn patch_booking(state: &mut BackendState, id: BookingId, patch: &BookingPatch) -> Handled {
    let booking: &mut Booking = state
        .bookings
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| not_found("Booking", id))?;

    // The backend enforces the lifecycle too; a stale client may not skip it
    if let Some(status) = patch.status {
        booking
            .status
            .validate_transition(status)
            .map_err(|err| Response::with_message(422, err.to_string()))?;
    }
    patch.apply_to(booking);
    to_response(&*booking)
}

fn parse_id(raw: &str) -> Result<i64, Response> {
    raw.parse::<i64>()
        .map_err(|_| Response::with_message(400, format!("Invalid id '{raw}'")))
}

fn decode_body<B: serde::de::DeserializeOwned>(request: &Request) -> Result<B, Response> {
    let body: Value = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(body).map_err(|err| Response::with_message(400, err.to_string()))
}

fn to_response<B: serde::Serialize + ?Sized>(body: &B) -> Handled {
    serde_json::to_value(body)
        .map(Response::ok)
        .map_err(|err| Response::with_message(500, err.to_string()))
}

fn not_found(resource: &str, id: impl std::fmt::Display) -> Response {
    Response::with_message(404, format!("{resource} #{id} not found"))
}
