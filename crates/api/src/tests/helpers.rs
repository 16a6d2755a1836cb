// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use time::macros::date;
use tokio::sync::broadcast;

use innkeep::ConflictPolicy;
use innkeep_domain::{Booking, BookingId, BookingStatus, RoomId, User, UserId, UserRole};

use crate::{
    ApiError, AuthenticatedActor, BookingBoard, Notifier, Request, RequestPipeline, Response,
    SessionStore, SimulatedBackend, SimulationConfig, Toast, Transport, UserBoard,
};

pub fn create_test_user(id: i64, name: &str, role: UserRole) -> User {
    User {
        id: UserId::new(id),
        name: String::from(name),
        email: format!("{}@innkeep.test", name.to_lowercase().replace(' ', ".")),
        role,
        is_active: true,
    }
}

pub fn create_test_admin() -> User {
    create_test_user(1, "Ada Admin", UserRole::Admin)
}

pub fn create_test_staff() -> User {
    create_test_user(2, "Sam Staff", UserRole::Staff)
}

pub fn create_test_guest() -> User {
    create_test_user(3, "Gail Guest", UserRole::Guest)
}

pub fn create_test_users() -> Vec<User> {
    vec![
        create_test_admin(),
        create_test_staff(),
        create_test_guest(),
        create_test_user(4, "Otto Other", UserRole::Guest),
    ]
}

pub fn create_test_booking(id: i64, guest_id: i64, status: BookingStatus) -> Booking {
    Booking {
        id: BookingId::new(id),
        guest_id: UserId::new(guest_id),
        room_id: RoomId::new(201),
        check_in: date!(2026 - 07 - 01),
        check_out: date!(2026 - 07 - 04),
        guests: 2,
        status,
        total_cents: 54_000,
    }
}

/// Two bookings for the test guest, two for someone else.
pub fn create_test_bookings() -> Vec<Booking> {
    vec![
        create_test_booking(10, 3, BookingStatus::Pending),
        create_test_booking(11, 3, BookingStatus::Confirmed),
        create_test_booking(12, 4, BookingStatus::CheckedIn),
        create_test_booking(13, 4, BookingStatus::Cancelled),
    ]
}

pub type TestPipeline = RequestPipeline<SimulatedBackend, SessionStore>;

pub struct TestPortal {
    pub backend: SimulatedBackend,
    pub sessions: SessionStore,
    pub notifier: Notifier,
    pub pipeline: Arc<TestPipeline>,
}

impl TestPortal {
    /// Signs `user` in on both ends and returns the actor.
    pub fn sign_in(&self, user: &User) -> AuthenticatedActor {
        let session = self.sessions.login(user).expect("Failed to sign in");
        self.backend.accept_token(session.token);
        session.actor
    }

    pub fn booking_board(
        &self,
        policy: ConflictPolicy,
    ) -> BookingBoard<SimulatedBackend, SessionStore> {
        BookingBoard::new(Arc::clone(&self.pipeline), self.notifier.clone(), policy)
    }

    pub fn user_board(&self, policy: ConflictPolicy) -> UserBoard<SimulatedBackend, SessionStore> {
        UserBoard::new(Arc::clone(&self.pipeline), self.notifier.clone(), policy)
    }
}

pub fn setup_test_portal_with(config: SimulationConfig) -> TestPortal {
    let notifier: Notifier = Notifier::new();
    let backend: SimulatedBackend =
        SimulatedBackend::new(create_test_bookings(), create_test_users(), config);
    let sessions: SessionStore = SessionStore::new(notifier.clone());
    let pipeline: Arc<TestPipeline> =
        Arc::new(RequestPipeline::new(backend.clone(), sessions.clone()));
    TestPortal {
        backend,
        sessions,
        notifier,
        pipeline,
    }
}

pub fn setup_test_portal() -> TestPortal {
    setup_test_portal_with(SimulationConfig::default())
}

pub fn drain_toasts(rx: &mut broadcast::Receiver<Toast>) -> Vec<Toast> {
    let mut toasts: Vec<Toast> = Vec::new();
    while let Ok(toast) = rx.try_recv() {
        toasts.push(toast);
    }
    toasts
}

/// Transport that records requests and replays canned responses.
///
/// Once the canned responses run out, every request fails at the transport.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Response>>,
    seen: Mutex<Vec<Request>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        self.seen.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport {
                message: String::from("connection refused"),
            })
    }
}
