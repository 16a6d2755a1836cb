// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wires a signed-in session, the simulated backend and both boards together.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use innkeep_api::{
    ApiError, AuthenticatedActor, BookingBoard, Notifier, RequestPipeline, SessionStore,
    SimulatedBackend, SimulationConfig, Toast, UserBoard,
};
use innkeep_domain::{BookingId, UserId};

use crate::cli::{Command, Settings};
use crate::error::ConsoleError;
use crate::fixture::Fixture;

type Pipeline = RequestPipeline<SimulatedBackend, SessionStore>;

/// What an action left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// False if the backend refused and the change was rolled back.
    pub committed: bool,
    /// The visible collection after the action settled.
    pub listing: Value,
}

/// A signed-in operator session against an in-process backend.
pub struct Console {
    backend: SimulatedBackend,
    notifier: Notifier,
    actor: AuthenticatedActor,
    settings: Settings,
    bookings: BookingBoard<SimulatedBackend, SessionStore>,
    users: UserBoard<SimulatedBackend, SessionStore>,
}

impl Console {
    /// Seeds the backend from `fixture` and signs in as the first active
    /// account with the requested role.
    ///
    /// # Errors
    ///
    /// Returns an error if no such account exists or sign-in fails.
    pub fn start(fixture: Fixture, settings: Settings) -> Result<Self, ConsoleError> {
        let user = fixture
            .first_user_with_role(settings.role)
            .cloned()
            .ok_or(ConsoleError::NoUserWithRole(settings.role))?;

        // Failures are armed per action so the initial load is not affected
        let backend: SimulatedBackend = SimulatedBackend::new(
            fixture.bookings,
            fixture.users,
            SimulationConfig {
                latency: settings.latency,
                ..SimulationConfig::default()
            },
        );
        let notifier: Notifier = Notifier::new();
        let sessions: SessionStore = SessionStore::new(notifier.clone());

        let session = sessions.login(&user)?;
        backend.accept_token(session.token);
        info!(user = %user.name, role = %user.role, "Signed in");

        let pipeline: Arc<Pipeline> = Arc::new(RequestPipeline::new(backend.clone(), sessions));
        Ok(Self {
            bookings: BookingBoard::new(Arc::clone(&pipeline), notifier.clone(), settings.policy),
            users: UserBoard::new(pipeline, notifier.clone(), settings.policy),
            backend,
            notifier,
            actor: session.actor,
            settings,
        })
    }

    /// Subscribes to the toasts actions raise.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.notifier.subscribe()
    }

    fn arm_failures(&self) {
        if self.settings.fail_next > 0 {
            self.backend.fail_next(self.settings.fail_next);
        }
        self.backend.set_failure_rate(self.settings.failure_rate);
        debug!(
            fail_next = self.settings.fail_next,
            failure_rate = self.settings.failure_rate,
            "Armed backend failures"
        );
    }

    fn bookings_listing(&self, committed: bool) -> Result<Outcome, ApiError> {
        Ok(Outcome {
            committed,
            listing: serde_json::to_value(self.bookings.bookings().get())?,
        })
    }

    fn users_listing(&self, committed: bool) -> Result<Outcome, ApiError> {
        Ok(Outcome {
            committed,
            listing: serde_json::to_value(self.users.users().get())?,
        })
    }

    /// Loads the screen the command acts on, then runs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the load fails or the action is refused before
    /// anything was applied.
    pub async fn run(&self, command: &Command) -> Result<Outcome, ApiError> {
        match *command {
            Command::List => {
                self.bookings.load(&self.actor).await?;
                self.bookings_listing(true)
            }
            Command::Users => {
                self.users.load(&self.actor).await?;
                self.users_listing(true)
            }
            Command::SetStatus { id, status } => {
                self.bookings.load(&self.actor).await?;
                self.arm_failures();
                let committed: bool = self
                    .bookings
                    .set_status(&self.actor, BookingId::new(id), status)
                    .await?;
                self.bookings_listing(committed)
            }
            Command::Cancel { id } => {
                self.bookings.load(&self.actor).await?;
                self.arm_failures();
                let committed: bool = self.bookings.cancel(&self.actor, BookingId::new(id)).await?;
                self.bookings_listing(committed)
            }
            Command::RemoveBooking { id } => {
                self.bookings.load(&self.actor).await?;
                self.arm_failures();
                let committed: bool = self.bookings.remove(&self.actor, BookingId::new(id)).await?;
                self.bookings_listing(committed)
            }
            Command::ToggleUser { id } => {
                self.users.load(&self.actor).await?;
                self.arm_failures();
                let committed: bool = self
                    .users
                    .toggle_active(&self.actor, UserId::new(id))
                    .await?;
                self.users_listing(committed)
            }
            Command::RemoveUser { id } => {
                self.users.load(&self.actor).await?;
                self.arm_failures();
                let committed: bool = self.users.remove(&self.actor, UserId::new(id)).await?;
                self.users_listing(committed)
            }
        }
    }
}
