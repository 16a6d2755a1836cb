// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The signed-in session and the accessor the request pipeline reads it through.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use innkeep_domain::User;

use crate::auth::AuthenticatedActor;
use crate::error::AuthError;
use crate::notify::Notifier;

/// How long a session stays valid after sign-in.
pub const DEFAULT_SESSION_TTL: Duration = Duration::days(7);

/// What the request pipeline needs from the session store.
///
/// The pipeline never sees the store itself, only this accessor.
pub trait SessionAccessor: Send + Sync {
    /// The bearer token for the current session, if one is live.
    fn token(&self) -> Option<String>;

    /// Called when the backend rejects the token. Performs global logout.
    fn on_unauthorized(&self);
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// Who signed in.
    pub actor: AuthenticatedActor,
    /// When the token stops being sent.
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Returns true if the session has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// In-memory session store shared by every screen.
///
/// Cloning shares the same session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<Mutex<Option<Session>>>,
    notifier: Notifier,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a signed-out store using the default session lifetime.
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self::with_ttl(notifier, DEFAULT_SESSION_TTL)
    }

    /// Creates a signed-out store whose sessions live for `ttl`.
    #[must_use]
    pub fn with_ttl(notifier: Notifier, ttl: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            notifier,
            ttl,
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signs `user` in, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is deactivated.
    pub fn login(&self, user: &User) -> Result<Session, AuthError> {
        if !user.is_active {
            warn!(user_id = %user.id, "Sign-in refused for deactivated account");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let session: Session = Session {
            token: Self::generate_session_token(),
            actor: AuthenticatedActor::from_user(user),
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };
        *self.current() = Some(session.clone());

        info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(session)
    }

    /// Clears the session. Returns true if one was present.
    pub fn logout(&self) -> bool {
        let previous: Option<Session> = self.current().take();
        if let Some(session) = &previous {
            info!(user_id = %session.actor.id, "Signed out");
        }
        previous.is_some()
    }

    /// The current session, if it has not expired.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.current()
            .as_ref()
            .filter(|session| !session.is_expired_at(OffsetDateTime::now_utc()))
            .cloned()
    }

    /// The signed-in actor, if the session is live.
    #[must_use]
    pub fn actor(&self) -> Option<AuthenticatedActor> {
        self.session().map(|session| session.actor)
    }

    /// Returns true if a live session exists.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Generates a session token.
    ///
    /// Not cryptographically strong; sessions are in-process only.
    fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}

impl SessionAccessor for SessionStore {
    fn token(&self) -> Option<String> {
        let token: Option<String> = self.session().map(|session| session.token);
        if token.is_none() {
            debug!("No live session, sending request without a token");
        }
        token
    }

    fn on_unauthorized(&self) {
        if self.logout() {
            warn!("Backend rejected the session token, signed out");
            self.notifier
                .error("Your session has expired. Please sign in again.");
        }
    }
}
