// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Toast notifications for dashboard users.
//!
//! Toasts are fire-and-forget. They describe the outcome of an action the
//! user just took and are never a source of truth: the visible collections
//! are.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum number of toasts to buffer in the broadcast channel.
/// If a subscriber cannot keep up, older toasts will be dropped.
const TOAST_BUFFER_SIZE: usize = 100;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Broadcaster for toasts.
///
/// A lightweight wrapper around `tokio::sync::broadcast`; cloning shares
/// the channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Toast>,
}

impl Notifier {
    /// Creates a new notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(TOAST_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts a toast to every subscriber.
    ///
    /// If nobody is subscribed the toast is silently dropped.
    pub fn notify(&self, toast: Toast) {
        match self.tx.send(toast) {
            Ok(count) => {
                debug!(receivers = count, "Broadcast toast");
            }
            Err(broadcast::error::SendError(toast)) => {
                debug!(?toast, "No receivers for toast");
            }
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Toast::success(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Toast::info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Toast::error(message));
    }

    /// Subscribes to toasts broadcast from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
