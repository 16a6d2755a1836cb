// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use innkeep::ConflictPolicy;
use innkeep_domain::{BookingStatus, UserRole};

/// Innkeep Console - replay dashboard actions against a simulated backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON fixture with `bookings` and `users`. Uses the bundled sample if omitted.
    #[arg(short, long)]
    pub fixture: Option<PathBuf>,

    /// Role to sign in as (admin, staff or guest)
    #[arg(short, long, default_value_t = UserRole::Admin)]
    pub role: UserRole,

    /// Probability (0.0 to 1.0) that the action's backend request fails
    #[arg(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// Simulated backend latency in milliseconds
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    /// Fail the next N backend requests made by the action
    #[arg(long, default_value_t = 0)]
    pub fail_next: u32,

    /// Wait for earlier changes to the same record instead of rejecting
    #[arg(long)]
    pub queue: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One dashboard action.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the bookings visible to the signed-in user
    List,
    /// Print every user account (admin only)
    Users,
    /// Move a booking to a new status
    SetStatus {
        /// Booking id
        id: i64,
        /// pending, confirmed, checked_in, checked_out or cancelled
        status: BookingStatus,
    },
    /// Cancel a booking
    Cancel {
        /// Booking id
        id: i64,
    },
    /// Delete a booking (admin only)
    RemoveBooking {
        /// Booking id
        id: i64,
    },
    /// Activate or deactivate a user account (admin only)
    ToggleUser {
        /// User id
        id: i64,
    },
    /// Delete a user account (admin only)
    RemoveUser {
        /// User id
        id: i64,
    },
}

/// Backend and conflict settings derived from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub role: UserRole,
    pub failure_rate: f64,
    pub latency: Duration,
    pub fail_next: u32,
    pub policy: ConflictPolicy,
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            role: args.role,
            failure_rate: args.failure_rate,
            latency: Duration::from_millis(args.latency_ms),
            fail_next: args.fail_next,
            policy: if args.queue {
                ConflictPolicy::Queue
            } else {
                ConflictPolicy::Reject
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            role: UserRole::Admin,
            failure_rate: 0.0,
            latency: Duration::ZERO,
            fail_next: 0,
            policy: ConflictPolicy::Reject,
        }
    }
}
