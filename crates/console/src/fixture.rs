// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed data for the simulated backend.

use serde::{Deserialize, Serialize};
use std::path::Path;

use innkeep_domain::{Booking, User, UserRole};

use crate::error::ConsoleError;

/// Sample data used when no fixture path is given.
pub const SAMPLE_FIXTURE: &str = include_str!("../fixtures/portal.json");

/// Bookings and users the simulated backend starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Fixture {
    /// Parses a fixture from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a fixture.
    pub fn parse(json: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the fixture at `path`, or the bundled sample when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConsoleError> {
        match path {
            Some(path) => {
                let json: String =
                    std::fs::read_to_string(path).map_err(|source| ConsoleError::FixtureRead {
                        path: path.display().to_string(),
                        source,
                    })?;
                Self::parse(&json)
            }
            None => Self::parse(SAMPLE_FIXTURE),
        }
    }

    /// The first active account holding `role`.
    #[must_use]
    pub fn first_user_with_role(&self, role: UserRole) -> Option<&User> {
        self.users.iter().find(|u| u.role == role && u.is_active)
    }
}
