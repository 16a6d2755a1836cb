// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_api::AuthError;
use innkeep_domain::UserRole;
use thiserror::Error;

/// Errors that stop the console before an action runs.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Failed to read fixture {path}: {source}")]
    FixtureRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed fixture: {0}")]
    FixtureParse(#[from] serde_json::Error),
    #[error("Fixture has no active {0} account to sign in with")]
    NoUserWithRole(UserRole),
    #[error(transparent)]
    SignIn(#[from] AuthError),
}
