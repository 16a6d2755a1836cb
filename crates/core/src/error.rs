// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by the keyed mutator before a mutation starts.
///
/// Failures of the remote call itself are never wrapped here; they reach the
/// caller's failure callback unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Another mutation on the same record has not settled yet.
    #[error("A mutation is already in flight for record {key}")]
    InFlight {
        /// The contested record key.
        key: String,
    },
}
