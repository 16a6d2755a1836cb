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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod in_flight;
mod keyed;
mod mutator;
mod optimistic;
mod patch;
mod phase;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::MutationError;
pub use in_flight::{Claim, InFlightRegistry};
pub use keyed::Keyed;
pub use mutator::{ConflictPolicy, Mutator};
pub use optimistic::{Callbacks, run_optimistic, settle};
pub use patch::{FnPatch, Patch};
pub use phase::Phase;
pub use store::{RecordSnapshot, Snapshot, Store, StoreSnapshot};
