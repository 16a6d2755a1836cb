// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{Booking, BookingId, User, UserId};

/// A record with a stable identity inside a collection.
///
/// Record-scoped snapshots use the key to find their records again at
/// rollback time, after other records may have been changed around them.
pub trait Keyed {
    type Key: PartialEq + Clone;

    /// The identity of this record.
    fn key(&self) -> Self::Key;
}

impl Keyed for Booking {
    type Key = BookingId;

    fn key(&self) -> BookingId {
        self.id
    }
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}
