// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{Booking, BookingPatch, User, UserPatch};

/// A partial update that can be merged into a record.
///
/// This is the typed counterpart of spreading a patch object over a record:
/// fields the patch carries overwrite the record, everything else is kept.
pub trait Patch<T> {
    /// Merges this patch into `target`.
    fn apply_to(&self, target: &mut T);
}

/// Adapts a closure into a [`Patch`].
#[derive(Debug, Clone, Copy)]
pub struct FnPatch<F>(pub F);

impl<T, F> Patch<T> for FnPatch<F>
where
    F: Fn(&mut T),
{
    fn apply_to(&self, target: &mut T) {
        (self.0)(target);
    }
}

impl Patch<Booking> for BookingPatch {
    fn apply_to(&self, target: &mut Booking) {
        Self::apply_to(self, target);
    }
}

impl Patch<User> for UserPatch {
    fn apply_to(&self, target: &mut User) {
        Self::apply_to(self, target);
    }
}
