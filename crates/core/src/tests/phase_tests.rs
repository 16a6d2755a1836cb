// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ConflictPolicy, Phase};

const ALL: [Phase; 5] = [
    Phase::Idle,
    Phase::Applying,
    Phase::Pending,
    Phase::Committed,
    Phase::RolledBack,
];

#[test]
fn test_forward_transitions_are_allowed() {
    assert!(Phase::Idle.can_transition_to(Phase::Applying));
    assert!(Phase::Applying.can_transition_to(Phase::Pending));
    assert!(Phase::Pending.can_transition_to(Phase::Committed));
    assert!(Phase::Pending.can_transition_to(Phase::RolledBack));
}

#[test]
fn test_terminal_phases_have_no_outgoing_transition() {
    for from in [Phase::Committed, Phase::RolledBack] {
        assert!(from.is_terminal());
        for to in ALL {
            assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
        }
    }
}

#[test]
fn test_no_retry_edge_back_to_pending() {
    assert!(!Phase::RolledBack.can_transition_to(Phase::Pending));
    assert!(!Phase::Pending.can_transition_to(Phase::Pending));
    assert!(!Phase::Idle.can_transition_to(Phase::Pending));
}

#[test]
fn test_non_terminal_phases() {
    assert!(!Phase::Idle.is_terminal());
    assert!(!Phase::Applying.is_terminal());
    assert!(!Phase::Pending.is_terminal());
    assert_eq!(Phase::default(), Phase::Idle);
}

#[test]
fn test_phase_display() {
    assert_eq!(Phase::RolledBack.to_string(), "rolled_back");
    assert_eq!(Phase::Committed.as_str(), "committed");
}

#[test]
fn test_conflict_policy_defaults_to_reject() {
    assert_eq!(ConflictPolicy::default(), ConflictPolicy::Reject);
    assert_eq!(ConflictPolicy::Queue.to_string(), "queue");
}
