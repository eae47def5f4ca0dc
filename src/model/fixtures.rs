// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{StateId, TransitionId};
use super::process::{actor, ProcessModel, ProcessModelBuilder, Transition};

fn sid(value: &str) -> StateId {
    StateId::new(value).expect("state id")
}

fn transition(id: &str, from: &[&str], to: &str, actor: &str) -> Transition {
    let mut transition = Transition::new(TransitionId::new(id).expect("transition id"), sid(to));
    for state in from {
        transition.add_from(sid(state));
    }
    transition.set_actor(actor);
    transition
}

fn model(states: &[&str], transitions: Vec<Transition>) -> ProcessModel {
    let mut builder = ProcessModelBuilder::new();
    for state in states {
        builder.declare_state(sid(state));
    }
    for transition in transitions {
        builder.push_transition(transition).expect("unique transition id");
    }
    builder.build()
}

/// initial -> pending -> done, with declared states.
pub(crate) fn legacy_three_states() -> ProcessModel {
    let mut builder = ProcessModelBuilder::new();
    builder.set_process_id(Some("simple"));
    for state in ["initial", "pending", "done"] {
        builder.declare_state(sid(state));
    }
    builder
        .push_transition(transition("request", &["initial"], "pending", actor::CUSTOMER))
        .expect("unique transition id");
    builder
        .push_transition(transition("complete", &["pending"], "done", actor::SYSTEM))
        .expect("unique transition id");
    builder.build()
}

/// Entry into `inquiry`, then `inquiry -> pending-payment`.
pub(crate) fn modern_entry() -> ProcessModel {
    model(
        &[],
        vec![
            transition("inquire", &[], "inquiry", actor::CUSTOMER),
            transition("request-payment", &["inquiry"], "pending-payment", actor::CUSTOMER),
        ],
    )
}

pub(crate) fn two_entries() -> ProcessModel {
    model(
        &[],
        vec![
            transition("inquire", &[], "inquiry", actor::CUSTOMER),
            transition("request", &[], "pending", actor::CUSTOMER),
            transition("accept", &["inquiry", "pending"], "accepted", actor::PROVIDER),
        ],
    )
}

pub(crate) fn entry_into_state_named_start() -> ProcessModel {
    model(&[], vec![transition("begin", &[], "start", actor::SYSTEM)])
}

/// A cancel transition reachable from three states, returning to an earlier one.
pub(crate) fn multi_source_cancel() -> ProcessModel {
    let mut cancel =
        transition("cancel", &["requested", "accepted", "delivered"], "cancelled", actor::OPERATOR);
    cancel.set_actions(vec!["cancel-booking".to_owned(), "refund-payment".to_owned()]);
    model(
        &["requested", "accepted", "delivered", "cancelled"],
        vec![
            transition("accept", &["requested"], "accepted", actor::PROVIDER),
            transition("deliver", &["accepted"], "delivered", actor::PROVIDER),
            cancel,
            transition("reopen", &["cancelled"], "requested", actor::OPERATOR),
        ],
    )
}

pub(crate) fn cycle_ab() -> ProcessModel {
    model(
        &[],
        vec![
            transition("ab", &["a"], "b", actor::SYSTEM),
            transition("ba", &["b"], "a", actor::SYSTEM),
        ],
    )
}

pub(crate) fn cycle_abc() -> ProcessModel {
    model(
        &["a", "b", "c"],
        vec![
            transition("ab", &["a"], "b", actor::SYSTEM),
            transition("bc", &["b"], "c", actor::SYSTEM),
            transition("ca", &["c"], "a", actor::SYSTEM),
        ],
    )
}

/// Entry path plus a two-state island unreachable from the start node.
pub(crate) fn entry_with_island() -> ProcessModel {
    model(
        &["orphan"],
        vec![
            transition("enter", &[], "open", actor::CUSTOMER),
            transition("close", &["open"], "closed", actor::PROVIDER),
            transition("drift", &["island-a"], "island-b", actor::SYSTEM),
        ],
    )
}

/// Two roots whose paths meet at different depths.
pub(crate) fn two_roots() -> ProcessModel {
    model(
        &["r1", "r2"],
        vec![
            transition("r1-x", &["r1"], "x", actor::SYSTEM),
            transition("x-y", &["x"], "y", actor::SYSTEM),
            transition("r2-y", &["r2"], "y", actor::SYSTEM),
            transition("y-z", &["y"], "z", actor::SYSTEM),
        ],
    )
}
