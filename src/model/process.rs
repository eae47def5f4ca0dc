// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::Serialize;
use smallvec::SmallVec;

use super::ids::{StateId, TransitionId};

/// Well-known actor roles. Any other actor string is kept verbatim.
pub mod actor {
    pub const CUSTOMER: &str = "customer";
    pub const PROVIDER: &str = "provider";
    pub const OPERATOR: &str = "operator";
    pub const SYSTEM: &str = "system";
}

/// Source states of a transition. Empty for entry transitions.
pub type FromStates = SmallVec<[StateId; 2]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    id: TransitionId,
    actor: String,
    from: FromStates,
    to: StateId,
    actions: Vec<String>,
    notifications: Vec<String>,
}

impl Transition {
    /// An entry transition (no source states) performed by the system actor.
    pub fn new(id: TransitionId, to: StateId) -> Self {
        Self {
            id,
            actor: actor::SYSTEM.to_owned(),
            from: FromStates::new(),
            to,
            actions: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn set_actor(&mut self, actor: impl Into<String>) {
        self.actor = actor.into();
    }

    /// Adds a source state; repeated states are ignored.
    pub fn add_from(&mut self, state: StateId) {
        if !self.from.contains(&state) {
            self.from.push(state);
        }
    }

    pub fn set_actions(&mut self, actions: Vec<String>) {
        self.actions = actions;
    }

    pub fn set_notifications(&mut self, notifications: Vec<String>) {
        self.notifications = notifications;
    }

    pub fn push_notification(&mut self, notification: impl Into<String>) {
        self.notifications.push(notification.into());
    }

    pub fn id(&self) -> &TransitionId {
        &self.id
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn from(&self) -> &[StateId] {
        &self.from
    }

    pub fn to(&self) -> &StateId {
        &self.to
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn is_entry(&self) -> bool {
        self.from.is_empty()
    }
}

/// Canonical process description, independent of the document's schema shape.
///
/// Built once through [`ProcessModelBuilder`] and read-only afterwards.
/// `states` holds every state a transition mentions, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessModel {
    process_id: Option<String>,
    states: Vec<StateId>,
    transitions: Vec<Transition>,
}

impl ProcessModel {
    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id().as_str() == id)
    }

    pub fn has_entry_transitions(&self) -> bool {
        self.transitions.iter().any(Transition::is_entry)
    }
}

#[derive(Debug, Default)]
pub struct ProcessModelBuilder {
    model: ProcessModel,
    seen_states: BTreeSet<StateId>,
    seen_transitions: BTreeSet<TransitionId>,
}

impl ProcessModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_process_id<T: Into<String>>(&mut self, process_id: Option<T>) {
        self.model.process_id = process_id.map(Into::into);
    }

    pub fn declare_state(&mut self, state: StateId) {
        if self.seen_states.insert(state.clone()) {
            self.model.states.push(state);
        }
    }

    pub fn contains_transition(&self, id: &TransitionId) -> bool {
        self.seen_transitions.contains(id)
    }

    /// Appends `transition`, declaring its endpoints. Returns the transition back
    /// when its id is already taken.
    pub fn push_transition(&mut self, transition: Transition) -> Result<(), Transition> {
        if !self.seen_transitions.insert(transition.id().clone()) {
            return Err(transition);
        }
        for from in transition.from() {
            self.declare_state(from.clone());
        }
        self.declare_state(transition.to().clone());
        self.model.transitions.push(transition);
        Ok(())
    }

    pub fn transition_mut(&mut self, id: &str) -> Option<&mut Transition> {
        self.model.transitions.iter_mut().find(|t| t.id().as_str() == id)
    }

    pub fn build(self) -> ProcessModel {
        self.model
    }
}
