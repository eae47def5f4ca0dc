// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Abstract process graph: one node per state, one edge per (transition, source state).
//!
//! Nodes carry no coordinates here; see [`crate::layout`].

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::Serialize;

use crate::model::{actor, ProcessModel, StateId, TransitionId};

/// Preferred id of the synthetic node that entry transitions start from.
pub const START_STATE: &str = "start";

/// Color key of an edge, derived from its actor. Unknown actors map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeColor {
    Customer,
    Provider,
    Operator,
    System,
    Other,
}

impl EdgeColor {
    pub fn for_actor(actor: &str) -> Self {
        match actor {
            actor::CUSTOMER => Self::Customer,
            actor::PROVIDER => Self::Provider,
            actor::OPERATOR => Self::Operator,
            actor::SYSTEM => Self::System,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Provider => "provider",
            Self::Operator => "operator",
            Self::System => "system",
            Self::Other => "other",
        }
    }

    /// Suggested stroke color for renderers without their own palette.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Customer => "#2563eb",
            Self::Provider => "#16a34a",
            Self::Operator => "#d97706",
            Self::System => "#6b7280",
            Self::Other => "#9333ea",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[schemars(with = "String")]
    id: StateId,
    display_label: String,
    synthetic: bool,
}

impl GraphNode {
    fn new(id: StateId, synthetic: bool) -> Self {
        let display_label = if synthetic { "Start".to_owned() } else { display_label(id.as_str()) };
        Self { id, display_label, synthetic }
    }

    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// True for the implicit start node of entry transitions.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    id: String,
    #[schemars(with = "String")]
    transition_id: TransitionId,
    #[schemars(with = "String")]
    from: StateId,
    #[schemars(with = "String")]
    to: StateId,
    label: String,
    color_key: EdgeColor,
    actor: String,
    actions: Vec<String>,
    notifications: Vec<String>,
}

impl GraphEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transition_id(&self) -> &TransitionId {
        &self.transition_id
    }

    pub fn from(&self) -> &StateId {
        &self.from
    }

    pub fn to(&self) -> &StateId {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color_key(&self) -> EdgeColor {
        self.color_key
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    start: Option<StateId>,
}

impl Graph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// The synthetic start node, when the process has entry transitions.
    pub fn start(&self) -> Option<&StateId> {
        self.start.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// `pending-payment` -> `pending payment`.
fn display_label(id: &str) -> String {
    id.chars().map(|c| if matches!(c, '-' | '_') { ' ' } else { c }).collect()
}

/// `<transition>@<source>`. A literal `@` or `\` inside either part is
/// backslash-escaped, so distinct pairs never share an id.
fn edge_id(transition: &str, from: &str) -> String {
    fn push_escaped(id: &mut String, part: &str) {
        for ch in part.chars() {
            if matches!(ch, '@' | '\\') {
                id.push('\\');
            }
            id.push(ch);
        }
    }

    let mut id = String::with_capacity(transition.len() + from.len() + 1);
    push_escaped(&mut id, transition);
    id.push('@');
    push_escaped(&mut id, from);
    id
}

fn unique_start_id(taken: &BTreeSet<&str>) -> String {
    let mut id = START_STATE.to_owned();
    while taken.contains(id.as_str()) {
        id.push('*');
    }
    id
}

/// Builds the abstract graph for `model`.
///
/// Every edge endpoint is guaranteed to be a node: entry transitions get a shared
/// synthetic start node, and any state missing from `model.states()` is added.
pub fn build_graph(model: &ProcessModel) -> Graph {
    let mut nodes = Vec::<GraphNode>::with_capacity(model.states().len() + 1);
    let mut node_ids = BTreeSet::<StateId>::new();

    let start = if model.has_entry_transitions() {
        let taken = model.states().iter().map(StateId::as_str).collect::<BTreeSet<_>>();
        // `unique_start_id` never yields an empty id.
        StateId::new(unique_start_id(&taken)).ok()
    } else {
        None
    };
    if let Some(start) = &start {
        node_ids.insert(start.clone());
        nodes.push(GraphNode::new(start.clone(), true));
    }

    for state in model.states() {
        if node_ids.insert(state.clone()) {
            nodes.push(GraphNode::new(state.clone(), false));
        }
    }

    let mut edges = Vec::<GraphEdge>::new();
    for transition in model.transitions() {
        let sources = match (&start, transition.is_entry()) {
            (Some(start), true) => std::slice::from_ref(start),
            _ => transition.from(),
        };
        for from in sources {
            for endpoint in [from, transition.to()] {
                if node_ids.insert(endpoint.clone()) {
                    nodes.push(GraphNode::new(endpoint.clone(), false));
                }
            }
            edges.push(GraphEdge {
                id: edge_id(transition.id().as_str(), from.as_str()),
                transition_id: transition.id().clone(),
                from: from.clone(),
                to: transition.to().clone(),
                label: transition.id().to_string(),
                color_key: EdgeColor::for_actor(transition.actor()),
                actor: transition.actor().to_owned(),
                actions: transition.actions().to_vec(),
                notifications: transition.notifications().to_vec(),
            });
        }
    }

    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built process graph");
    Graph { nodes, edges, start }
}
