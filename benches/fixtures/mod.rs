// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::fmt::Write as _;

use procviz::graph::Graph;
use procviz::layout::PositionedGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessParams {
    pub layers: usize,
    pub states_per_layer: usize,
    pub fanout: usize,
    /// Every n-th state gets an edge back to layer 0. Zero disables back edges.
    pub back_edge_every: usize,
    pub actions_per_transition: usize,
}

impl ProcessParams {
    pub const fn new(
        layers: usize,
        states_per_layer: usize,
        fanout: usize,
        back_edge_every: usize,
        actions_per_transition: usize,
    ) -> Self {
        Self { layers, states_per_layer, fanout, back_edge_every, actions_per_transition }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeCyclic,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeCyclic => "large_cyclic",
        }
    }

    pub const fn params(self) -> ProcessParams {
        match self {
            Self::Small => ProcessParams::new(6, 4, 2, 0, 2),
            Self::MediumDense => ProcessParams::new(12, 16, 4, 0, 3),
            Self::LargeCyclic => ProcessParams::new(30, 40, 3, 7, 4),
        }
    }

    pub const ALL: [Case; 3] = [Case::Small, Case::MediumDense, Case::LargeCyclic];
}

fn state_name(layer: usize, idx: usize) -> String {
    format!("l{layer:02}-s{idx:04}")
}

/// Edges of the generated process as `(name, from, to)`. Forward edges only
/// point from one layer to the next; back edges return to layer 0.
fn edges(params: ProcessParams) -> Vec<(String, String, String)> {
    assert!(params.layers >= 2, "layers must be >= 2");
    assert!(params.states_per_layer >= 1, "states_per_layer must be >= 1");

    let fanout = params.fanout.clamp(1, params.states_per_layer);
    let mut out = Vec::new();
    for layer in 0..params.layers - 1 {
        for idx in 0..params.states_per_layer {
            for k in 0..fanout {
                let to_idx = (idx + k) % params.states_per_layer;
                out.push((
                    format!("t{:06}", out.len()),
                    state_name(layer, idx),
                    state_name(layer + 1, to_idx),
                ));
            }
            let ordinal = layer * params.states_per_layer + idx;
            if params.back_edge_every > 0 && ordinal % params.back_edge_every == 0 {
                let name = format!("t{:06}", out.len());
                out.push((name, state_name(layer + 1, idx), state_name(0, idx)));
            }
        }
    }
    out
}

fn write_actions(out: &mut String, key: &str, count: usize, name: &str) {
    out.push_str(key);
    out.push_str(" [");
    for n in 0..count {
        let _ = write!(out, "{{:name :action/{name}-{n}}} ");
    }
    out.push(']');
}

/// Modern (`:format :v3`) document with one entry transition per layer-0 state.
pub fn modern(params: ProcessParams) -> String {
    let mut out = String::from("{:format :v3\n :transitions\n [");
    for idx in 0..params.states_per_layer {
        let _ = write!(
            out,
            "{{:name :transition/enter-{idx} :actor :actor.role/customer :to :state/{}}}\n  ",
            state_name(0, idx)
        );
    }
    for (i, (name, from, to)) in edges(params).into_iter().enumerate() {
        let actor = ["customer", "provider", "operator", "system"][i % 4];
        let _ = write!(out, "{{:name :transition/{name} :actor :actor.role/{actor} ");
        write_actions(&mut out, ":actions", params.actions_per_transition, &name);
        let _ = write!(out, " :from :state/{from} :to :state/{to}}}\n  ");
    }
    out.push_str("]}\n");
    out
}

/// Legacy document with an explicit state set. Ends with a `cancel` transition
/// whose `from` is every layer-1 state.
pub fn legacy(params: ProcessParams) -> String {
    let mut out = String::from("{:process/id :process/bench\n :process/states #{");
    for layer in 0..params.layers {
        for idx in 0..params.states_per_layer {
            let _ = write!(out, ":state/{} ", state_name(layer, idx));
        }
    }
    out.push_str(":state/cancelled}\n :process/transitions\n [");
    for (name, from, to) in edges(params) {
        let _ = write!(out, "{{:transition/id :transition/{name} ");
        write_actions(&mut out, ":transition/actions", params.actions_per_transition, &name);
        let _ = write!(out, " :transition/from :state/{from} :transition/to :state/{to}}}\n  ");
    }
    out.push_str("{:transition/id :transition/cancel :transition/actor :actor.role/operator");
    out.push_str("\n   :transition/from #{");
    for idx in 0..params.states_per_layer {
        let _ = write!(out, ":state/{} ", state_name(1, idx));
    }
    out.push_str("}\n   :transition/to :state/cancelled}]}\n");
    out
}

pub fn checksum_graph(graph: &Graph) -> u64 {
    let mut acc = 0u64;
    for node in graph.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(node.id().as_str().len() as u64);
    }
    for edge in graph.edges() {
        acc = acc.wrapping_mul(131).wrapping_add(edge.id().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(edge.actions().len() as u64);
    }
    acc
}

pub fn checksum_positioned(graph: &PositionedGraph) -> u64 {
    let mut acc = 0u64;
    for node in graph.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(node.layer() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.position().x.to_bits());
    }
    acc.wrapping_add(graph.layers().len() as u64)
}
