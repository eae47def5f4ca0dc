// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, VecDeque};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphEdge};
use crate::model::StateId;

/// Spacing and origin of the positioned graph.
///
/// Partial configs are accepted; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutConfig {
    /// Vertical axis every layer is centered on.
    pub axis_x: f64,
    /// `y` of layer 0.
    pub origin_y: f64,
    /// Horizontal distance between neighbouring nodes of one layer.
    pub spacing_x: f64,
    /// Vertical distance between layers.
    pub row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { axis_x: 0.0, origin_y: 0.0, spacing_x: 220.0, row_height: 140.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    layer: usize,
    index_in_layer: usize,
}

impl NodePlacement {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index_in_layer(&self) -> usize {
        self.index_in_layer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[schemars(with = "String")]
    id: StateId,
    display_label: String,
    synthetic: bool,
    #[serde(flatten)]
    placement: NodePlacement,
    x: f64,
    y: f64,
}

impl PositionedNode {
    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn placement(&self) -> NodePlacement {
        self.placement
    }

    pub fn layer(&self) -> usize {
        self.placement.layer
    }

    pub fn position(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

/// Graph with every node placed. Serializes as `{ nodes, edges }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, JsonSchema)]
pub struct PositionedGraph {
    nodes: Vec<PositionedNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    layers: Vec<Vec<StateId>>,
}

impl PositionedGraph {
    /// Nodes in graph order (not layer order).
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Node ids per layer, each layer in discovery order.
    pub fn layers(&self) -> &[Vec<StateId>] {
        &self.layers
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Picks the BFS sources: the synthetic start if present, else every node without
/// incoming edges, else (everything sits on a cycle) the first node.
fn roots(graph: &Graph, index: &BTreeMap<&str, usize>, has_incoming: &[bool]) -> Vec<usize> {
    if let Some(start) = graph.start().and_then(|start| index.get(start.as_str())) {
        return vec![*start];
    }
    let roots = (0..has_incoming.len()).filter(|&idx| !has_incoming[idx]).collect::<Vec<_>>();
    if roots.is_empty() {
        return vec![0];
    }
    roots
}

fn place(
    node_layers: &mut [Option<usize>],
    layers: &mut Vec<Vec<usize>>,
    node: usize,
    layer: usize,
) {
    node_layers[node] = Some(layer);
    if layers.len() <= layer {
        layers.resize_with(layer + 1, Vec::new);
    }
    layers[layer].push(node);
}

/// Assigns a layer to every node.
///
/// Multi-source BFS from the roots; a node keeps the first (smallest) layer it is
/// discovered at and is never re-enqueued, so back-edges cannot loop. Nodes the
/// traversal never reaches share one extra layer below the deepest one.
///
/// Returns `(layer per node, nodes per layer in discovery order)`.
fn assign_layers(graph: &Graph) -> (Vec<usize>, Vec<Vec<usize>>) {
    let node_count = graph.nodes().len();
    let index = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id().as_str(), idx))
        .collect::<BTreeMap<_, _>>();

    let mut outgoing = vec![Vec::<usize>::new(); node_count];
    let mut has_incoming = vec![false; node_count];
    for edge in graph.edges() {
        let from = index.get(edge.from().as_str());
        let to = index.get(edge.to().as_str());
        let (Some(&from), Some(&to)) = (from, to) else {
            continue;
        };
        outgoing[from].push(to);
        if from != to {
            has_incoming[to] = true;
        }
    }

    let mut node_layers: Vec<Option<usize>> = vec![None; node_count];
    let mut layers = Vec::<Vec<usize>>::new();
    let mut queue = VecDeque::<usize>::new();

    for root in roots(graph, &index, &has_incoming) {
        if node_layers[root].is_none() {
            place(&mut node_layers, &mut layers, root, 0);
            queue.push_back(root);
        }
    }

    while let Some(node) = queue.pop_front() {
        let layer = node_layers[node].unwrap_or(0);
        for &next in &outgoing[node] {
            if node_layers[next].is_none() {
                place(&mut node_layers, &mut layers, next, layer + 1);
                queue.push_back(next);
            }
        }
    }

    let unreached = (0..node_count).filter(|&idx| node_layers[idx].is_none()).collect::<Vec<_>>();
    if !unreached.is_empty() {
        tracing::debug!(
            unreached = unreached.len(),
            "placing unreachable states in a trailing layer"
        );
        let island_layer = layers.len();
        for node in unreached {
            place(&mut node_layers, &mut layers, node, island_layer);
        }
    }

    let node_layers = node_layers.into_iter().map(|layer| layer.unwrap_or(0)).collect();
    (node_layers, layers)
}

/// Layered top-to-bottom layout.
///
/// - Layer = BFS distance from the root states; unreached nodes share a trailing layer.
/// - Within a layer, nodes keep first-discovery order.
/// - `x = axis_x + (i - (k - 1) / 2) * spacing_x` for node `i` of a `k`-node layer,
///   `y = origin_y + layer * row_height`.
///
/// Never fails; an empty graph yields an empty layout.
pub fn layout_graph(graph: &Graph, config: &LayoutConfig) -> PositionedGraph {
    if graph.is_empty() {
        return PositionedGraph::default();
    }

    let (node_layers, layers) = assign_layers(graph);

    let mut index_in_layer = vec![0usize; graph.nodes().len()];
    for nodes in &layers {
        for (idx, &node) in nodes.iter().enumerate() {
            index_in_layer[node] = idx;
        }
    }

    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let layer = node_layers[idx];
            let width = layers[layer].len() as f64;
            let offset = index_in_layer[idx] as f64 - (width - 1.0) / 2.0;
            PositionedNode {
                id: node.id().clone(),
                display_label: node.display_label().to_owned(),
                synthetic: node.is_synthetic(),
                placement: NodePlacement { layer, index_in_layer: index_in_layer[idx] },
                x: config.axis_x + offset * config.spacing_x,
                y: config.origin_y + layer as f64 * config.row_height,
            }
        })
        .collect::<Vec<_>>();

    let layers = layers
        .iter()
        .map(|nodes| nodes.iter().map(|&node| graph.nodes()[node].id().clone()).collect())
        .collect::<Vec<Vec<StateId>>>();

    tracing::debug!(nodes = nodes.len(), layers = layers.len(), "laid out process graph");
    PositionedGraph { nodes, edges: graph.edges().to_vec(), layers }
}
