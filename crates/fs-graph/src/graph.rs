//! Evaluation graph data structures.

use core::fmt;
use std::collections::{BTreeSet, HashMap};

use fs_core::{StreamId, UnitId};
use petgraph::Direction;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

/// Node weight: the unit a graph node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNode {
    pub id: UnitId,
    pub name: String,
}

impl fmt::Display for UnitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Edge weight: the fully-connected stream an edge stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEdge {
    pub id: StreamId,
    pub name: String,
}

impl fmt::Display for StreamEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub type UnitGraph = DiGraph<UnitNode, StreamEdge>;

/// Directed multigraph of unit dependencies derived from a flowsheet.
///
/// One node per unit (node index order = flowsheet unit order), one edge
/// source -> sink per fully-connected material stream. Self-loops and
/// parallel edges are kept.
#[derive(Debug, Clone, Default)]
pub struct EvaluationGraph {
    pub(crate) graph: UnitGraph,
    pub(crate) index: HashMap<String, NodeIndex>,
}

impl EvaluationGraph {
    /// The underlying petgraph graph.
    pub fn inner(&self) -> &UnitGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Name of the unit behind a node.
    ///
    /// Panics if `node` does not belong to this graph.
    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node].name
    }

    pub fn unit_id(&self, node: NodeIndex) -> Option<UnitId> {
        self.graph.node_weight(node).map(|n| n.id)
    }

    /// Unit names in node order.
    pub fn unit_names(&self) -> Vec<&str> {
        self.graph.node_weights().map(|n| n.name.as_str()).collect()
    }

    /// Directed edge multiset as (source, sink) names, in stream order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (self.name(e.source()), self.name(e.target())))
            .collect()
    }

    /// Distinct predecessors of a node (a self-loop counts the node itself).
    pub fn predecessor_set(&self, node: NodeIndex) -> BTreeSet<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .collect()
    }

    /// Distinct successors of a node.
    pub fn successor_set(&self, node: NodeIndex) -> BTreeSet<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect()
    }

    /// Names of the distinct predecessors of a unit, sorted.
    pub fn predecessors(&self, name: &str) -> Vec<&str> {
        self.names_sorted(self.node_index(name).map(|n| self.predecessor_set(n)))
    }

    /// Names of the distinct successors of a unit, sorted.
    pub fn successors(&self, name: &str) -> Vec<&str> {
        self.names_sorted(self.node_index(name).map(|n| self.successor_set(n)))
    }

    fn names_sorted(&self, nodes: Option<BTreeSet<NodeIndex>>) -> Vec<&str> {
        let mut names: Vec<&str> = nodes
            .unwrap_or_default()
            .into_iter()
            .map(|n| self.name(n))
            .collect();
        names.sort_unstable();
        names
    }

    /// Graphviz rendering, labelled with unit and stream names.
    pub fn as_dot(&self) -> Dot<'_, &UnitGraph> {
        Dot::new(&self.graph)
    }
}
