//! Evaluation-order synthesis.
//!
//! Units are ordered component by component, following the condensation
//! graph of the evaluation graph. Recycle loops are broken with a greedy
//! "most known predecessors first" rule: inside a loop, the next unit is the
//! one for which the largest fraction of inputs is already computed, which
//! keeps the number of initial guesses needed to start the loop small.

use core::cmp::Ordering;

use fs_graph::{Components, EvaluationGraph, NodeIndex, build_evaluation_graph};
use fs_model::Flowsheet;
use tracing::{debug, info};

/// Exact fraction of a unit's distinct predecessors already sequenced.
///
/// A unit without predecessors has fraction 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownFraction {
    pub known: usize,
    pub total: usize,
}

impl KnownFraction {
    pub fn new(known: usize, total: usize) -> Self {
        if total == 0 {
            Self { known: 0, total: 1 }
        } else {
            Self { known, total }
        }
    }

    pub fn as_f64(self) -> f64 {
        self.known as f64 / self.total as f64
    }
}

impl PartialOrd for KnownFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KnownFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // a/b vs c/d  <=>  a*d vs c*b (denominators are positive)
        (self.known * other.total).cmp(&(other.known * self.total))
    }
}

/// Result of sequencing a flowsheet.
#[derive(Debug, Clone)]
pub struct Sequencing {
    /// The evaluation graph the order was derived from.
    pub graph: EvaluationGraph,
    /// Unit names in evaluation order; a permutation of the flowsheet's units.
    pub sequence: Vec<String>,
    /// Strongly connected components in the order they were emitted.
    pub components: Components,
}

impl Sequencing {
    /// Components as unit names.
    pub fn component_names(&self) -> Vec<Vec<String>> {
        self.components.names(&self.graph)
    }

    /// Recycle groups as unit names.
    pub fn recycle_groups(&self) -> Vec<Vec<String>> {
        self.components
            .recycle_groups(&self.graph)
            .map(|g| g.iter().map(|n| self.graph.name(*n).to_string()).collect())
            .collect()
    }

    /// Position of a unit in the sequence.
    pub fn position(&self, unit: &str) -> Option<usize> {
        self.sequence.iter().position(|u| u == unit)
    }
}

/// Compute the evaluation order of a flowsheet's units.
pub fn sequence_flowsheet(flowsheet: &Flowsheet) -> Sequencing {
    let graph = build_evaluation_graph(flowsheet);
    let components = graph.components();

    let mut order: Vec<NodeIndex> = Vec::with_capacity(graph.node_count());
    let mut placed = vec![false; graph.node_count()];

    for group in components.iter() {
        match group {
            [single] => {
                placed[single.index()] = true;
                order.push(*single);
            }
            _ => resolve_recycle(&graph, group, &mut order, &mut placed),
        }
    }

    let sequence: Vec<String> = order.iter().map(|n| graph.name(*n).to_string()).collect();
    info!(
        flowsheet = flowsheet.name(),
        units = sequence.len(),
        components = components.len(),
        recycles = components.recycle_groups(&graph).count(),
        "sequenced flowsheet"
    );

    Sequencing {
        graph,
        sequence,
        components,
    }
}

/// Fraction of `node`'s distinct predecessors that are already placed.
pub fn known_fraction(graph: &EvaluationGraph, placed: &[bool], node: NodeIndex) -> KnownFraction {
    let preds = graph.predecessor_set(node);
    let known = preds.iter().filter(|p| placed[p.index()]).count();
    KnownFraction::new(known, preds.len())
}

/// Order the members of a multi-unit component greedily.
///
/// `group` is sorted by unit name, so keeping the first maximum breaks ties
/// lexicographically.
fn resolve_recycle(
    graph: &EvaluationGraph,
    group: &[NodeIndex],
    order: &mut Vec<NodeIndex>,
    placed: &mut [bool],
) {
    let mut remaining: Vec<NodeIndex> = group.to_vec();

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_fraction = known_fraction(graph, placed, remaining[0]);
        for (i, node) in remaining.iter().enumerate().skip(1) {
            let fraction = known_fraction(graph, placed, *node);
            if fraction > best_fraction {
                best = i;
                best_fraction = fraction;
            }
        }

        let chosen = remaining.remove(best);
        debug!(
            unit = graph.name(chosen),
            known = best_fraction.known,
            inputs = best_fraction.total,
            "recycle member selected"
        );
        placed[chosen.index()] = true;
        order.push(chosen);
    }
}
