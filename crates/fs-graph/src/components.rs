//! Strongly connected components and their dependency order.

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;

use crate::graph::EvaluationGraph;

/// Partition of the evaluation graph into strongly connected components.
///
/// Components are stored in a topological order of the condensation graph
/// (every component comes after all components it depends on). Among
/// components that are ready at the same time, the one whose smallest unit
/// name sorts first goes first. Members of each component are sorted by
/// unit name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Components {
    groups: Vec<Vec<NodeIndex>>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[NodeIndex]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Components with more than one unit, or a single unit feeding itself.
    pub fn recycle_groups<'a>(
        &'a self,
        graph: &'a EvaluationGraph,
    ) -> impl Iterator<Item = &'a [NodeIndex]> + 'a {
        self.iter().filter(move |group| match group {
            [single] => graph.inner().contains_edge(*single, *single),
            _ => true,
        })
    }

    /// Component members as unit names.
    pub fn names(&self, graph: &EvaluationGraph) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|g| g.iter().map(|n| graph.name(*n).to_string()).collect())
            .collect()
    }
}

impl EvaluationGraph {
    /// Compute the strongly connected components in dependency order.
    pub fn components(&self) -> Components {
        let sccs = tarjan_scc(&self.graph);

        let mut comp_of = vec![0usize; self.graph.node_count()];
        for (c, scc) in sccs.iter().enumerate() {
            for node in scc {
                comp_of[node.index()] = c;
            }
        }

        // Condensation edges, deduplicated
        let mut cond_edges: BTreeSet<(usize, usize)> = BTreeSet::new();
        for edge in self.graph.raw_edges() {
            let (a, b) = (comp_of[edge.source().index()], comp_of[edge.target().index()]);
            if a != b {
                cond_edges.insert((a, b));
            }
        }

        let mut in_degree = vec![0usize; sccs.len()];
        let mut downstream: Vec<Vec<usize>> = vec![Vec::new(); sccs.len()];
        for &(a, b) in &cond_edges {
            in_degree[b] += 1;
            downstream[a].push(b);
        }

        // Tie-break key: smallest member name
        let keys: Vec<&str> = sccs
            .iter()
            .map(|scc| scc.iter().map(|n| self.name(*n)).min().unwrap_or_default())
            .collect();

        // Kahn's algorithm over the condensation graph
        let mut ready: BTreeSet<(&str, usize)> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg == 0)
            .map(|(c, _)| (keys[c], c))
            .collect();

        let mut groups = Vec::with_capacity(sccs.len());
        while let Some((_, c)) = ready.pop_first() {
            let mut members = sccs[c].clone();
            members.sort_by(|a, b| self.name(*a).cmp(self.name(*b)));
            groups.push(members);

            for &next in &downstream[c] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert((keys[next], next));
                }
            }
        }

        debug_assert_eq!(groups.len(), sccs.len(), "condensation graph is acyclic");
        Components { groups }
    }
}
