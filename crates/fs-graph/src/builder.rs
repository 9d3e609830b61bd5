//! Evaluation graph construction from a flowsheet.

use std::collections::HashMap;

use fs_core::Id;
use fs_model::Flowsheet;
use petgraph::graph::NodeIndex;

use crate::graph::{EvaluationGraph, StreamEdge, UnitGraph, UnitNode};

/// Build the evaluation graph of a flowsheet.
///
/// Streams missing a source or a sink carry no dependency information and
/// are skipped.
pub fn build_evaluation_graph(flowsheet: &Flowsheet) -> EvaluationGraph {
    let mut graph =
        UnitGraph::with_capacity(flowsheet.unit_count(), flowsheet.stream_count());
    let mut index = HashMap::with_capacity(flowsheet.unit_count());

    // Node indices line up with unit IDs since both follow insertion order
    let mut nodes: Vec<NodeIndex> = Vec::with_capacity(flowsheet.unit_count());
    for (id, unit) in flowsheet.unit_ids().zip(flowsheet.units()) {
        let node = graph.add_node(UnitNode {
            id,
            name: unit.name().to_string(),
        });
        index.insert(unit.name().to_string(), node);
        nodes.push(node);
    }

    for (i, stream) in flowsheet.streams().iter().enumerate() {
        let Some((source, sink)) = stream.endpoints() else {
            continue;
        };
        let (Some(&from), Some(&to)) = (nodes.get(source.as_usize()), nodes.get(sink.as_usize()))
        else {
            continue;
        };
        graph.add_edge(
            from,
            to,
            StreamEdge {
                id: Id::from_index(i as u32),
                name: stream.name().to_string(),
            },
        );
    }

    EvaluationGraph { graph, index }
}

impl EvaluationGraph {
    /// See [`build_evaluation_graph`].
    pub fn from_flowsheet(flowsheet: &Flowsheet) -> Self {
        build_evaluation_graph(flowsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_model::{ModelClass, Unit};

    #[test]
    fn empty_flowsheet_gives_empty_graph() {
        let graph = build_evaluation_graph(&Flowsheet::new("empty"));
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn partial_streams_are_skipped() {
        let mut fs = Flowsheet::new("partial");
        fs.add_units([
            Unit::new("FEED", ModelClass::Source),
            Unit::new("H1", ModelClass::Heater),
        ])
        .unwrap();
        fs.add_streams(["S1", "S2"]).unwrap();
        fs.connect("FEED", "Out", "S1").unwrap();
        fs.connect("H1", "In", "S1").unwrap();
        fs.connect("H1", "Out", "S2").unwrap();

        let graph = build_evaluation_graph(&fs);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(), vec![("FEED", "H1")]);
        assert_eq!(graph.unit_id(graph.node_index("H1").unwrap()), fs.unit_id("H1"));
    }
}
