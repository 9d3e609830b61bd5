//! Integration tests for fs-graph.

use std::collections::HashMap;

use fs_graph::build_evaluation_graph;
use fs_model::{Flowsheet, ModelClass, Unit};
use petgraph::algo::has_path_connecting;
use proptest::prelude::*;

/// FEED -> MIX -> H1 -> SPL -(Out1)-> MIX, SPL -(Out2)-> PROD
fn heater_loop() -> Flowsheet {
    let mut fs = Flowsheet::new("loop");
    fs.add_units([
        Unit::new("FEED", ModelClass::Source),
        Unit::new("MIX", ModelClass::Mixer),
        Unit::new("H1", ModelClass::Heater),
        Unit::new("SPL", ModelClass::Splitter),
        Unit::new("PROD", ModelClass::Sink),
    ])
    .unwrap();
    fs.add_streams(["S1", "S2", "S3", "S4", "S5"]).unwrap();
    fs.connect("FEED", "Out", "S1").unwrap();
    fs.connect("MIX", "In", "S1").unwrap();
    fs.connect("MIX", "Out", "S2").unwrap();
    fs.connect("H1", "In", "S2").unwrap();
    fs.connect("H1", "Out", "S3").unwrap();
    fs.connect("SPL", "In", "S3").unwrap();
    fs.connect("SPL", "Out1", "S4").unwrap();
    fs.connect("MIX", "In", "S4").unwrap();
    fs.connect("SPL", "Out2", "S5").unwrap();
    fs.connect("PROD", "In", "S5").unwrap();
    fs
}

#[test]
fn one_node_per_unit_one_edge_per_stream() {
    let fs = heater_loop();
    let graph = build_evaluation_graph(&fs);

    assert_eq!(graph.unit_names(), vec!["FEED", "MIX", "H1", "SPL", "PROD"]);
    assert_eq!(
        graph.edges(),
        vec![
            ("FEED", "MIX"),
            ("MIX", "H1"),
            ("H1", "SPL"),
            ("SPL", "MIX"),
            ("SPL", "PROD"),
        ]
    );
    assert_eq!(graph.predecessors("MIX"), vec!["FEED", "SPL"]);
    assert_eq!(graph.successors("SPL"), vec!["MIX", "PROD"]);
}

#[test]
fn components_in_dependency_order() {
    let fs = heater_loop();
    let graph = build_evaluation_graph(&fs);
    let comps = graph.components();

    assert_eq!(
        comps.names(&graph),
        vec![
            vec!["FEED".to_string()],
            vec!["H1".to_string(), "MIX".to_string(), "SPL".to_string()],
            vec!["PROD".to_string()],
        ]
    );
    assert_eq!(comps.recycle_groups(&graph).count(), 1);
}

#[test]
fn parallel_edges_are_kept() {
    let mut fs = Flowsheet::new("parallel");
    fs.add_units([
        Unit::new("FL", ModelClass::Flash),
        Unit::new("MIX", ModelClass::Mixer),
    ])
    .unwrap();
    fs.add_streams(["V", "L"]).unwrap();
    fs.connect("FL", "Vap", "V").unwrap();
    fs.connect("FL", "Liq", "L").unwrap();
    fs.connect("MIX", "In", "V").unwrap();
    fs.connect("MIX", "In", "L").unwrap();

    let graph = build_evaluation_graph(&fs);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.predecessors("MIX"), vec!["FL"]);
}

#[test]
fn dot_output_names_units_and_streams() {
    let fs = heater_loop();
    let graph = build_evaluation_graph(&fs);
    let dot = format!("{}", graph.as_dot());

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("SPL"));
    assert!(dot.contains("S4"));
}

#[test]
fn graph_is_rebuilt_from_current_state() {
    let mut fs = heater_loop();
    fs.remove_stream("S4").unwrap();
    let graph = build_evaluation_graph(&fs);

    assert_eq!(graph.edge_count(), 4);
    assert!(graph.components().recycle_groups(&graph).next().is_none());
}

/// Column sections wired through their unbounded side-stream and feed ports.
fn wired_columns(n: usize, edges: &[(usize, usize)]) -> Flowsheet {
    let mut fs = Flowsheet::new("columns");
    for i in 0..n {
        fs.add_unit(Unit::new(format!("C{i:02}"), ModelClass::TraySection))
            .unwrap();
    }
    for (k, (a, b)) in edges.iter().enumerate() {
        let stream = format!("S{k}");
        fs.add_stream(stream.as_str()).unwrap();
        fs.connect(&format!("C{a:02}"), "Sidestreams", &stream)
            .unwrap();
        fs.connect(&format!("C{b:02}"), "Feeds", &stream).unwrap();
    }
    fs
}

proptest! {
    #[test]
    fn components_partition_nodes_in_condensation_order(
        (n, edges) in (1usize..12).prop_flat_map(|n| {
            (Just(n), prop::collection::vec((0..n, 0..n), 0..30))
        })
    ) {
        let fs = wired_columns(n, &edges);
        let graph = build_evaluation_graph(&fs);
        let comps = graph.components();

        let mut comp_of = HashMap::new();
        for (c, group) in comps.iter().enumerate() {
            prop_assert!(!group.is_empty());
            let names: Vec<&str> = group.iter().map(|node| graph.name(*node)).collect();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&names, &sorted);
            for &node in group {
                prop_assert!(comp_of.insert(node, c).is_none(), "unit in two components");
            }
            // Members reach each other
            for &a in group {
                for &b in group {
                    prop_assert!(has_path_connecting(graph.inner(), a, b, None));
                }
            }
        }
        prop_assert_eq!(comp_of.len(), n);

        for edge in graph.inner().raw_edges() {
            let (from, to) = (comp_of[&edge.source()], comp_of[&edge.target()]);
            prop_assert!(from <= to, "edge runs against component order");
            if from != to {
                prop_assert!(!has_path_connecting(graph.inner(), edge.target(), edge.source(), None));
            }
        }
    }
}
