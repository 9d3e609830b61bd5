//! fs-graph: evaluation graph layer for flowseq.
//!
//! Provides:
//! - `EvaluationGraph`: directed multigraph of unit dependencies
//! - Flowsheet-to-graph construction (partial streams are skipped)
//! - Strongly connected components in condensation topological order
//! - Graphviz export for diagnostics
//!
//! # Example
//!
//! ```
//! use fs_graph::build_evaluation_graph;
//! use fs_model::{Flowsheet, ModelClass, Unit};
//!
//! let mut fs = Flowsheet::new("demo");
//! fs.add_unit(Unit::new("FEED", ModelClass::Source)).unwrap();
//! fs.add_unit(Unit::new("PROD", ModelClass::Sink)).unwrap();
//! fs.add_stream("S1").unwrap();
//! fs.connect("FEED", "Out", "S1").unwrap();
//! fs.connect("PROD", "In", "S1").unwrap();
//!
//! let graph = build_evaluation_graph(&fs);
//! assert_eq!(graph.edges(), vec![("FEED", "PROD")]);
//! assert_eq!(graph.components().len(), 2);
//! ```

pub mod builder;
pub mod components;
pub mod graph;

// Re-exports for ergonomics
pub use builder::build_evaluation_graph;
pub use components::Components;
pub use graph::{EvaluationGraph, StreamEdge, UnitGraph, UnitNode};
pub use petgraph::graph::NodeIndex;
