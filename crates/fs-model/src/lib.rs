//! fs-model: in-process flowsheet model for flowseq.
//!
//! Provides:
//! - Units with class-specific material ports and diagram icons
//! - Material streams with optional source/sink endpoints
//! - The `Flowsheet` aggregate with name lookup and connection rules
//! - The `UnitOperation` seam through which a backend initializes or solves units
//!
//! # Example
//!
//! ```
//! use fs_model::{Flowsheet, ModelClass, Unit};
//!
//! let mut fs = Flowsheet::new("demo");
//! fs.add_unit(Unit::new("FEED", ModelClass::Source)).unwrap();
//! fs.add_unit(Unit::new("H1", ModelClass::Heater)).unwrap();
//! fs.add_stream("S1").unwrap();
//! fs.connect("FEED", "Out", "S1").unwrap();
//! fs.connect("H1", "In", "S1").unwrap();
//!
//! assert!(fs.get_stream("S1").unwrap().is_fully_connected());
//! ```

pub mod class;
pub mod error;
pub mod flowsheet;
pub mod icon;
pub mod operation;
pub mod port;
pub mod stream;
pub mod unit;

pub use class::ModelClass;
pub use error::{ModelError, ModelResult};
pub use flowsheet::Flowsheet;
pub use icon::{Icon, IconType};
pub use operation::{PassiveUnit, UnitOpResult, UnitOperation};
pub use port::{Port, PortDirection, PortNormal, PortTemplate};
pub use stream::MaterialStream;
pub use unit::Unit;
