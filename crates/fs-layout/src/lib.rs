//! Automatic diagram layout for flowsheets.
//!
//! [`auto_layout`] walks the flowsheet depth-first from its sources and writes
//! an icon type and position into every unit it reaches. Geometry is tunable
//! through [`LayoutOptions`].
//!
//! # Example
//!
//! ```
//! use fs_layout::auto_layout;
//! use fs_model::{Flowsheet, ModelClass, Unit};
//!
//! let mut fs = Flowsheet::new("demo");
//! fs.add_unit(Unit::new("FEED", ModelClass::Source)).unwrap();
//! fs.add_unit(Unit::new("PROD", ModelClass::Sink)).unwrap();
//! fs.add_stream("S1").unwrap();
//! fs.connect("FEED", "Out", "S1").unwrap();
//! fs.connect("PROD", "In", "S1").unwrap();
//!
//! let report = auto_layout(&mut fs);
//! assert_eq!(report.placement("PROD").unwrap().x, 280.0);
//! ```

pub mod auto;
pub mod error;
pub mod options;

pub use auto::{LayoutReport, Placement, auto_layout, auto_layout_with};
pub use error::{LayoutError, LayoutResult};
pub use options::LayoutOptions;
