//! Material streams connecting unit ports.

use fs_core::UnitId;

/// A directed material connection with at most one source and one sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialStream {
    pub(crate) name: String,
    pub(crate) source: Option<UnitId>,
    pub(crate) sink: Option<UnitId>,
}

impl MaterialStream {
    /// Create a stream with neither endpoint attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            sink: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<UnitId> {
        self.source
    }

    pub fn sink(&self) -> Option<UnitId> {
        self.sink
    }

    /// Source and sink, if both are attached.
    pub fn endpoints(&self) -> Option<(UnitId, UnitId)> {
        Some((self.source?, self.sink?))
    }

    pub fn is_fully_connected(&self) -> bool {
        self.endpoints().is_some()
    }
}
