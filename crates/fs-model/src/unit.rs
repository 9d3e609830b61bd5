//! Process units: named, classed nodes of the flowsheet.

use core::fmt;

use fs_core::{Real, StreamId};

use crate::class::ModelClass;
use crate::icon::{Icon, IconType};
use crate::operation::{PassiveUnit, UnitOpResult, UnitOperation};
use crate::port::Port;

/// A unit operation in the flowsheet.
///
/// The unit owns its material ports (created from its class's templates), its
/// diagram icon and the backend behavior that performs `initialize`/`solve`.
pub struct Unit {
    name: String,
    class: ModelClass,
    pub(crate) ports: Vec<Port>,
    icon: Icon,
    pub(crate) feed_stages: Vec<(StreamId, usize)>,
    stages: Option<usize>,
    operation: Box<dyn UnitOperation>,
}

impl Unit {
    /// Create a unit with the default ports and icon of its class and a
    /// passive behavior.
    pub fn new(name: impl Into<String>, class: ModelClass) -> Self {
        Self {
            name: name.into(),
            class,
            ports: class.port_templates().iter().map(Port::from).collect(),
            icon: Icon::with_type(class.initial_icon()),
            feed_stages: Vec::new(),
            stages: None,
            operation: Box::new(PassiveUnit),
        }
    }

    /// Builder-style variant of [`Unit::set_operation`].
    pub fn with_operation(mut self, op: impl UnitOperation + 'static) -> Self {
        self.set_operation(op);
        self
    }

    pub fn set_operation(&mut self, op: impl UnitOperation + 'static) {
        self.operation = Box::new(op);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> ModelClass {
        self.class
    }

    /// All material ports in declaration order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub(crate) fn port_index(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    /// Outbound material ports in declaration order.
    pub fn out_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.is_outlet())
    }

    /// Set the number of equilibrium stages of a column section.
    pub fn with_stages(mut self, stages: usize) -> Self {
        self.stages = Some(stages);
        self
    }

    pub fn stages(&self) -> Option<usize> {
        self.stages
    }

    /// Feed stage recorded for a stream connected via `connect_feed`.
    pub fn feed_stage(&self, stream: StreamId) -> Option<usize> {
        self.feed_stages
            .iter()
            .find(|(s, _)| *s == stream)
            .map(|(_, stage)| *stage)
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn icon_mut(&mut self) -> &mut Icon {
        &mut self.icon
    }

    /// Assign icon type and position (resizing to the type's standard size).
    pub fn set_icon(&mut self, icon_type: IconType, x: Real, y: Real) -> &mut Self {
        self.icon.assign(icon_type, x, y);
        self
    }

    pub fn set_position(&mut self, x: Real, y: Real) -> &mut Self {
        self.icon.set_position(x, y);
        self
    }

    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.icon.set_size(width, height);
        self
    }

    /// Rotate all port normals by quarter turns; positive is clockwise.
    pub fn rotate_ports(&mut self, quarter_turns: i32) -> &mut Self {
        let steps = quarter_turns.unsigned_abs() % 4;
        for port in &mut self.ports {
            for _ in 0..steps {
                port.normal = if quarter_turns > 0 {
                    port.normal.rotated_cw()
                } else {
                    port.normal.rotated_ccw()
                };
            }
        }
        self
    }

    /// Cold-start estimate through the unit's behavior.
    pub fn initialize(&mut self) -> UnitOpResult {
        self.operation.initialize()
    }

    /// Full per-unit solve through the unit's behavior.
    pub fn solve(&mut self) -> UnitOpResult {
        self.operation.solve()
    }

    pub(crate) fn rename_streams(&mut self, map: impl Fn(StreamId) -> Option<StreamId>) {
        for port in &mut self.ports {
            port.streams = port.streams.iter().filter_map(|s| map(*s)).collect();
        }
        self.feed_stages = self
            .feed_stages
            .iter()
            .filter_map(|(s, stage)| map(*s).map(|s| (s, *stage)))
            .collect();
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name)
            .field("class", &self.class)
            .field("ports", &self.ports)
            .field("icon", &self.icon)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}
