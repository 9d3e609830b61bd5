//! Material ports of a unit.

use fs_core::StreamId;

/// Flow direction of a port relative to its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortDirection {
    /// Streams connected here have this unit as their sink.
    In,
    /// Streams connected here have this unit as their source.
    Out,
}

/// Geometric orientation of a port on the unit icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortNormal {
    Up,
    Right,
    Down,
    Left,
}

impl PortNormal {
    /// One quarter turn clockwise.
    pub fn rotated_cw(self) -> Self {
        match self {
            PortNormal::Left => PortNormal::Up,
            PortNormal::Up => PortNormal::Right,
            PortNormal::Right => PortNormal::Down,
            PortNormal::Down => PortNormal::Left,
        }
    }

    /// One quarter turn counter-clockwise.
    pub fn rotated_ccw(self) -> Self {
        match self {
            PortNormal::Left => PortNormal::Down,
            PortNormal::Down => PortNormal::Right,
            PortNormal::Right => PortNormal::Up,
            PortNormal::Up => PortNormal::Left,
        }
    }

    /// Whether the port points up or down.
    pub fn is_vertical(self) -> bool {
        matches!(self, PortNormal::Up | PortNormal::Down)
    }
}

/// Static description of a port, used to equip new units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortTemplate {
    pub name: &'static str,
    pub direction: PortDirection,
    /// Maximum number of streams; `None` means unbounded.
    pub multiplicity: Option<usize>,
    pub normal: PortNormal,
}

impl PortTemplate {
    pub const fn new(
        name: &'static str,
        direction: PortDirection,
        multiplicity: Option<usize>,
        normal: PortNormal,
    ) -> Self {
        Self {
            name,
            direction,
            multiplicity,
            normal,
        }
    }
}

/// A material port owned by exactly one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub(crate) name: String,
    pub(crate) direction: PortDirection,
    pub(crate) normal: PortNormal,
    pub(crate) multiplicity: Option<usize>,
    pub(crate) streams: Vec<StreamId>,
}

impl Port {
    /// Create an unconnected port.
    pub fn new(
        name: impl Into<String>,
        direction: PortDirection,
        multiplicity: Option<usize>,
        normal: PortNormal,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            normal,
            multiplicity,
            streams: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn normal(&self) -> PortNormal {
        self.normal
    }

    pub fn set_normal(&mut self, normal: PortNormal) {
        self.normal = normal;
    }

    pub fn multiplicity(&self) -> Option<usize> {
        self.multiplicity
    }

    /// Streams attached to this port, in connection order.
    pub fn streams(&self) -> &[StreamId] {
        &self.streams
    }

    /// The first attached stream, if any.
    pub fn first_stream(&self) -> Option<StreamId> {
        self.streams.first().copied()
    }

    pub fn is_connected(&self) -> bool {
        !self.streams.is_empty()
    }

    pub fn is_outlet(&self) -> bool {
        self.direction == PortDirection::Out
    }

    pub fn carries(&self, stream: StreamId) -> bool {
        self.streams.contains(&stream)
    }

    /// Whether another stream may still be attached.
    pub fn has_capacity(&self) -> bool {
        self.multiplicity.is_none_or(|max| self.streams.len() < max)
    }

    pub(crate) fn detach(&mut self, stream: StreamId) -> bool {
        let before = self.streams.len();
        self.streams.retain(|s| *s != stream);
        before != self.streams.len()
    }
}

impl From<&PortTemplate> for Port {
    fn from(t: &PortTemplate) -> Self {
        Port::new(t.name, t.direction, t.multiplicity, t.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_cyclic() {
        let mut n = PortNormal::Left;
        for _ in 0..4 {
            n = n.rotated_cw();
        }
        assert_eq!(n, PortNormal::Left);
        assert_eq!(PortNormal::Left.rotated_cw(), PortNormal::Up);
        assert_eq!(PortNormal::Left.rotated_ccw(), PortNormal::Down);
        assert_eq!(PortNormal::Up.rotated_cw().rotated_ccw(), PortNormal::Up);
    }

    #[test]
    fn capacity_respects_multiplicity() {
        let mut port = Port::new("Out", PortDirection::Out, Some(1), PortNormal::Right);
        assert!(port.has_capacity());
        port.streams.push(StreamId::from_index(0));
        assert!(!port.has_capacity());
        assert!(port.is_connected());

        let unbounded = Port::new("In", PortDirection::In, None, PortNormal::Left);
        assert!(unbounded.has_capacity());
    }

    #[test]
    fn detach_updates_connection_state() {
        let mut port = Port::new("In", PortDirection::In, None, PortNormal::Left);
        port.streams.push(StreamId::from_index(3));
        assert!(port.detach(StreamId::from_index(3)));
        assert!(!port.is_connected());
        assert!(!port.detach(StreamId::from_index(3)));
    }
}
