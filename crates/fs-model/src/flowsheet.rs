//! The flowsheet aggregate: units, streams and their connections.

use std::collections::HashMap;

use fs_core::{Id, StreamId, UnitId};

use crate::class::ModelClass;
use crate::error::{ModelError, ModelResult};
use crate::port::PortDirection;
use crate::stream::MaterialStream;
use crate::unit::Unit;

/// A process model: units connected by material streams.
///
/// Units and streams are kept in insertion order; their IDs are their
/// positions. Names are unique per kind and are the identity used by the
/// sequencing and reporting layers.
#[derive(Debug, Default)]
pub struct Flowsheet {
    name: String,
    units: Vec<Unit>,
    streams: Vec<MaterialStream>,
    unit_index: HashMap<String, UnitId>,
    stream_index: HashMap<String, StreamId>,
}

impl Flowsheet {
    /// Create an empty flowsheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a unit and return its ID.
    pub fn add_unit(&mut self, unit: Unit) -> ModelResult<UnitId> {
        if self.unit_index.contains_key(unit.name()) {
            return Err(ModelError::DuplicateUnit {
                name: unit.name().to_string(),
            });
        }
        let id = Id::from_usize(self.units.len()).ok_or(ModelError::Capacity { what: "units" })?;
        self.unit_index.insert(unit.name().to_string(), id);
        self.units.push(unit);
        Ok(id)
    }

    /// Add several units; stops at the first failure.
    pub fn add_units(&mut self, units: impl IntoIterator<Item = Unit>) -> ModelResult<()> {
        for unit in units {
            self.add_unit(unit)?;
        }
        Ok(())
    }

    /// Add an unconnected material stream and return its ID.
    pub fn add_stream(&mut self, name: impl Into<String>) -> ModelResult<StreamId> {
        let name = name.into();
        if self.stream_index.contains_key(&name) {
            return Err(ModelError::DuplicateStream { name });
        }
        let id = Id::from_usize(self.streams.len()).ok_or(ModelError::Capacity {
            what: "material streams",
        })?;
        self.stream_index.insert(name.clone(), id);
        self.streams.push(MaterialStream::new(name));
        Ok(id)
    }

    /// Add several streams by name; stops at the first failure.
    pub fn add_streams<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> ModelResult<()> {
        for name in names {
            self.add_stream(name)?;
        }
        Ok(())
    }

    /// All units in insertion order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.units.len()).map(|i| Id::from_index(i as u32))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.as_usize())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.as_usize())
    }

    pub fn unit_id(&self, name: &str) -> Option<UnitId> {
        self.unit_index.get(name).copied()
    }

    /// Look up a unit by name.
    pub fn get_unit(&self, name: &str) -> Option<&Unit> {
        self.unit_id(name).and_then(|id| self.unit(id))
    }

    pub fn get_unit_mut(&mut self, name: &str) -> Option<&mut Unit> {
        let id = self.unit_id(name)?;
        self.unit_mut(id)
    }

    /// Units of the given class, in insertion order.
    pub fn units_by_class(&self, class: ModelClass) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.class() == class)
    }

    /// IDs of the units of the given class, in insertion order.
    pub fn unit_ids_by_class(&self, class: ModelClass) -> Vec<UnitId> {
        self.unit_ids()
            .filter(|id| self.units[id.as_usize()].class() == class)
            .collect()
    }

    /// All material streams in insertion order.
    pub fn streams(&self) -> &[MaterialStream] {
        &self.streams
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn stream(&self, id: StreamId) -> Option<&MaterialStream> {
        self.streams.get(id.as_usize())
    }

    pub fn stream_id(&self, name: &str) -> Option<StreamId> {
        self.stream_index.get(name).copied()
    }

    pub fn get_stream(&self, name: &str) -> Option<&MaterialStream> {
        self.stream_id(name).and_then(|id| self.stream(id))
    }

    /// Connect a stream to a named port of a unit.
    ///
    /// Connecting an inlet port makes the unit the stream's sink; an outlet
    /// port makes it the stream's source.
    pub fn connect(&mut self, unit: &str, port: &str, stream: &str) -> ModelResult<()> {
        let unit_id = self.unit_id(unit).ok_or_else(|| ModelError::UnknownUnit {
            name: unit.to_string(),
        })?;
        let stream_id = self
            .stream_id(stream)
            .ok_or_else(|| ModelError::UnknownStream {
                name: stream.to_string(),
            })?;

        let u = &mut self.units[unit_id.as_usize()];
        let port_idx = u.port_index(port).ok_or_else(|| ModelError::UnknownPort {
            unit: unit.to_string(),
            port: port.to_string(),
        })?;
        let p = &mut u.ports[port_idx];
        if p.carries(stream_id) {
            return Err(ModelError::AlreadyConnected {
                stream: stream.to_string(),
                port: port.to_string(),
            });
        }
        if !p.has_capacity() {
            return Err(ModelError::PortFull {
                unit: unit.to_string(),
                port: port.to_string(),
                multiplicity: p.multiplicity().unwrap_or(usize::MAX),
            });
        }

        let s = &mut self.streams[stream_id.as_usize()];
        let (endpoint, label) = match p.direction() {
            PortDirection::In => (&mut s.sink, "sink"),
            PortDirection::Out => (&mut s.source, "source"),
        };
        if endpoint.is_some() {
            return Err(ModelError::EndpointTaken {
                stream: stream.to_string(),
                endpoint: label,
            });
        }
        *endpoint = Some(unit_id);
        p.streams.push(stream_id);
        Ok(())
    }

    /// Connect a feed stream to a column section at the given stage.
    ///
    /// Stages are numbered from 1. The upper bound is only checked when the
    /// column's stage count is known (see [`Unit::with_stages`]).
    pub fn connect_feed(&mut self, column: &str, stream: &str, stage: usize) -> ModelResult<()> {
        let unit = self
            .get_unit(column)
            .ok_or_else(|| ModelError::UnknownUnit {
                name: column.to_string(),
            })?;
        if unit.class() != ModelClass::TraySection {
            return Err(ModelError::NotAColumn {
                unit: column.to_string(),
            });
        }
        if stage == 0 || unit.stages().is_some_and(|n| stage > n) {
            return Err(ModelError::StageOutOfRange {
                unit: column.to_string(),
                stage,
                stages: unit.stages(),
            });
        }
        self.connect(column, "Feeds", stream)?;

        let stream_id = self
            .stream_id(stream)
            .ok_or_else(|| ModelError::UnknownStream {
                name: stream.to_string(),
            })?;
        if let Some(unit) = self.get_unit_mut(column) {
            unit.feed_stages.push((stream_id, stage));
        }
        Ok(())
    }

    /// Detach a stream from its endpoints and remove it.
    ///
    /// Streams added after the removed one shift down by one ID.
    pub fn remove_stream(&mut self, name: &str) -> ModelResult<MaterialStream> {
        let removed_id = self
            .stream_id(name)
            .ok_or_else(|| ModelError::UnknownStream {
                name: name.to_string(),
            })?;
        let removed = self.streams.remove(removed_id.as_usize());
        for unit_id in [removed.source, removed.sink].into_iter().flatten() {
            if let Some(unit) = self.units.get_mut(unit_id.as_usize()) {
                for port in &mut unit.ports {
                    port.detach(removed_id);
                }
            }
        }

        let shift = |s: StreamId| -> Option<StreamId> {
            use std::cmp::Ordering;
            match s.cmp(&removed_id) {
                Ordering::Less => Some(s),
                Ordering::Equal => None,
                Ordering::Greater => Some(Id::from_index(s.index() - 1)),
            }
        };
        for unit in &mut self.units {
            unit.rename_streams(shift);
        }
        self.rebuild_stream_index();
        Ok(removed)
    }

    /// Move all units and streams of `other` into this flowsheet.
    ///
    /// Fails without modifying `self` if any name would collide.
    pub fn merge(&mut self, other: Flowsheet) -> ModelResult<()> {
        if let Some(dup) = other
            .units
            .iter()
            .find(|u| self.unit_index.contains_key(u.name()))
        {
            return Err(ModelError::DuplicateUnit {
                name: dup.name().to_string(),
            });
        }
        if let Some(dup) = other
            .streams
            .iter()
            .find(|s| self.stream_index.contains_key(s.name()))
        {
            return Err(ModelError::DuplicateStream {
                name: dup.name().to_string(),
            });
        }
        if Id::from_usize(self.units.len() + other.units.len()).is_none()
            || Id::from_usize(self.streams.len() + other.streams.len()).is_none()
        {
            return Err(ModelError::Capacity {
                what: "merged elements",
            });
        }

        let unit_offset = self.units.len() as u32;
        let stream_offset = self.streams.len() as u32;
        let offset_unit = |u: UnitId| Id::from_index(u.index() + unit_offset);

        for mut unit in other.units {
            unit.rename_streams(|s| Some(Id::from_index(s.index() + stream_offset)));
            self.units.push(unit);
        }
        for mut stream in other.streams {
            stream.source = stream.source.map(offset_unit);
            stream.sink = stream.sink.map(offset_unit);
            self.streams.push(stream);
        }
        self.rebuild_unit_index();
        self.rebuild_stream_index();
        Ok(())
    }

    fn rebuild_unit_index(&mut self) {
        self.unit_index = self
            .units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.name().to_string(), Id::from_index(i as u32)))
            .collect();
    }

    fn rebuild_stream_index(&mut self) {
        self.stream_index = self
            .streams
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), Id::from_index(i as u32)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heater_chain() -> Flowsheet {
        let mut fs = Flowsheet::new("chain");
        fs.add_units([
            Unit::new("FEED", ModelClass::Source),
            Unit::new("H1", ModelClass::Heater),
            Unit::new("PROD", ModelClass::Sink),
        ])
        .unwrap();
        fs.add_streams(["S1", "S2"]).unwrap();
        fs.connect("FEED", "Out", "S1").unwrap();
        fs.connect("H1", "In", "S1").unwrap();
        fs.connect("H1", "Out", "S2").unwrap();
        fs.connect("PROD", "In", "S2").unwrap();
        fs
    }

    #[test]
    fn connect_sets_endpoints() {
        let fs = heater_chain();
        let s1 = fs.get_stream("S1").unwrap();
        assert_eq!(s1.source(), fs.unit_id("FEED"));
        assert_eq!(s1.sink(), fs.unit_id("H1"));
        assert!(fs.get_unit("H1").unwrap().port("Out").unwrap().is_connected());
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut fs = heater_chain();
        assert!(matches!(
            fs.add_unit(Unit::new("H1", ModelClass::Mixer)),
            Err(ModelError::DuplicateUnit { .. })
        ));
        assert!(matches!(
            fs.add_stream("S1"),
            Err(ModelError::DuplicateStream { .. })
        ));
    }

    #[test]
    fn connect_errors() {
        let mut fs = heater_chain();
        fs.add_stream("S3").unwrap();

        assert!(matches!(
            fs.connect("NOPE", "In", "S3"),
            Err(ModelError::UnknownUnit { .. })
        ));
        assert!(matches!(
            fs.connect("H1", "Vap", "S3"),
            Err(ModelError::UnknownPort { .. })
        ));
        assert!(matches!(
            fs.connect("H1", "In", "S4"),
            Err(ModelError::UnknownStream { .. })
        ));
        assert!(matches!(
            fs.connect("H1", "In", "S1"),
            Err(ModelError::AlreadyConnected { .. })
        ));
        assert!(matches!(
            fs.connect("H1", "In", "S3"),
            Err(ModelError::PortFull { multiplicity: 1, .. })
        ));
        // S1 already has a sink
        fs.add_unit(Unit::new("M1", ModelClass::Mixer)).unwrap();
        assert!(matches!(
            fs.connect("M1", "In", "S1"),
            Err(ModelError::EndpointTaken {
                endpoint: "sink",
                ..
            })
        ));
    }

    #[test]
    fn units_by_class_keeps_insertion_order() {
        let mut fs = heater_chain();
        fs.add_unit(Unit::new("FEED2", ModelClass::Source)).unwrap();
        let names: Vec<_> = fs
            .units_by_class(ModelClass::Source)
            .map(|u| u.name())
            .collect();
        assert_eq!(names, vec!["FEED", "FEED2"]);
        assert_eq!(fs.unit_ids_by_class(ModelClass::Sink), vec![fs.unit_id("PROD").unwrap()]);
    }

    #[test]
    fn remove_stream_detaches_and_reindexes() {
        let mut fs = heater_chain();
        let removed = fs.remove_stream("S1").unwrap();
        assert_eq!(removed.name(), "S1");
        assert_eq!(fs.stream_count(), 1);

        let h1 = fs.get_unit("H1").unwrap();
        assert!(!h1.port("In").unwrap().is_connected());
        // S2 moved from ID 1 to ID 0 and is still referenced by H1's outlet
        let s2 = fs.stream_id("S2").unwrap();
        assert_eq!(s2.index(), 0);
        assert_eq!(h1.port("Out").unwrap().streams(), &[s2]);
        assert!(!fs.get_unit("FEED").unwrap().port("Out").unwrap().is_connected());
    }

    #[test]
    fn feed_stage_survives_reindexing() {
        let mut fs = heater_chain();
        fs.add_unit(Unit::new("COL", ModelClass::TraySection).with_stages(12))
            .unwrap();
        fs.add_stream("F").unwrap();
        fs.connect_feed("COL", "F", 7).unwrap();

        fs.remove_stream("S1").unwrap();
        let f = fs.stream_id("F").unwrap();
        assert_eq!(f.index(), 1);
        let col = fs.get_unit("COL").unwrap();
        assert_eq!(col.feed_stage(f), Some(7));
        assert_eq!(col.port("Feeds").unwrap().streams(), &[f]);

        fs.remove_stream("F").unwrap();
        let col = fs.get_unit("COL").unwrap();
        assert_eq!(col.feed_stage(f), None);
        assert!(!col.port("Feeds").unwrap().is_connected());
    }

    #[test]
    fn feed_stage_must_exist_on_column() {
        let mut fs = heater_chain();
        fs.add_units([
            Unit::new("COL", ModelClass::TraySection).with_stages(10),
            Unit::new("OPEN", ModelClass::TraySection),
        ])
        .unwrap();
        fs.add_streams(["F1", "F2", "F3"]).unwrap();

        assert_eq!(
            fs.connect_feed("COL", "F1", 11),
            Err(ModelError::StageOutOfRange {
                unit: "COL".to_string(),
                stage: 11,
                stages: Some(10),
            })
        );
        assert!(matches!(
            fs.connect_feed("OPEN", "F1", 0),
            Err(ModelError::StageOutOfRange { stages: None, .. })
        ));
        // Rejected feeds leave the stream untouched
        assert_eq!(fs.get_stream("F1").unwrap().sink(), None);

        fs.connect_feed("COL", "F1", 10).unwrap();
        fs.connect_feed("COL", "F2", 1).unwrap();
        fs.connect_feed("OPEN", "F3", 9999).unwrap();
    }

    #[test]
    fn connect_feed_requires_column() {
        let mut fs = heater_chain();
        fs.add_unit(Unit::new("COL", ModelClass::TraySection)).unwrap();
        fs.add_stream("F").unwrap();
        assert!(matches!(
            fs.connect_feed("H1", "F", 3),
            Err(ModelError::NotAColumn { .. })
        ));
        fs.connect_feed("COL", "F", 3).unwrap();
        let f = fs.stream_id("F").unwrap();
        assert_eq!(fs.get_unit("COL").unwrap().feed_stage(f), Some(3));
        assert_eq!(fs.get_stream("F").unwrap().sink(), fs.unit_id("COL"));
    }

    #[test]
    fn merge_offsets_ids() {
        let mut a = heater_chain();
        let mut b = Flowsheet::new("b");
        b.add_units([
            Unit::new("FEED_B", ModelClass::Source),
            Unit::new("PROD_B", ModelClass::Sink),
            Unit::new("COL_B", ModelClass::TraySection),
        ])
        .unwrap();
        b.add_streams(["B1", "B2"]).unwrap();
        b.connect("FEED_B", "Out", "B1").unwrap();
        b.connect("PROD_B", "In", "B1").unwrap();
        b.connect_feed("COL_B", "B2", 4).unwrap();

        a.merge(b).unwrap();
        assert_eq!(a.unit_count(), 6);
        let b2_id = a.stream_id("B2").unwrap();
        assert_eq!(b2_id.index(), 3);
        assert_eq!(a.get_unit("COL_B").unwrap().feed_stage(b2_id), Some(4));
        let b1 = a.get_stream("B1").unwrap();
        assert_eq!(b1.source(), a.unit_id("FEED_B"));
        assert_eq!(b1.sink(), a.unit_id("PROD_B"));
        let b1_id = a.stream_id("B1").unwrap();
        assert_eq!(
            a.get_unit("FEED_B").unwrap().port("Out").unwrap().streams(),
            &[b1_id]
        );
    }

    #[test]
    fn merge_rejects_collisions() {
        let mut a = heater_chain();
        let b = heater_chain();
        assert!(a.merge(b).is_err());
        assert_eq!(a.unit_count(), 3);
    }
}
