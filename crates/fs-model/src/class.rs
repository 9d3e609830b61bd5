//! Model classes of the unit library and their port layouts.

use core::fmt;

use crate::icon::IconType;
use crate::port::{PortDirection, PortNormal, PortTemplate};

use PortDirection::{In, Out};
use PortNormal::{Down, Left, Right, Up};

const SOURCE_PORTS: &[PortTemplate] = &[PortTemplate::new("Out", Out, Some(1), Right)];

const SINK_PORTS: &[PortTemplate] = &[PortTemplate::new("In", In, Some(1), Left)];

const FLASH_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Left),
    PortTemplate::new("Vap", Out, Some(1), Up),
    PortTemplate::new("Liq", Out, Some(1), Down),
];

const HEATER_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Left),
    PortTemplate::new("Out", Out, Some(1), Right),
];

const MIXER_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, None, Left),
    PortTemplate::new("Out", Out, Some(1), Right),
];

const SPLITTER_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Left),
    PortTemplate::new("Out1", Out, Some(1), Up),
    PortTemplate::new("Out2", Out, Some(1), Down),
];

const TRAY_SECTION_PORTS: &[PortTemplate] = &[
    PortTemplate::new("Feeds", In, None, Left),
    PortTemplate::new("VIn", In, Some(1), Right),
    PortTemplate::new("LIn", In, Some(1), Right),
    PortTemplate::new("VOut", Out, Some(1), Up),
    PortTemplate::new("LOut", Out, Some(1), Down),
    PortTemplate::new("Sidestreams", Out, None, Right),
];

const COMPONENT_SPLITTER_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Right),
    PortTemplate::new("Out1", Out, Some(1), Right),
    PortTemplate::new("Out2", Out, Some(1), Right),
];

const VALVE_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Right),
    PortTemplate::new("Out", Out, Some(1), Right),
];

const REACTOR_PORTS: &[PortTemplate] = &[
    PortTemplate::new("In", In, Some(1), Left),
    PortTemplate::new("Out", Out, Some(1), Right),
];

/// Closed set of unit models known to the flowsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelClass {
    Source,
    Sink,
    Flash,
    Heater,
    Mixer,
    Splitter,
    /// Equilibrium-stage column section.
    TraySection,
    ComponentSplitter,
    Valve,
    Reactor,
}

impl ModelClass {
    /// Stable name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelClass::Source => "Source",
            ModelClass::Sink => "Sink",
            ModelClass::Flash => "Flash",
            ModelClass::Heater => "Heater",
            ModelClass::Mixer => "Mixer",
            ModelClass::Splitter => "Splitter",
            ModelClass::TraySection => "TraySection",
            ModelClass::ComponentSplitter => "ComponentSplitter",
            ModelClass::Valve => "Valve",
            ModelClass::Reactor => "Reactor",
        }
    }

    /// Material ports a fresh unit of this class is equipped with.
    pub fn port_templates(&self) -> &'static [PortTemplate] {
        match self {
            ModelClass::Source => SOURCE_PORTS,
            ModelClass::Sink => SINK_PORTS,
            ModelClass::Flash => FLASH_PORTS,
            ModelClass::Heater => HEATER_PORTS,
            ModelClass::Mixer => MIXER_PORTS,
            ModelClass::Splitter => SPLITTER_PORTS,
            ModelClass::TraySection => TRAY_SECTION_PORTS,
            ModelClass::ComponentSplitter => COMPONENT_SPLITTER_PORTS,
            ModelClass::Valve => VALVE_PORTS,
            ModelClass::Reactor => REACTOR_PORTS,
        }
    }

    /// Icon type a fresh unit of this class starts with.
    pub fn initial_icon(&self) -> IconType {
        match self {
            ModelClass::TraySection => IconType::ColumnSection,
            ModelClass::Valve => IconType::Valve,
            _ => IconType::Block,
        }
    }

    /// Icon type assigned by automatic layout, if the class has one.
    pub fn layout_icon(&self) -> Option<IconType> {
        match self {
            ModelClass::Source | ModelClass::Sink => Some(IconType::Stream),
            ModelClass::Flash => Some(IconType::TwoPhaseFlash),
            ModelClass::Heater => Some(IconType::Heater),
            ModelClass::Mixer => Some(IconType::Mixer),
            ModelClass::Splitter => Some(IconType::Splitter),
            ModelClass::TraySection => Some(IconType::ColumnSection),
            ModelClass::ComponentSplitter | ModelClass::Valve | ModelClass::Reactor => None,
        }
    }
}

impl fmt::Display for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_has_vertical_outlets() {
        let outlets: Vec<_> = ModelClass::Flash
            .port_templates()
            .iter()
            .filter(|t| t.direction == PortDirection::Out)
            .map(|t| (t.name, t.normal))
            .collect();
        assert_eq!(outlets, vec![("Vap", Up), ("Liq", Down)]);
    }

    #[test]
    fn port_names_are_unique_per_class() {
        for class in [
            ModelClass::Source,
            ModelClass::Sink,
            ModelClass::Flash,
            ModelClass::Heater,
            ModelClass::Mixer,
            ModelClass::Splitter,
            ModelClass::TraySection,
            ModelClass::ComponentSplitter,
            ModelClass::Valve,
            ModelClass::Reactor,
        ] {
            let ports = class.port_templates();
            for (i, a) in ports.iter().enumerate() {
                assert!(
                    ports[i + 1..].iter().all(|b| b.name != a.name),
                    "{class} declares port {} twice",
                    a.name
                );
            }
        }
    }

    #[test]
    fn layout_icons() {
        assert_eq!(ModelClass::Sink.layout_icon(), Some(IconType::Stream));
        assert_eq!(
            ModelClass::TraySection.layout_icon(),
            Some(IconType::ColumnSection)
        );
        assert_eq!(ModelClass::Valve.layout_icon(), None);
    }
}
