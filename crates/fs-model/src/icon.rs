//! Diagram icon state attached to every unit.

use fs_core::Real;

/// Shape used to draw a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IconType {
    Block,
    Vessel,
    Column,
    Stream,
    Mixer,
    Splitter,
    TwoPhaseFlash,
    ThreePhaseFlash,
    Heater,
    HeatExchanger,
    Valve,
    ColumnSection,
    ComponentSplitter,
    None,
}

impl IconType {
    /// Icon size applied when this type is assigned, if the type has one.
    pub fn standard_size(self) -> Option<(Real, Real)> {
        match self {
            IconType::Stream => Some((80.0, 40.0)),
            IconType::Mixer | IconType::Splitter => Some((40.0, 40.0)),
            IconType::Heater | IconType::TwoPhaseFlash => Some((40.0, 40.0)),
            IconType::ColumnSection => Some((40.0, 200.0)),
            _ => None,
        }
    }
}

/// Position, size and shape of a unit on the flowsheet diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    pub x: Real,
    pub y: Real,
    pub width: Real,
    pub height: Real,
    pub icon_type: IconType,
}

impl Default for Icon {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 100.0,
            height: 40.0,
            icon_type: IconType::Block,
        }
    }
}

impl Icon {
    pub fn with_type(icon_type: IconType) -> Self {
        Self {
            icon_type,
            ..Self::default()
        }
    }

    /// Set the icon type and position; resizes to the type's standard size.
    pub fn assign(&mut self, icon_type: IconType, x: Real, y: Real) {
        self.icon_type = icon_type;
        self.x = x;
        self.y = y;
        if let Some((w, h)) = icon_type.standard_size() {
            self.width = w;
            self.height = h;
        }
    }

    pub fn set_position(&mut self, x: Real, y: Real) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: Real, height: Real) {
        self.width = width;
        self.height = height;
    }
}
