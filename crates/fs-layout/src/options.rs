//! Tunable geometry of the automatic layout.

use fs_core::Real;
use fs_core::numeric::ensure_non_negative;

use crate::error::LayoutResult;

/// Layout geometry. The defaults reproduce the classic flowsheet look.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Horizontal distance between consecutive depths.
    pub layer_width: Real,
    /// Extra height reserved below an Up/Down outlet.
    pub vertical_padding: Real,
    /// Added to every Y after normalization.
    pub top_margin: Real,
    /// Depth of the source units.
    pub start_depth: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            layer_width: 140.0,
            vertical_padding: 60.0,
            top_margin: 50.0,
            start_depth: 1,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> LayoutResult<()> {
        ensure_non_negative(self.layer_width, "layer_width")?;
        ensure_non_negative(self.vertical_padding, "vertical_padding")?;
        ensure_non_negative(self.top_margin, "top_margin")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LayoutOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_geometry() {
        let opts = LayoutOptions {
            layer_width: Real::INFINITY,
            ..LayoutOptions::default()
        };
        assert!(opts.validate().is_err());

        let opts = LayoutOptions {
            vertical_padding: -1.0,
            ..LayoutOptions::default()
        };
        let msg = opts.validate().unwrap_err().to_string();
        assert!(msg.contains("vertical_padding"));
    }
}
