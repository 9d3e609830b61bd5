//! Depth-first automatic placement of unit icons.
//!
//! Starting from every source, units are placed one layer to the right of the
//! unit feeding them. Each unit is centred vertically on the band occupied by
//! everything placed downstream of it. A unit is placed only once, by the
//! first traversal that reaches it, which keeps recycle loops finite.

use std::collections::HashSet;

use fs_core::{Real, UnitId};
use fs_model::{Flowsheet, ModelClass};
use tracing::{debug, info};

use crate::error::LayoutResult;
use crate::options::LayoutOptions;

/// Where a unit ended up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub unit: String,
    /// Discovery depth; sources sit at `LayoutOptions::start_depth`.
    pub depth: usize,
    pub x: Real,
    /// Final Y, after normalization.
    pub y: Real,
}

/// Summary of an automatic layout run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutReport {
    /// Units that received a layout icon, in the order they were finished.
    pub placements: Vec<Placement>,
    /// Units no source reaches, in flowsheet order. Their icons keep their
    /// previous X; their Y is still shifted by normalization.
    pub unreached: Vec<String>,
    /// Height of all source trees stacked, before normalization.
    pub total_height: Real,
}

impl LayoutReport {
    pub fn placement(&self, unit: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.unit == unit)
    }
}

/// Lay out `flowsheet` with the default geometry.
pub fn auto_layout(flowsheet: &mut Flowsheet) -> LayoutReport {
    run(flowsheet, &LayoutOptions::default())
}

/// Lay out `flowsheet` with custom geometry.
pub fn auto_layout_with(
    flowsheet: &mut Flowsheet,
    options: &LayoutOptions,
) -> LayoutResult<LayoutReport> {
    options.validate()?;
    Ok(run(flowsheet, options))
}

/// Traversal state of one unit whose downstream is still being placed.
struct Frame {
    unit: UnitId,
    depth: usize,
    offset: Real,
    /// Next port index to inspect.
    next_port: usize,
    /// Accumulated height of the finished downstream.
    height: Real,
    /// Padding owed once the child on top of this frame returns.
    pending_padding: Real,
}

impl Frame {
    fn new(unit: UnitId, depth: usize, offset: Real) -> Self {
        Self {
            unit,
            depth,
            offset,
            next_port: 0,
            height: 0.0,
            pending_padding: 0.0,
        }
    }
}

fn run(flowsheet: &mut Flowsheet, options: &LayoutOptions) -> LayoutReport {
    let mut visited = HashSet::with_capacity(flowsheet.unit_count());
    let mut placements = Vec::new();

    let mut running = 0.0;
    for source in flowsheet.unit_ids_by_class(ModelClass::Source) {
        running += place_tree(
            flowsheet,
            source,
            running,
            options,
            &mut visited,
            &mut placements,
        );
    }

    // Pull everything below zero back into view, then apply the margin
    let lowest = flowsheet
        .units()
        .iter()
        .map(|u| u.icon().y)
        .fold(running, Real::min);
    let shift = (if lowest < 0.0 { -lowest } else { 0.0 }) + options.top_margin;
    for unit in flowsheet.units_mut() {
        unit.icon_mut().y += shift;
    }
    for placement in &mut placements {
        placement.y += shift;
    }

    let unreached: Vec<String> = flowsheet
        .unit_ids()
        .filter(|id| !visited.contains(id))
        .filter_map(|id| flowsheet.unit(id))
        .map(|u| u.name().to_string())
        .collect();

    info!(
        flowsheet = flowsheet.name(),
        placed = placements.len(),
        unreached = unreached.len(),
        total_height = running,
        "automatic layout complete"
    );

    LayoutReport {
        placements,
        unreached,
        total_height: running,
    }
}

/// Place every unit reachable from `root` that is not yet visited and return
/// the height of the tree.
fn place_tree(
    flowsheet: &mut Flowsheet,
    root: UnitId,
    offset: Real,
    options: &LayoutOptions,
    visited: &mut HashSet<UnitId>,
    placements: &mut Vec<Placement>,
) -> Real {
    if !visited.insert(root) {
        return 0.0;
    }

    let mut stack = vec![Frame::new(root, options.start_depth, offset)];
    let mut tree_height = 0.0;

    while let Some(frame) = stack.last_mut() {
        if let Some((child, padding)) = next_child(flowsheet, frame, options) {
            if visited.insert(child) {
                frame.pending_padding = padding;
                let child_frame = Frame::new(child, frame.depth + 1, frame.offset + frame.height);
                stack.push(child_frame);
            } else {
                // Already placed elsewhere: contributes no height of its own
                frame.height += padding;
            }
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let height = finish(flowsheet, &done, options, placements);
        match stack.last_mut() {
            Some(parent) => {
                parent.height += height + parent.pending_padding;
                parent.pending_padding = 0.0;
            }
            None => tree_height = height,
        }
    }

    tree_height
}

/// Advance `frame` to its next connected outlet whose first stream has a sink.
///
/// Returns the sink and the padding its port contributes.
fn next_child(
    flowsheet: &Flowsheet,
    frame: &mut Frame,
    options: &LayoutOptions,
) -> Option<(UnitId, Real)> {
    let unit = flowsheet.unit(frame.unit)?;
    while let Some(port) = unit.ports().get(frame.next_port) {
        frame.next_port += 1;
        if !port.is_outlet() {
            continue;
        }
        let Some(sink) = port
            .first_stream()
            .and_then(|s| flowsheet.stream(s))
            .and_then(|s| s.sink())
        else {
            continue;
        };
        let padding = if port.normal().is_vertical() {
            options.vertical_padding
        } else {
            0.0
        };
        return Some((sink, padding));
    }
    None
}

/// Position the unit of a completed frame and return its height.
fn finish(
    flowsheet: &mut Flowsheet,
    frame: &Frame,
    options: &LayoutOptions,
    placements: &mut Vec<Placement>,
) -> Real {
    let Some(unit) = flowsheet.unit_mut(frame.unit) else {
        return frame.height;
    };

    let x = frame.depth as Real * options.layer_width;
    // Height of the icon as it is now, before any resize
    let y = frame.offset + unit.icon().height + frame.height / 2.0;

    match unit.class().layout_icon() {
        Some(icon_type) => {
            unit.set_icon(icon_type, x, y);
            debug!(unit = unit.name(), depth = frame.depth, x, y, "unit placed");
            placements.push(Placement {
                unit: unit.name().to_string(),
                depth: frame.depth,
                x,
                y,
            });
        }
        None => {
            debug!(unit = unit.name(), class = %unit.class(), "no layout icon, left in place");
        }
    }
    frame.height
}
