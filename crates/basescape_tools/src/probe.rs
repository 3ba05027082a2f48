//! Pointer and placement probes.
//!
//! A probe drives a view exactly like an input layer would and reports what
//! the view answers, as JSON for scripts and regression fixtures.

use basescape_core::base::Base;
use basescape_core::config::ViewConfig;
use basescape_core::math::Fixed;
use basescape_core::placement::PlacementResult;
use basescape_core::pointer::{DisplayScale, PointerButton};
use basescape_core::view::{BaseView, PointerHit};
use serde::Serialize;

use crate::error::{Result, ToolError};

/// What a probe asks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    /// View origin in logical pixels.
    pub origin: (i32, i32),
    /// Pointer position in physical pixels.
    pub pointer: (i32, i32),
    /// Display scale factor.
    pub scale: f64,
    /// Footprint sizes to test at the hover cell.
    pub sizes: Vec<u32>,
}

/// Facility found under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityProbe {
    /// Arena handle.
    pub id: u32,
    /// Facility type id.
    pub kind: String,
    /// Origin cell.
    pub origin: (u32, u32),
    /// Footprint side.
    pub size: u32,
    /// Days of construction remaining.
    pub build_time: u32,
}

/// Placement verdict for one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementProbe {
    /// Footprint side.
    pub size: u32,
    /// Verdict.
    pub result: PlacementResult,
}

/// Everything the view answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Base name.
    pub base: String,
    /// Click result for the primary button.
    pub hit: Option<PointerHit>,
    /// Facility under the pointer.
    pub facility: Option<FacilityProbe>,
    /// Verdicts at the hover cell, empty when the pointer is off the board.
    pub placements: Vec<PlacementProbe>,
}

/// Parse a display scale given on the command line.
pub fn parse_scale(scale: f64) -> Result<DisplayScale> {
    let factor = Fixed::checked_from_num(scale)
        .ok_or_else(|| ToolError::InvalidArgument(format!("scale {scale} out of range")))?;
    Ok(DisplayScale::new(factor)?)
}

/// Run a probe against one base.
pub fn probe(base: Base, config: &ViewConfig, request: &ProbeRequest) -> Result<ProbeReport> {
    let scale = parse_scale(request.scale)?;
    let name = base.name().to_string();
    let mut view = BaseView::new(config.clone(), request.origin)?;
    view.bind_base(base);

    let hit = view.pointer_click(PointerButton::Left, request.pointer, scale);
    let facility = view.selected_facility().map(|(id, facility)| FacilityProbe {
        id: id.raw(),
        kind: facility.rule().id().to_string(),
        origin: (facility.x(), facility.y()),
        size: facility.size(),
        build_time: facility.build_time(),
    });
    let placements = match view.hovered_cell() {
        Some(cell) => request
            .sizes
            .iter()
            .map(|&size| PlacementProbe {
                size,
                result: view.check_placement_at(cell, size),
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(ProbeReport {
        base: name,
        hit,
        facility,
        placements,
    })
}

/// Render a report as pretty JSON.
pub fn to_json(report: &ProbeReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
