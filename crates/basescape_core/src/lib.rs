//! # Basescape Core
//!
//! Base layout grid engine.
//!
//! This crate maintains a base's facility layout on a fixed square grid and
//! answers the questions an interactive base screen asks of it:
//! - Which facility occupies a cell
//! - Whether a facility of a given size may be built at a cell
//! - Which cell a pointer position falls in
//! - What the base looks like, as paletted layers
//!
//! It does no IO beyond parsing RON text handed to it, and owns no clock:
//! the caller drives blinking with explicit ticks.
//!
//! ## Crate Structure
//!
//! - [`base`] - Facility arena and docked craft
//! - [`grid`] - Occupancy grid derived from a base
//! - [`placement`] - Placement rules
//! - [`pointer`] - Pointer to cell mapping
//! - [`selection`] - Selection overlay and blink timer
//! - [`render`] - Layered base rendering
//! - [`surface`] - Paletted surfaces, sprites and fonts
//! - [`view`] - Interactive facade tying the above together
//! - [`data`] / [`ruleset`] - Data records and resolved rules

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod base;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod math;
pub mod placement;
pub mod pointer;
pub mod render;
pub mod ruleset;
pub mod selection;
pub mod surface;
pub mod view;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::base::{Base, ConstructionEvent, Craft, Facility, FacilityId};
    pub use crate::config::ViewConfig;
    pub use crate::data::{BaseData, CraftData, FacilityData, FacilityPlacementData, RulesetData};
    pub use crate::error::{GameError, Result};
    pub use crate::grid::BaseGrid;
    pub use crate::math::Fixed;
    pub use crate::placement::{check_placement, is_placeable, PlacementResult};
    pub use crate::pointer::{map_to_grid, DisplayScale, PointerButton, PointerMapper};
    pub use crate::render::{Frame, OverlayLayer, RenderComposer};
    pub use crate::ruleset::{CraftRule, FacilityRule, Ruleset};
    pub use crate::selection::{BlinkTimer, OverlayState, SelectionOverlay};
    pub use crate::surface::{BitmapFont, Palette, Rect, Surface, SpriteSet, TRANSPARENT};
    pub use crate::view::{BaseView, PointerHit};
}
