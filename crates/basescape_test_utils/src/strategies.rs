//! Proptest strategies for grid, placement and pointer properties.

use basescape_core::base::{Base, Facility};
use basescape_core::math::Fixed;
use basescape_core::pointer::DisplayScale;
use proptest::prelude::*;

use crate::fixtures::sized_rule;

/// One facility of a generated layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedFootprint {
    /// Origin column.
    pub x: u32,
    /// Origin row.
    pub y: u32,
    /// Footprint side.
    pub size: u32,
    /// Whether construction has finished.
    pub operational: bool,
}

impl PlacedFootprint {
    /// Whether two footprints share a cell.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.size
            && other.x < self.x + self.size
            && self.y < other.y + other.size
            && other.y < self.y + self.size
    }

    /// Whether the footprint covers a cell.
    #[must_use]
    pub fn covers(&self, x: u32, y: u32) -> bool {
        (self.x..self.x + self.size).contains(&x) && (self.y..self.y + self.size).contains(&y)
    }
}

/// Generate a board size (1-10).
pub fn arb_board_size() -> impl Strategy<Value = u32> {
    1u32..=10u32
}

/// Generate a facility footprint size (1-3).
pub fn arb_facility_size() -> impl Strategy<Value = u32> {
    1u32..=3u32
}

/// Generate in-bounds, non-overlapping footprints on a `board` grid.
///
/// Candidates that would leave the board or overlap an earlier footprint
/// are dropped, so the result may be shorter than `max_len`.
pub fn arb_layout(board: u32, max_len: usize) -> impl Strategy<Value = Vec<PlacedFootprint>> {
    let candidate = (0..board, 0..board, arb_facility_size(), any::<bool>()).prop_map(
        |(x, y, size, operational)| PlacedFootprint {
            x,
            y,
            size,
            operational,
        },
    );
    proptest::collection::vec(candidate, 0..max_len).prop_map(move |candidates| {
        let mut placed: Vec<PlacedFootprint> = Vec::new();
        for footprint in candidates {
            let fits = footprint.x + footprint.size <= board && footprint.y + footprint.size <= board;
            if fits && !placed.iter().any(|other| other.overlaps(&footprint)) {
                placed.push(footprint);
            }
        }
        placed
    })
}

/// Generate a board size together with a layout on it.
pub fn arb_board_and_layout() -> impl Strategy<Value = (u32, Vec<PlacedFootprint>)> {
    arb_board_size().prop_flat_map(|board| (Just(board), arb_layout(board, 12)))
}

/// Build a base from a generated layout, in layout order.
#[must_use]
pub fn build_base(layout: &[PlacedFootprint]) -> Base {
    let mut base = Base::new("Generated");
    for footprint in layout {
        let facility = Facility::new(sized_rule(footprint.size), footprint.x, footprint.y);
        let facility = if footprint.operational {
            facility.with_build_time(0)
        } else {
            facility
        };
        base.add_facility(facility);
    }
    base
}

/// Generate a physical pointer position around a small view.
pub fn arb_pointer() -> impl Strategy<Value = (i32, i32)> {
    (-400i32..800i32, -400i32..800i32)
}

/// Generate a display scale in quarter steps (0.25 to 4.0).
pub fn arb_scale() -> impl Strategy<Value = DisplayScale> {
    (1i32..=16i32).prop_map(|quarters| {
        DisplayScale::new(Fixed::from_num(quarters) / 4).unwrap()
    })
}
