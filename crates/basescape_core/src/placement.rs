//! Facility placement rules.
//!
//! A new facility must fit on the board, cover only empty cells, and share
//! at least one edge cell with an operational facility. Facilities still
//! under construction are not valid connection points, so unfinished
//! facilities cannot be chained off each other.

use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::grid::BaseGrid;

/// Result of placement validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementResult {
    /// Placement is valid.
    Valid,
    /// Footprint leaves the board (or has no cells at all).
    OutOfBounds,
    /// One or more footprint cells already hold a facility.
    Occupied {
        /// Occupied cell coordinates, row-major.
        cells: Vec<(u32, u32)>,
    },
    /// No operational facility touches any edge of the footprint.
    Disconnected,
}

impl PlacementResult {
    /// Check if placement is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, PlacementResult::Valid)
    }
}

/// Check whether a `size` x `size` facility fits at `origin`.
///
/// Bounds and occupancy are checked before connectivity, so an overlapping
/// footprint is reported as [`PlacementResult::Occupied`] even when it also
/// touches an operational facility.
#[must_use]
pub fn check_placement(
    grid: &BaseGrid,
    base: &Base,
    origin: (u32, u32),
    size: u32,
) -> PlacementResult {
    let (start_x, start_y) = origin;
    let board = grid.size();

    if size == 0 {
        return PlacementResult::OutOfBounds;
    }
    let (Some(end_x), Some(end_y)) = (start_x.checked_add(size), start_y.checked_add(size)) else {
        return PlacementResult::OutOfBounds;
    };
    if end_x > board || end_y > board {
        return PlacementResult::OutOfBounds;
    }

    let occupied: Vec<(u32, u32)> = (start_y..end_y)
        .flat_map(|y| (start_x..end_x).map(move |x| (x, y)))
        .filter(|&(x, y)| !grid.is_empty(base, x, y))
        .collect();
    if !occupied.is_empty() {
        return PlacementResult::Occupied { cells: occupied };
    }

    if has_operational_neighbour(grid, base, origin, size) {
        PlacementResult::Valid
    } else {
        PlacementResult::Disconnected
    }
}

/// Check whether a `size` x `size` facility may be placed at `origin`.
#[must_use]
pub fn is_placeable(grid: &BaseGrid, base: &Base, origin: (u32, u32), size: u32) -> bool {
    check_placement(grid, base, origin, size).is_valid()
}

/// Scan the cells just outside each edge of the footprint.
///
/// The footprint is assumed to lie inside the board.
fn has_operational_neighbour(grid: &BaseGrid, base: &Base, origin: (u32, u32), size: u32) -> bool {
    let (x, y) = origin;
    let board = grid.size();
    let operational = |cx: u32, cy: u32| grid.is_operational_at(base, cx, cy);

    (0..size).any(|i| {
        (x > 0 && operational(x - 1, y + i))
            || (y > 0 && operational(x + i, y - 1))
            || (x + size < board && operational(x + size, y + i))
            || (y + size < board && operational(x + i, y + size))
    })
}
