//! Occupancy grid for a base.
//!
//! The grid is a derived index over the base's facility list: every cell of
//! a facility's footprint holds that facility's handle. It is rebuilt from
//! scratch whenever the facility list changes and never patched in place.

use tracing::debug;

use crate::base::{Base, Facility, FacilityId};

/// Square occupancy matrix of facility handles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseGrid {
    /// Side length in cells.
    size: u32,
    /// Cell data stored in row-major order.
    cells: Vec<Option<FacilityId>>,
}

impl BaseGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let cell_count = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![None; cell_count],
        }
    }

    /// Build the grid for a base.
    ///
    /// Footprint cells outside the board are skipped. Overlapping
    /// footprints are not reported: the facility listed last wins the cell.
    #[must_use]
    pub fn rebuild(size: u32, base: &Base) -> Self {
        let mut grid = Self::new(size);
        for (id, facility) in base.facilities() {
            grid.stamp(id, facility);
        }
        debug!(
            size,
            facilities = base.facility_count(),
            occupied = grid.occupied_count(),
            "Base grid rebuilt"
        );
        grid
    }

    fn stamp(&mut self, id: FacilityId, facility: &Facility) {
        for (_, (x, y)) in facility.cells_on_board(self.size) {
            let index = self.coords_to_index(x, y);
            self.cells[index] = Some(id);
        }
    }

    /// Side length in cells.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Convert (x, y) coordinates to cell index.
    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.size as usize) + (x as usize)
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size
    }

    /// Check if signed coordinates are within grid bounds.
    #[must_use]
    pub fn in_bounds_signed(&self, x: i32, y: i32) -> bool {
        u32::try_from(x).is_ok_and(|x| x < self.size)
            && u32::try_from(y).is_ok_and(|y| y < self.size)
    }

    /// Handle stored at a cell. `None` if empty or out of bounds.
    #[must_use]
    pub fn occupant(&self, x: u32, y: u32) -> Option<FacilityId> {
        if self.in_bounds(x, y) {
            self.cells[self.coords_to_index(x, y)]
        } else {
            None
        }
    }

    /// Resolve the facility at a cell against its base.
    ///
    /// Handles of facilities removed since the last rebuild resolve to `None`.
    #[must_use]
    pub fn facility_at<'a>(
        &self,
        base: &'a Base,
        x: u32,
        y: u32,
    ) -> Option<(FacilityId, &'a Facility)> {
        let id = self.occupant(x, y)?;
        base.facility(id).map(|facility| (id, facility))
    }

    /// Whether the facility at a cell exists and is operational.
    #[must_use]
    pub fn is_operational_at(&self, base: &Base, x: u32, y: u32) -> bool {
        self.facility_at(base, x, y)
            .is_some_and(|(_, facility)| facility.is_operational())
    }

    /// Whether an in-bounds cell holds no live facility.
    ///
    /// Out-of-bounds cells are never empty.
    #[must_use]
    pub fn is_empty(&self, base: &Base, x: u32, y: u32) -> bool {
        self.in_bounds(x, y) && self.facility_at(base, x, y).is_none()
    }

    /// Number of cells holding a handle.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// All occupied cells with their handle, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u32, u32, FacilityId)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|id| ((index % size) as u32, (index / size) as u32, id))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::FacilityData;
    use crate::ruleset::FacilityRule;

    fn rule(size: u32) -> Arc<FacilityRule> {
        Arc::new(
            FacilityRule::from_data(&FacilityData {
                id: format!("size_{size}"),
                size,
                sprite_shape: 0,
                sprite_facility: 0,
                build_time: 0,
                crafts: 0,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = BaseGrid::new(6);
        let base = Base::new("empty");
        assert_eq!(grid.size(), 6);
        for y in 0..6 {
            for x in 0..6 {
                assert!(grid.is_empty(&base, x, y));
                assert_eq!(grid.occupant(x, y), None);
            }
        }
    }

    #[test]
    fn test_rebuild_stamps_footprints() {
        let mut base = Base::new("Alpha");
        let lift = base.add_facility(Facility::operational(rule(1), 2, 2));
        let hangar = base.add_facility(Facility::operational(rule(2), 3, 3));

        let grid = BaseGrid::rebuild(6, &base);
        assert_eq!(grid.occupant(2, 2), Some(lift));
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            assert_eq!(grid.occupant(x, y), Some(hangar));
        }
        assert_eq!(grid.occupant(5, 5), None);
        assert_eq!(grid.occupied_count(), 5);
    }

    #[test]
    fn test_rebuild_overlap_last_wins() {
        let mut base = Base::new("Broken");
        base.add_facility(Facility::operational(rule(2), 0, 0));
        let second = base.add_facility(Facility::operational(rule(1), 1, 1));

        let grid = BaseGrid::rebuild(6, &base);
        assert_eq!(grid.occupant(1, 1), Some(second));
    }

    #[test]
    fn test_rebuild_skips_out_of_bounds_cells() {
        let mut base = Base::new("Edge");
        let id = base.add_facility(Facility::operational(rule(2), 5, 5));

        let grid = BaseGrid::rebuild(6, &base);
        assert_eq!(grid.occupant(5, 5), Some(id));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_rebuild_huge_footprint_visits_board_only() {
        let mut base = Base::new("Sprawl");
        let id = base.add_facility(Facility::operational(rule(u32::MAX), 1, 1));
        base.add_facility(Facility::operational(rule(1), 0, u32::MAX));

        let grid = BaseGrid::rebuild(6, &base);
        assert_eq!(grid.occupied_count(), 25);
        assert_eq!(grid.occupant(5, 5), Some(id));
        assert_eq!(grid.occupant(0, 0), None);
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let grid = BaseGrid::new(6);
        let base = Base::new("empty");
        assert_eq!(grid.occupant(6, 0), None);
        assert!(!grid.is_empty(&base, 6, 0));
        assert!(!grid.in_bounds_signed(-1, 0));
        assert!(!grid.in_bounds_signed(0, 6));
        assert!(grid.in_bounds_signed(5, 5));
    }

    #[test]
    fn test_stale_handle_resolves_to_none() {
        let mut base = Base::new("Alpha");
        let id = base.add_facility(Facility::operational(rule(1), 1, 1));
        let grid = BaseGrid::rebuild(6, &base);

        base.remove_facility(id);
        assert_eq!(grid.occupant(1, 1), Some(id));
        assert!(grid.facility_at(&base, 1, 1).is_none());
        assert!(grid.is_empty(&base, 1, 1));
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let mut base = Base::new("Alpha");
        let a = base.add_facility(Facility::operational(rule(1), 4, 0));
        let b = base.add_facility(Facility::operational(rule(1), 0, 1));
        let grid = BaseGrid::rebuild(6, &base);
        let cells: Vec<_> = grid.occupied_cells().collect();
        assert_eq!(cells, vec![(4, 0, a), (0, 1, b)]);
    }
}
