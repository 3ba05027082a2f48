//! The base record: placed facilities and docked craft.
//!
//! Facilities live in an arena keyed by [`FacilityId`]. Handles are never
//! reused, so a handle kept by a stale grid resolves to `None` after its
//! facility is removed instead of pointing at a different facility.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::BaseData;
use crate::error::{GameError, Result};
use crate::ruleset::{CraftRule, FacilityRule, Ruleset};

// ============================================================================
// Facilities
// ============================================================================

/// Stable handle to a facility inside a [`Base`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacilityId(u32);

impl FacilityId {
    /// Raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A facility placed on the base grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    rule: Arc<FacilityRule>,
    x: u32,
    y: u32,
    build_time: u32,
}

impl Facility {
    /// A newly ordered facility, under construction for its rule's build time.
    #[must_use]
    pub fn new(rule: Arc<FacilityRule>, x: u32, y: u32) -> Self {
        let build_time = rule.build_time();
        Self {
            rule,
            x,
            y,
            build_time,
        }
    }

    /// A finished facility.
    #[must_use]
    pub fn operational(rule: Arc<FacilityRule>, x: u32, y: u32) -> Self {
        Self::new(rule, x, y).with_build_time(0)
    }

    /// Override the remaining construction time.
    #[must_use]
    pub fn with_build_time(mut self, build_time: u32) -> Self {
        self.build_time = build_time;
        self
    }

    /// Facility type.
    #[must_use]
    pub fn rule(&self) -> &Arc<FacilityRule> {
        &self.rule
    }

    /// Origin column.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Origin row.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Footprint side length.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.rule.size()
    }

    /// Days of construction remaining.
    #[must_use]
    pub const fn build_time(&self) -> u32 {
        self.build_time
    }

    /// Whether construction is finished.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.build_time == 0
    }

    /// Whether the footprint covers cell `(x, y)`.
    #[must_use]
    pub fn covers(&self, x: u32, y: u32) -> bool {
        let size = self.size();
        x >= self.x && y >= self.y && x - self.x < size && y - self.y < size
    }

    /// Footprint cells lying on a `board` x `board` grid, row-major, each
    /// paired with its index within the whole footprint.
    ///
    /// Only the on-board part is visited, however large the footprint.
    pub fn cells_on_board(&self, board: u32) -> impl Iterator<Item = (usize, (u32, u32))> + '_ {
        let size = self.size();
        let x_end = self.x.saturating_add(size).min(board);
        let y_end = self.y.saturating_add(size).min(board);
        (self.y..y_end).flat_map(move |y| {
            (self.x..x_end).map(move |x| {
                let num = (y - self.y) as usize * size as usize + (x - self.x) as usize;
                (num, (x, y))
            })
        })
    }

    /// Count construction down by `days`.
    ///
    /// Returns `true` if this call finished the facility.
    pub fn advance_construction(&mut self, days: u32) -> bool {
        if self.build_time == 0 {
            return false;
        }
        self.build_time = self.build_time.saturating_sub(days);
        self.build_time == 0
    }
}

// ============================================================================
// Craft
// ============================================================================

/// A craft stationed at the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Craft {
    rule: Arc<CraftRule>,
}

impl Craft {
    /// Create a craft of the given type.
    #[must_use]
    pub fn new(rule: Arc<CraftRule>) -> Self {
        Self { rule }
    }

    /// Craft type.
    #[must_use]
    pub fn rule(&self) -> &Arc<CraftRule> {
        &self.rule
    }
}

// ============================================================================
// Base
// ============================================================================

/// Events generated while counting construction down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionEvent {
    /// Construction has progressed.
    ConstructionProgress {
        /// The facility.
        facility: FacilityId,
        /// Days still remaining.
        remaining: u32,
    },
    /// Construction has completed.
    ConstructionComplete {
        /// The facility.
        facility: FacilityId,
    },
}

/// A player base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Base {
    name: String,
    facilities: BTreeMap<FacilityId, Facility>,
    next_id: u32,
    crafts: Vec<Craft>,
}

impl Base {
    /// Create an empty base.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve a saved base against a ruleset.
    ///
    /// Placements are trusted as they are; no placement rules are applied,
    /// which is how the first facility of a base gets seeded.
    pub fn from_data(data: &BaseData, ruleset: &Ruleset) -> Result<Self> {
        let mut base = Self::new(data.name.clone());
        for placement in &data.facilities {
            let rule = ruleset.require_facility(&placement.kind)?;
            base.add_facility(
                Facility::new(Arc::clone(rule), placement.x, placement.y)
                    .with_build_time(placement.build_time),
            );
        }
        for kind in &data.crafts {
            let rule = ruleset.require_craft(kind)?;
            base.add_craft(Craft::new(Arc::clone(rule)));
        }
        debug!(
            base = %base.name,
            facilities = base.facilities.len(),
            crafts = base.crafts.len(),
            "Base resolved"
        );
        Ok(base)
    }

    /// Base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a facility to the list and return its handle.
    pub fn add_facility(&mut self, facility: Facility) -> FacilityId {
        let id = FacilityId(self.next_id);
        self.next_id += 1;
        self.facilities.insert(id, facility);
        id
    }

    /// Remove a facility. Its handle is never handed out again.
    pub fn remove_facility(&mut self, id: FacilityId) -> Option<Facility> {
        self.facilities.remove(&id)
    }

    /// Resolve a handle.
    #[must_use]
    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.get(&id)
    }

    /// Resolve a handle, failing if the facility no longer exists.
    pub fn require_facility(&self, id: FacilityId) -> Result<&Facility> {
        self.facility(id)
            .ok_or(GameError::FacilityNotFound(id.raw()))
    }

    /// Facilities in list order.
    pub fn facilities(&self) -> impl Iterator<Item = (FacilityId, &Facility)> + '_ {
        self.facilities.iter().map(|(id, facility)| (*id, facility))
    }

    /// Number of facilities.
    #[must_use]
    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    /// Append a craft to the list.
    pub fn add_craft(&mut self, craft: Craft) {
        self.crafts.push(craft);
    }

    /// Remove the craft at `index`, if any.
    pub fn remove_craft(&mut self, index: usize) -> Option<Craft> {
        (index < self.crafts.len()).then(|| self.crafts.remove(index))
    }

    /// Craft in list order.
    #[must_use]
    pub fn crafts(&self) -> &[Craft] {
        &self.crafts
    }

    /// Count construction down by `days` on every unfinished facility.
    pub fn advance_construction(&mut self, days: u32) -> Vec<ConstructionEvent> {
        let mut events = Vec::new();

        for (id, facility) in &mut self.facilities {
            if facility.is_operational() {
                continue;
            }

            if facility.advance_construction(days) {
                events.push(ConstructionEvent::ConstructionComplete { facility: *id });
            } else {
                events.push(ConstructionEvent::ConstructionProgress {
                    facility: *id,
                    remaining: facility.build_time(),
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CraftData, FacilityData, FacilityPlacementData, RulesetData};
    use crate::error::GameError;

    fn rule(id: &str, size: u32) -> Arc<FacilityRule> {
        Arc::new(
            FacilityRule::from_data(&FacilityData {
                id: id.to_string(),
                size,
                sprite_shape: 0,
                sprite_facility: 0,
                build_time: 5,
                crafts: 0,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_new_facility_is_under_construction() {
        let facility = Facility::new(rule("lab", 2), 1, 1);
        assert_eq!(facility.build_time(), 5);
        assert!(!facility.is_operational());
        assert!(Facility::operational(rule("lab", 2), 1, 1).is_operational());
    }

    #[test]
    fn test_facility_cells_row_major() {
        let facility = Facility::operational(rule("hangar", 2), 3, 1);
        let cells: Vec<_> = facility.cells_on_board(6).collect();
        assert_eq!(
            cells,
            vec![(0, (3, 1)), (1, (4, 1)), (2, (3, 2)), (3, (4, 2))]
        );
    }

    #[test]
    fn test_cells_on_board_clips_footprint() {
        // Footprint indices keep counting across the clipped columns
        let facility = Facility::operational(rule("hangar", 3), 4, 4);
        let cells: Vec<_> = facility.cells_on_board(6).collect();
        assert_eq!(
            cells,
            vec![(0, (4, 4)), (1, (5, 4)), (3, (4, 5)), (4, (5, 5))]
        );

        let huge = Facility::operational(rule("depot", u32::MAX), 0, 0);
        assert_eq!(huge.cells_on_board(6).count(), 36);

        let far = Facility::operational(rule("lift", 1), 0, 70_000_000);
        assert_eq!(far.cells_on_board(6).count(), 0);
    }

    #[test]
    fn test_facility_covers() {
        let facility = Facility::operational(rule("hangar", 2), 3, 1);
        assert!(facility.covers(3, 1));
        assert!(facility.covers(4, 2));
        assert!(!facility.covers(2, 1));
        assert!(!facility.covers(5, 1));
        assert!(!facility.covers(3, 3));
    }

    #[test]
    fn test_handles_not_reused() {
        let mut base = Base::new("Alpha");
        let a = base.add_facility(Facility::operational(rule("lift", 1), 0, 0));
        assert!(base.remove_facility(a).is_some());
        let b = base.add_facility(Facility::operational(rule("lift", 1), 0, 0));
        assert_ne!(a, b);
        assert!(base.facility(a).is_none());
        assert!(base.facility(b).is_some());
        assert_eq!(
            base.require_facility(a),
            Err(GameError::FacilityNotFound(a.raw()))
        );
    }

    #[test]
    fn test_facilities_in_insertion_order() {
        let mut base = Base::new("Alpha");
        base.add_facility(Facility::operational(rule("a", 1), 5, 5));
        base.add_facility(Facility::operational(rule("b", 1), 0, 0));
        base.add_facility(Facility::operational(rule("c", 1), 2, 2));
        let ids: Vec<_> = base
            .facilities()
            .map(|(_, f)| f.rule().id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_craft_out_of_range() {
        let mut base = Base::new("Alpha");
        assert!(base.remove_craft(0).is_none());
    }

    #[test]
    fn test_advance_construction_events() {
        let mut base = Base::new("Alpha");
        let done = base.add_facility(Facility::operational(rule("lift", 1), 0, 0));
        let slow = base.add_facility(Facility::new(rule("lab", 1), 1, 0).with_build_time(3));
        let fast = base.add_facility(Facility::new(rule("lab", 1), 2, 0).with_build_time(1));

        let events = base.advance_construction(1);
        assert_eq!(
            events,
            vec![
                ConstructionEvent::ConstructionProgress {
                    facility: slow,
                    remaining: 2
                },
                ConstructionEvent::ConstructionComplete { facility: fast },
            ]
        );
        assert!(base.facility(done).unwrap().is_operational());
        assert!(base.facility(fast).unwrap().is_operational());

        // Already finished facilities emit nothing
        let events = base.advance_construction(5);
        assert_eq!(
            events,
            vec![ConstructionEvent::ConstructionComplete { facility: slow }]
        );
        assert!(base.advance_construction(1).is_empty());
    }

    #[test]
    fn test_from_data_resolves_types() {
        let ruleset = Ruleset::from_data(&RulesetData {
            facilities: vec![FacilityData {
                id: "lift".to_string(),
                size: 1,
                sprite_shape: 2,
                sprite_facility: 17,
                build_time: 1,
                crafts: 0,
            }],
            crafts: vec![CraftData {
                id: "interceptor".to_string(),
                sprite: 33,
            }],
        })
        .unwrap();

        let data = BaseData {
            name: "Alpha".to_string(),
            facilities: vec![FacilityPlacementData {
                kind: "lift".to_string(),
                x: 2,
                y: 2,
                build_time: 0,
            }],
            crafts: vec!["interceptor".to_string()],
        };
        let base = Base::from_data(&data, &ruleset).unwrap();
        assert_eq!(base.name(), "Alpha");
        assert_eq!(base.facility_count(), 1);
        assert_eq!(base.crafts().len(), 1);

        let mut bad = data.clone();
        bad.facilities[0].kind = "lab".to_string();
        assert_eq!(
            Base::from_data(&bad, &ruleset).unwrap_err(),
            GameError::UnknownFacilityType("lab".to_string())
        );

        let mut bad = data;
        bad.crafts.push("ufo".to_string());
        assert_eq!(
            Base::from_data(&bad, &ruleset).unwrap_err(),
            GameError::UnknownCraftType("ufo".to_string())
        );
    }
}
