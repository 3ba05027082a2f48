//! Property tests for the occupancy grid, placement rules, pointer mapping
//! and blink timer.

use std::time::Duration;

use basescape_core::grid::BaseGrid;
use basescape_core::placement::{check_placement, is_placeable, PlacementResult};
use basescape_core::pointer::{map_to_grid, DisplayScale, PointerMapper};
use basescape_core::selection::BlinkTimer;
use basescape_test_utils::strategies::{
    arb_board_and_layout, arb_facility_size, arb_pointer, arb_scale, build_base, PlacedFootprint,
};
use proptest::prelude::*;

/// Whether any operational footprint covers a cell.
fn operational_at(layout: &[PlacedFootprint], x: i64, y: i64) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    layout
        .iter()
        .any(|f| f.operational && f.covers(x as u32, y as u32))
}

/// Reference answer computed straight from the layout, without the grid.
fn expected_placeable(
    board: u32,
    layout: &[PlacedFootprint],
    (x, y): (u32, u32),
    size: u32,
) -> bool {
    if x + size > board || y + size > board {
        return false;
    }
    let candidate = PlacedFootprint {
        x,
        y,
        size,
        operational: false,
    };
    if layout.iter().any(|f| f.overlaps(&candidate)) {
        return false;
    }

    let (x, y, size, board) = (i64::from(x), i64::from(y), i64::from(size), i64::from(board));
    (0..size).any(|i| {
        let around = [
            (x - 1, y + i),
            (x + i, y - 1),
            (x + size, y + i),
            (x + i, y + size),
        ];
        around
            .iter()
            .any(|&(cx, cy)| cx < board && cy < board && operational_at(layout, cx, cy))
    })
}

proptest! {
    /// Every covered cell holds exactly its facility; nothing else is occupied.
    #[test]
    fn prop_rebuild_matches_footprints((board, layout) in arb_board_and_layout()) {
        let base = build_base(&layout);
        let grid = BaseGrid::rebuild(board, &base);
        let ids: Vec<_> = base.facilities().map(|(id, _)| id).collect();

        for y in 0..board {
            for x in 0..board {
                let expected = layout
                    .iter()
                    .position(|f| f.covers(x, y))
                    .map(|index| ids[index]);
                prop_assert_eq!(grid.occupant(x, y), expected);
            }
        }
        let covered: u32 = layout.iter().map(|f| f.size * f.size).sum();
        prop_assert_eq!(grid.occupied_count(), covered as usize);
    }

    /// Placement agrees with a direct reading of the rules.
    #[test]
    fn prop_placement_matches_rules(
        (board, layout) in arb_board_and_layout(),
        x in 0u32..12,
        y in 0u32..12,
        size in arb_facility_size(),
    ) {
        let base = build_base(&layout);
        let grid = BaseGrid::rebuild(board, &base);
        prop_assert_eq!(
            is_placeable(&grid, &base, (x, y), size),
            expected_placeable(board, &layout, (x, y), size)
        );
    }

    /// A footprint sharing any cell with an existing facility is never valid.
    #[test]
    fn prop_overlap_never_placeable(
        (board, layout) in arb_board_and_layout(),
        pick in any::<prop::sample::Index>(),
        size in arb_facility_size(),
    ) {
        prop_assume!(!layout.is_empty());
        let target = layout[pick.index(layout.len())];
        let base = build_base(&layout);
        let grid = BaseGrid::rebuild(board, &base);

        let result = check_placement(&grid, &base, (target.x, target.y), size);
        prop_assert!(matches!(
            result,
            PlacementResult::Occupied { .. } | PlacementResult::OutOfBounds
        ), "overlapping footprint was not rejected");
    }

    /// Without operational facilities nothing can be placed.
    #[test]
    fn prop_unfinished_base_never_placeable(
        (board, layout) in arb_board_and_layout(),
        x in 0u32..12,
        y in 0u32..12,
        size in arb_facility_size(),
    ) {
        let unfinished: Vec<_> = layout
            .into_iter()
            .map(|f| PlacedFootprint { operational: false, ..f })
            .collect();
        let base = build_base(&unfinished);
        let grid = BaseGrid::rebuild(board, &base);
        prop_assert!(!is_placeable(&grid, &base, (x, y), size));
    }

    /// Mapping never decreases as the pointer moves right or down.
    #[test]
    fn prop_pointer_mapping_monotonic(
        a in arb_pointer(),
        b in arb_pointer(),
        origin in (-50i32..50, -50i32..50),
        scale in arb_scale(),
    ) {
        let (low, high) = ((a.0.min(b.0), a.1.min(b.1)), (a.0.max(b.0), a.1.max(b.1)));
        let low_cell = map_to_grid(low, origin, 32, scale);
        let high_cell = map_to_grid(high, origin, 32, scale);
        prop_assert!(low_cell.0 <= high_cell.0);
        prop_assert!(low_cell.1 <= high_cell.1);
    }

    /// A hover cell exists exactly when the raw mapping lies on the board.
    #[test]
    fn prop_pointer_cell_in_bounds(pointer in arb_pointer(), scale in arb_scale()) {
        let mapper = PointerMapper::new((10, 20), 32, 6);
        let (gx, gy) = mapper.map(pointer, scale);
        let on_board = (0..6).contains(&gx) && (0..6).contains(&gy);
        prop_assert_eq!(mapper.cell(pointer, scale).is_some(), on_board);
    }

    /// Integer scales map the scaled pixel of a cell back to that cell.
    #[test]
    fn prop_integer_scale_round_trip(cx in 0i32..6, cy in 0i32..6, factor in 1u32..5) {
        let scale = DisplayScale::integer(factor).unwrap();
        let step = 32 * factor as i32;
        let pointer = (100 * factor as i32 + cx * step, 40 * factor as i32 + cy * step + step - 1);
        prop_assert_eq!(map_to_grid(pointer, (100, 40), 32, scale), (cx, cy));
    }

    /// Splitting elapsed time across ticks does not change the phase.
    #[test]
    fn prop_blink_split_ticks_agree(first in 0u64..1000, second in 0u64..1000) {
        let period = Duration::from_millis(100);
        let mut split = BlinkTimer::new(period);
        let toggles = split.tick(Duration::from_millis(first))
            + split.tick(Duration::from_millis(second));

        let mut whole = BlinkTimer::new(period);
        prop_assert_eq!(whole.tick(Duration::from_millis(first + second)), toggles);
        prop_assert_eq!(split.is_bright(), whole.is_bright());
    }

    /// Zero-length ticks never toggle.
    #[test]
    fn prop_blink_zero_tick_idempotent(elapsed in 0u64..1000, repeats in 1usize..50) {
        let mut timer = BlinkTimer::new(Duration::from_millis(100));
        timer.tick(Duration::from_millis(elapsed));
        let phase = timer.is_bright();
        for _ in 0..repeats {
            prop_assert_eq!(timer.tick(Duration::ZERO), 0);
        }
        prop_assert_eq!(timer.is_bright(), phase);
    }
}
