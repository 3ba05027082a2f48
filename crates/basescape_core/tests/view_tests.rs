//! Base view scenarios driven from the shared data fixtures.

use std::time::Duration;

use basescape_core::prelude::*;
use basescape_test_utils::fixtures::{
    lift_base, numbered_sprites, ruleset, sample_base, scale_f, sized_rule,
};

fn sample_view() -> BaseView {
    let mut view = BaseView::new(ViewConfig::default(), (0, 0)).unwrap();
    view.set_sprites(numbered_sprites(64, 32));
    view.bind_base(sample_base());
    view
}

fn hover(view: &mut BaseView, x: i32, y: i32) {
    view.pointer_move((x * 32 + 8, y * 32 + 8), DisplayScale::ONE);
}

#[test]
fn lift_scenario_placement() {
    let mut view = BaseView::new(ViewConfig::default(), (0, 0)).unwrap();
    view.bind_base(lift_base());

    assert!(view.is_placeable_at((2, 1), 1));
    assert!(!view.is_placeable_at((0, 0), 1));
    assert!(!view.is_placeable_at((1, 1), 2));

    view.pointer_move((96, 96), DisplayScale::ONE);
    assert_eq!(view.hovered_cell(), Some((3, 3)));
}

#[test]
fn sample_base_placement() {
    let view = sample_view();

    assert!(view.is_placeable_at((5, 2), 1));
    assert!(view.is_placeable_at((1, 1), 1));
    assert!(view.is_placeable_at((0, 0), 2));
    // Only neighbour is the unfinished lab
    assert_eq!(
        view.check_placement_at((2, 0), 1),
        PlacementResult::Disconnected
    );
    assert_eq!(
        view.check_placement_at((4, 4), 3),
        PlacementResult::OutOfBounds
    );
}

#[test]
fn finishing_construction_connects_neighbours() {
    let mut view = sample_view();
    let events = view.edit_base(|base| base.advance_construction(5)).unwrap();

    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        ConstructionEvent::ConstructionComplete { .. }
    ));
    assert!(view.is_placeable_at((2, 0), 1));
}

#[test]
fn sample_base_render_layers() {
    let view = sample_view();
    let frame = view.render();
    let layer = frame.base;

    assert_eq!((layer.width(), layer.height()), (192, 192));
    // Background tile
    assert_eq!(layer.pixel(5, 5), Some(1));
    // East hangar footprint, fourth cell
    assert_eq!(layer.pixel(156, 124), Some(28));
    // Connectors east and west of the lift
    assert_eq!(layer.pixel(100, 70), Some(8));
    assert_eq!(layer.pixel(52, 66), Some(8));
    // Craft docked in list order: east hangar first, then west
    assert_eq!(layer.pixel(120, 88), Some(34));
    assert_eq!(layer.pixel(20, 88), Some(35));
    // Lab icon with its countdown on top
    assert_eq!(layer.pixel(65, 33), Some(19));
    let countdown = (32..64).any(|y| (64..96).any(|x| layer.pixel(x, y) == Some(213)));
    assert!(countdown);
}

#[test]
fn selected_facility_under_scaled_pointer() {
    let mut view = BaseView::new(ViewConfig::default(), (10, 10)).unwrap();
    view.bind_base(sample_base());

    let scale = scale_f(2.0);
    view.pointer_move((20 + 4 * 64 + 1, 20 + 3 * 64 + 1), scale);
    assert_eq!(view.hovered_cell(), Some((4, 3)));

    let (_, facility) = view.selected_facility().unwrap();
    assert_eq!(facility.rule().id(), "hangar");
    assert_eq!((facility.x(), facility.y()), (3, 2));

    view.pointer_move((19, 19), scale);
    assert_eq!(view.hovered_cell(), None);
}

#[test]
fn overlay_composites_over_base_layer() {
    let mut view = sample_view();
    view.set_selectable(1);
    hover(&mut view, 5, 2);

    let composite = view.render().composite();
    assert_eq!(composite.pixel(160, 64), Some(Palette::block_offset(1)));
    // Inset fill is transparent, so the tile shows through
    assert_eq!(composite.pixel(170, 70), Some(1));

    // The dim phase draws nothing over the base layer
    view.tick(Duration::from_millis(100));
    let composite = view.render().composite();
    assert_eq!(composite.pixel(160, 64), Some(1));
}

#[test]
fn place_facility_from_ruleset() {
    let rules = ruleset();
    let mut view = sample_view();

    hover(&mut view, 5, 2);
    let quarters = rules.require_facility("quarters").unwrap().clone();
    let id = view.place_facility(quarters).unwrap();

    let placed = view.base().unwrap().facility(id).unwrap();
    assert_eq!(placed.build_time(), 16);
    assert_eq!(view.grid().occupant(5, 2), Some(id));

    hover(&mut view, 5, 2);
    assert!(matches!(
        view.place_facility(sized_rule(1)),
        Err(GameError::PlacementRejected(PlacementResult::Occupied { .. }))
    ));
}

#[test]
fn missing_sprites_render_background_only() {
    let mut view = BaseView::new(ViewConfig::default(), (0, 0)).unwrap();
    view.bind_base(sample_base());
    assert!(view.render().base.pixels().iter().all(|&p| p == 0 || p == 213));
}
