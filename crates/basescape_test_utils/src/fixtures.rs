//! Test fixtures and helpers.
//!
//! A small ruleset plus pre-built bases for consistent testing.

use std::sync::Arc;

use basescape_core::base::{Base, Facility};
use basescape_core::data::{parse_ron, BaseData, FacilityData, RulesetData};
use basescape_core::pointer::DisplayScale;
use basescape_core::ruleset::{FacilityRule, Ruleset};
use basescape_core::surface::{SpriteSet, Surface};
use fixed::types::I32F32;

/// Ruleset used across tests, in data-file form.
pub const RULESET_RON: &str = r#"(
    facilities: [
        (id: "lift", sprite_shape: 2, sprite_facility: 17, build_time: 1),
        (id: "lab", sprite_shape: 2, sprite_facility: 18, build_time: 26),
        (id: "quarters", sprite_shape: 2, sprite_facility: 19, build_time: 16),
        (id: "hangar", size: 2, sprite_shape: 24, build_time: 25, crafts: 1),
        (id: "depot", size: 3, sprite_shape: 40, build_time: 30),
    ],
    crafts: [
        (id: "interceptor", sprite: 33),
        (id: "transport", sprite: 34),
    ],
)"#;

/// Base used across tests, in data-file form.
///
/// ```text
///   0 1 2 3 4 5
/// 0 . . . . . .
/// 1 . . L . . .    L lab (under construction)
/// 2 W W E H H .    E lift
/// 3 W W . H H .    W hangar (west), H hangar (east)
/// 4 . . . . . .
/// 5 . . . . . .
/// ```
pub const BASE_RON: &str = r#"(
    name: "Alpha",
    facilities: [
        (kind: "lift", x: 2, y: 2),
        (kind: "hangar", x: 3, y: 2),
        (kind: "lab", x: 2, y: 1, build_time: 5),
        (kind: "hangar", x: 0, y: 2),
    ],
    crafts: ["interceptor", "transport"],
)"#;

/// Load [`RULESET_RON`].
#[must_use]
pub fn ruleset() -> Ruleset {
    let data: RulesetData = parse_ron("ruleset.ron", RULESET_RON).unwrap();
    Ruleset::from_data(&data).unwrap()
}

/// Load [`BASE_RON`] against [`ruleset`].
#[must_use]
pub fn sample_base() -> Base {
    let data: BaseData = parse_ron("alpha.ron", BASE_RON).unwrap();
    Base::from_data(&data, &ruleset()).unwrap()
}

/// Create a facility rule with the given footprint size.
#[must_use]
pub fn sized_rule(size: u32) -> Arc<FacilityRule> {
    Arc::new(
        FacilityRule::from_data(&FacilityData {
            id: format!("size_{size}"),
            size,
            sprite_shape: 2,
            sprite_facility: 17,
            build_time: 10,
            crafts: 0,
        })
        .unwrap(),
    )
}

/// A base with a single operational lift at (2, 2).
#[must_use]
pub fn lift_base() -> Base {
    let mut base = Base::new("Lift");
    base.add_facility(Facility::operational(sized_rule(1), 2, 2));
    base
}

/// Sprite set whose frame `i` is a `side` x `side` square filled with
/// colour `i + 1` (wrapping past 255, skipping transparent).
#[must_use]
pub fn numbered_sprites(count: usize, side: u32) -> SpriteSet {
    let frames = (0..count)
        .map(|i| {
            let mut frame = Surface::new(side, side);
            frame.fill((i % 255) as u8 + 1);
            frame
        })
        .collect();
    SpriteSet::new(frames)
}

/// Create a display scale from a float (for tests only).
#[must_use]
pub fn scale_f(factor: f64) -> DisplayScale {
    DisplayScale::new(I32F32::from_num(factor)).unwrap()
}
