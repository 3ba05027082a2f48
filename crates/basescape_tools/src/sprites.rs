//! Procedural sprite sets for rendering without game art.
//!
//! Frame indices come from the ruleset and view configuration, so a data
//! directory can be rendered before any sprite sheet exists.

use basescape_core::config::ViewConfig;
use basescape_core::ruleset::Ruleset;
use basescape_core::surface::{Palette, Rect, SpriteSet, Surface};

const TILE_BLOCK: u8 = 8;
const SHAPE_BLOCK: u8 = 3;
const UNFINISHED_BLOCK: u8 = 6;
const ICON_BLOCK: u8 = 10;
const CRAFT_BLOCK: u8 = 2;
const CONNECTOR_BLOCK: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameRole {
    Blank,
    Tile,
    Shape,
    Unfinished,
    Icon,
    Craft,
    HorizontalConnector,
    VerticalConnector,
}

fn paint(role: FrameRole, side: u32) -> Surface {
    let mut frame = Surface::new(side, side);
    let full = Rect::new(0, 0, side, side);
    let quarter = side / 4;
    match role {
        FrameRole::Blank => {}
        FrameRole::Tile => {
            frame.fill_rect(full, Palette::block_offset(TILE_BLOCK) + 12);
            frame.fill_rect(full.inset(1), Palette::block_offset(TILE_BLOCK) + 14);
        }
        FrameRole::Shape => {
            frame.fill_rect(full, Palette::block_offset(SHAPE_BLOCK) + 4);
            frame.fill_rect(full.inset(2), Palette::block_offset(SHAPE_BLOCK) + 8);
        }
        FrameRole::Unfinished => {
            frame.fill_rect(full, Palette::block_offset(UNFINISHED_BLOCK) + 4);
            frame.fill_rect(full.inset(2), Palette::block_offset(UNFINISHED_BLOCK) + 10);
        }
        FrameRole::Icon => {
            frame.fill_rect(full.inset(quarter), Palette::block_offset(ICON_BLOCK) + 6);
        }
        FrameRole::Craft => {
            frame.fill_rect(
                Rect::new(quarter as i32, (side / 2).saturating_sub(2) as i32, side / 2, 4),
                Palette::block_offset(CRAFT_BLOCK) + 2,
            );
            frame.fill_rect(
                Rect::new((side / 2).saturating_sub(2) as i32, quarter as i32, 4, side / 2),
                Palette::block_offset(CRAFT_BLOCK) + 2,
            );
        }
        FrameRole::HorizontalConnector => {
            frame.fill_rect(
                Rect::new(quarter as i32, (side / 2).saturating_sub(3) as i32, side / 2, 6),
                Palette::block_offset(CONNECTOR_BLOCK) + 6,
            );
        }
        FrameRole::VerticalConnector => {
            frame.fill_rect(
                Rect::new((side / 2).saturating_sub(3) as i32, quarter as i32, 6, side / 2),
                Palette::block_offset(CONNECTOR_BLOCK) + 6,
            );
        }
    }
    frame
}

/// Build a debug sprite set covering every frame the ruleset refers to.
///
/// Later roles win when two roles claim the same frame index.
#[must_use]
pub fn debug_sprites(ruleset: &Ruleset, config: &ViewConfig) -> SpriteSet {
    let mut roles: Vec<FrameRole> = Vec::new();
    let mut assign = |index: usize, role: FrameRole| {
        if roles.len() <= index {
            roles.resize(index + 1, FrameRole::Blank);
        }
        roles[index] = role;
    };

    for rule in ruleset.facilities() {
        let cells = (rule.size() * rule.size()) as usize;
        let unfinished = rule.sprite_shape() + config.construction_frame_stride + rule.size() as usize;
        for n in 0..cells {
            assign(rule.sprite_shape() + n, FrameRole::Shape);
            assign(unfinished + n, FrameRole::Unfinished);
        }
        if rule.size() == 1 {
            assign(rule.sprite_facility(), FrameRole::Icon);
        }
    }
    for rule in ruleset.crafts() {
        assign(rule.sprite(), FrameRole::Craft);
    }
    assign(config.background_frame, FrameRole::Tile);
    assign(
        config.connector_horizontal_frame,
        FrameRole::HorizontalConnector,
    );
    assign(config.connector_vertical_frame, FrameRole::VerticalConnector);

    SpriteSet::new(
        roles
            .into_iter()
            .map(|role| paint(role, config.cell_size))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use basescape_test_utils::fixtures::ruleset;

    #[test]
    fn test_covers_referenced_frames() {
        let config = ViewConfig::default();
        let sprites = debug_sprites(&ruleset(), &config);

        // Depot: 3x3 shape at 40, unfinished bank at 40 + 2 + 3, nine cells
        assert_eq!(sprites.len(), 54);
        for index in [0, 7, 8, 17, 33, 34, 40, 53] {
            let frame = sprites.frame(index).unwrap();
            assert!(frame.pixels().iter().any(|&p| p != 0), "frame {index} blank");
        }
    }

    #[test]
    fn test_background_frame_is_opaque() {
        let config = ViewConfig::default();
        let sprites = debug_sprites(&ruleset(), &config);
        let tile = sprites.frame(config.background_frame).unwrap();
        assert!(tile.pixels().iter().all(|&p| p != 0));
        assert_eq!(tile.width(), config.cell_size);
    }
}
