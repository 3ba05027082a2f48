//! Layered base rendering.
//!
//! The base layer is drawn in a fixed order, each layer over the last:
//!
//! 1. background tile on every cell
//! 2. facility footprint tiles (finished or unfinished shape bank)
//! 3. connectors between adjacent operational facilities
//! 4. per facility, in list order: icon (single-cell only), docked craft,
//!    construction countdown
//!
//! The selection overlay is not part of the base layer. It is composited on
//! top by [`Frame::composite`] so that blinking never forces a redraw.

use tracing::debug;

use crate::base::{Base, Facility};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::grid::BaseGrid;
use crate::surface::{BitmapFont, Rect, SpriteSet, Surface};

/// Draws the base layer for one base.
///
/// Pixel positions are computed in `i64` and only narrowed when a frame is
/// blitted, so facilities far outside the board are clipped rather than
/// overflowing.
#[derive(Debug, Clone, Copy)]
pub struct RenderComposer<'a> {
    config: &'a ViewConfig,
    sprites: &'a SpriteSet,
    font: &'a BitmapFont,
    side: u32,
}

impl<'a> RenderComposer<'a> {
    /// Create a composer over a sprite set and countdown font.
    ///
    /// Fails if the configuration does not describe a drawable board.
    pub fn new(config: &'a ViewConfig, sprites: &'a SpriteSet, font: &'a BitmapFont) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sprites,
            font,
            side: config.board_pixels()?,
        })
    }

    /// Draw the full base layer.
    ///
    /// With no base only the background tiles are drawn.
    #[must_use]
    pub fn compose(&self, base: Option<&Base>, grid: &BaseGrid) -> Surface {
        let mut surface = Surface::new(self.side, self.side);

        self.draw_tiles(&mut surface);
        if let Some(base) = base {
            self.draw_footprints(&mut surface, base);
            self.draw_connectors(&mut surface, base, grid);
            self.draw_details(&mut surface, base);
        }

        surface
    }

    fn cell_px(&self, cell: u32) -> i64 {
        i64::from(cell) * i64::from(self.config.cell_size)
    }

    fn blit_frame(&self, dst: &mut Surface, index: usize, x: i64, y: i64) {
        let (Ok(px), Ok(py)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        match self.sprites.frame(index) {
            Some(frame) => frame.blit(dst, px, py),
            None => debug!(frame = index, x, y, "Missing sprite frame, skipped"),
        }
    }

    fn draw_tiles(&self, surface: &mut Surface) {
        for y in 0..self.config.board_size {
            for x in 0..self.config.board_size {
                self.blit_frame(
                    surface,
                    self.config.background_frame,
                    self.cell_px(x),
                    self.cell_px(y),
                );
            }
        }
    }

    fn draw_footprints(&self, surface: &mut Surface, base: &Base) {
        for (_, facility) in base.facilities() {
            let rule = facility.rule();
            let bank = if facility.is_operational() {
                rule.sprite_shape()
            } else {
                rule.sprite_shape()
                    .saturating_add(self.config.construction_frame_stride)
                    .saturating_add(rule.size() as usize)
            };

            for (num, (x, y)) in facility.cells_on_board(self.config.board_size) {
                self.blit_frame(surface, bank + num, self.cell_px(x), self.cell_px(y));
            }
        }
    }

    fn draw_connectors(&self, surface: &mut Surface, base: &Base, grid: &BaseGrid) {
        let half = i64::from(self.config.cell_size / 2);
        let board = self.config.board_size;

        for (_, facility) in base.facilities() {
            if !facility.is_operational() {
                continue;
            }
            let size = facility.size();
            let x_end = facility.x().saturating_add(size);
            let y_end = facility.y().saturating_add(size);

            // Facilities to the right
            if x_end < board {
                for y in facility.y()..y_end.min(board) {
                    if grid.is_operational_at(base, x_end, y) {
                        self.blit_frame(
                            surface,
                            self.config.connector_horizontal_frame,
                            self.cell_px(x_end) - half,
                            self.cell_px(y),
                        );
                    }
                }
            }

            // Facilities below
            if y_end < board {
                for x in facility.x()..x_end.min(board) {
                    if grid.is_operational_at(base, x, y_end) {
                        self.blit_frame(
                            surface,
                            self.config.connector_vertical_frame,
                            self.cell_px(x),
                            self.cell_px(y_end) - half,
                        );
                    }
                }
            }
        }
    }

    fn draw_details(&self, surface: &mut Surface, base: &Base) {
        let crafts = base.crafts();
        let mut next_craft = 0;

        for (_, facility) in base.facilities() {
            let rule = facility.rule();

            if rule.size() == 1 {
                self.blit_frame(
                    surface,
                    rule.sprite_facility(),
                    self.cell_px(facility.x()),
                    self.cell_px(facility.y()),
                );
            }

            if facility.is_operational() && rule.is_hangar() {
                if let Some(craft) = crafts.get(next_craft) {
                    let (x, y) = self.craft_anchor(facility);
                    self.blit_frame(surface, craft.rule().sprite(), x, y);
                    next_craft += 1;
                }
            }

            if !facility.is_operational() {
                self.draw_countdown(surface, facility);
            }
        }
    }

    /// Top-left of a docked craft sprite: the facility origin shifted by half
    /// a cell per extra footprint cell.
    fn craft_anchor(&self, facility: &Facility) -> (i64, i64) {
        let offset = self.cell_px(facility.size().saturating_sub(1)) / 2;
        (
            self.cell_px(facility.x()) + offset,
            self.cell_px(facility.y()) + offset,
        )
    }

    fn draw_countdown(&self, surface: &mut Surface, facility: &Facility) {
        let span = self.cell_px(facility.size());
        let line = self.config.countdown_text_height;
        let x = self.cell_px(facility.x());
        let y = self.cell_px(facility.y()) + (span - i64::from(line)) / 2;

        // The whole text box lies right of or below the surface
        if x >= i64::from(surface.width()) || y >= i64::from(surface.height()) {
            return;
        }
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        let bounds = Rect::new(x, y, u32::try_from(span).unwrap_or(u32::MAX), line);
        self.font.draw_centered(
            surface,
            bounds,
            &facility.build_time().to_string(),
            self.config.countdown_color,
        );
    }
}

/// Overlay layer placed over the base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayer<'a> {
    /// Left edge relative to the view.
    pub x: i32,
    /// Top edge relative to the view.
    pub y: i32,
    /// Overlay pixels.
    pub surface: &'a Surface,
}

/// One rendered frame of a base view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Screen position of the view, in logical pixels.
    pub origin: (i32, i32),
    /// Cached base layer.
    pub base: &'a Surface,
    /// Selection overlay, when visible.
    pub overlay: Option<OverlayLayer<'a>>,
}

impl Frame<'_> {
    /// Flatten the overlay onto a copy of the base layer.
    #[must_use]
    pub fn composite(&self) -> Surface {
        let mut out = self.base.clone();
        if let Some(overlay) = &self.overlay {
            overlay.surface.blit(&mut out, overlay.x, overlay.y);
        }
        out
    }
}
