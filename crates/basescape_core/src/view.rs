//! Interactive base view.
//!
//! [`BaseView`] owns the displayed base, its occupancy grid, the pointer
//! hover state, the selection overlay and the cached base layer. It is a
//! plain value driven by the caller's event loop:
//!
//! ```text
//! pointer events -> pointer_move / pointer_leave / pointer_click
//! every frame    -> tick(elapsed), then render()
//! base changes   -> bind_base / edit_base / place_facility
//! ```
//!
//! The base layer is only redrawn when the base or the sprites change.
//! Blink ticks repaint the overlay alone.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::base::{Base, Facility, FacilityId};
use crate::config::ViewConfig;
use crate::error::{GameError, Result};
use crate::grid::BaseGrid;
use crate::placement::{check_placement, PlacementResult};
use crate::pointer::{DisplayScale, PointerButton, PointerMapper};
use crate::render::{Frame, OverlayLayer, RenderComposer};
use crate::ruleset::FacilityRule;
use crate::selection::{BlinkTimer, OverlayState, SelectionOverlay};
use crate::surface::{BitmapFont, SpriteSet, Surface};

/// What a primary-button pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerHit {
    /// Cell under the pointer, if inside the board.
    pub cell: Option<(u32, u32)>,
    /// Facility occupying that cell.
    pub facility: Option<FacilityId>,
}

/// Interactive view of one base at a time.
#[derive(Debug, Clone)]
pub struct BaseView {
    config: ViewConfig,
    mapper: PointerMapper,
    sprites: SpriteSet,
    font: BitmapFont,
    base: Option<Base>,
    grid: BaseGrid,
    hover: Option<(u32, u32)>,
    overlay: SelectionOverlay,
    blink: BlinkTimer,
    canvas: Surface,
    redraws: u64,
}

impl BaseView {
    /// Create an empty view at `origin` (logical screen pixels).
    pub fn new(config: ViewConfig, origin: (i32, i32)) -> Result<Self> {
        config.validate()?;
        let side = config.board_pixels()?;
        let mut view = Self {
            mapper: PointerMapper::new(origin, config.cell_size, config.board_size),
            sprites: SpriteSet::default(),
            font: BitmapFont::default(),
            base: None,
            grid: BaseGrid::new(config.board_size),
            hover: None,
            overlay: SelectionOverlay::new(
                config.cell_size,
                config.selector_color,
                config.selector_fill_color,
            ),
            blink: BlinkTimer::new(config.blink_period()),
            canvas: Surface::new(side, side),
            redraws: 0,
            config,
        };
        view.redraw();
        Ok(view)
    }

    /// View configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Screen position in logical pixels.
    #[must_use]
    pub fn origin(&self) -> (i32, i32) {
        self.mapper.origin()
    }

    // ------------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------------

    /// Replace the sprite set and redraw.
    pub fn set_sprites(&mut self, sprites: SpriteSet) {
        self.sprites = sprites;
        self.redraw();
    }

    /// Replace the countdown font and redraw.
    pub fn set_font(&mut self, font: BitmapFont) {
        self.font = font;
        self.redraw();
    }

    // ------------------------------------------------------------------------
    // Base binding
    // ------------------------------------------------------------------------

    /// Display a different base, returning the previous one.
    ///
    /// Hover state is reset; the grid is rebuilt and the base layer redrawn.
    pub fn bind_base(&mut self, base: Base) -> Option<Base> {
        debug!(base = base.name(), "Binding base");
        let previous = self.base.replace(base);
        self.reset_hover();
        self.rebuild();
        previous
    }

    /// Stop displaying any base.
    pub fn unbind_base(&mut self) -> Option<Base> {
        let previous = self.base.take();
        self.reset_hover();
        self.rebuild();
        previous
    }

    /// Currently displayed base.
    #[must_use]
    pub fn base(&self) -> Option<&Base> {
        self.base.as_ref()
    }

    /// Occupancy grid of the displayed base.
    #[must_use]
    pub fn grid(&self) -> &BaseGrid {
        &self.grid
    }

    /// Rebuild the grid from the base's facility list and redraw.
    pub fn rebuild(&mut self) {
        self.grid = match &self.base {
            Some(base) => BaseGrid::rebuild(self.config.board_size, base),
            None => BaseGrid::new(self.config.board_size),
        };
        self.redraw();
    }

    /// Mutate the displayed base, then rebuild and redraw.
    pub fn edit_base<R>(&mut self, edit: impl FnOnce(&mut Base) -> R) -> Result<R> {
        let base = self.base.as_mut().ok_or(GameError::NoBaseBound)?;
        let result = edit(base);
        self.rebuild();
        Ok(result)
    }

    /// Order a new facility at the hover cell.
    ///
    /// The facility starts under construction for its rule's build time.
    pub fn place_facility(&mut self, rule: Arc<FacilityRule>) -> Result<FacilityId> {
        let base = self.base.as_ref().ok_or(GameError::NoBaseBound)?;
        let Some((x, y)) = self.hover else {
            return Err(GameError::PlacementRejected(PlacementResult::OutOfBounds));
        };

        let result = check_placement(&self.grid, base, (x, y), rule.size());
        if !result.is_valid() {
            return Err(GameError::PlacementRejected(result));
        }

        debug!(kind = rule.id(), x, y, "Placing facility");
        self.edit_base(|base| base.add_facility(Facility::new(rule, x, y)))
    }

    // ------------------------------------------------------------------------
    // Placement queries
    // ------------------------------------------------------------------------

    /// Enable the selection overlay for a facility size; 0 disables it.
    pub fn set_selectable(&mut self, size: u32) {
        self.overlay.set_size(size, self.blink.is_bright());
    }

    /// Current selection size.
    #[must_use]
    pub fn selection_size(&self) -> u32 {
        self.overlay.size()
    }

    /// Placement verdict for a footprint at any cell.
    #[must_use]
    pub fn check_placement_at(&self, origin: (u32, u32), size: u32) -> PlacementResult {
        match &self.base {
            Some(base) => check_placement(&self.grid, base, origin, size),
            None => check_placement(&self.grid, &Base::default(), origin, size),
        }
    }

    /// Whether a footprint may be placed at any cell.
    #[must_use]
    pub fn is_placeable_at(&self, origin: (u32, u32), size: u32) -> bool {
        self.check_placement_at(origin, size).is_valid()
    }

    /// Whether a footprint may be placed at the hover cell.
    #[must_use]
    pub fn is_placeable(&self, size: u32) -> bool {
        self.hover
            .is_some_and(|origin| self.is_placeable_at(origin, size))
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    /// Cell under the pointer.
    #[must_use]
    pub fn hovered_cell(&self) -> Option<(u32, u32)> {
        self.hover
    }

    /// Facility under the pointer.
    #[must_use]
    pub fn selected_facility(&self) -> Option<(FacilityId, &Facility)> {
        let (x, y) = self.hover?;
        self.grid.facility_at(self.base.as_ref()?, x, y)
    }

    /// Track the pointer at a physical screen position.
    pub fn pointer_move(&mut self, pointer: (i32, i32), scale: DisplayScale) {
        self.hover = self.mapper.cell(pointer, scale);
        self.overlay.update_hover(self.hover, self.config.board_size);
        trace!(?pointer, hover = ?self.hover, "Pointer moved");
    }

    /// The pointer left the view.
    pub fn pointer_leave(&mut self) {
        self.reset_hover();
    }

    fn reset_hover(&mut self) {
        self.hover = None;
        self.overlay.hide();
    }

    fn pointer_button(
        &mut self,
        button: PointerButton,
        pointer: (i32, i32),
        scale: DisplayScale,
    ) -> Option<PointerHit> {
        if !button.is_accepted() {
            return None;
        }
        self.pointer_move(pointer, scale);
        Some(PointerHit {
            cell: self.hover,
            facility: self.selected_facility().map(|(id, _)| id),
        })
    }

    /// Button press. Only the primary button is reported.
    pub fn pointer_press(
        &mut self,
        button: PointerButton,
        pointer: (i32, i32),
        scale: DisplayScale,
    ) -> Option<PointerHit> {
        self.pointer_button(button, pointer, scale)
    }

    /// Button release. Only the primary button is reported.
    pub fn pointer_release(
        &mut self,
        button: PointerButton,
        pointer: (i32, i32),
        scale: DisplayScale,
    ) -> Option<PointerHit> {
        self.pointer_button(button, pointer, scale)
    }

    /// Click. Only the primary button is reported.
    pub fn pointer_click(
        &mut self,
        button: PointerButton,
        pointer: (i32, i32),
        scale: DisplayScale,
    ) -> Option<PointerHit> {
        self.pointer_button(button, pointer, scale)
    }

    // ------------------------------------------------------------------------
    // Animation and drawing
    // ------------------------------------------------------------------------

    /// Advance the blink clock.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.blink.tick(elapsed) > 0 {
            self.overlay.on_blink(self.blink.is_bright());
        }
    }

    /// Current blink phase.
    #[must_use]
    pub fn is_blink_bright(&self) -> bool {
        self.blink.is_bright()
    }

    /// Current overlay state.
    #[must_use]
    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state(self.blink.is_bright())
    }

    /// Number of times the base layer has been drawn.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    fn redraw(&mut self) {
        match RenderComposer::new(&self.config, &self.sprites, &self.font) {
            Ok(composer) => {
                self.canvas = composer.compose(self.base.as_ref(), &self.grid);
                self.redraws += 1;
                debug!(redraws = self.redraws, "Base layer redrawn");
            }
            Err(err) => warn!(%err, "Base layer not redrawn"),
        }
    }

    fn cell_px(&self, cell: u32) -> i32 {
        i32::try_from(u64::from(cell) * u64::from(self.config.cell_size)).unwrap_or(i32::MAX)
    }

    /// Current frame: cached base layer plus the overlay when visible.
    #[must_use]
    pub fn render(&self) -> Frame<'_> {
        let overlay = match (self.overlay.position(), self.overlay.surface()) {
            (Some((x, y)), Some(surface)) => Some(OverlayLayer {
                x: self.cell_px(x),
                y: self.cell_px(y),
                surface,
            }),
            _ => None,
        };
        Frame {
            origin: self.origin(),
            base: &self.canvas,
            overlay,
        }
    }
}
