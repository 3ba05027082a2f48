//! Selection overlay and its blink timer.
//!
//! The overlay marks where a facility of the selected size would go. It is
//! a rendering aid only: nothing here feeds back into placement rules.

use std::time::Duration;

use crate::surface::{Rect, Surface};

// ============================================================================
// Blink Timer
// ============================================================================

/// Logical blink clock advanced by the caller's frame loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkTimer {
    period: Duration,
    accumulated: Duration,
    bright: bool,
}

impl BlinkTimer {
    /// Create a timer starting in the bright phase.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
            bright: true,
        }
    }

    /// Advance the clock, toggling once per full period that elapsed.
    ///
    /// Returns the number of toggles. A zero `elapsed` never toggles.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }

        let total = self.accumulated.as_nanos() + elapsed.as_nanos();
        let period = self.period.as_nanos();
        let toggles = total / period;
        let remainder = total % period;

        // remainder < period, which came from a Duration
        self.accumulated = Duration::from_nanos(remainder as u64);
        if toggles % 2 == 1 {
            self.bright = !self.bright;
        }
        u32::try_from(toggles).unwrap_or(u32::MAX)
    }

    /// Current phase.
    #[must_use]
    pub const fn is_bright(&self) -> bool {
        self.bright
    }

    /// Blink period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

// ============================================================================
// Selection Overlay
// ============================================================================

/// Visible state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayState {
    /// Selection size is 0; the overlay never shows.
    Disabled,
    /// No valid hover cell, or the footprint would leave the board.
    Hidden,
    /// Shown, bordered phase.
    Bright,
    /// Shown, flat phase.
    Dim,
}

/// Highlight square following the hover cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOverlay {
    size: u32,
    cell_size: u32,
    border_color: u8,
    fill_color: u8,
    position: Option<(u32, u32)>,
    surface: Option<Surface>,
}

impl SelectionOverlay {
    /// Create a disabled overlay.
    #[must_use]
    pub const fn new(cell_size: u32, border_color: u8, fill_color: u8) -> Self {
        Self {
            size: 0,
            cell_size,
            border_color,
            fill_color,
            position: None,
            surface: None,
        }
    }

    /// Change the footprint size; 0 disables the overlay.
    ///
    /// The overlay starts hidden until the next hover update.
    pub fn set_size(&mut self, size: u32, bright: bool) {
        self.size = size;
        self.position = None;
        self.surface = (size > 0).then(|| {
            let side = size.saturating_mul(self.cell_size);
            let mut surface = Surface::new(side, side);
            self.paint(&mut surface, bright);
            surface
        });
    }

    /// Footprint size (0 when disabled).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Follow the hover cell. Shows the overlay only if the whole footprint
    /// fits on the board from that cell.
    pub fn update_hover(&mut self, cell: Option<(u32, u32)>, board_size: u32) {
        if self.size == 0 {
            return;
        }
        let fits = |origin: u32| {
            origin
                .checked_add(self.size)
                .is_some_and(|end| end <= board_size)
        };
        self.position = cell.filter(|&(x, y)| fits(x) && fits(y));
    }

    /// Hide the overlay (pointer left the view).
    pub fn hide(&mut self) {
        self.position = None;
    }

    /// Repaint for a new blink phase.
    pub fn on_blink(&mut self, bright: bool) {
        if let Some(mut surface) = self.surface.take() {
            self.paint(&mut surface, bright);
            self.surface = Some(surface);
        }
    }

    fn paint(&self, surface: &mut Surface, bright: bool) {
        let full = Rect::new(0, 0, surface.width(), surface.height());
        if bright {
            surface.fill_rect(full, self.border_color);
            surface.fill_rect(full.inset(1), self.fill_color);
        } else {
            surface.fill_rect(full, self.fill_color);
        }
    }

    /// Current state given the blink phase.
    #[must_use]
    pub fn state(&self, bright: bool) -> OverlayState {
        match (self.size, self.position, bright) {
            (0, _, _) => OverlayState::Disabled,
            (_, None, _) => OverlayState::Hidden,
            (_, Some(_), true) => OverlayState::Bright,
            (_, Some(_), false) => OverlayState::Dim,
        }
    }

    /// Whether the overlay is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.size > 0 && self.position.is_some()
    }

    /// Origin cell of the shown overlay.
    #[must_use]
    pub const fn position(&self) -> Option<(u32, u32)> {
        self.position
    }

    /// Overlay pixels, present whenever the overlay is enabled.
    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }
}
