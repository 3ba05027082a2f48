//! Pointer to grid mapping.
//!
//! Raw pointer events arrive in physical screen pixels. The view's own
//! position is stored in logical pixels, so both the origin and the cell size
//! are multiplied by the display scale before dividing.

use crate::error::{GameError, Result};
use crate::math::{floor_div, Fixed};

/// Strictly positive display scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayScale(Fixed);

impl DisplayScale {
    /// Unscaled display.
    pub const ONE: Self = Self(Fixed::ONE);

    /// Create a scale, rejecting zero and negative factors.
    pub fn new(factor: Fixed) -> Result<Self> {
        if factor > Fixed::ZERO {
            Ok(Self(factor))
        } else {
            Err(GameError::InvalidScale(factor.to_string()))
        }
    }

    /// Create an integer scale.
    pub fn integer(factor: u32) -> Result<Self> {
        Self::new(Fixed::saturating_from_num(factor))
    }

    /// Scale factor.
    #[must_use]
    pub const fn factor(self) -> Fixed {
        self.0
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Map a physical pointer position to (possibly out of range) grid cell
/// coordinates.
///
/// Flooring means positions left of or above the view land on negative
/// cells rather than on cell 0.
#[must_use]
pub fn map_to_grid(
    pointer: (i32, i32),
    view_origin: (i32, i32),
    cell_size: u32,
    scale: DisplayScale,
) -> (i32, i32) {
    let factor = scale.factor();
    let cell = Fixed::saturating_from_num(cell_size).saturating_mul(factor);
    let axis = |pointer: i32, origin: i32| {
        let offset = Fixed::from_num(pointer)
            .saturating_sub(Fixed::from_num(origin).saturating_mul(factor));
        floor_div(offset, cell)
    };
    (
        axis(pointer.0, view_origin.0),
        axis(pointer.1, view_origin.1),
    )
}

/// Pointer mapper bound to one view's placement on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMapper {
    origin: (i32, i32),
    cell_size: u32,
    board_size: u32,
}

impl PointerMapper {
    /// Create a mapper for a board of `board_size` cells at `origin`.
    #[must_use]
    pub const fn new(origin: (i32, i32), cell_size: u32, board_size: u32) -> Self {
        Self {
            origin,
            cell_size,
            board_size,
        }
    }

    /// View origin in logical pixels.
    #[must_use]
    pub const fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Raw cell coordinates, possibly outside the board.
    #[must_use]
    pub fn map(&self, pointer: (i32, i32), scale: DisplayScale) -> (i32, i32) {
        map_to_grid(pointer, self.origin, self.cell_size, scale)
    }

    /// Cell under the pointer, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, pointer: (i32, i32), scale: DisplayScale) -> Option<(u32, u32)> {
        let (x, y) = self.map(pointer, scale);
        let x = u32::try_from(x).ok().filter(|&x| x < self.board_size)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.board_size)?;
        Some((x, y))
    }
}

/// Pointer buttons as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Middle button / wheel press.
    Middle,
    /// Secondary button.
    Right,
    /// Any other button, by raw index.
    Other(u8),
}

impl PointerButton {
    /// The base view only reacts to the primary button.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, PointerButton::Left)
    }
}
