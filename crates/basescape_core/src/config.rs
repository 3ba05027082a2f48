//! View configuration.
//!
//! Every field has a default matching the classic base screen: a 6x6 board
//! of 32 pixel cells, a 100 ms selector blink, connectors in frames 7 and 8
//! of the base sprite set. Data files only need to name what they change.
//!
//! # Example RON
//!
//! ```ron
//! ViewConfig(
//!     board_size: 8,
//!     blink_period_ms: 250,
//! )
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::surface::Palette;

/// Default board side length in cells.
pub const DEFAULT_BOARD_SIZE: u32 = 6;

/// Default cell side length in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Default selector blink period in milliseconds.
pub const DEFAULT_BLINK_PERIOD_MS: u64 = 100;

/// Largest board the view accepts.
pub const MAX_BOARD_SIZE: u32 = 64;

/// Largest cell the view accepts, in pixels.
pub const MAX_CELL_SIZE: u32 = 256;

/// Layout, timing and palette settings for a base view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Board side length in cells.
    pub board_size: u32,
    /// Cell side length in unscaled pixels.
    pub cell_size: u32,
    /// Selector blink period in milliseconds of logical time.
    pub blink_period_ms: u64,
    /// Sprite frame tiled over every board cell.
    pub background_frame: usize,
    /// Sprite frame bridging two facilities side by side.
    pub connector_horizontal_frame: usize,
    /// Sprite frame bridging two facilities one above the other.
    pub connector_vertical_frame: usize,
    /// Extra frame offset between a facility's finished and unfinished
    /// shape banks, on top of its footprint size.
    pub construction_frame_stride: usize,
    /// Palette index of the selector border.
    pub selector_color: u8,
    /// Palette index filling the selector interior and its dim phase.
    pub selector_fill_color: u8,
    /// Palette index of the construction countdown text.
    pub countdown_color: u8,
    /// Height in pixels of the countdown text line.
    pub countdown_text_height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            blink_period_ms: DEFAULT_BLINK_PERIOD_MS,
            background_frame: 0,
            connector_horizontal_frame: 7,
            connector_vertical_frame: 8,
            construction_frame_stride: 2,
            selector_color: Palette::block_offset(1),
            selector_fill_color: 0,
            countdown_color: Palette::block_offset(13) + 5,
            countdown_text_height: 16,
        }
    }
}

impl ViewConfig {
    /// Parse a configuration from RON text and validate it.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| GameError::DataParse {
            path: "<view config>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a drawable board.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "board_size must be between 1 and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if self.cell_size < 2 || self.cell_size > MAX_CELL_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "cell_size must be between 2 and {MAX_CELL_SIZE}, got {}",
                self.cell_size
            )));
        }
        if self.blink_period_ms == 0 {
            return Err(GameError::InvalidConfig(
                "blink_period_ms must be positive".to_string(),
            ));
        }
        self.board_pixels()?;
        Ok(())
    }

    /// Blink period as a [`Duration`].
    #[must_use]
    pub const fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }

    /// Width and height of the whole board in pixels.
    pub fn board_pixels(&self) -> Result<u32> {
        self.board_size.checked_mul(self.cell_size).ok_or_else(|| {
            GameError::InvalidConfig(format!(
                "{} cells of {} pixels overflow the board width",
                self.board_size, self.cell_size
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_layout() {
        let config = ViewConfig::default();
        assert_eq!(config.board_size, 6);
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.board_pixels(), Ok(192));
        assert_eq!(config.blink_period(), Duration::from_millis(100));
        assert_eq!(config.selector_color, 16);
        assert_eq!(config.countdown_color, 213);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_ron_partial_overrides() {
        let config = ViewConfig::from_ron("(board_size: 8, blink_period_ms: 250)").unwrap();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.blink_period_ms, 250);
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn test_from_ron_rejects_zero_board() {
        let err = ViewConfig::from_ron("(board_size: 0)").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_ron_rejects_zero_period() {
        let err = ViewConfig::from_ron("(blink_period_ms: 0)").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_ron_rejects_huge_cell() {
        let err = ViewConfig::from_ron("(cell_size: 100000000)").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let config = ViewConfig::from_ron("(board_size: 64, cell_size: 256)").unwrap();
        assert_eq!(config.board_pixels(), Ok(16_384));
    }

    #[test]
    fn test_board_pixels_overflow_is_an_error() {
        let config = ViewConfig {
            board_size: 70_000,
            cell_size: 70_000,
            ..ViewConfig::default()
        };
        assert!(matches!(
            config.board_pixels(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_ron_reports_parse_errors() {
        let err = ViewConfig::from_ron("(board_size: \"six\")").unwrap_err();
        assert!(matches!(err, GameError::DataParse { .. }));
    }
}
