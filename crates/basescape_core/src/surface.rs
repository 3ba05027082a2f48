//! Paletted drawing surfaces.
//!
//! Everything the base view draws is 8-bit palette indices. Index 0 is the
//! colour key: blitting never copies it, so sprites can have holes.

use std::collections::HashMap;

use crate::error::{GameError, Result};

/// Palette index treated as transparent by [`Surface::blit`].
pub const TRANSPARENT: u8 = 0;

// ============================================================================
// Geometry
// ============================================================================

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink by `amount` pixels on every side.
    #[must_use]
    pub fn inset(self, amount: u32) -> Self {
        Self {
            x: self.x.saturating_add_unsigned(amount),
            y: self.y.saturating_add_unsigned(amount),
            w: self.w.saturating_sub(amount.saturating_mul(2)),
            h: self.h.saturating_sub(amount.saturating_mul(2)),
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// 256-entry RGBA palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    /// Number of entries.
    pub const SIZE: usize = 256;

    /// First index of a 16-colour block.
    #[must_use]
    pub const fn block_offset(block: u8) -> u8 {
        block.wrapping_mul(16)
    }

    /// Build a palette from exactly 256 colours.
    pub fn from_colors(colors: Vec<[u8; 4]>) -> Result<Self> {
        if colors.len() != Self::SIZE {
            return Err(GameError::InvalidSurface(format!(
                "palette needs {} colours, got {}",
                Self::SIZE,
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// RGBA colour of an index.
    #[must_use]
    pub fn rgba(&self, index: u8) -> [u8; 4] {
        self.colors[index as usize]
    }

    /// Replace one entry.
    pub fn set(&mut self, index: u8, color: [u8; 4]) {
        self.colors[index as usize] = color;
    }
}

impl Default for Palette {
    /// Sixteen blocks of sixteen shades, each block ramping one hue from dark
    /// to light. Index 0 is fully transparent.
    fn default() -> Self {
        const HUES: [[u8; 3]; 16] = [
            [255, 255, 255],
            [80, 255, 80],
            [255, 80, 80],
            [80, 80, 255],
            [255, 255, 80],
            [80, 255, 255],
            [255, 80, 255],
            [255, 160, 64],
            [160, 160, 160],
            [64, 160, 255],
            [160, 255, 64],
            [255, 64, 160],
            [128, 96, 64],
            [255, 220, 120],
            [120, 200, 180],
            [200, 120, 255],
        ];

        let mut colors = Vec::with_capacity(Self::SIZE);
        for hue in HUES {
            for shade in 0..16u16 {
                let level = 255 - shade * 14;
                let channel = |c: u8| ((u16::from(c) * level) / 255) as u8;
                colors.push([channel(hue[0]), channel(hue[1]), channel(hue[2]), 255]);
            }
        }
        colors[TRANSPARENT as usize] = [0, 0, 0, 0];
        Self { colors }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// Rectangular buffer of palette indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    /// Wrap an existing pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(GameError::InvalidSurface(format!(
                "{width}x{height} surface needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Palette index at a pixel, `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(self.pixels[self.index(x, y)])
    }

    /// Set one pixel; ignored outside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if self.pixel(x, y).is_some() {
            let index = self.index(x as u32, y as u32);
            self.pixels[index] = color;
        }
    }

    /// Fill the whole surface.
    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Clip a rectangle to the surface, returning pixel ranges.
    fn clip(&self, rect: Rect) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
        let clamp = |start: i64, len: u32, limit: u32| {
            let lo = start.clamp(0, i64::from(limit)) as u32;
            let hi = (start + i64::from(len)).clamp(0, i64::from(limit)) as u32;
            (lo < hi).then_some(lo..hi)
        };
        Some((
            clamp(i64::from(rect.x), rect.w, self.width)?,
            clamp(i64::from(rect.y), rect.h, self.height)?,
        ))
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: u8) {
        let Some((xs, ys)) = self.clip(rect) else {
            return;
        };
        for y in ys {
            let row = self.index(xs.start, y);
            self.pixels[row..row + xs.len()].fill(color);
        }
    }

    /// Copy this surface onto `dst` with its top-left corner at `(x, y)`.
    ///
    /// Transparent pixels are skipped; anything outside `dst` is clipped.
    pub fn blit(&self, dst: &mut Surface, x: i32, y: i32) {
        let target = Rect::new(x, y, self.width, self.height);
        let Some((xs, ys)) = dst.clip(target) else {
            return;
        };
        for dy in ys {
            let sy = (i64::from(dy) - i64::from(y)) as u32;
            for dx in xs.clone() {
                let sx = (i64::from(dx) - i64::from(x)) as u32;
                let color = self.pixels[self.index(sx, sy)];
                if color != TRANSPARENT {
                    let index = dst.index(dx, dy);
                    dst.pixels[index] = color;
                }
            }
        }
    }

    /// Copy a rectangular region into a new surface.
    ///
    /// Parts of the region outside this surface come out transparent.
    #[must_use]
    pub fn sub_surface(&self, rect: Rect) -> Surface {
        let mut out = Surface::new(rect.w, rect.h);
        for y in 0..rect.h as i32 {
            for x in 0..rect.w as i32 {
                if let Some(color) = self.pixel(rect.x + x, rect.y + y) {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }
}

// ============================================================================
// Sprite sets
// ============================================================================

/// Ordered collection of sprite frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    frames: Vec<Surface>,
}

impl SpriteSet {
    /// Wrap a list of frames.
    #[must_use]
    pub fn new(frames: Vec<Surface>) -> Self {
        Self { frames }
    }

    /// Cut a sheet into equal frames, left to right then top to bottom.
    #[must_use]
    pub fn from_sheet(sheet: &Surface, frame_width: u32, frame_height: u32) -> Self {
        if frame_width == 0 || frame_height == 0 {
            return Self::default();
        }
        let columns = sheet.width() / frame_width;
        let rows = sheet.height() / frame_height;
        let mut frames = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                frames.push(sheet.sub_surface(Rect::new(
                    (column * frame_width) as i32,
                    (row * frame_height) as i32,
                    frame_width,
                    frame_height,
                )));
            }
        }
        Self { frames }
    }

    /// Frame by index.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Surface> {
        self.frames.get(index)
    }

    /// Append a frame and return its index.
    pub fn push(&mut self, frame: Surface) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the set has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ============================================================================
// Text
// ============================================================================

/// Monochrome bitmap font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFont {
    glyph_width: u32,
    glyph_height: u32,
    spacing: u32,
    glyphs: HashMap<char, Vec<bool>>,
}

const DIGIT_ROWS: [[&str; 7]; 10] = [
    [" ### ", "#   #", "#  ##", "# # #", "##  #", "#   #", " ### "],
    ["  #  ", " ##  ", "  #  ", "  #  ", "  #  ", "  #  ", " ### "],
    [" ### ", "#   #", "    #", "   # ", "  #  ", " #   ", "#####"],
    ["#####", "   # ", "  #  ", "   # ", "    #", "#   #", " ### "],
    ["   # ", "  ## ", " # # ", "#  # ", "#####", "   # ", "   # "],
    ["#####", "#    ", "#### ", "    #", "    #", "#   #", " ### "],
    ["  ## ", " #   ", "#    ", "#### ", "#   #", "#   #", " ### "],
    ["#####", "    #", "   # ", "  #  ", " #   ", " #   ", " #   "],
    [" ### ", "#   #", "#   #", " ### ", "#   #", "#   #", " ### "],
    [" ### ", "#   #", "#   #", " ####", "    #", "   # ", " ##  "],
];

impl BitmapFont {
    /// Built-in 5x7 digit font.
    #[must_use]
    pub fn small_digits() -> Self {
        let glyphs = DIGIT_ROWS
            .iter()
            .zip('0'..='9')
            .map(|(rows, ch)| {
                let mask = rows
                    .iter()
                    .flat_map(|row| row.chars().map(|c| c == '#'))
                    .collect();
                (ch, mask)
            })
            .collect();
        Self {
            glyph_width: 5,
            glyph_height: 7,
            spacing: 1,
            glyphs,
        }
    }

    /// Built-in 10x14 digit font, used for construction countdowns.
    #[must_use]
    pub fn big_digits() -> Self {
        Self::small_digits().scaled(2)
    }

    /// Scale every glyph by an integer factor.
    #[must_use]
    pub fn scaled(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        let (w, h) = (self.glyph_width, self.glyph_height);
        let glyphs = self
            .glyphs
            .iter()
            .map(|(&ch, mask)| {
                let scaled = (0..h * factor)
                    .flat_map(|y| {
                        (0..w * factor)
                            .map(move |x| mask[((y / factor) * w + (x / factor)) as usize])
                    })
                    .collect();
                (ch, scaled)
            })
            .collect();
        Self {
            glyph_width: w * factor,
            glyph_height: h * factor,
            spacing: self.spacing * factor,
            glyphs,
        }
    }

    /// Glyph height in pixels.
    #[must_use]
    pub const fn glyph_height(&self) -> u32 {
        self.glyph_height
    }

    /// Width in pixels of a line of text.
    #[must_use]
    pub fn text_width(&self, text: &str) -> u32 {
        let count = text.chars().count() as u32;
        if count == 0 {
            return 0;
        }
        count * self.glyph_width + (count - 1) * self.spacing
    }

    /// Draw `text` centred inside `bounds`. Unknown characters leave a gap.
    ///
    /// Glyph pixels falling outside `dst` are clipped.
    pub fn draw_centered(&self, dst: &mut Surface, bounds: Rect, text: &str, color: u8) {
        let width = i64::from(self.text_width(text));
        let mut pen_x = i64::from(bounds.x) + (i64::from(bounds.w) - width) / 2;
        let pen_y = i64::from(bounds.y) + (i64::from(bounds.h) - i64::from(self.glyph_height)) / 2;
        let advance = i64::from(self.glyph_width) + i64::from(self.spacing);

        for ch in text.chars() {
            if let Some(mask) = self.glyphs.get(&ch) {
                for gy in 0..self.glyph_height {
                    for gx in 0..self.glyph_width {
                        if !mask[(gy * self.glyph_width + gx) as usize] {
                            continue;
                        }
                        let x = i32::try_from(pen_x + i64::from(gx));
                        let y = i32::try_from(pen_y + i64::from(gy));
                        if let (Ok(x), Ok(y)) = (x, y) {
                            dst.set_pixel(x, y, color);
                        }
                    }
                }
            }
            pen_x += advance;
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::big_digits()
    }
}
