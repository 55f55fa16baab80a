//! Sprite sheet addressing, sampling, and sub-sprite extraction
//!
//! Sprites are fixed-size square tiles laid out row-major with a fixed
//! column count. A linear sprite index addresses the tile at
//! `(row, col) = (id / cols, id % cols)`. The same layout math positions
//! punk cells in the composite.

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Error type for sheet addressing failures.
///
/// Sampling coordinates are compile-time constants tied to the known asset
/// art, so any of these surfacing means the sheet on disk doesn't match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Sprite index beyond the last whole sprite in the sheet
    #[error("sprite index {index} outside sheet holding {count} sprites")]
    SpriteOutOfRange { index: u32, count: u32 },
    /// Pixel offset beyond the sprite edge
    #[error("pixel offset ({x}, {y}) outside a {size}x{size} sprite")]
    OffsetOutOfRange { x: u32, y: u32, size: u32 },
}

/// Row-major grid addressing shared by the asset sheet and the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Edge length of one square cell, in pixels
    pub sprite_size: u32,
    /// Number of cells per row
    pub cols: u32,
}

impl SheetLayout {
    pub fn new(sprite_size: u32, cols: u32) -> SheetLayout {
        SheetLayout { sprite_size, cols }
    }

    /// Top-left pixel of the cell holding linear index `id`.
    pub fn origin(&self, id: u32) -> (u32, u32) {
        let row = id / self.cols;
        let col = id % self.cols;
        (col * self.sprite_size, row * self.sprite_size)
    }

    /// Pixel dimensions needed to hold `count` cells.
    pub fn extent(&self, count: u32) -> (u32, u32) {
        let rows = count.div_ceil(self.cols);
        (self.cols * self.sprite_size, rows * self.sprite_size)
    }
}

/// A read-only sprite sheet: an RGBA image plus its grid layout.
pub struct SpriteSheet {
    image: RgbaImage,
    layout: SheetLayout,
}

impl SpriteSheet {
    pub fn new(image: RgbaImage, sprite_size: u32, cols: u32) -> SpriteSheet {
        SpriteSheet { image, layout: SheetLayout::new(sprite_size, cols) }
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    /// Number of whole sprites the image holds.
    ///
    /// Partial rows or columns at the image edge don't count.
    pub fn sprite_count(&self) -> u32 {
        let full_cols = (self.image.width() / self.layout.sprite_size).min(self.layout.cols);
        let full_rows = self.image.height() / self.layout.sprite_size;
        if full_cols < self.layout.cols {
            // Narrower than the declared layout: only the first row's
            // leading sprites are addressable without wrapping wrong
            return full_cols;
        }
        full_rows * self.layout.cols
    }

    /// The color at pixel offset `(dx, dy)` within sprite `id`.
    pub fn sample(&self, id: u32, dx: u32, dy: u32) -> Result<Rgba<u8>, SheetError> {
        let size = self.layout.sprite_size;
        if dx >= size || dy >= size {
            return Err(SheetError::OffsetOutOfRange { x: dx, y: dy, size });
        }
        let count = self.sprite_count();
        if id >= count {
            return Err(SheetError::SpriteOutOfRange { index: id, count });
        }
        let (x0, y0) = self.layout.origin(id);
        Ok(*self.image.get_pixel(x0 + dx, y0 + dy))
    }

    /// Extract sprite `id` as a stand-alone image.
    pub fn extract(&self, id: u32) -> Result<RgbaImage, SheetError> {
        let count = self.sprite_count();
        if id >= count {
            return Err(SheetError::SpriteOutOfRange { index: id, count });
        }
        let size = self.layout.sprite_size;
        let (x0, y0) = self.layout.origin(id);
        let mut sprite = RgbaImage::new(size, size);
        for y in 0..size {
            for x in 0..size {
                sprite.put_pixel(x, y, *self.image.get_pixel(x0 + x, y0 + y));
            }
        }
        Ok(sprite)
    }
}
