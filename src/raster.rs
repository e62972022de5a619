//! Decoded raster images and lossless encoding.

pub(crate) mod decode;
pub(crate) mod encode;

use std::sync::Arc;

use crate::foundation::core::Rect;
use crate::foundation::error::{MockupError, MockupResult};

/// Decoded image held as premultiplied RGBA8, row-major, no padding.
///
/// Pixels are shared and immutable, so clones are cheap and a pointer identifies the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` premultiplied bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap premultiplied bytes, checking the length.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> MockupResult<Self> {
        let expected = byte_len(width, height)?;
        if rgba8_premul.len() != expected {
            return Err(MockupError::input(format!(
                "raster {width}x{height} expects {expected} bytes, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiply straight-alpha RGBA8 bytes into a new image.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> MockupResult<Self> {
        crate::foundation::math::premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// Fully transparent image.
    pub fn transparent(width: u32, height: u32) -> MockupResult<Self> {
        Self::from_premul_rgba8(width, height, vec![0; byte_len(width, height)?])
    }

    /// Image filled with one premultiplied pixel.
    pub fn filled(width: u32, height: u32, px: [u8; 4]) -> MockupResult<Self> {
        let n = byte_len(width, height)? / 4;
        Self::from_premul_rgba8(width, height, px.repeat(n))
    }

    /// `(0, 0, width, height)`.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel at `(x, y)`, if inside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn byte_len(width: u32, height: u32) -> MockupResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| MockupError::resource(format!("raster {width}x{height} is too large")))
}

#[cfg(test)]
#[path = "../tests/unit/raster/raster.rs"]
mod tests;
