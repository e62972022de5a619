use anyhow::Context;

use crate::foundation::error::MockupResult;
use crate::raster::RasterImage;

/// Decode any format the `image` crate recognizes into a premultiplied RGBA8 raster.
pub fn decode_image(bytes: &[u8]) -> MockupResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/decode.rs"]
mod tests;
