use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{MockupError, MockupResult};
use crate::raster::RasterImage;

/// Losslessly encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG file bytes.
    pub bytes: Vec<u8>,
}

/// Encode to PNG at maximum compression with adaptive filtering.
pub fn encode_png(image: &RasterImage) -> MockupResult<EncodedImage> {
    if image.is_empty() {
        return Err(MockupError::encode(format!(
            "cannot encode an empty {}x{} image",
            image.width, image.height
        )));
    }

    let mut straight = image.rgba8_premul.as_slice().to_vec();
    crate::foundation::math::unpremultiply_rgba8_in_place(&mut straight);

    let mut bytes = Vec::new();
    PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive)
        .write_image(
            &straight,
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| MockupError::encode(format!("png encode failed: {e}")))?;

    tracing::debug!(
        width = image.width,
        height = image.height,
        bytes = bytes.len(),
        "encoded png"
    );
    Ok(EncodedImage {
        width: image.width,
        height: image.height,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/encode.rs"]
mod tests;
