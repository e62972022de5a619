use crate::foundation::core::{Rect, centered_rect};
use crate::foundation::error::MockupResult;
use crate::raster::RasterImage;
use crate::surface::Surface;

/// Strips a curved draw is split into.
pub const CURVE_SEGMENTS: u32 = 20;

const ARCH_FACTOR: f64 = 0.1;
const TWIST_FACTOR: f64 = 0.2;

/// Placement of one strip: horizontal center, vertical offset and rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub(crate) index: u32,
    pub(crate) center_x: f64,
    pub(crate) offset_y: f64,
    pub(crate) rotation: f64,
}

pub(crate) fn segments(width: f64, height: f64, curvature: f64) -> impl Iterator<Item = Segment> {
    let n = CURVE_SEGMENTS;
    let seg_w = width / f64::from(n);
    (0..n).map(move |i| {
        let progress = f64::from(i) / f64::from(n - 1);
        Segment {
            index: i,
            center_x: -width / 2.0 + seg_w * (f64::from(i) + 0.5),
            offset_y: (progress * std::f64::consts::PI).sin() * curvature * height * ARCH_FACTOR,
            rotation: (progress - 0.5) * curvature * TWIST_FACTOR,
        }
    })
}

/// Draw `image` into the `width x height` rectangle centered on the origin, bent into a sine
/// arch when `curvature > 0`.
pub fn draw_curved<S: Surface + ?Sized>(
    surface: &mut S,
    image: &RasterImage,
    width: f64,
    height: f64,
    curvature: f64,
) -> MockupResult<()> {
    if curvature <= 0.0 || !curvature.is_finite() {
        return surface.draw_image_in(image, centered_rect(width, height));
    }

    let n = f64::from(CURVE_SEGMENTS);
    let seg_w = width / n;
    let slice_w = f64::from(image.width) / n;
    let img_h = f64::from(image.height);
    for seg in segments(width, height, curvature) {
        let sx = slice_w * f64::from(seg.index);
        let src = Rect::new(sx, 0.0, sx + slice_w, img_h);
        let dst = centered_rect(seg_w, height);

        surface.save();
        surface.translate(seg.center_x, seg.offset_y);
        surface.rotate(seg.rotation);
        let drawn = surface.draw_image(image, src, dst, 1.0);
        surface.restore();
        drawn?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/curvature.rs"]
mod tests;
