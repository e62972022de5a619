//! Drawing surfaces.
//!
//! Rendering code talks to a canvas-like [`Surface`] created through a [`SurfaceFactory`], so the
//! same pipeline runs against the `vello_cpu` rasterizer ([`cpu::CpuSurface`]) or an in-memory
//! recorder ([`recording::RecordingSurface`]).

pub(crate) mod cpu;
pub(crate) mod recording;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul};
use crate::foundation::error::{MockupError, MockupResult};
use crate::params::color::ColorDef;
use crate::raster::RasterImage;

/// Largest width or height a surface may have.
pub const MAX_SURFACE_DIM: u32 = u16::MAX as u32;

/// Image resampling quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Smoothing {
    /// Fast, blocky resampling.
    Low,
    /// Bilinear-or-better resampling.
    #[default]
    High,
}

/// How a fill is combined with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Premultiplied source-over.
    #[default]
    Normal,
    /// Separable overlay (multiply in darks, screen in lights) then source-over.
    Overlay,
}

/// Color stop of a [`LinearGradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, `0..=1`.
    pub offset: f64,
    /// Straight-alpha color at `offset`.
    pub color: ColorDef,
}

/// Linear gradient between two points in the surface's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Where offset 0 lies.
    pub start: Point,
    /// Where offset 1 lies.
    pub end: Point,
    /// Stops sorted by ascending offset.
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Color at gradient parameter `t` (clamped), interpolated in straight alpha.
    pub fn sample(&self, t: f64) -> Rgba8Premul {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba8Premul::transparent();
        };
        if t <= first.offset {
            return first.color.to_rgba8_premul();
        }
        if t >= last.offset {
            return last.color.to_rgba8_premul();
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t < a.offset || t > b.offset {
                continue;
            }
            let span = b.offset - a.offset;
            let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            let lerp = |x: f64, y: f64| x + (y - x) * u;
            return ColorDef::rgba(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            )
            .to_rgba8_premul();
        }
        last.color.to_rgba8_premul()
    }

    /// Color at local point `p`, projected onto the start-end axis.
    pub fn sample_at(&self, p: Point) -> Rgba8Premul {
        let axis = self.end - self.start;
        let len2 = axis.hypot2();
        if len2 <= 0.0 {
            return self.sample(0.0);
        }
        self.sample((p - self.start).dot(axis) / len2)
    }
}

/// Fill source for [`Surface::fill_rect`].
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Uniform color.
    Solid(ColorDef),
    /// Linear gradient.
    Linear(LinearGradient),
}

/// Canvas-like drawing target with a save/restore stack of transform and smoothing state.
///
/// Transforms compose like a 2D canvas: [`Surface::concat`] post-multiplies, so the most recent
/// call applies first to drawn geometry. New surfaces are fully transparent.
pub trait Surface {
    /// Width in device pixels.
    fn width(&self) -> u32;

    /// Height in device pixels.
    fn height(&self) -> u32;

    /// Push the current state.
    fn save(&mut self);

    /// Pop the last saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Current local-to-device transform.
    fn transform(&self) -> Affine;

    /// Post-multiply the current transform by `t`.
    fn concat(&mut self, t: Affine);

    /// Set the resampling quality for subsequent image draws.
    fn set_smoothing(&mut self, smoothing: Smoothing);

    /// Draw the `src` region of `image` (image pixels) into `dst` (local coordinates).
    fn draw_image(
        &mut self,
        image: &RasterImage,
        src: Rect,
        dst: Rect,
        opacity: f64,
    ) -> MockupResult<()>;

    /// Fill a closed path with a solid color.
    fn fill_path(&mut self, path: &BezPath, color: ColorDef, opacity: f64) -> MockupResult<()>;

    /// Fill a rectangle with a color or gradient using `blend`.
    fn fill_rect(
        &mut self,
        rect: Rect,
        paint: &Paint,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()>;

    /// Gaussian-blur the current contents; `radius` is the standard deviation in local units.
    fn blur(&mut self, radius: f64) -> MockupResult<()>;

    /// Copy of the current pixels.
    fn snapshot(&self) -> MockupResult<RasterImage>;

    /// Translate the local frame.
    fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(Affine::translate((dx, dy)));
    }

    /// Rotate the local frame clockwise (y down) by `radians`.
    fn rotate(&mut self, radians: f64) {
        self.concat(Affine::rotate(radians));
    }

    /// Scale the local frame uniformly.
    fn scale(&mut self, s: f64) {
        self.concat(Affine::scale(s));
    }

    /// Draw the whole image into `dst`.
    fn draw_image_in(&mut self, image: &RasterImage, dst: Rect) -> MockupResult<()> {
        self.draw_image(image, image.bounds(), dst, 1.0)
    }
}

/// Allocates transparent surfaces.
pub trait SurfaceFactory {
    /// Surface type produced.
    type Surface: Surface;

    /// Allocate a `width x height` surface or fail with a resource error.
    fn create(&self, width: u32, height: u32) -> MockupResult<Self::Surface>;
}

pub(crate) fn check_surface_dims(width: u32, height: u32) -> MockupResult<()> {
    if width == 0 || height == 0 {
        return Err(MockupError::resource(format!(
            "cannot allocate an empty {width}x{height} surface"
        )));
    }
    if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(MockupError::resource(format!(
            "surface {width}x{height} exceeds the {MAX_SURFACE_DIM}px limit"
        )));
    }
    Ok(())
}

/// Device size for a surface holding `width x height` local units at `multiplier`.
pub(crate) fn scaled_dims(width: f64, height: f64, multiplier: f64) -> MockupResult<(u32, u32)> {
    let w = width * multiplier;
    let h = height * multiplier;
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(MockupError::input(format!(
            "surface size {width}x{height} at {multiplier}x is not positive and finite"
        )));
    }
    let to_px = |v: f64| v.ceil().min(f64::from(MAX_SURFACE_DIM) + 1.0) as u32;
    Ok((to_px(w), to_px(h)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawState {
    pub(crate) transform: Affine,
    pub(crate) smoothing: Smoothing,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            smoothing: Smoothing::default(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/surface/surface.rs"]
mod tests;
