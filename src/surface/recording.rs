use std::sync::{Arc, Mutex};

use crate::foundation::core::{Affine, BezPath, Rect};
use crate::foundation::error::{MockupError, MockupResult};
use crate::params::color::ColorDef;
use crate::raster::RasterImage;
use crate::surface::{
    BlendMode, DrawState, Paint, Smoothing, Surface, SurfaceFactory, check_surface_dims,
};

/// One drawing call captured by a [`RecordingSurface`], with the transform in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    /// [`Surface::draw_image`].
    DrawImage {
        /// `(width, height)` of the drawn image.
        image_size: (u32, u32),
        /// Source region in image pixels.
        src: Rect,
        /// Destination in local coordinates.
        dst: Rect,
        /// Layer opacity.
        opacity: f64,
        /// Local-to-device transform.
        transform: Affine,
        /// Resampling quality.
        smoothing: Smoothing,
    },
    /// [`Surface::fill_path`].
    FillPath {
        /// Filled path in local coordinates.
        path: BezPath,
        /// Fill color.
        color: ColorDef,
        /// Layer opacity.
        opacity: f64,
        /// Local-to-device transform.
        transform: Affine,
    },
    /// [`Surface::fill_rect`].
    FillRect {
        /// Filled rectangle in local coordinates.
        rect: Rect,
        /// Fill source.
        paint: Paint,
        /// Layer opacity.
        opacity: f64,
        /// Blend mode.
        blend: BlendMode,
        /// Local-to-device transform.
        transform: Affine,
    },
    /// [`Surface::blur`].
    Blur {
        /// Standard deviation in local units.
        radius: f64,
        /// Local-to-device transform.
        transform: Affine,
    },
}

/// Surface that draws nothing and remembers every call. Snapshots are transparent.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: DrawState,
    saved: Vec<DrawState>,
    ops: Vec<RecordedOp>,
}

impl RecordingSurface {
    /// New empty recording of a `width x height` surface.
    pub fn new(width: u32, height: u32) -> MockupResult<Self> {
        check_surface_dims(width, height)?;
        Ok(Self {
            width,
            height,
            state: DrawState::default(),
            saved: Vec::new(),
            ops: Vec::new(),
        })
    }

    /// Recorded calls in order.
    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn concat(&mut self, t: Affine) {
        self.state.transform *= t;
    }

    fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.state.smoothing = smoothing;
    }

    fn draw_image(
        &mut self,
        image: &RasterImage,
        src: Rect,
        dst: Rect,
        opacity: f64,
    ) -> MockupResult<()> {
        if image.is_empty() {
            return Err(MockupError::input(format!(
                "cannot draw an empty {}x{} image",
                image.width, image.height
            )));
        }
        self.ops.push(RecordedOp::DrawImage {
            image_size: (image.width, image.height),
            src,
            dst,
            opacity,
            transform: self.state.transform,
            smoothing: self.state.smoothing,
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: ColorDef, opacity: f64) -> MockupResult<()> {
        self.ops.push(RecordedOp::FillPath {
            path: path.clone(),
            color,
            opacity,
            transform: self.state.transform,
        });
        Ok(())
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        paint: &Paint,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        self.ops.push(RecordedOp::FillRect {
            rect,
            paint: paint.clone(),
            opacity,
            blend,
            transform: self.state.transform,
        });
        Ok(())
    }

    fn blur(&mut self, radius: f64) -> MockupResult<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MockupError::input(format!(
                "blur radius must be finite and >= 0, got {radius}"
            )));
        }
        self.ops.push(RecordedOp::Blur {
            radius,
            transform: self.state.transform,
        });
        Ok(())
    }

    fn snapshot(&self) -> MockupResult<RasterImage> {
        RasterImage::transparent(self.width, self.height)
    }
}

/// Creates [`RecordingSurface`]s and logs each requested size. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurfaceFactory {
    created: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl RecordingSurfaceFactory {
    /// Empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes of every successful allocation, in order.
    pub fn created(&self) -> Vec<(u32, u32)> {
        self.created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SurfaceFactory for RecordingSurfaceFactory {
    type Surface = RecordingSurface;

    fn create(&self, width: u32, height: u32) -> MockupResult<RecordingSurface> {
        let surface = RecordingSurface::new(width, height)?;
        self.created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((width, height));
        Ok(surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/recording.rs"]
mod tests;
