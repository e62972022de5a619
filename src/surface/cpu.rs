use std::sync::Arc;

use kurbo::Shape;

use crate::effects::blur::{blur_rgba8_premul, radius_for_sigma};
use crate::effects::composite::{over_in_place, overlay_in_place};
use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::affine_scale_factor;
use crate::params::color::ColorDef;
use crate::raster::RasterImage;
use crate::surface::{
    BlendMode, DrawState, LinearGradient, MAX_SURFACE_DIM, Paint, Smoothing, Surface,
    SurfaceFactory, check_surface_dims,
};

/// Allocates [`CpuSurface`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceFactory;

impl SurfaceFactory for CpuSurfaceFactory {
    type Surface = CpuSurface;

    fn create(&self, width: u32, height: u32) -> MockupResult<CpuSurface> {
        CpuSurface::new(width, height)
    }
}

/// Raster surface backed by `vello_cpu`.
///
/// Each draw is rasterized into a fresh pixmap and then composited onto the accumulated pixels,
/// which is what lets the overlay blend and whole-surface blur work on real backdrop contents.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    state: DrawState,
    saved: Vec<DrawState>,
    image_cache: Option<CachedPixmap>,
}

struct CachedPixmap {
    source: Arc<Vec<u8>>,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("saved", &self.saved.len())
            .finish()
    }
}

impl CpuSurface {
    /// Allocate a transparent `width x height` surface.
    pub fn new(width: u32, height: u32) -> MockupResult<Self> {
        check_surface_dims(width, height)?;
        let w = to_u16(width)?;
        let h = to_u16(height)?;
        tracing::debug!(width, height, "allocating cpu surface");
        Ok(Self {
            width: w,
            height: h,
            pixmap: vello_cpu::Pixmap::new(w, h),
            state: DrawState::default(),
            saved: Vec::new(),
            image_cache: None,
        })
    }

    /// Borrow the accumulated premultiplied RGBA8 pixels.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn render_layer(&self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) -> vello_cpu::Pixmap {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw(&mut ctx);
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);
        layer
    }

    // vello_cpu renders into a fresh buffer; blend it onto what is already here.
    fn accumulate(
        &mut self,
        layer: &vello_cpu::Pixmap,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        let dst = self.pixmap.data_as_u8_slice_mut();
        let src = layer.data_as_u8_slice();
        match blend {
            BlendMode::Normal => over_in_place(dst, src, opacity as f32),
            BlendMode::Overlay => overlay_in_place(dst, src, opacity as f32),
        }
    }

    fn pixmap_for(&mut self, image: &RasterImage) -> MockupResult<Arc<vello_cpu::Pixmap>> {
        if let Some(cached) = &self.image_cache
            && Arc::ptr_eq(&cached.source, &image.rgba8_premul)
        {
            return Ok(cached.pixmap.clone());
        }

        let pixmap = Arc::new(image_premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        )?);
        self.image_cache = Some(CachedPixmap {
            source: image.rgba8_premul.clone(),
            pixmap: pixmap.clone(),
        });
        Ok(pixmap)
    }

    fn paint_pixmap(
        &mut self,
        pixmap: Arc<vello_cpu::Pixmap>,
        src: Rect,
        dst: Rect,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        let map = self.state.transform
            * Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate((-src.x0, -src.y0));
        let quality = match self.state.smoothing {
            Smoothing::Low => vello_cpu::peniko::ImageQuality::Low,
            Smoothing::High => vello_cpu::peniko::ImageQuality::High,
        };
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(pixmap),
            sampler: vello_cpu::peniko::ImageSampler::default().with_quality(quality),
        };

        let layer = self.render_layer(|ctx| {
            ctx.set_transform(affine_to_cpu(map));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
        });
        self.accumulate(&layer, opacity, blend)
    }

    fn fill_solid(
        &mut self,
        path: &BezPath,
        color: ColorDef,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        let [r, g, b, a] = color.to_rgba8_straight();
        let transform = self.state.transform;
        let layer = self.render_layer(|ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&bezpath_to_cpu(path));
        });
        self.accumulate(&layer, opacity, blend)
    }

    fn fill_gradient(
        &mut self,
        rect: Rect,
        gradient: &LinearGradient,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        let device_scale = affine_scale_factor(self.state.transform);
        let raster = rasterize_gradient(gradient, rect, device_scale)?;
        let pixmap = Arc::new(image_premul_bytes_to_pixmap(
            raster.rgba8_premul.as_slice(),
            raster.width,
            raster.height,
        )?);
        self.paint_pixmap(pixmap, raster.bounds(), rect, opacity, blend)
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
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
        if is_degenerate(src) || is_degenerate(dst) || invisible(opacity) {
            return Ok(());
        }
        let pixmap = self.pixmap_for(image)?;
        self.paint_pixmap(pixmap, src, dst, opacity, BlendMode::Normal)
    }

    fn fill_path(&mut self, path: &BezPath, color: ColorDef, opacity: f64) -> MockupResult<()> {
        if invisible(opacity) {
            return Ok(());
        }
        self.fill_solid(path, color, opacity, BlendMode::Normal)
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        paint: &Paint,
        opacity: f64,
        blend: BlendMode,
    ) -> MockupResult<()> {
        if is_degenerate(rect) || invisible(opacity) {
            return Ok(());
        }
        match paint {
            Paint::Solid(color) => {
                let path = rect.to_path(0.1);
                self.fill_solid(&path, *color, opacity, blend)
            }
            Paint::Linear(gradient) => self.fill_gradient(rect, gradient, opacity, blend),
        }
    }

    fn blur(&mut self, radius: f64) -> MockupResult<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MockupError::input(format!(
                "blur radius must be finite and >= 0, got {radius}"
            )));
        }
        let sigma = radius * affine_scale_factor(self.state.transform);
        let kernel_radius = radius_for_sigma(sigma);
        if kernel_radius == 0 {
            return Ok(());
        }

        let out = blur_rgba8_premul(
            self.pixmap.data_as_u8_slice(),
            self.width(),
            self.height(),
            kernel_radius,
            sigma as f32,
        )?;
        self.pixmap.data_as_u8_slice_mut().copy_from_slice(&out);
        Ok(())
    }

    fn snapshot(&self) -> MockupResult<RasterImage> {
        RasterImage::from_premul_rgba8(
            self.width(),
            self.height(),
            self.pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn is_degenerate(r: Rect) -> bool {
    let (w, h) = (r.width(), r.height());
    !(w.is_finite() && h.is_finite()) || w == 0.0 || h == 0.0
}

fn invisible(opacity: f64) -> bool {
    opacity.is_nan() || opacity <= 0.0
}

fn to_u16(v: u32) -> MockupResult<u16> {
    v.try_into().map_err(|_| {
        MockupError::resource(format!("surface side {v} exceeds {MAX_SURFACE_DIM}px"))
    })
}

/// Rasterize `gradient` over `rect` at `device_scale` pixels per local unit.
fn rasterize_gradient(
    gradient: &LinearGradient,
    rect: Rect,
    device_scale: f64,
) -> MockupResult<RasterImage> {
    let rect = rect.abs();
    let to_px = |v: f64| {
        (v * device_scale)
            .ceil()
            .clamp(1.0, f64::from(MAX_SURFACE_DIM)) as u32
    };
    let (w, h) = (to_px(rect.width()), to_px(rect.height()));

    let mut data = Vec::with_capacity(w as usize * h as usize * 4);
    for y in 0..h {
        let py = rect.y0 + (f64::from(y) + 0.5) / f64::from(h) * rect.height();
        for x in 0..w {
            let px = rect.x0 + (f64::from(x) + 0.5) / f64::from(w) * rect.width();
            data.extend_from_slice(&gradient.sample_at(Point::new(px, py)).to_array());
        }
    }
    RasterImage::from_premul_rgba8(w, h, data)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> MockupResult<vello_cpu::Pixmap> {
    let w = to_u16(width)?;
    let h = to_u16(height)?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(MockupError::input("raster byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
