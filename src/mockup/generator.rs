use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::core::centered_rect;
use crate::foundation::error::{MockupError, MockupResult};
use crate::mockup::task::GenerationTask;
use crate::params::perspective::Quality;
use crate::params::validate::validate_effects;
use crate::raster::RasterImage;
use crate::raster::encode::{EncodedImage, encode_png};
use crate::render::perspective::render;
use crate::surface::{Smoothing, Surface, SurfaceFactory};
use crate::template::model::MockupTemplate;

/// Default minimum output width in pixels.
pub const DEFAULT_MIN_WIDTH: u32 = 2000;
/// Default minimum magnification of the template.
pub const DEFAULT_MIN_SCALE: f64 = 2.0;

/// User placement of the design inside the design area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserTransform {
    /// Horizontal offset from the design-area center, template pixels.
    pub x: f64,
    /// Vertical offset from the design-area center, template pixels.
    pub y: f64,
    /// Uniform scale, `> 0`.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

impl Default for UserTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// Output sizing and pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOpts {
    /// Output is at least this wide.
    pub min_width: u32,
    /// Output is at least this many times the template size, `>= 1`.
    pub min_scale: f64,
    /// Worker threads for [`MockupGenerator::generate_batch`]; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_scale: DEFAULT_MIN_SCALE,
            threads: None,
        }
    }
}

/// Everything one generation needs.
#[derive(Debug, Clone)]
pub struct MockupRequest {
    /// Decoded template photo.
    pub template_image: RasterImage,
    /// Decoded user design.
    pub design_image: RasterImage,
    /// Template metadata.
    pub template: MockupTemplate,
    /// User placement.
    pub user_transform: UserTransform,
    /// Overrides [`GeneratorOpts::min_width`] for this request.
    pub min_width: Option<u32>,
}

impl MockupRequest {
    /// Request with the default placement.
    pub fn new(
        template_image: RasterImage,
        design_image: RasterImage,
        template: MockupTemplate,
    ) -> Self {
        Self {
            template_image,
            design_image,
            template,
            user_transform: UserTransform::default(),
            min_width: None,
        }
    }

    /// Replace the user placement.
    pub fn with_transform(mut self, user_transform: UserTransform) -> Self {
        self.user_transform = user_transform;
        self
    }

    /// Require at least `min_width` output pixels.
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = Some(min_width);
        self
    }
}

/// Output surface size and the magnification that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPlan {
    /// Template magnification.
    pub scale: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Composites designs onto templates at print resolution.
#[derive(Debug, Clone, Default)]
pub struct MockupGenerator<F> {
    factory: F,
    opts: GeneratorOpts,
}

impl<F: SurfaceFactory> MockupGenerator<F> {
    /// Generator with default options.
    pub fn new(factory: F) -> Self {
        Self::with_opts(factory, GeneratorOpts::default())
    }

    /// Generator with explicit options.
    pub fn with_opts(factory: F, opts: GeneratorOpts) -> Self {
        Self { factory, opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &GeneratorOpts {
        &self.opts
    }

    /// Surface factory in use.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// `scale = max(min_width / template_width, min_scale)` and the output size it yields.
    pub fn plan(
        &self,
        template_width: u32,
        template_height: u32,
        min_width: u32,
    ) -> MockupResult<OutputPlan> {
        if template_width == 0 || template_height == 0 {
            return Err(MockupError::input(format!(
                "template image {template_width}x{template_height} is empty"
            )));
        }
        let min_scale = self.opts.min_scale;
        if !min_scale.is_finite() || min_scale < 1.0 {
            return Err(MockupError::validation(format!(
                "min_scale must be finite and >= 1, got {min_scale}"
            )));
        }

        let tw = f64::from(template_width);
        let th = f64::from(template_height);
        let scale = (f64::from(min_width) / tw).max(min_scale);
        let to_px = |v: f64| -> MockupResult<u32> {
            let px = v.round();
            if px > f64::from(u32::MAX) {
                return Err(MockupError::resource(format!(
                    "output side {px} does not fit in u32"
                )));
            }
            Ok((px as u32).max(1))
        };
        Ok(OutputPlan {
            scale,
            width: to_px(tw * scale)?.max(min_width),
            height: to_px(th * scale)?,
        })
    }

    /// Composite the request onto a fresh output surface without encoding it.
    #[tracing::instrument(skip_all, fields(template = %request.template.id))]
    pub fn render_surface(&self, request: &MockupRequest) -> MockupResult<F::Surface> {
        check_request(request)?;

        let template_image = &request.template_image;
        let design_image = &request.design_image;
        let template = &request.template;
        let min_width = request.min_width.unwrap_or(self.opts.min_width);
        let plan = self.plan(template_image.width, template_image.height, min_width)?;
        tracing::debug!(
            scale = plan.scale,
            width = plan.width,
            height = plan.height,
            "output plan"
        );

        let mut surface = self.factory.create(plan.width, plan.height)?;
        surface.scale(plan.scale);
        surface.set_smoothing(Smoothing::High);
        surface.draw_image_in(template_image, template_image.bounds())?;

        let user = request.user_transform;
        let center = template.design_area.center();
        surface.save();
        surface.translate(center.x + user.x, center.y + user.y);
        surface.rotate(user.rotation.to_radians());
        surface.scale(user.scale);

        let draw_w = template.design_area.width;
        let draw_h = draw_w * f64::from(design_image.height) / f64::from(design_image.width);
        let drawn = if template.perspective_transform.enabled {
            let config = template.perspective_transform.with_quality(Quality::Print);
            render(&self.factory, &mut surface, design_image, draw_w, draw_h, &config)
        } else {
            surface.draw_image_in(design_image, centered_rect(draw_w, draw_h))
        };
        surface.restore();
        drawn?;

        Ok(surface)
    }

    /// Render and losslessly encode one mockup.
    pub fn generate(&self, request: &MockupRequest) -> MockupResult<EncodedImage> {
        let surface = self.render_surface(request)?;
        encode_png(&surface.snapshot()?)
    }

    /// Render many independent requests in parallel; results keep input order.
    pub fn generate_batch(
        &self,
        requests: &[MockupRequest],
    ) -> MockupResult<Vec<MockupResult<EncodedImage>>>
    where
        F: Sync,
    {
        let pool = build_thread_pool(self.opts.threads)?;
        tracing::debug!(
            jobs = requests.len(),
            threads = pool.current_num_threads(),
            "batch generation"
        );
        Ok(pool.install(|| {
            requests
                .par_iter()
                .map(|request| self.generate(request))
                .collect::<Vec<_>>()
        }))
    }
}

impl<F> MockupGenerator<F>
where
    F: SurfaceFactory + Clone + Send + 'static,
{
    /// Start one generation on the rayon global pool.
    pub fn spawn(&self, request: MockupRequest) -> GenerationTask {
        let generator = self.clone();
        GenerationTask::spawn(move || generator.generate(&request))
    }
}

// Structural template errors and out-of-range parameters stop generation before any drawing.
fn check_request(request: &MockupRequest) -> MockupResult<()> {
    let template = &request.template;
    let validation = template.validate();
    if !validation.is_valid {
        return Err(MockupError::input(format!(
            "template '{}' is invalid: {}",
            template.id,
            validation.errors.join("; ")
        )));
    }
    for warning in &validation.warnings {
        tracing::warn!(template = %template.id, "{warning}");
    }

    if template.perspective_transform.enabled {
        validate_effects(&template.perspective_transform)
            .map_err(|e| MockupError::input(format!("template '{}': {e}", template.id)))?;
    }

    let (ti, di) = (&request.template_image, &request.design_image);
    if ti.is_empty() {
        return Err(MockupError::input(format!(
            "template image {}x{} is empty",
            ti.width, ti.height
        )));
    }
    if di.is_empty() {
        return Err(MockupError::input(format!(
            "design image {}x{} is empty",
            di.width, di.height
        )));
    }
    if ti.width != template.width || ti.height != template.height {
        tracing::warn!(
            template = %template.id,
            image_width = ti.width,
            image_height = ti.height,
            declared_width = template.width,
            declared_height = template.height,
            "template image size differs from its metadata"
        );
    }

    let user = request.user_transform;
    if ![user.x, user.y, user.rotation].iter().all(|v| v.is_finite()) {
        return Err(MockupError::input("user transform values must be finite"));
    }
    if !user.scale.is_finite() || user.scale <= 0.0 {
        return Err(MockupError::input(format!(
            "user transform scale must be > 0, got {}",
            user.scale
        )));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> MockupResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MockupError::validation(
            "generator 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MockupError::resource(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/generator.rs"]
mod tests;
