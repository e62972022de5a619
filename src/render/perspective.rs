use crate::effects::curvature::draw_curved;
use crate::effects::highlight::draw_highlight;
use crate::effects::shadow::draw_shadow;
use crate::foundation::core::{Affine, centered_rect};
use crate::foundation::error::{MockupError, MockupResult};
use crate::params::perspective::{PerspectiveTransformConfig, ResolvedPerspective};
use crate::raster::RasterImage;
use crate::surface::{Smoothing, Surface, SurfaceFactory, scaled_dims};
use crate::transform::matrix::build_matrix;

/// Draw `image` into the `width x height` rectangle centered on the surface's local origin.
///
/// Disabled configs draw the image flat. Enabled ones render shadow, design (curved or through
/// the scale/rotation matrix) and highlight onto a `width·mult x height·mult` auxiliary surface
/// centered on its own origin, then composite it back into the design rectangle. Anything the
/// effects paint outside that rectangle is clipped.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = width, height = height, enabled = config.enabled, quality = ?config.quality)
)]
pub fn render<F, S>(
    factory: &F,
    surface: &mut S,
    image: &RasterImage,
    width: f64,
    height: f64,
    config: &PerspectiveTransformConfig,
) -> MockupResult<()>
where
    F: SurfaceFactory,
    S: Surface + ?Sized,
{
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(MockupError::input(format!(
            "design rectangle {width}x{height} must be positive and finite"
        )));
    }
    if image.is_empty() {
        return Err(MockupError::input(format!(
            "design image {}x{} is empty",
            image.width, image.height
        )));
    }

    let dst = centered_rect(width, height);
    if !config.enabled {
        return surface.draw_image_in(image, dst);
    }

    let params = config.params.resolve();
    let mult = config.quality.multiplier();
    let (aw, ah) = scaled_dims(width, height, mult)?;
    tracing::debug!(mult, aux_width = aw, aux_height = ah, "perspective aux surface");

    let mut aux = factory.create(aw, ah)?;
    aux.scale(mult);
    aux.translate(width / 2.0, height / 2.0);
    aux.set_smoothing(Smoothing::High);

    if let Some(shadow) = &config.shadow {
        draw_shadow(factory, &mut aux, width, height, shadow, &params)?;
    }
    if params.curvature > 0.0 {
        draw_curved(&mut aux, image, width, height, params.curvature)?;
    } else {
        aux.save();
        aux.concat(design_transform(width, height, &params));
        let drawn = aux.draw_image_in(image, dst);
        aux.restore();
        drawn?;
    }
    if let Some(highlight) = &config.highlight {
        draw_highlight(&mut aux, width, height, highlight)?;
    }

    let snap = aux.snapshot()?;
    surface.save();
    surface.set_smoothing(Smoothing::High);
    let drawn = surface.draw_image(&snap, snap.bounds(), dst, 1.0);
    surface.restore();
    drawn
}

/// Scale/rotation matrix pivoting on the transform origin inside the design rectangle.
pub(crate) fn design_transform(width: f64, height: f64, params: &ResolvedPerspective) -> Affine {
    let pivot = kurbo::Vec2::new(
        (params.origin.fx - 0.5) * width,
        (params.origin.fy - 0.5) * height,
    );
    Affine::translate(pivot) * build_matrix(params).to_affine() * Affine::translate(-pivot)
}

#[cfg(test)]
#[path = "../../tests/unit/render/perspective.rs"]
mod tests;
