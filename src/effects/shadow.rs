use crate::foundation::core::Rect;
use crate::foundation::error::MockupResult;
use crate::foundation::math::affine_scale_factor;
use crate::params::perspective::{ResolvedPerspective, ShadowEffect};
use crate::surface::{Smoothing, Surface, SurfaceFactory, scaled_dims};
use crate::transform::projector::{ProjectedCorners, project_corners};

/// Extra X tilt of the light that casts the shadow, in degrees.
pub const SHADOW_TILT_DEG: f64 = 15.0;

fn shadow_corners(width: f64, height: f64, params: &ResolvedPerspective) -> ProjectedCorners {
    let tilted = ResolvedPerspective {
        rotation_x: params.rotation_x + SHADOW_TILT_DEG,
        ..*params
    };
    project_corners(width, height, &tilted)
}

// The shadow lives on a 2w x 2h canvas centered on the shadow offset.
fn shadow_canvas(width: f64, height: f64, shadow: &ShadowEffect) -> Rect {
    Rect::new(
        shadow.offset_x - width,
        shadow.offset_y - height,
        shadow.offset_x + width,
        shadow.offset_y + height,
    )
}

/// Draw a blurred, tilted silhouette of the `width x height` design behind it.
///
/// The silhouette is filled and blurred on its own surface, then composited at
/// `(offset_x, offset_y)`. That surface covers `2w x 2h` in local units; its pixel size is
/// that box times the destination's device scale, so a 2x destination allocates `4w x 4h`.
pub fn draw_shadow<F, S>(
    factory: &F,
    surface: &mut S,
    width: f64,
    height: f64,
    shadow: &ShadowEffect,
    params: &ResolvedPerspective,
) -> MockupResult<()>
where
    F: SurfaceFactory,
    S: Surface + ?Sized,
{
    let device_scale = affine_scale_factor(surface.transform()).max(f64::EPSILON);
    let (aw, ah) = scaled_dims(2.0 * width, 2.0 * height, device_scale)?;
    let mut aux = factory.create(aw, ah)?;
    aux.scale(device_scale);
    aux.translate(width, height);

    let quad = shadow_corners(width, height, params).to_path();
    aux.fill_path(&quad, shadow.color_or_default(), shadow.opacity_or_default())?;
    aux.blur(shadow.blur.max(0.0))?;

    let snap = aux.snapshot()?;
    let canvas = shadow_canvas(width, height, shadow);
    let dst = Rect::new(
        canvas.x0,
        canvas.y0,
        canvas.x0 + f64::from(aw) / device_scale,
        canvas.y0 + f64::from(ah) / device_scale,
    );

    surface.save();
    surface.set_smoothing(Smoothing::High);
    let drawn = surface.draw_image(&snap, snap.bounds(), dst, 1.0);
    surface.restore();
    drawn
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
