use super::*;
use crate::params::color::ColorDef;
use crate::surface::cpu::CpuSurfaceFactory;
use crate::surface::recording::{RecordedOp, RecordingSurface, RecordingSurfaceFactory};

fn shadow(blur: f64) -> ShadowEffect {
    ShadowEffect {
        offset_x: 5.0,
        offset_y: 8.0,
        blur,
        color: None,
        opacity: None,
    }
}

#[test]
fn shadow_uses_double_sized_aux_and_offset_canvas() {
    let factory = RecordingSurfaceFactory::new();
    let mut dst = RecordingSurface::new(100, 100).unwrap();
    draw_shadow(
        &factory,
        &mut dst,
        40.0,
        20.0,
        &shadow(4.0),
        &ResolvedPerspective::default(),
    )
    .unwrap();

    assert_eq!(factory.created(), vec![(80, 40)]);
    assert_eq!(dst.ops().len(), 1);
    match &dst.ops()[0] {
        RecordedOp::DrawImage {
            image_size,
            dst,
            smoothing,
            ..
        } => {
            assert_eq!(*image_size, (80, 40));
            assert_eq!(*dst, Rect::new(-35.0, -12.0, 45.0, 28.0));
            assert_eq!(*smoothing, Smoothing::High);
        }
        other => panic!("unexpected op {other:?}"),
    }
    assert_eq!(dst.save_depth(), 0);
}

#[test]
fn shadow_aux_follows_device_scale() {
    let factory = RecordingSurfaceFactory::new();
    let mut dst = RecordingSurface::new(100, 100).unwrap();
    dst.scale(2.0);
    draw_shadow(
        &factory,
        &mut dst,
        40.0,
        20.0,
        &shadow(0.0),
        &ResolvedPerspective::default(),
    )
    .unwrap();
    assert_eq!(factory.created(), vec![(160, 80)]);
}

#[test]
fn shadow_quad_is_tilted_and_defaults_apply() {
    let quad = shadow_corners(40.0, 20.0, &ResolvedPerspective::default());
    // The extra tilt pulls the top and bottom edges toward each other unevenly.
    assert!((quad.top_left.y + 10.0).abs() > 1e-6);
    assert!(quad.top_left.y.abs() < 10.0);
    assert!((quad.top_left.y + quad.bottom_left.y).abs() > 1e-9);

    let effect = shadow(3.0);
    assert_eq!(effect.color_or_default(), ColorDef::black());
    assert_eq!(effect.opacity_or_default(), 0.3);
}

#[test]
fn shadow_paints_offset_blurred_pixels() {
    let mut dst = CpuSurfaceFactory.create(60, 60).unwrap();
    dst.translate(30.0, 30.0);
    let effect = ShadowEffect {
        offset_x: 6.0,
        offset_y: 6.0,
        blur: 2.0,
        color: Some(ColorDef::black()),
        opacity: Some(1.0),
    };
    draw_shadow(
        &CpuSurfaceFactory,
        &mut dst,
        20.0,
        20.0,
        &effect,
        &ResolvedPerspective::default(),
    )
    .unwrap();

    let at = |x: u32, y: u32| dst.data()[((y * 60 + x) * 4 + 3) as usize];
    assert!(at(36, 36) > 200);
    assert_eq!(at(2, 2), 0);
}
