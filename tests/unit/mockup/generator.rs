use super::*;
use crate::foundation::core::{Affine, Rect};
use crate::params::perspective::{PerspectiveParams, PerspectiveTransformConfig};
use crate::raster::decode::decode_image;
use crate::surface::cpu::CpuSurfaceFactory;
use crate::surface::recording::{RecordedOp, RecordingSurfaceFactory};
use crate::template::model::{DesignArea, TemplateCategory};

fn template(width: u32, height: u32, area: DesignArea) -> MockupTemplate {
    MockupTemplate {
        id: "poster".into(),
        name: "Poster".into(),
        category: TemplateCategory::Print,
        width,
        height,
        design_area: area,
        perspective_transform: PerspectiveTransformConfig::default(),
        description: "A framed poster on a wall".into(),
        tags: None,
    }
}

fn request(width: u32, height: u32) -> MockupRequest {
    let area = DesignArea {
        x: f64::from(width) / 4.0,
        y: f64::from(height) / 4.0,
        width: f64::from(width) / 2.0,
        height: f64::from(height) / 2.0,
    };
    MockupRequest::new(
        RasterImage::filled(width, height, [255, 255, 255, 255]).unwrap(),
        RasterImage::filled(20, 10, [255, 0, 0, 255]).unwrap(),
        template(width, height, area),
    )
}

#[test]
fn plan_reaches_min_width_or_double_size() {
    let g = MockupGenerator::new(RecordingSurfaceFactory::new());
    let p = g.plan(400, 300, 2000).unwrap();
    assert_eq!((p.scale, p.width, p.height), (5.0, 2000, 1500));
    let p = g.plan(800, 600, 2000).unwrap();
    assert_eq!((p.scale, p.width, p.height), (2.5, 2000, 1500));
    let p = g.plan(3000, 1000, 2000).unwrap();
    assert_eq!((p.scale, p.width, p.height), (2.0, 6000, 2000));
    let p = g.plan(3, 3, 2000).unwrap();
    assert_eq!(p.width, 2000);
}

#[test]
fn plan_rejects_bad_inputs() {
    let g = MockupGenerator::new(RecordingSurfaceFactory::new());
    assert!(matches!(g.plan(0, 10, 2000), Err(MockupError::Input(_))));
    let g = MockupGenerator::with_opts(
        RecordingSurfaceFactory::new(),
        GeneratorOpts {
            min_scale: 0.5,
            ..GeneratorOpts::default()
        },
    );
    assert!(matches!(g.plan(10, 10, 20), Err(MockupError::Validation(_))));
}

#[test]
fn flat_generation_draws_template_then_design() {
    let factory = RecordingSurfaceFactory::new();
    let g = MockupGenerator::new(factory.clone());
    let req = request(400, 200).with_transform(UserTransform {
        x: 10.0,
        y: -5.0,
        scale: 1.5,
        rotation: 90.0,
    });
    let surface = g.render_surface(&req).unwrap();

    assert_eq!(factory.created(), vec![(2000, 1000)]);
    let ops = surface.ops();
    assert_eq!(ops.len(), 2);

    let RecordedOp::DrawImage {
        dst, transform, smoothing, ..
    } = &ops[0]
    else {
        panic!("expected template draw");
    };
    assert_eq!(*dst, Rect::new(0.0, 0.0, 400.0, 200.0));
    assert_eq!(*transform, Affine::scale(5.0));
    assert_eq!(*smoothing, Smoothing::High);

    let RecordedOp::DrawImage {
        image_size,
        dst,
        transform,
        ..
    } = &ops[1]
    else {
        panic!("expected design draw");
    };
    assert_eq!(*image_size, (20, 10));
    // Width bound to the design area, aspect ratio from the design image.
    assert_eq!(*dst, Rect::new(-100.0, -50.0, 100.0, 50.0));
    let want = Affine::scale(5.0)
        * Affine::translate((210.0, 95.0))
        * Affine::rotate(90f64.to_radians())
        * Affine::scale(1.5);
    assert_eq!(*transform, want);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn perspective_generation_renders_at_print_quality() {
    let factory = RecordingSurfaceFactory::new();
    let g = MockupGenerator::new(factory.clone());
    let mut req = request(400, 200);
    req.template.perspective_transform = PerspectiveTransformConfig {
        enabled: true,
        ..PerspectiveTransformConfig::default()
    };
    g.render_surface(&req).unwrap();
    // 200x100 design rectangle at the 2x print multiplier.
    assert_eq!(factory.created(), vec![(2000, 1000), (400, 200)]);
}

#[test]
fn invalid_template_fails_before_allocating() {
    let factory = RecordingSurfaceFactory::new();
    let g = MockupGenerator::new(factory.clone());
    let mut req = request(400, 200);
    req.template.design_area.x = 300.0;
    let err = g.render_surface(&req).unwrap_err();
    assert!(matches!(err, MockupError::Input(_)));
    assert!(err.to_string().contains("extends beyond template width"));
    assert!(factory.created().is_empty());
}

#[test]
fn out_of_range_params_fail_when_enabled() {
    let g = MockupGenerator::new(RecordingSurfaceFactory::new());
    let mut req = request(400, 200);
    req.template.perspective_transform = PerspectiveTransformConfig {
        enabled: true,
        params: PerspectiveParams {
            rotation_x: Some(120.0),
            ..PerspectiveParams::default()
        },
        ..PerspectiveTransformConfig::default()
    };
    assert!(matches!(g.render_surface(&req), Err(MockupError::Input(_))));

    req.template.perspective_transform.enabled = false;
    assert!(g.render_surface(&req).is_ok());
}

#[test]
fn degenerate_user_transform_is_rejected() {
    let g = MockupGenerator::new(RecordingSurfaceFactory::new());
    let req = request(40, 20).with_transform(UserTransform {
        scale: 0.0,
        ..UserTransform::default()
    });
    assert!(matches!(g.render_surface(&req), Err(MockupError::Input(_))));

    let req = request(40, 20).with_transform(UserTransform {
        x: f64::NAN,
        ..UserTransform::default()
    });
    assert!(matches!(g.render_surface(&req), Err(MockupError::Input(_))));
}

#[test]
fn empty_design_is_rejected() {
    let g = MockupGenerator::new(RecordingSurfaceFactory::new());
    let mut req = request(40, 20);
    req.design_image = RasterImage::transparent(0, 0).unwrap();
    assert!(matches!(g.render_surface(&req), Err(MockupError::Input(_))));
}

#[test]
fn cpu_generation_encodes_png_of_planned_size() {
    let g = MockupGenerator::new(CpuSurfaceFactory);
    let req = request(20, 10).with_min_width(60);
    let encoded = g.generate(&req).unwrap();
    assert_eq!((encoded.width, encoded.height), (60, 30));

    let img = decode_image(&encoded.bytes).unwrap();
    assert_eq!((img.width, img.height), (60, 30));
    // Background corner stays white, design-area center is red.
    let close = |got: Option<[u8; 4]>, want: [u8; 4]| {
        let got = got.unwrap();
        got.iter()
            .zip(want)
            .all(|(g, w)| (i32::from(*g) - i32::from(w)).abs() <= 2)
    };
    assert!(close(img.pixel(1, 1), [255, 255, 255, 255]));
    assert!(close(img.pixel(30, 15), [255, 0, 0, 255]));
}

#[test]
fn batch_keeps_input_order() {
    let g = MockupGenerator::with_opts(
        CpuSurfaceFactory,
        GeneratorOpts {
            min_width: 40,
            threads: Some(2),
            ..GeneratorOpts::default()
        },
    );
    let mut bad = request(20, 10);
    bad.template.design_area.width = 0.0;
    let results = g
        .generate_batch(&[request(20, 10), bad, request(30, 10)])
        .unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().width, 40);
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().width, 60);
}

#[test]
fn batch_rejects_zero_threads() {
    let g = MockupGenerator::with_opts(
        CpuSurfaceFactory,
        GeneratorOpts {
            threads: Some(0),
            ..GeneratorOpts::default()
        },
    );
    assert!(matches!(
        g.generate_batch(&[]),
        Err(MockupError::Validation(_))
    ));
}

#[test]
fn spawned_generation_resolves() {
    let g = MockupGenerator::with_opts(
        CpuSurfaceFactory,
        GeneratorOpts {
            min_width: 40,
            ..GeneratorOpts::default()
        },
    );
    let task = g.spawn(request(20, 10));
    let encoded = task.wait().unwrap();
    assert_eq!((encoded.width, encoded.height), (40, 20));
}
