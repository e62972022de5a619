use super::*;
use crate::surface::GradientStop;

fn px(s: &CpuSurface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * s.width() + x) * 4) as usize;
    let d = s.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn near(got: [u8; 4], want: [u8; 4]) -> bool {
    got.iter()
        .zip(want)
        .all(|(g, w)| (i32::from(*g) - i32::from(w)).abs() <= 2)
}

fn red() -> Paint {
    Paint::Solid(ColorDef::rgba(1.0, 0.0, 0.0, 1.0))
}

#[test]
fn new_surface_is_transparent() {
    let s = CpuSurfaceFactory.create(3, 2).unwrap();
    assert_eq!((s.width(), s.height()), (3, 2));
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn create_rejects_empty_and_oversized() {
    assert!(matches!(
        CpuSurfaceFactory.create(0, 4),
        Err(MockupError::Resource(_))
    ));
    assert!(matches!(
        CpuSurfaceFactory.create(70_000, 4),
        Err(MockupError::Resource(_))
    ));
}

#[test]
fn fill_rect_covers_pixels() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &red(), 1.0, BlendMode::Normal)
        .unwrap();
    assert_eq!(px(&s, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&s, 3, 3), [255, 0, 0, 255]);
}

#[test]
fn transform_moves_geometry_and_restore_resets_it() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.save();
    s.translate(2.0, 2.0);
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &red(), 1.0, BlendMode::Normal)
        .unwrap();
    s.restore();
    assert_eq!(s.transform(), Affine::IDENTITY);
    assert_eq!(px(&s, 3, 3), [255, 0, 0, 255]);
    assert_eq!(px(&s, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.scale(2.0);
    s.restore();
    assert_eq!(s.transform(), Affine::scale(2.0));
}

#[test]
fn opacity_scales_coverage() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &red(), 0.5, BlendMode::Normal)
        .unwrap();
    let p = px(&s, 1, 1);
    assert!((i32::from(p[3]) - 128).abs() <= 1);
    assert_eq!(p[0], p[3]);
}

#[test]
fn draw_image_scales_into_destination() {
    let img = RasterImage::filled(2, 2, [0, 0, 255, 255]).unwrap();
    let mut s = CpuSurface::new(8, 8).unwrap();
    s.set_smoothing(Smoothing::Low);
    s.draw_image_in(&img, Rect::new(0.0, 0.0, 8.0, 4.0)).unwrap();
    assert!(near(px(&s, 4, 1), [0, 0, 255, 255]));
    assert_eq!(px(&s, 4, 6), [0, 0, 0, 0]);
}

#[test]
fn draw_empty_image_is_an_input_error() {
    let img = RasterImage::transparent(0, 2).unwrap();
    let mut s = CpuSurface::new(2, 2).unwrap();
    let err = s
        .draw_image_in(&img, Rect::new(0.0, 0.0, 2.0, 2.0))
        .unwrap_err();
    assert!(matches!(err, MockupError::Input(_)));
}

#[test]
fn fill_path_draws_triangle_area() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((8.0, 0.0));
    path.line_to((0.0, 8.0));
    path.close_path();

    let mut s = CpuSurface::new(8, 8).unwrap();
    s.fill_path(&path, ColorDef::black(), 1.0).unwrap();
    assert_eq!(px(&s, 1, 1)[3], 255);
    assert_eq!(px(&s, 7, 7)[3], 0);
}

#[test]
fn blur_softens_hard_edges() {
    let mut s = CpuSurface::new(16, 4).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 8.0, 4.0),
        &Paint::Solid(ColorDef::black()),
        1.0,
        BlendMode::Normal,
    )
    .unwrap();
    assert_eq!(px(&s, 8, 2)[3], 0);
    s.blur(2.0).unwrap();
    let edge = px(&s, 8, 2)[3];
    assert!(edge > 0 && edge < 255);
    assert!(s.blur(-1.0).is_err());
}

#[test]
fn gradient_fill_runs_from_start_to_end() {
    let g = LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(16.0, 0.0),
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: ColorDef::black(),
            },
            GradientStop {
                offset: 1.0,
                color: ColorDef::white(),
            },
        ],
    };
    let mut s = CpuSurface::new(16, 2).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 16.0, 2.0),
        &Paint::Linear(g),
        1.0,
        BlendMode::Normal,
    )
    .unwrap();
    let left = px(&s, 1, 1);
    let right = px(&s, 14, 1);
    assert_eq!(left[3], 255);
    assert!(left[0] < 64);
    assert!(right[0] > 192);
}

#[test]
fn overlay_white_brightens_gray_backdrop() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    let full = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.fill_rect(
        full,
        &Paint::Solid(ColorDef::rgba(0.5, 0.5, 0.5, 1.0)),
        1.0,
        BlendMode::Normal,
    )
    .unwrap();
    let before = px(&s, 0, 0)[0];
    s.fill_rect(
        full,
        &Paint::Solid(ColorDef::white().with_alpha(0.3)),
        1.0,
        BlendMode::Overlay,
    )
    .unwrap();
    let after = px(&s, 0, 0);
    assert_eq!(after[3], 255);
    assert!(after[0] > before);
}

#[test]
fn snapshot_matches_pixels() {
    let mut s = CpuSurface::new(3, 3).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), &red(), 1.0, BlendMode::Normal)
        .unwrap();
    let snap = s.snapshot().unwrap();
    assert_eq!((snap.width, snap.height), (3, 3));
    assert_eq!(snap.rgba8_premul.as_slice(), s.data());
}

#[test]
fn rasterized_gradient_tracks_device_scale() {
    let g = LinearGradient {
        start: Point::ZERO,
        end: Point::new(1.0, 1.0),
        stops: vec![],
    };
    let r = rasterize_gradient(&g, Rect::new(0.0, 0.0, 10.0, 5.0), 2.0).unwrap();
    assert_eq!((r.width, r.height), (20, 10));
}
