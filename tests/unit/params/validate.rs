use super::*;
use crate::params::perspective::{HighlightEffect, ShadowEffect};

fn params() -> PerspectiveParams {
    PerspectiveParams::default()
}

#[test]
fn empty_params_are_valid() {
    assert!(is_valid_params(&params()));
}

#[test]
fn out_of_range_fields_are_rejected() {
    let p = PerspectiveParams {
        rotation_x: Some(120.0),
        ..params()
    };
    assert!(!is_valid_params(&p));

    let p = PerspectiveParams {
        perspective: Some(-100.0),
        ..params()
    };
    assert!(!is_valid_params(&p));

    let p = PerspectiveParams {
        scale: Some(-1.0),
        ..params()
    };
    assert!(!is_valid_params(&p));

    let p = PerspectiveParams {
        curvature: Some(1.5),
        ..params()
    };
    assert!(!is_valid_params(&p));

    let p = PerspectiveParams {
        rotation_z: Some(181.0),
        ..params()
    };
    assert!(!is_valid_params(&p));
}

#[test]
fn values_near_bounds_are_accepted() {
    let p = PerspectiveParams {
        rotation_x: Some(89.0),
        rotation_y: Some(-89.0),
        rotation_z: Some(179.0),
        ..params()
    };
    assert!(is_valid_params(&p));

    let p = PerspectiveParams {
        curvature: Some(0.001),
        ..params()
    };
    assert!(is_valid_params(&p));

    let p = PerspectiveParams {
        rotation_x: Some(90.0),
        rotation_z: Some(-180.0),
        curvature: Some(1.0),
        ..params()
    };
    assert!(is_valid_params(&p));
}

#[test]
fn zero_perspective_and_nan_are_rejected() {
    let p = PerspectiveParams {
        perspective: Some(0.0),
        rotation_y: Some(f64::NAN),
        ..params()
    };
    let err = validate_params(&p).unwrap_err();
    let fields = err.errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>();
    assert_eq!(fields, vec!["rotationY", "perspective"]);
    assert!(err.to_string().contains("perspective: must be finite and > 0"));
}

#[test]
fn bad_transform_origin_is_reported() {
    let p = PerspectiveParams {
        transform_origin: Some("sideways".to_owned()),
        ..params()
    };
    let err = validate_params(&p).unwrap_err();
    assert_eq!(err.errors[0].field, "transformOrigin");
}

#[test]
fn effect_validation_checks_shadow_and_highlight() {
    let ok = PerspectiveTransformConfig::default_config();
    assert!(validate_effects(&ok).is_ok());

    let bad = PerspectiveTransformConfig {
        params: PerspectiveParams {
            scale: Some(0.0),
            ..params()
        },
        shadow: Some(ShadowEffect {
            blur: -1.0,
            opacity: Some(0.0),
            ..ShadowEffect::default()
        }),
        highlight: Some(HighlightEffect {
            intensity: Some(1.5),
            ..HighlightEffect::default()
        }),
        ..PerspectiveTransformConfig::default()
    };
    let err = validate_effects(&bad).unwrap_err();
    let fields = err.errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            "params.scale",
            "shadow.blur",
            "shadow.opacity",
            "highlight.intensity"
        ]
    );
}
