use crate::params::perspective::{PerspectiveParams, PerspectiveTransformConfig, TransformOrigin};
use std::fmt;

/// One out-of-range field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamError {
    /// JSON field path, e.g. `rotationX` or `shadow.opacity`.
    pub field: String,
    /// Human readable reason.
    pub message: String,
}

impl ParamError {
    fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found in one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamErrors {
    /// Violations in field order.
    pub errors: Vec<ParamError>,
}

impl fmt::Display for ParamErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParamErrors {}

/// Range-check the fields that are present. Absent fields always pass.
pub fn validate_params(params: &PerspectiveParams) -> Result<(), ParamErrors> {
    let mut errors = Vec::new();
    check_params(params, "", &mut errors);
    finish(errors)
}

/// Boolean form of [`validate_params`].
pub fn is_valid_params(params: &PerspectiveParams) -> bool {
    validate_params(params).is_ok()
}

/// Check `params` plus the shadow/highlight settings of a full config.
pub fn validate_effects(config: &PerspectiveTransformConfig) -> Result<(), ParamErrors> {
    let mut errors = Vec::new();
    check_params(&config.params, "params.", &mut errors);

    if let Some(shadow) = &config.shadow {
        for (name, v) in [("shadow.offsetX", shadow.offset_x), ("shadow.offsetY", shadow.offset_y)]
        {
            if !v.is_finite() {
                errors.push(ParamError::at(name, "must be finite"));
            }
        }
        if !shadow.blur.is_finite() || shadow.blur < 0.0 {
            errors.push(ParamError::at("shadow.blur", "must be finite and >= 0"));
        }
        if let Some(o) = shadow.opacity {
            check_unit_open_closed("shadow.opacity", o, &mut errors);
        }
    }

    if let Some(highlight) = &config.highlight {
        if let Some(i) = highlight.intensity {
            check_unit_open_closed("highlight.intensity", i, &mut errors);
        }
        if let Some(o) = highlight.opacity {
            check_unit_open_closed("highlight.opacity", o, &mut errors);
        }
        if let Some(a) = highlight.angle
            && !a.is_finite()
        {
            errors.push(ParamError::at("highlight.angle", "must be finite"));
        }
    }

    finish(errors)
}

fn check_params(p: &PerspectiveParams, prefix: &str, errors: &mut Vec<ParamError>) {
    let field = |name: &str| format!("{prefix}{name}");

    if let Some(v) = p.rotation_x {
        check_range(&field("rotationX"), v, -90.0, 90.0, errors);
    }
    if let Some(v) = p.rotation_y {
        check_range(&field("rotationY"), v, -90.0, 90.0, errors);
    }
    if let Some(v) = p.rotation_z {
        check_range(&field("rotationZ"), v, -180.0, 180.0, errors);
    }
    if let Some(v) = p.perspective
        && !(v.is_finite() && v > 0.0)
    {
        errors.push(ParamError::at(field("perspective"), "must be finite and > 0"));
    }
    if let Some(v) = p.scale
        && !(v.is_finite() && v > 0.0)
    {
        errors.push(ParamError::at(field("scale"), "must be finite and > 0"));
    }
    if let Some(v) = p.curvature {
        check_range(&field("curvature"), v, 0.0, 1.0, errors);
    }
    for (name, v) in [("skewX", p.skew_x), ("skewY", p.skew_y)] {
        if let Some(v) = v
            && !v.is_finite()
        {
            errors.push(ParamError::at(field(name), "must be finite"));
        }
    }
    if let Some(origin) = &p.transform_origin
        && let Err(msg) = TransformOrigin::parse(origin)
    {
        errors.push(ParamError::at(field("transformOrigin"), msg));
    }
}

fn check_range(field: &str, v: f64, min: f64, max: f64, errors: &mut Vec<ParamError>) {
    // NaN fails both comparisons, so it is rejected here too.
    if !(v >= min && v <= max) {
        errors.push(ParamError::at(
            field,
            format!("must be within [{min}, {max}], got {v}"),
        ));
    }
}

fn check_unit_open_closed(field: &str, v: f64, errors: &mut Vec<ParamError>) {
    if !(v > 0.0 && v <= 1.0) {
        errors.push(ParamError::at(field, format!("must be within (0, 1], got {v}")));
    }
}

fn finish(errors: Vec<ParamError>) -> Result<(), ParamErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ParamErrors { errors })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/validate.rs"]
mod tests;
