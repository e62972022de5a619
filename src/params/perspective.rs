//! Per-request perspective parameters and effect settings.
//!
//! Every optional field has a documented default; [`PerspectiveParams::resolve`] applies them
//! once so the rendering code never deals with `Option`s.

use crate::params::color::ColorDef;
use serde::{Deserialize, Serialize};

/// Default perspective distance.
pub const DEFAULT_PERSPECTIVE: f64 = 1000.0;
/// Default shadow opacity when the effect leaves it unset.
pub const DEFAULT_SHADOW_OPACITY: f64 = 0.3;
/// Default highlight intensity when the effect leaves it unset.
pub const DEFAULT_HIGHLIGHT_INTENSITY: f64 = 0.3;

/// Simulated 3D orientation of the design. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerspectiveParams {
    /// Tilt about the X axis in degrees, `[-90, 90]`. Default 0.
    #[serde(rename = "rotationX", skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f64>,
    /// Tilt about the Y axis in degrees, `[-90, 90]`. Default 0.
    #[serde(rename = "rotationY", skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f64>,
    /// In-plane rotation in degrees, `[-180, 180]`. Default 0.
    #[serde(rename = "rotationZ", skip_serializing_if = "Option::is_none")]
    pub rotation_z: Option<f64>,
    /// Perspective distance, `> 0`. Default 1000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perspective: Option<f64>,
    /// Uniform scale, `> 0`. Default 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Horizontal skew in degrees. Carried for completeness; the draw matrix does not use it.
    #[serde(rename = "skewX", skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    /// Vertical skew in degrees. Carried for completeness; the draw matrix does not use it.
    #[serde(rename = "skewY", skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
    /// Fabric bend, `[0, 1]`. Default 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
    /// Pivot descriptor such as `"center"` or `"25% 75%"`. Default `"center"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
}

/// [`PerspectiveParams`] with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPerspective {
    /// Degrees.
    pub rotation_x: f64,
    /// Degrees.
    pub rotation_y: f64,
    /// Degrees.
    pub rotation_z: f64,
    /// Perspective distance.
    pub perspective: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Degrees.
    pub skew_x: f64,
    /// Degrees.
    pub skew_y: f64,
    /// `[0, 1]`.
    pub curvature: f64,
    /// Pivot inside the design rectangle.
    pub origin: TransformOrigin,
}

impl Default for ResolvedPerspective {
    fn default() -> Self {
        PerspectiveParams::default().resolve()
    }
}

impl PerspectiveParams {
    /// Apply defaults. An unparseable `transformOrigin` falls back to the center; run
    /// [`crate::validate_params`] first to reject it instead.
    pub fn resolve(&self) -> ResolvedPerspective {
        ResolvedPerspective {
            rotation_x: self.rotation_x.unwrap_or(0.0),
            rotation_y: self.rotation_y.unwrap_or(0.0),
            rotation_z: self.rotation_z.unwrap_or(0.0),
            perspective: self.perspective.unwrap_or(DEFAULT_PERSPECTIVE),
            scale: self.scale.unwrap_or(1.0),
            skew_x: self.skew_x.unwrap_or(0.0),
            skew_y: self.skew_y.unwrap_or(0.0),
            curvature: self.curvature.unwrap_or(0.0),
            origin: self
                .transform_origin
                .as_deref()
                .and_then(|s| TransformOrigin::parse(s).ok())
                .unwrap_or_default(),
        }
    }
}

/// Pivot of the in-plane transform as fractions of the design rectangle (`0.5, 0.5` = center).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal fraction, 0 = left edge.
    pub fx: f64,
    /// Vertical fraction, 0 = top edge.
    pub fy: f64,
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self { fx: 0.5, fy: 0.5 }
    }
}

impl TransformOrigin {
    /// Parse CSS-like keywords (`center`, `top left`, ...) or percentage pairs (`25% 75%`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() || words.len() > 2 {
            return Err(format!("transformOrigin \"{s}\" must have one or two components"));
        }

        let mut fx = None::<f64>;
        let mut fy = None::<f64>;
        let mut pending_pct = Vec::new();
        for w in &words {
            match w.to_ascii_lowercase().as_str() {
                "left" => fx = Some(0.0),
                "right" => fx = Some(1.0),
                "top" => fy = Some(0.0),
                "bottom" => fy = Some(1.0),
                "center" => {}
                other => {
                    let pct = other
                        .strip_suffix('%')
                        .and_then(|p| p.parse::<f64>().ok())
                        .filter(|p| p.is_finite())
                        .ok_or_else(|| format!("unrecognized transformOrigin component \"{w}\""))?;
                    pending_pct.push(pct / 100.0);
                }
            }
        }

        // Percentages fill the axes in x, y order, after keywords have claimed theirs.
        for pct in pending_pct {
            if fx.is_none() {
                fx = Some(pct);
            } else if fy.is_none() {
                fy = Some(pct);
            } else {
                return Err(format!("transformOrigin \"{s}\" sets an axis twice"));
            }
        }

        Ok(Self {
            fx: fx.unwrap_or(0.5),
            fy: fy.unwrap_or(0.5),
        })
    }
}

/// Soft drop shadow drawn behind the design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowEffect {
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Blur radius in pixels, `>= 0`.
    pub blur: f64,
    /// Shadow color. Default black.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDef>,
    /// Opacity in `(0, 1]`. Default 0.3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ShadowEffect {
    pub(crate) fn color_or_default(&self) -> ColorDef {
        self.color.unwrap_or_else(ColorDef::black)
    }

    pub(crate) fn opacity_or_default(&self) -> f64 {
        self.opacity.unwrap_or(DEFAULT_SHADOW_OPACITY)
    }
}

/// Diagonal specular sheen drawn over the design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightEffect {
    /// Strength in `(0, 1]`. Default 0.3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    /// Light direction in degrees. Accepted but the gradient is always drawn along the
    /// top-left to bottom-right diagonal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Sheen color. Default white.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDef>,
    /// Layer opacity in `(0, 1]`. Default 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl HighlightEffect {
    pub(crate) fn intensity_or_default(&self) -> f64 {
        self.intensity.unwrap_or(DEFAULT_HIGHLIGHT_INTENSITY)
    }

    pub(crate) fn color_or_default(&self) -> ColorDef {
        self.color.unwrap_or_else(ColorDef::white)
    }

    pub(crate) fn opacity_or_default(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Internal resolution tier of the perspective renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 0.5x.
    Preview,
    /// 1x.
    #[default]
    Standard,
    /// 1.5x.
    High,
    /// 2x.
    Print,
}

impl Quality {
    /// Resolution multiplier of the auxiliary render surface.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Preview => 0.5,
            Self::Standard => 1.0,
            Self::High => 1.5,
            Self::Print => 2.0,
        }
    }
}

/// Full perspective configuration attached to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerspectiveTransformConfig {
    /// When false the design is drawn flat with no effects.
    pub enabled: bool,
    /// Orientation parameters.
    pub params: PerspectiveParams,
    /// Optional drop shadow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowEffect>,
    /// Optional highlight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightEffect>,
    /// Resolution tier.
    pub quality: Quality,
}

impl PerspectiveTransformConfig {
    /// Factory default: disabled, standard quality, a soft shadow and a gentle highlight ready
    /// for when the caller flips `enabled`.
    pub fn default_config() -> Self {
        Self {
            enabled: false,
            params: PerspectiveParams::default(),
            shadow: Some(ShadowEffect {
                offset_x: 10.0,
                offset_y: 10.0,
                blur: 20.0,
                color: Some(ColorDef::black()),
                opacity: Some(DEFAULT_SHADOW_OPACITY),
            }),
            highlight: Some(HighlightEffect {
                intensity: Some(DEFAULT_HIGHLIGHT_INTENSITY),
                angle: Some(45.0),
                color: Some(ColorDef::white()),
                opacity: Some(0.5),
            }),
            quality: Quality::Standard,
        }
    }

    /// Copy of this config rendered at `quality`.
    pub fn with_quality(&self, quality: Quality) -> Self {
        Self {
            quality,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/perspective.rs"]
mod tests;
