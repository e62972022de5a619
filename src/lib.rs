//! Print-resolution product mockups: a flat design composited onto a template photo under a
//! simulated 3D orientation, with soft shadows and specular highlights.
//!
//! The pipeline is synchronous and CPU-bound. [`MockupGenerator::spawn`] runs it on the rayon
//! pool and hands back a [`GenerationTask`]. Drawing goes through the [`Surface`] trait so the
//! same code renders with `vello_cpu` ([`CpuSurfaceFactory`]) or records calls for inspection
//! ([`RecordingSurfaceFactory`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod effects;
pub(crate) mod foundation;
pub(crate) mod mockup;
pub(crate) mod params;
pub(crate) mod raster;
pub(crate) mod render;
pub(crate) mod surface;
pub(crate) mod template;
pub(crate) mod transform;

pub use effects::curvature::{CURVE_SEGMENTS, draw_curved};
pub use effects::highlight::draw_highlight;
pub use effects::shadow::{SHADOW_TILT_DEG, draw_shadow};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul, Vec2};
pub use foundation::error::{MockupError, MockupResult};
pub use mockup::generator::{
    DEFAULT_MIN_SCALE, DEFAULT_MIN_WIDTH, GeneratorOpts, MockupGenerator, MockupRequest,
    OutputPlan, UserTransform,
};
pub use mockup::task::GenerationTask;
pub use params::color::ColorDef;
pub use params::perspective::{
    DEFAULT_HIGHLIGHT_INTENSITY, DEFAULT_PERSPECTIVE, DEFAULT_SHADOW_OPACITY, HighlightEffect,
    PerspectiveParams, PerspectiveTransformConfig, Quality, ResolvedPerspective, ShadowEffect,
    TransformOrigin,
};
pub use params::validate::{
    ParamError, ParamErrors, is_valid_params, validate_effects, validate_params,
};
pub use raster::RasterImage;
pub use raster::decode::decode_image;
pub use raster::encode::{EncodedImage, encode_png};
pub use render::perspective::render;
pub use surface::cpu::{CpuSurface, CpuSurfaceFactory};
pub use surface::recording::{RecordedOp, RecordingSurface, RecordingSurfaceFactory};
pub use surface::{
    BlendMode, GradientStop, LinearGradient, MAX_SURFACE_DIM, Paint, Smoothing, Surface,
    SurfaceFactory,
};
pub use template::model::{DesignArea, MockupTemplate, TemplateCategory};
pub use template::validate::{
    BatchItem, BatchSummary, BatchValidation, TemplateMetrics, TemplateReport, ValidationResult,
    batch_validate, report, validate_comprehensive,
};
pub use transform::matrix::{Matrix2x3, build_matrix};
pub use transform::projector::{ProjectedCorners, project_corners};
