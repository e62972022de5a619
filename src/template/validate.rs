//! Structural and advisory checks for template descriptors.
//!
//! Validation runs on the raw JSON value so that missing fields and wrongly typed values are
//! reported as errors instead of failing deserialization. Nothing here returns `Err`: callers
//! get a report they can surface inline.

use crate::template::model::TemplateCategory;
use serde::Serialize;
use serde_json::{Map, Value};

const REQUIRED_FIELDS: [&str; 6] = ["id", "name", "category", "width", "height", "designArea"];
const MIN_ASPECT_RATIO: f64 = 0.1;
const MAX_ASPECT_RATIO: f64 = 10.0;
const MIN_COVERAGE_PCT: f64 = 10.0;
const MAX_COVERAGE_PCT: f64 = 80.0;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Outcome of [`validate_comprehensive`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when `errors` is empty.
    pub is_valid: bool,
    /// Problems that block use of the template.
    pub errors: Vec<String>,
    /// Advisory findings; never block use.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<String>) -> Self {
        Self::new(errors, Vec::new())
    }

    fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// `true` when there is at least one warning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Derived numbers reported alongside validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetrics {
    /// `width * height` of the template in pixels; 0 when unknown.
    pub template_area: f64,
    /// Design area as a percentage of the template area; 0 when unknown.
    pub design_area_percentage: f64,
    /// Whether `perspectiveTransform.enabled` is `true`.
    pub has_perspective: bool,
}

/// Validation plus metrics and free-text suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReport {
    /// Full validation outcome.
    pub validation: ValidationResult,
    /// Derived metrics.
    pub metrics: TemplateMetrics,
    /// Suggestions for improving the template.
    pub recommendations: Vec<String>,
}

/// Per-item entry of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// Position in the input slice.
    pub index: usize,
    /// Template id when the item carries a string `id`.
    pub id: Option<String>,
    /// Validation outcome for this item.
    pub result: ValidationResult,
}

/// Aggregate counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of items.
    pub total: usize,
    /// Items without errors.
    pub valid: usize,
    /// Items with at least one error.
    pub invalid: usize,
    /// Items with at least one warning, valid or not.
    pub with_warnings: usize,
}

/// Output of [`batch_validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidation {
    /// Results in input order.
    pub results: Vec<BatchItem>,
    /// Aggregate counts.
    pub summary: BatchSummary,
}

// Numbers the checks below pull out of the descriptor, when present and well typed.
#[derive(Default)]
struct Extracted {
    width: Option<f64>,
    height: Option<f64>,
    area: Option<[f64; 4]>,
    perspective_enabled: bool,
}

/// Validate a template descriptor in its JSON exchange form.
pub fn validate_comprehensive(template: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(obj) = template.as_object() else {
        return ValidationResult::from_errors(vec!["Template must be a JSON object".to_owned()]);
    };

    for field in REQUIRED_FIELDS {
        if obj.get(field).is_none_or(Value::is_null) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    for field in ["id", "name"] {
        if let Some(v) = obj.get(field).filter(|v| !v.is_null())
            && v.as_str().is_none_or(|s| s.trim().is_empty())
        {
            errors.push(format!("Field '{field}' must be a non-empty string"));
        }
    }

    if let Some(c) = obj.get("category").filter(|v| !v.is_null()) {
        let known = c
            .as_str()
            .is_some_and(|s| TemplateCategory::ALL.contains(&s));
        if !known {
            errors.push(format!(
                "Invalid category {c}. Must be one of: {}",
                TemplateCategory::ALL.join(", ")
            ));
        }
    }

    let mut ex = Extracted {
        width: positive_dimension(obj, "width", &mut errors),
        height: positive_dimension(obj, "height", &mut errors),
        ..Extracted::default()
    };

    if let Some(area) = obj.get("designArea").filter(|v| !v.is_null()) {
        ex.area = check_design_area(area, ex.width, ex.height, &mut errors);
    }

    if let Some(pt) = obj.get("perspectiveTransform").filter(|v| !v.is_null()) {
        ex.perspective_enabled = check_perspective(pt, &mut errors, &mut warnings);
    }

    if let Some(tags) = obj.get("tags").filter(|v| !v.is_null()) {
        let ok = tags
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !ok {
            errors.push("Field 'tags' must be an array of strings".to_owned());
        }
    }

    if let Some([_, _, aw, ah]) = ex.area
        && aw > 0.0
        && ah > 0.0
    {
        let ratio = aw / ah;
        if !(MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&ratio) {
            warnings.push(format!(
                "Unusual design area aspect ratio {ratio:.2} (expected between {MIN_ASPECT_RATIO} and {MAX_ASPECT_RATIO})"
            ));
        }
        if let Some(pct) = coverage_pct(&ex) {
            if pct < MIN_COVERAGE_PCT {
                warnings.push(format!(
                    "Design area is small: {pct:.1}% of the template (below {MIN_COVERAGE_PCT}%)"
                ));
            } else if pct > MAX_COVERAGE_PCT {
                warnings.push(format!(
                    "Design area is large: {pct:.1}% of the template (above {MAX_COVERAGE_PCT}%)"
                ));
            }
        }
    }

    if description_is_short(obj) {
        warnings.push(format!(
            "Description is shorter than {MIN_DESCRIPTION_CHARS} characters"
        ));
    }

    ValidationResult::new(errors, warnings)
}

/// Validation plus derived metrics and recommendations.
pub fn report(template: &Value) -> TemplateReport {
    let validation = validate_comprehensive(template);
    let obj = template.as_object();

    let ex = obj.map(extract_quietly).unwrap_or_default();
    let template_area = match (ex.width, ex.height) {
        (Some(w), Some(h)) => w * h,
        _ => 0.0,
    };
    let metrics = TemplateMetrics {
        template_area,
        design_area_percentage: coverage_pct(&ex).unwrap_or(0.0),
        has_perspective: ex.perspective_enabled,
    };

    let mut recommendations = Vec::new();
    if !metrics.has_perspective {
        recommendations.push("Enable perspective transform for more realistic mockups".to_owned());
    }
    let has_tags = obj
        .and_then(|o| o.get("tags"))
        .and_then(Value::as_array)
        .is_some_and(|t| !t.is_empty());
    if !has_tags {
        recommendations.push("Add tags to improve template discoverability".to_owned());
    }
    if obj.is_some_and(description_is_short) {
        recommendations.push(format!(
            "Write a description of at least {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if metrics.design_area_percentage > 0.0 && metrics.design_area_percentage < MIN_COVERAGE_PCT {
        recommendations.push("Enlarge the design area so designs remain legible".to_owned());
    }
    let has_shadow = obj
        .and_then(|o| o.get("perspectiveTransform"))
        .and_then(|p| p.get("shadow"))
        .is_some_and(Value::is_object);
    if metrics.has_perspective && !has_shadow {
        recommendations.push("Add a shadow effect to ground the design on the product".to_owned());
    }

    TemplateReport {
        validation,
        metrics,
        recommendations,
    }
}

/// Validate every item and count outcomes.
pub fn batch_validate(templates: &[Value]) -> BatchValidation {
    let mut summary = BatchSummary {
        total: templates.len(),
        ..BatchSummary::default()
    };
    let mut results = Vec::with_capacity(templates.len());

    for (index, t) in templates.iter().enumerate() {
        let result = validate_comprehensive(t);
        if result.is_valid {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
        }
        if result.has_warnings() {
            summary.with_warnings += 1;
        }
        results.push(BatchItem {
            index,
            id: t.get("id").and_then(Value::as_str).map(str::to_owned),
            result,
        });
    }

    BatchValidation { results, summary }
}

fn positive_dimension(obj: &Map<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<f64> {
    let v = obj.get(field).filter(|v| !v.is_null())?;
    // Same domain as the `u32` fields of `MockupTemplate`.
    match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
        Some(n) if n > 0 => Some(f64::from(n)),
        _ => {
            errors.push(format!("Template {field} must be a positive integer"));
            None
        }
    }
}

fn check_design_area(
    area: &Value,
    template_w: Option<f64>,
    template_h: Option<f64>,
    errors: &mut Vec<String>,
) -> Option<[f64; 4]> {
    let Some(a) = area.as_object() else {
        errors.push("Field 'designArea' must be an object".to_owned());
        return None;
    };

    let mut vals = [0.0; 4];
    let mut complete = true;
    for (slot, key) in vals.iter_mut().zip(["x", "y", "width", "height"]) {
        match a.get(key).and_then(Value::as_f64).filter(|n| n.is_finite()) {
            Some(n) => *slot = n,
            None => {
                errors.push(format!("designArea.{key} is required and must be a number"));
                complete = false;
            }
        }
    }
    if !complete {
        return None;
    }

    let [x, y, w, h] = vals;
    if w <= 0.0 || h <= 0.0 {
        errors.push("Design area width and height must be positive".to_owned());
    }
    if x < 0.0 || y < 0.0 {
        errors.push("Design area coordinates must be non-negative".to_owned());
    }
    if let Some(tw) = template_w
        && x + w > tw
    {
        errors.push(format!(
            "Design area extends beyond template width ({} > {tw})",
            x + w
        ));
    }
    if let Some(th) = template_h
        && y + h > th
    {
        errors.push(format!(
            "Design area extends beyond template height ({} > {th})",
            y + h
        ));
    }
    Some(vals)
}

// Returns whether perspective is enabled.
fn check_perspective(pt: &Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) -> bool {
    let Some(p) = pt.as_object() else {
        errors.push("Field 'perspectiveTransform' must be an object".to_owned());
        return false;
    };

    let enabled = match p.get("enabled") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push("perspectiveTransform.enabled must be a boolean".to_owned());
            false
        }
    };

    if let Some(q) = p.get("quality").filter(|v| !v.is_null()) {
        let known = q
            .as_str()
            .is_some_and(|s| ["preview", "standard", "high", "print"].contains(&s));
        if !known {
            errors.push(format!(
                "perspectiveTransform.quality {q} must be one of: preview, standard, high, print"
            ));
        }
    }

    if enabled && let Some(params) = p.get("params").and_then(Value::as_object) {
        for key in ["rotationX", "rotationY", "rotationZ"] {
            if let Some(r) = params.get(key).and_then(Value::as_f64)
                && !(-180.0..=180.0).contains(&r)
            {
                warnings.push(format!(
                    "perspectiveTransform.params.{key} = {r} is outside [-180, 180]"
                ));
            }
        }
    }

    enabled
}

fn coverage_pct(ex: &Extracted) -> Option<f64> {
    let (tw, th) = (ex.width?, ex.height?);
    let [_, _, aw, ah] = ex.area?;
    if aw <= 0.0 || ah <= 0.0 {
        return None;
    }
    Some(aw * ah / (tw * th) * 100.0)
}

fn description_is_short(obj: &Map<String, Value>) -> bool {
    obj.get("description")
        .and_then(Value::as_str)
        .is_none_or(|d| d.trim().chars().count() < MIN_DESCRIPTION_CHARS)
}

// Same extraction as validation but discarding messages.
fn extract_quietly(obj: &Map<String, Value>) -> Extracted {
    let mut sink = Vec::new();
    let mut warn_sink = Vec::new();
    let width = positive_dimension(obj, "width", &mut sink);
    let height = positive_dimension(obj, "height", &mut sink);
    let area = obj
        .get("designArea")
        .and_then(|a| check_design_area(a, width, height, &mut sink));
    let perspective_enabled = obj
        .get("perspectiveTransform")
        .is_some_and(|p| check_perspective(p, &mut sink, &mut warn_sink));
    Extracted {
        width,
        height,
        area,
        perspective_enabled,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/validate.rs"]
mod tests;
