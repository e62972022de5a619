use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{MockupError, MockupResult};
use crate::params::perspective::PerspectiveTransformConfig;
use crate::template::validate::{ValidationResult, validate_comprehensive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Product family a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    /// Phones, laptops, screens.
    Device,
    /// Posters, cards, paper goods.
    Print,
    /// Shirts, hoodies, bags.
    Apparel,
}

impl TemplateCategory {
    /// Every accepted category, in JSON spelling.
    pub const ALL: [&'static str; 3] = ["device", "print", "apparel"];
}

/// Rectangle in template pixel space where the design goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignArea {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, `> 0`.
    pub width: f64,
    /// Height, `> 0`.
    pub height: f64,
}

impl DesignArea {
    /// Center point in template pixel space.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Same area as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Background product photo metadata: where and how a design is composited onto it.
///
/// Templates are authored elsewhere and loaded read-only; the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupTemplate {
    /// Unique, non-empty identifier.
    pub id: String,
    /// Display name, non-empty.
    pub name: String,
    /// Product family.
    pub category: TemplateCategory,
    /// Template width in pixels.
    pub width: u32,
    /// Template height in pixels.
    pub height: u32,
    /// Where the design goes.
    pub design_area: DesignArea,
    /// Perspective settings used when rendering onto this template.
    #[serde(default)]
    pub perspective_transform: PerspectiveTransformConfig,
    /// Free text, 10 characters or more recommended.
    #[serde(default)]
    pub description: String,
    /// Search tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
}

impl MockupTemplate {
    /// Parse a template from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MockupResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MockupError::validation(format!("parse template JSON: {e}")))
    }

    /// Parse a template from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MockupResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MockupError::validation(format!("open template JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Convert an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> MockupResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| MockupError::validation(format!("parse template JSON: {e}")))
    }

    /// JSON exchange form.
    pub fn to_value(&self) -> MockupResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| MockupError::serde(e.to_string()))
    }

    /// `design_area.width / design_area.height`.
    pub fn aspect_ratio(&self) -> f64 {
        self.design_area.aspect_ratio()
    }

    /// Run the full metadata validation on this template.
    pub fn validate(&self) -> ValidationResult {
        match self.to_value() {
            Ok(v) => validate_comprehensive(&v),
            Err(e) => ValidationResult::from_errors(vec![e.to_string()]),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
