use crate::foundation::core::{BezPath, Point, Rect};
use crate::params::perspective::ResolvedPerspective;

/// The four corners of a rectangle after tilt and perspective division, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCorners {
    /// Projected `(-w/2, -h/2)`.
    pub top_left: Point,
    /// Projected `(w/2, -h/2)`.
    pub top_right: Point,
    /// Projected `(-w/2, h/2)`.
    pub bottom_left: Point,
    /// Projected `(w/2, h/2)`.
    pub bottom_right: Point,
}

impl ProjectedCorners {
    /// Closed quadrilateral `top_left -> top_right -> bottom_right -> bottom_left`.
    pub fn to_path(&self) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(self.top_left);
        p.line_to(self.top_right);
        p.line_to(self.bottom_right);
        p.line_to(self.bottom_left);
        p.close_path();
        p
    }

    /// Smallest axis-aligned rectangle holding all four corners.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.top_left, self.bottom_right)
            .union_pt(self.top_right)
            .union_pt(self.bottom_left)
    }
}

/// Project the corners of a centered `width x height` rectangle.
///
/// Each corner is rotated about X by `rotation_x`, then about Y by `rotation_y`, then divided
/// by `(perspective + z) / perspective`.
pub fn project_corners(width: f64, height: f64, params: &ResolvedPerspective) -> ProjectedCorners {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let (sin_x, cos_x) = params.rotation_x.to_radians().sin_cos();
    let (sin_y, cos_y) = params.rotation_y.to_radians().sin_cos();
    let d = params.perspective;

    let project = |x: f64, y: f64| -> Point {
        let z = 0.0;

        let y1 = y * cos_x - z * sin_x;
        let z1 = y * sin_x + z * cos_x;

        let x1 = x * cos_y + z1 * sin_y;
        let z2 = -x * sin_y + z1 * cos_y;

        let k = d / (d + z2);
        Point::new(x1 * k, y1 * k)
    };

    ProjectedCorners {
        top_left: project(-hw, -hh),
        top_right: project(hw, -hh),
        bottom_left: project(-hw, hh),
        bottom_right: project(hw, hh),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/projector.rs"]
mod tests;
