use crate::foundation::core::Affine;
use crate::params::perspective::ResolvedPerspective;

/// 2x3 affine matrix: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x3 {
    /// X scale / rotation.
    pub a: f64,
    /// Y shear / rotation.
    pub b: f64,
    /// X shear / rotation.
    pub c: f64,
    /// Y scale / rotation.
    pub d: f64,
    /// X translation.
    pub e: f64,
    /// Y translation.
    pub f: f64,
}

impl Default for Matrix2x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2x3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Same map as a `kurbo` affine (coefficient order matches).
    pub fn to_affine(self) -> Affine {
        Affine::new([self.a, self.b, self.c, self.d, self.e, self.f])
    }
}

/// Uniform scale followed by in-plane rotation (`rotation_z`).
///
/// Only scale and Z rotation are folded in; X/Y tilt affects the projected corners used for
/// the shadow outline, not the draw transform of the design. No translation is set.
pub fn build_matrix(params: &ResolvedPerspective) -> Matrix2x3 {
    let mut m = Matrix2x3::IDENTITY;

    m.a *= params.scale;
    m.d *= params.scale;

    let (sin, cos) = params.rotation_z.to_radians().sin_cos();
    let Matrix2x3 { a, b, c, d, .. } = m;
    m.a = a * cos - b * sin;
    m.b = a * sin + b * cos;
    m.c = c * cos - d * sin;
    m.d = c * sin + d * cos;

    m
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
