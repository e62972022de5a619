//! Geometry of the simulated 3D orientation: the in-plane draw matrix and projected corners.

pub(crate) mod matrix;
pub(crate) mod projector;
