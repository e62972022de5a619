//! Perspective rendering of a design onto a surface.

pub(crate) mod perspective;
