//! Pixel kernels and the drawing effects layered on a [`crate::Surface`].

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod curvature;
pub(crate) mod highlight;
pub(crate) mod shadow;
