//! High-resolution mockup generation.

pub(crate) mod generator;
pub(crate) mod task;
