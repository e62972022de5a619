pub(crate) mod color;
pub(crate) mod perspective;
pub(crate) mod validate;
