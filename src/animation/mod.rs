pub(crate) mod dynamic;
pub(crate) mod path;
pub(crate) mod spline;
