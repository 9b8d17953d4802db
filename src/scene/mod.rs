pub(crate) mod effect;
pub(crate) mod player;
#[allow(clippy::module_inception)]
pub(crate) mod scene;
pub(crate) mod state;
