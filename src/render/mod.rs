pub(crate) mod renderer;
pub(crate) mod speech_bubble;
pub(crate) mod typewriter;
