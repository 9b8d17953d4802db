//! termreel is a frame-driven animation timeline for character-cell terminals.
//!
//! A [`Scene`] is an ordered list of effects played for a fixed or derived number
//! of frames. A [`Player`] steps through scenes one frame at a time, feeding input
//! events to the active scene and carrying effect state across terminal resizes.
//!
//! # Building blocks
//!
//! - **Motion**: [`Path`] records positions up front (jumps, waits, straight and
//!   spline-curved moves); [`DynamicPath`] moves in response to input.
//! - **Effects**: anything implementing [`Effect`]. [`Sprite`] paints a
//!   [`Renderer`]'s image along a path.
//! - **Renderers**: [`StaticRenderer`], [`Typewriter`] and [`SpeechBubble`].
//! - **State carry-over**: effects that implement [`CloneState`] copy themselves
//!   into a rebuilt scene; effects that implement [`SaveState`] persist values
//!   when their scene ends, typically into a shared [`StateStore`].
//!
//! The crate does no terminal IO. Effects paint through a [`DrawTarget`] supplied
//! by the caller.
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod foundation;
mod input;
mod render;
mod scene;

pub use animation::dynamic::{ArrowKeys, DynamicPath, FollowMouse, ReactiveMotion, Steering};
pub use animation::path::{Motion, Path};
pub use animation::spline::spline;
pub use effects::sprite::{DrawTarget, Sprite, SpritePath, TargetHandle};
pub use foundation::core::{Canvas, FrameIndex, Position, SceneDuration, StopFrame};
pub use foundation::error::{ReelError, ReelResult};
pub use input::event::{Event, KeyCode, KeyEvent, MouseButtons, MouseEvent};
pub use render::renderer::{CellColour, RenderedText, Renderer, StaticRenderer};
pub use render::speech_bubble::{SpeechBubble, Tail};
pub use render::typewriter::Typewriter;
pub use scene::effect::{CloneState, Effect, EffectHandle, SaveState, effect_handle};
pub use scene::player::{Player, PlayerOptions};
pub use scene::scene::{Scene, SceneOptions};
pub use scene::state::StateStore;
