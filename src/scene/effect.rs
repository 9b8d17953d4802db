use std::{cell::RefCell, rc::Rc, rc::Weak};

use crate::{
    foundation::core::{Canvas, FrameIndex, StopFrame},
    input::event::Event,
    scene::scene::Scene,
};

/// Shared handle to an effect. Scenes and the code that built an effect may
/// both hold one.
pub type EffectHandle = Rc<RefCell<dyn Effect>>;

/// Wrap an effect in a handle a [`Scene`] can hold.
pub fn effect_handle<E: Effect + 'static>(effect: E) -> EffectHandle {
    Rc::new(RefCell::new(effect))
}

/// A unit of animated behaviour driven frame by frame by a [`Scene`].
pub trait Effect {
    /// Re-initialise for a fresh run of the scene.
    fn reset(&mut self);

    /// Paint the state for `frame`.
    fn update(&mut self, frame: FrameIndex);

    /// Offer input to the effect. Returns `None` when consumed, otherwise the
    /// event to hand to the next effect down.
    fn process_event(&mut self, event: Event) -> Option<Event> {
        Some(event)
    }

    /// When this effect's own activity ends.
    fn stop_frame(&self) -> StopFrame {
        StopFrame::SceneEnd
    }

    /// Record the scene this effect now belongs to.
    fn register_scene(&mut self, _scene: Weak<Scene>) {}

    /// Identifier used to pair effects across scene rebuilds.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Optional state migration capability.
    fn as_state_clone(&self) -> Option<&dyn CloneState> {
        None
    }

    /// Optional state persistence capability.
    fn as_state_save(&mut self) -> Option<&mut dyn SaveState> {
        None
    }
}

/// Carries durable state from an effect in a torn-down scene into its
/// counterpart in the freshly built one, e.g. after a terminal resize.
pub trait CloneState {
    fn clone_state(&self, canvas: Option<Canvas>, scene: &Scene);
}

/// Flushes durable state somewhere outside the effect before the scene ends.
pub trait SaveState {
    fn save_state(&mut self);
}
