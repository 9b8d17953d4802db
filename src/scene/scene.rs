use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    foundation::core::{Canvas, FrameIndex, SceneDuration},
    foundation::error::{ReelError, ReelResult},
    input::event::Event,
    scene::effect::EffectHandle,
};

/// Construction options for a [`Scene`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Scene length. `None` derives it once, at construction, from the latest
    /// effect stop frame.
    pub duration: Option<SceneDuration>,
    /// Whether the grid is blanked when the scene starts.
    pub clear: bool,
    pub name: Option<String>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            duration: None,
            clear: true,
            name: None,
        }
    }
}

impl SceneOptions {
    pub fn frames(frames: u64) -> Self {
        Self {
            duration: Some(SceneDuration::Frames(frames)),
            ..Self::default()
        }
    }

    pub fn unbounded() -> Self {
        Self {
            duration: Some(SceneDuration::Unbounded),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }
}

/// An ordered set of effects played together.
///
/// Registration order is z-order: later effects are drawn last and see input
/// first. The scene does not track the current frame; the driver owns the
/// frame counter and sequences [`Scene::reset`] and [`Scene::exit`].
///
/// Scenes are shared (`Rc<Scene>`) because effects keep a weak back-reference
/// so they can add siblings while the scene is playing. Every pass over the
/// effects walks a snapshot taken when the pass starts, so effects may be
/// added or removed mid-pass; the change is seen from the next pass on.
pub struct Scene {
    effects: RefCell<Vec<EffectHandle>>,
    duration: SceneDuration,
    clear: bool,
    name: Option<String>,
    this: Weak<Scene>,
}

impl Scene {
    #[tracing::instrument(skip(effects), fields(effects = effects.len()))]
    pub fn new(effects: Vec<EffectHandle>, options: SceneOptions) -> ReelResult<Rc<Self>> {
        let duration = match options.duration {
            Some(SceneDuration::Frames(0)) => {
                return Err(ReelError::validation("scene duration must be > 0 frames"));
            }
            Some(duration) => duration,
            None => {
                let latest = effects
                    .iter()
                    .map(|e| e.borrow().stop_frame())
                    .max()
                    .ok_or(ReelError::NoEffects)?;
                let duration = SceneDuration::from(latest);
                tracing::debug!(?duration, "derived scene duration from effects");
                duration
            }
        };

        Ok(Rc::new_cyclic(|this: &Weak<Scene>| {
            // Effects arrive already reset, so only link them.
            for effect in &effects {
                effect.borrow_mut().register_scene(this.clone());
            }
            Self {
                effects: RefCell::new(effects),
                duration,
                clear: options.clear,
                name: options.name,
                this: this.clone(),
            }
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn duration(&self) -> SceneDuration {
        self.duration
    }

    pub fn clear(&self) -> bool {
        self.clear
    }

    /// Snapshot of the registered effects, bottom-most first.
    pub fn effects(&self) -> Vec<EffectHandle> {
        self.effects.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.effects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.borrow().is_empty()
    }

    /// Register `effect` as the new top-most effect. May be called at any time,
    /// including from inside another effect while the scene is playing.
    pub fn add_effect(&self, effect: EffectHandle, reset: bool) {
        {
            let mut e = effect.borrow_mut();
            if reset {
                e.reset();
            }
            e.register_scene(self.this.clone());
        }
        let mut effects = self.effects.borrow_mut();
        effects.push(effect);
        tracing::debug!(scene = ?self.name, count = effects.len(), "effect added");
    }

    /// Unregister the first entry that is this very handle. Nothing is saved on
    /// the way out.
    pub fn remove_effect(&self, effect: &EffectHandle) -> ReelResult<()> {
        let mut effects = self.effects.borrow_mut();
        let idx = effects
            .iter()
            .position(|e| Rc::ptr_eq(e, effect))
            .ok_or(ReelError::EffectNotFound)?;
        effects.remove(idx);
        tracing::debug!(scene = ?self.name, count = effects.len(), "effect removed");
        Ok(())
    }

    /// Offer `event` to the effects from top-most to bottom-most. The first
    /// effect to consume it ends the dispatch.
    pub fn process_event(&self, event: Event) -> Option<Event> {
        let mut event = event;
        for (depth, effect) in self.effects().iter().rev().enumerate() {
            let Some(next) = effect.borrow_mut().process_event(event) else {
                tracing::trace!(scene = ?self.name, depth, ?event, "event consumed");
                return None;
            };
            event = next;
        }
        Some(event)
    }

    /// Update every effect for `frame` in registration order.
    pub fn update(&self, frame: FrameIndex) {
        for effect in self.effects() {
            effect.borrow_mut().update(frame);
        }
    }

    /// Prepare the scene for playing.
    ///
    /// Every effect is reset. When `old_scene` is given this is a restart
    /// after the application was torn down (typically a resize): each old
    /// effect that can migrate its state is asked to do so into this scene.
    /// Handles registered with both scenes are skipped, so `clone_state` may
    /// freely borrow any effect of the new scene.
    #[tracing::instrument(skip_all, fields(scene = ?self.name, restart = old_scene.is_some()))]
    pub fn reset(&self, old_scene: Option<&Scene>, canvas: Option<Canvas>) {
        for effect in self.effects() {
            effect.borrow_mut().reset();
        }

        let Some(old_scene) = old_scene else {
            return;
        };
        let current = self.effects();
        let mut migrated = 0usize;
        for old_effect in old_scene.effects() {
            // A handle carried over into this scene already holds its state.
            if current.iter().any(|e| Rc::ptr_eq(e, &old_effect)) {
                continue;
            }
            let Ok(old_effect) = old_effect.try_borrow() else {
                tracing::trace!("old effect busy, state not migrated");
                continue;
            };
            if let Some(state) = old_effect.as_state_clone() {
                state.clone_state(canvas, self);
                migrated += 1;
            }
        }
        tracing::debug!(migrated, "migrated effect state from previous scene");
    }

    /// Tidy up on permanent exit: every effect that persists state saves it.
    #[tracing::instrument(skip_all, fields(scene = ?self.name))]
    pub fn exit(&self) {
        for effect in self.effects() {
            let mut effect = effect.borrow_mut();
            if let Some(state) = effect.as_state_save() {
                state.save_state();
            }
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("duration", &self.duration)
            .field("clear", &self.clear)
            .field("effects", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
