use std::{collections::VecDeque, rc::Rc};

use crate::{
    foundation::core::{Canvas, FrameIndex, SceneDuration},
    foundation::error::{ReelError, ReelResult},
    input::event::Event,
    scene::scene::Scene,
};

/// Playback options for a [`Player`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    pub canvas: Canvas,
    /// Go back to the first scene after the last one ends.
    pub repeat: bool,
    /// Stop after this many frames in total.
    pub max_frames: Option<u64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 80,
                height: 24,
            },
            repeat: false,
            max_frames: None,
        }
    }
}

/// Headless frame driver for a list of scenes.
///
/// Owns the frame counter the scenes themselves do not track: each
/// [`Player::step`] delivers queued input, updates every effect of the
/// current scene and, once the scene's duration has elapsed, exits it and
/// starts the next one. It performs no terminal I/O; effects paint into
/// whatever targets they were built with.
pub struct Player {
    scenes: Vec<Rc<Scene>>,
    options: PlayerOptions,
    current: usize,
    frame: FrameIndex,
    total: u64,
    pending: VecDeque<Event>,
    unhandled: Vec<Event>,
    started: bool,
    finished: bool,
}

impl Player {
    pub fn new(scenes: Vec<Rc<Scene>>, options: PlayerOptions) -> ReelResult<Self> {
        if scenes.is_empty() {
            return Err(ReelError::validation("player needs at least one scene"));
        }
        Canvas::new(options.canvas.width, options.canvas.height)?;
        Ok(Self {
            scenes,
            options,
            current: 0,
            frame: FrameIndex(0),
            total: 0,
            pending: VecDeque::new(),
            unhandled: Vec::new(),
            started: false,
            finished: false,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.options.canvas
    }

    pub fn current_scene(&self) -> &Rc<Scene> {
        &self.scenes[self.current]
    }

    pub fn scene_index(&self) -> usize {
        self.current
    }

    /// Frame number within the current scene.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn total_frames(&self) -> u64 {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Queue input for delivery at the start of the next frame.
    pub fn queue_event(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Events no effect consumed, oldest first.
    pub fn drain_unhandled(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.unhandled)
    }

    fn start_current(&mut self, old_scene: Option<&Scene>) {
        let scene = Rc::clone(&self.scenes[self.current]);
        tracing::debug!(scene = ?scene.name(), index = self.current, "starting scene");
        scene.reset(old_scene, Some(self.options.canvas));
        self.frame = FrameIndex(0);
        self.started = true;
    }

    /// Play one frame. Returns `false` once playback is over.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if !self.started {
            self.start_current(None);
        }

        let scene = Rc::clone(&self.scenes[self.current]);
        while let Some(event) = self.pending.pop_front() {
            if let Some(event) = scene.process_event(event) {
                tracing::trace!(?event, "event not handled by any effect");
                self.unhandled.push(event);
            }
        }

        scene.update(self.frame);
        self.frame = self.frame.next();
        self.total += 1;

        let capped = self.options.max_frames.is_some_and(|max| self.total >= max);
        if scene.duration().elapsed(self.frame) {
            scene.exit();
            let next = if self.current + 1 < self.scenes.len() {
                Some(self.current + 1)
            } else if self.options.repeat {
                Some(0)
            } else {
                None
            };
            // A cap landing on a scene boundary ends playback before the next
            // scene is reset.
            match next {
                Some(next) if !capped => {
                    self.current = next;
                    self.start_current(None);
                }
                _ => {
                    tracing::debug!(total = self.total, capped, "playback complete");
                    self.finished = true;
                    return false;
                }
            }
        }

        if capped {
            self.stop();
            return false;
        }
        true
    }

    /// End playback now, letting the current scene save its state.
    pub fn stop(&mut self) {
        if self.finished {
            return;
        }
        if self.started {
            self.scenes[self.current].exit();
        }
        self.finished = true;
    }

    /// Restart after the grid changed size.
    ///
    /// `rebuild` constructs fresh scenes for the new canvas. Playback resumes
    /// from the start of the scene with the same name as the one that was
    /// playing (or the same position in the list), and that scene migrates
    /// durable state from its predecessor.
    #[tracing::instrument(skip(self, rebuild))]
    pub fn resize<F>(&mut self, canvas: Canvas, rebuild: F) -> ReelResult<()>
    where
        F: FnOnce(Canvas) -> ReelResult<Vec<Rc<Scene>>>,
    {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let scenes = rebuild(canvas)?;
        if scenes.is_empty() {
            return Err(ReelError::validation("player needs at least one scene"));
        }

        let old = Rc::clone(&self.scenes[self.current]);
        let index = old
            .name()
            .and_then(|name| scenes.iter().position(|s| s.name() == Some(name)))
            .unwrap_or_else(|| self.current.min(scenes.len() - 1));

        self.scenes = scenes;
        self.current = index;
        self.options.canvas = canvas;
        self.finished = false;
        self.start_current(Some(&old));
        Ok(())
    }

    /// Step until playback ends.
    ///
    /// Fails up front if nothing would ever end it: an unbounded scene or
    /// repeat mode without a frame cap.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> ReelResult<u64> {
        let endless = self.options.repeat
            || self
                .scenes
                .iter()
                .any(|s| s.duration() == SceneDuration::Unbounded);
        if endless && self.options.max_frames.is_none() {
            return Err(ReelError::validation(
                "endless playback needs max_frames to terminate",
            ));
        }
        while self.step() {}
        Ok(self.total)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("scenes", &self.scenes.len())
            .field("current", &self.current)
            .field("frame", &self.frame)
            .field("total", &self.total)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/player.rs"]
mod tests;
