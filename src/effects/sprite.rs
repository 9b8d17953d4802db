use std::{cell::RefCell, rc::Rc};

use unicode_width::UnicodeWidthChar;

use crate::{
    animation::{
        dynamic::ReactiveMotion,
        path::{Motion, Path},
    },
    foundation::core::{FrameIndex, Position, StopFrame},
    input::event::Event,
    render::renderer::{CellColour, Renderer},
    scene::effect::Effect,
};

/// Grid that effects paint onto.
pub trait DrawTarget {
    fn print_at(&mut self, text: &str, x: i32, y: i32, colour: CellColour);
}

/// Shared handle to the grid; every effect of a scene paints into the same one.
pub type TargetHandle = Rc<RefCell<dyn DrawTarget>>;

/// Where a sprite moves: along a recorded path or under input control.
pub enum SpritePath {
    Recorded(Path),
    Reactive(Box<dyn ReactiveMotion>),
}

impl SpritePath {
    fn reset(&mut self) {
        match self {
            Self::Recorded(path) => path.reset(),
            Self::Reactive(path) => path.reset(),
        }
    }

    fn next_pos(&mut self) -> Position {
        match self {
            Self::Recorded(path) => path.next_pos(),
            Self::Reactive(path) => path.next_pos(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Self::Recorded(path) => path.is_finished(),
            Self::Reactive(path) => path.is_finished(),
        }
    }
}

impl From<Path> for SpritePath {
    fn from(path: Path) -> Self {
        Self::Recorded(path)
    }
}

/// Paints a renderer's image wherever its path says, once per frame.
pub struct Sprite {
    renderer: Box<dyn Renderer>,
    path: SpritePath,
    target: TargetHandle,
    start: FrameIndex,
    stop: StopFrame,
    speed: u64,
    transparent: bool,
    name: Option<String>,
}

impl Sprite {
    pub fn new(
        renderer: impl Renderer + 'static,
        path: impl Into<SpritePath>,
        target: TargetHandle,
    ) -> Self {
        Self {
            renderer: Box::new(renderer),
            path: path.into(),
            target,
            start: FrameIndex(0),
            stop: StopFrame::SceneEnd,
            speed: 1,
            transparent: true,
            name: None,
        }
    }

    /// Follow input instead of a recorded path.
    pub fn reactive(
        renderer: impl Renderer + 'static,
        path: impl ReactiveMotion + 'static,
        target: TargetHandle,
    ) -> Self {
        Self::new(renderer, SpritePath::Reactive(Box::new(path)), target)
    }

    pub fn start_at(mut self, frame: u64) -> Self {
        self.start = FrameIndex(frame);
        self
    }

    pub fn stop_at(mut self, frame: u64) -> Self {
        self.stop = StopFrame::At(FrameIndex(frame));
        self
    }

    /// Only move and repaint every `frames` frames.
    pub fn speed(mut self, frames: u64) -> Self {
        self.speed = frames.max(1);
        self
    }

    /// Paint spaces too, instead of letting what is underneath show through.
    pub fn opaque(mut self) -> Self {
        self.transparent = false;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether a recorded path has played out. Reactive sprites never finish.
    pub fn is_finished(&self) -> bool {
        self.path.is_finished()
    }

    fn paint(&mut self, at: Position) {
        let image = self.renderer.rendered_text();
        let mut target = self.target.borrow_mut();
        for (dy, (row, colours)) in image.rows.iter().zip(&image.colours).enumerate() {
            let y = at.y + dy as i32;
            let mut x = at.x;
            for (ch, colour) in row.chars().zip(colours) {
                if !(self.transparent && ch == ' ') {
                    let mut buf = [0u8; 4];
                    target.print_at(ch.encode_utf8(&mut buf), x, y, *colour);
                }
                x += ch.width().unwrap_or(0) as i32;
            }
        }
    }
}

impl Effect for Sprite {
    fn reset(&mut self) {
        self.renderer.reset();
        self.path.reset();
    }

    fn update(&mut self, frame: FrameIndex) {
        if frame < self.start || self.stop.reached(frame) {
            return;
        }
        if (frame.0 - self.start.0) % self.speed != 0 {
            return;
        }
        let at = self.path.next_pos();
        self.paint(at);
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match &mut self.path {
            SpritePath::Reactive(path) => path.process_event(event),
            SpritePath::Recorded(_) => Some(event),
        }
    }

    fn stop_frame(&self) -> StopFrame {
        self.stop
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sprite.rs"]
mod tests;
