use crate::{
    animation::path::Motion,
    foundation::core::{Canvas, Position},
    input::event::{Event, KeyCode},
};

/// Motion that also reacts to input.
pub trait ReactiveMotion: Motion {
    /// Offer `event` to the motion. Returns `None` when consumed, otherwise
    /// hands the event back unchanged.
    fn process_event(&mut self, event: Event) -> Option<Event>;
}

/// Decides how a [`DynamicPath`] moves in response to input.
pub trait Steering {
    fn steer(&mut self, pos: &mut Position, event: Event) -> Option<Event>;
}

impl<F> Steering for F
where
    F: FnMut(&mut Position, Event) -> Option<Event>,
{
    fn steer(&mut self, pos: &mut Position, event: Event) -> Option<Event> {
        self(pos, event)
    }
}

/// Jumps to the cell under the mouse on every mouse event.
#[derive(Clone, Copy, Debug, Default)]
pub struct FollowMouse;

impl Steering for FollowMouse {
    fn steer(&mut self, pos: &mut Position, event: Event) -> Option<Event> {
        match event {
            Event::Mouse(m) => {
                *pos = Position::new(m.x, m.y);
                None
            }
            other => Some(other),
        }
    }
}

/// Moves one cell per arrow key; everything else passes through.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArrowKeys;

impl Steering for ArrowKeys {
    fn steer(&mut self, pos: &mut Position, event: Event) -> Option<Event> {
        let Event::Key(key) = event else {
            return Some(event);
        };
        let (dx, dy) = match key.code {
            KeyCode::Up => (0, -1),
            KeyCode::Down => (0, 1),
            KeyCode::Left => (-1, 0),
            KeyCode::Right => (1, 0),
            _ => return Some(event),
        };
        pos.x = pos.x.saturating_add(dx);
        pos.y = pos.y.saturating_add(dy);
        None
    }
}

/// A path with no recorded steps whose position is driven by input.
///
/// It never finishes; whatever owns it decides when to stop.
pub struct DynamicPath<S> {
    start: Position,
    pos: Position,
    bounds: Option<Canvas>,
    steering: S,
}

impl<S: Steering> DynamicPath<S> {
    pub fn new(x: i32, y: i32, steering: S) -> Self {
        let start = Position::new(x, y);
        Self {
            start,
            pos: start,
            bounds: None,
            steering,
        }
    }

    /// Keep the position on the grid after every handled event.
    pub fn with_bounds(mut self, canvas: Canvas) -> Self {
        self.bounds = Some(canvas);
        self
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn position(&self) -> Position {
        self.pos
    }
}

impl<S: Steering> Motion for DynamicPath<S> {
    fn reset(&mut self) {
        self.pos = self.start;
    }

    fn next_pos(&mut self) -> Position {
        self.pos
    }

    fn is_finished(&self) -> bool {
        false
    }
}

impl<S: Steering> ReactiveMotion for DynamicPath<S> {
    fn process_event(&mut self, event: Event) -> Option<Event> {
        let out = self.steering.steer(&mut self.pos, event);
        if let Some(canvas) = self.bounds {
            self.pos = canvas.clamp(self.pos);
        }
        out
    }
}

impl<S> std::fmt::Debug for DynamicPath<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicPath")
            .field("start", &self.start)
            .field("pos", &self.pos)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/dynamic.rs"]
mod tests;
