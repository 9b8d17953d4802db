use std::cmp::Ordering;

use crate::foundation::error::{ReelError, ReelResult};

/// Frame counter owned by whoever drives playback.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The following frame.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// A character cell on the grid. Coordinates may go negative so sprites can
/// start or finish off-screen.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Size of the character grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u16,
    pub height: u16,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < i32::from(self.width) && pos.y < i32::from(self.height)
    }

    /// Pull `pos` onto the nearest cell inside the grid.
    pub fn clamp(self, pos: Position) -> Position {
        let max_x = i32::from(self.width).saturating_sub(1).max(0);
        let max_y = i32::from(self.height).saturating_sub(1).max(0);
        Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }
}

/// Frame at which an effect's own activity ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StopFrame {
    At(FrameIndex),
    /// Runs for as long as the owning scene does.
    SceneEnd,
}

impl StopFrame {
    /// Whether an effect with this stop frame is done by `frame`.
    pub fn reached(self, frame: FrameIndex) -> bool {
        match self {
            Self::At(stop) => frame >= stop,
            Self::SceneEnd => false,
        }
    }
}

// `SceneEnd` sorts below every concrete frame, so the maximum over a mixed set
// is the latest concrete stop and only an all-`SceneEnd` set stays unbounded.
impl Ord for StopFrame {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::SceneEnd, Self::SceneEnd) => Ordering::Equal,
            (Self::SceneEnd, Self::At(_)) => Ordering::Less,
            (Self::At(_), Self::SceneEnd) => Ordering::Greater,
            (Self::At(a), Self::At(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for StopFrame {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Length of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SceneDuration {
    Frames(u64),
    Unbounded,
}

impl SceneDuration {
    /// Whether a scene of this length is over once `frame` frames have played.
    pub fn elapsed(self, frame: FrameIndex) -> bool {
        match self {
            Self::Frames(n) => frame.0 >= n,
            Self::Unbounded => false,
        }
    }
}

impl From<StopFrame> for SceneDuration {
    fn from(stop: StopFrame) -> Self {
        match stop {
            StopFrame::At(frame) => Self::Frames(frame.0),
            StopFrame::SceneEnd => Self::Unbounded,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
