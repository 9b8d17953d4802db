use crate::{
    animation::spline::spline,
    foundation::core::Position,
    foundation::error::{ReelError, ReelResult},
};

/// Motion shared by recorded and reactive paths.
///
/// The driver calls [`Motion::reset`] before playback, then [`Motion::next_pos`]
/// once per frame, using [`Motion::is_finished`] to decide when the sprite is
/// done.
pub trait Motion {
    /// Rewind for the next playback.
    fn reset(&mut self);

    /// Position for the current frame.
    fn next_pos(&mut self) -> Position;

    /// Whether the motion has reached its end.
    fn is_finished(&self) -> bool;
}

/// A recorded sequence of grid positions, replayed one per frame.
///
/// Build it with [`Path::jump_to`], [`Path::wait`], [`Path::move_straight_to`]
/// and [`Path::move_round_to`]; each builder continues from the last recorded
/// position.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Path {
    steps: Vec<Position>,
    last: Position,
    #[serde(skip)]
    cursor: usize,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded positions in playback order.
    pub fn steps(&self) -> &[Position] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The position the next builder call starts from.
    pub fn last_recorded(&self) -> Position {
        self.last
    }

    fn push(&mut self, pos: Position) {
        self.steps.push(pos);
        self.last = pos;
    }

    /// Stay at the last recorded position for `delay` frames.
    pub fn wait(&mut self, delay: usize) -> &mut Self {
        let here = self.last;
        self.steps.extend(std::iter::repeat_n(here, delay));
        self
    }

    /// Teleport to `(x, y)` in a single step.
    pub fn jump_to(&mut self, x: i32, y: i32) -> &mut Self {
        self.push(Position::new(x, y));
        self
    }

    /// Move in a straight line to `(x, y)` over `steps` frames. The final step
    /// lands exactly on the target.
    pub fn move_straight_to(&mut self, x: i32, y: i32, steps: usize) -> ReelResult<&mut Self> {
        if steps == 0 {
            return Err(ReelError::InvalidStepCount { steps });
        }

        let start = self.last;
        let n = steps as f64;
        // Multiply before dividing so the final step lands exactly on the target.
        let step = |from: i32, to: i32, i: usize| {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * i as f64 / n) as i32
        };
        for i in 1..=steps {
            self.push(Position::new(step(start.x, x, i), step(start.y, y, i)));
        }
        Ok(self)
    }

    /// Follow a curve through `waypoints` over roughly `steps` frames.
    ///
    /// The curve starts at the last recorded position. `y` follows a
    /// Catmull-Rom spline while `x` moves linearly between consecutive
    /// control points. Steps are split evenly across the curve segments and
    /// any remainder is dropped.
    pub fn move_round_to(&mut self, waypoints: &[Position], steps: usize) -> ReelResult<&mut Self> {
        let [_, .., last_wp] = waypoints else {
            return Err(ReelError::InsufficientWaypoints {
                got: waypoints.len(),
            });
        };

        // Pad both ends so every segment has a full four-point window.
        let mut points = Vec::with_capacity(waypoints.len() + 3);
        points.push(self.last);
        points.push(self.last);
        points.extend_from_slice(waypoints);
        points.push(*last_wp);

        let segments = points.len() - 3;
        let per_segment = steps / segments;
        if per_segment == 0 {
            return Err(ReelError::InvalidStepCount { steps });
        }

        let n = per_segment as f64;
        for j in 1..points.len() - 2 {
            let (p0, p1, p2, p3) = (points[j - 1], points[j], points[j + 1], points[j + 2]);
            for i in 1..=per_segment {
                let t = i as f64 / n;
                let y = spline(
                    t,
                    f64::from(p0.y),
                    f64::from(p1.y),
                    f64::from(p2.y),
                    f64::from(p3.y),
                );
                self.push(Position::new(lerp_trunc(p1.x, p2.x, t), y as i32));
            }
        }
        Ok(self)
    }
}

fn lerp_trunc(a: i32, b: i32, t: f64) -> i32 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t) as i32
}

impl Motion for Path {
    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn next_pos(&mut self) -> Position {
        // The cursor runs one past the end before freezing, so the final step
        // is handed out once more after `is_finished` turns true.
        if self.cursor <= self.steps.len() {
            let pos = self
                .steps
                .get(self.cursor)
                .or_else(|| self.steps.last())
                .copied()
                .unwrap_or(self.last);
            self.cursor += 1;
            pos
        } else {
            self.steps.last().copied().unwrap_or(self.last)
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/path.rs"]
mod tests;
