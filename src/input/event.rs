/// Input handed through scenes, effects and reactive paths. Events are passed
/// along unchanged until something consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl Event {
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent { code })
    }

    pub fn mouse(x: i32, y: i32, buttons: MouseButtons) -> Self {
        Self::Mouse(MouseEvent { x, y, buttons })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KeyCode {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    /// Backend-specific code the core does not interpret.
    Other(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub buttons: MouseButtons,
}

/// Bit set of pressed mouse buttons; empty for plain movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const DOUBLE_CLICK: Self = Self(4);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/event.rs"]
mod tests;
