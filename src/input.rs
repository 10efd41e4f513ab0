use crate::entities::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
}

impl Key {
    /// Maps a `KeyboardEvent.key` value to a game key.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Self::Left),
            "d" | "D" | "ArrowRight" => Some(Self::Right),
            " " | "Spacebar" => Some(Self::Fire),
            "r" | "R" => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Which game keys are currently held down.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
}

impl KeyState {
    pub fn apply(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Fire => self.fire = pressed,
            Key::Restart => self.restart = pressed,
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        match (self.left, self.right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Stopped,
        }
    }
}
