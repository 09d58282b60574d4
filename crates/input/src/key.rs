use std::fmt;
use std::str::FromStr;

/// Logical keys the scene reacts to, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Digit1,
    Digit2,
    Digit3,
    R,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    A,
    D,
    X,
    Z,
    Q,
    E,
    F,
}

impl Key {
    pub const ALL: [Key; 15] = [
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::R,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::A,
        Key::D,
        Key::X,
        Key::Z,
        Key::Q,
        Key::E,
        Key::F,
    ];

    /// Short name used in scripts and help text.
    pub fn name(self) -> &'static str {
        match self {
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::R => "r",
            Key::ArrowUp => "up",
            Key::ArrowDown => "down",
            Key::ArrowLeft => "left",
            Key::ArrowRight => "right",
            Key::A => "a",
            Key::D => "d",
            Key::X => "x",
            Key::Z => "z",
            Key::Q => "q",
            Key::E => "e",
            Key::F => "f",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key `{0}`")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = lower.strip_prefix("arrow").unwrap_or(lower.as_str());
        Key::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A key transition delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }
}
