//! Keyboard input mapped to scene commands.
//!
//! # Invariants
//! - The scene consumes [`skiff_kernel::SceneCommand`] values, never raw keys.
//! - The windowing layer owns the mapping from its key codes to [`Key`].

pub mod bindings;
pub mod key;

pub use bindings::command_for;
pub use key::{Key, KeyEvent, KeyState, UnknownKey};
