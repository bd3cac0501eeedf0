//! Input adapters: typed characters from keyboard events and the last cursor position.

pub mod keyboard;
pub mod mouse;

pub use keyboard::{RawKeyEvent, TypedKeys};
pub use mouse::CursorState;
