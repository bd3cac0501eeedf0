//! Character-level keyboard input.
//!
//! Camera bindings are characters, not physical keys: `s` and `S` are
//! different commands. [`TypedKeys`] turns winit key events into the
//! characters they produce and queues them until the application drains them.

use std::collections::VecDeque;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, SmolStr};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKeyEvent {
    pub state: ElementState,
    /// Text produced by the key, with modifiers already applied.
    pub text: Option<SmolStr>,
    /// Whether this is an auto-repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Extract the typed text of a winit event.
    ///
    /// Falls back to the logical key when the platform reports no text.
    pub fn from_event(event: &KeyEvent) -> Self {
        let text = event.text.clone().or_else(|| match &event.logical_key {
            Key::Character(s) => Some(s.clone()),
            _ => None,
        });
        Self {
            state: event.state,
            text,
            repeat: event.repeat,
        }
    }
}

/// Queue of characters typed since the last [`drain`](Self::drain).
///
/// Auto-repeat is forwarded by default so holding a key keeps moving the
/// camera.
#[derive(Debug, Clone)]
pub struct TypedKeys {
    pending: VecDeque<char>,
    forward_repeats: bool,
}

impl Default for TypedKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedKeys {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            forward_repeats: true,
        }
    }

    /// Drop auto-repeat events instead of queueing them.
    #[must_use]
    pub fn ignoring_repeats(mut self) -> Self {
        self.forward_repeats = false;
        self
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent::from_event(event));
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.state != ElementState::Pressed || (event.repeat && !self.forward_repeats) {
            return;
        }
        if let Some(text) = event.text {
            tracing::trace!(text = %text, repeat = event.repeat, "key typed");
            self.pending.extend(text.chars());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued character in the order typed.
    pub fn drain(&mut self) -> impl Iterator<Item = char> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            state,
            text: Some(SmolStr::new(text)),
            repeat,
        }
    }

    #[test]
    fn test_press_queues_characters() {
        let mut keys = TypedKeys::new();
        keys.process_raw(raw("w", ElementState::Pressed, false));
        keys.process_raw(raw("S", ElementState::Pressed, false));
        assert_eq!(keys.drain().collect::<String>(), "wS");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_release_is_ignored() {
        let mut keys = TypedKeys::new();
        keys.process_raw(raw("d", ElementState::Released, false));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_repeats_forwarded_by_default() {
        let mut keys = TypedKeys::new();
        keys.process_raw(raw("a", ElementState::Pressed, false));
        keys.process_raw(raw("a", ElementState::Pressed, true));
        keys.process_raw(raw("a", ElementState::Pressed, true));
        assert_eq!(keys.drain().count(), 3);
    }

    #[test]
    fn test_repeats_can_be_dropped() {
        let mut keys = TypedKeys::new().ignoring_repeats();
        keys.process_raw(raw("a", ElementState::Pressed, false));
        keys.process_raw(raw("a", ElementState::Pressed, true));
        assert_eq!(keys.drain().collect::<Vec<_>>(), ['a']);
    }

    #[test]
    fn test_non_text_keys_produce_nothing() {
        let mut keys = TypedKeys::new();
        keys.process_raw(RawKeyEvent {
            state: ElementState::Pressed,
            text: None,
            repeat: false,
        });
        assert!(keys.is_empty());
    }

    #[test]
    fn test_multi_char_text_keeps_order() {
        let mut keys = TypedKeys::new();
        keys.process_raw(raw("rw", ElementState::Pressed, false));
        assert_eq!(keys.drain().collect::<String>(), "rw");
    }
}
