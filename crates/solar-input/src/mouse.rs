//! Last known cursor position.

use glam::Vec2;

/// Cursor position in physical window pixels, kept so key presses can be
/// reported together with where the pointer was.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    position: Vec2,
    in_window: bool,
}

impl CursorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
        self.in_window = true;
    }

    pub fn on_cursor_entered(&mut self) {
        self.in_window = true;
    }

    /// The position is kept so later key presses still report it.
    pub fn on_cursor_left(&mut self) {
        self.in_window = false;
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position truncated to whole pixels.
    #[must_use]
    pub fn pixel(&self) -> (i32, i32) {
        (self.position.x as i32, self.position.y as i32)
    }

    #[must_use]
    pub fn in_window(&self) -> bool {
        self.in_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin_outside_window() {
        let cursor = CursorState::new();
        assert_eq!(cursor.pixel(), (0, 0));
        assert!(!cursor.in_window());
    }

    #[test]
    fn test_moves_track_latest_position() {
        let mut cursor = CursorState::new();
        cursor.on_cursor_moved(10.0, 20.0);
        cursor.on_cursor_moved(350.7, 12.2);
        assert_eq!(cursor.position(), Vec2::new(350.7, 12.2));
        assert_eq!(cursor.pixel(), (350, 12));
        assert!(cursor.in_window());
    }

    #[test]
    fn test_leaving_keeps_last_position() {
        let mut cursor = CursorState::new();
        cursor.on_cursor_moved(5.0, 6.0);
        cursor.on_cursor_left();
        assert!(!cursor.in_window());
        assert_eq!(cursor.pixel(), (5, 6));
        cursor.on_cursor_entered();
        assert!(cursor.in_window());
    }
}
