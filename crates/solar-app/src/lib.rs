//! Orrery application: platform directories, window and event loop.

pub mod game_loop;
pub mod platform;
pub mod window;

pub use game_loop::GameLoop;
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppState, Pacing, build_system, drive_frame, run_with_config};
