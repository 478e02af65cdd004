pub mod buffer;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod keys;
pub mod logger;
pub mod screen;
pub mod terminal;
pub mod viewport;

// Screen layout constants
pub const STATUS_BAR_HEIGHT: usize = 1;
pub const MESSAGE_BAR_HEIGHT: usize = 1;
pub const UI_HEIGHT: usize = STATUS_BAR_HEIGHT + MESSAGE_BAR_HEIGHT;

/// Tab stops sit at every multiple of this many columns.
pub const TAB_STOP: usize = 8;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
