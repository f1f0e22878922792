//! Terminal shell
//!
//! Sidebar of sections, the active editor, a live preview pane, an input
//! bar and a notice line.
//!
//! Input model:
//! - Commands start with "/" (see `input::parse_command`)
//! - Tab / Shift-Tab cycle sections, Esc dismisses the notice
//! - /quit, /q, /exit and Ctrl+C exit from any state

pub mod handlers;
pub mod input;
pub mod state;
pub mod view;

// Re-exports
pub use input::{parse_command, render_help, Command};
pub use state::{App, AppState, ConsoleMessage, Section};
pub use view::{draw, render};

use play_architect_core::listing::IconDecodeError;

/// UI result type
pub type Result<T> = std::result::Result<T, Error>;

/// UI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No icon has been generated yet")]
    NoIcon,

    #[error("Icon data error: {0}")]
    Icon(#[from] IconDecodeError),
}
