//! CLI module
//!
//! Provides:
//! - Argument parsing (interactive shell or one headless mode)
//! - Headless dispatch for metadata, icon, audit and preview

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{parse_args, Args, Mode};
pub use dispatch::{read_listing, run_cli_mode, run_mode, ExitCode};

use play_architect_core::listing::IconDecodeError;
use play_architect_core::{ConfigError, GatewayError};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Icon data error: {0}")]
    Icon(#[from] IconDecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Gateway(e) if e.is_configuration() => EXIT_CONFIG_ERROR,
            Error::InvalidInput(_) | Error::Config(_) => EXIT_CONFIG_ERROR,
            Error::Gateway(_) | Error::Icon(_) | Error::Io(_) | Error::Serialization(_) => {
                EXIT_FAILURE
            }
        }
    }
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
