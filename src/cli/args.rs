//! CLI argument parsing
//!
//! Grammar:
//! ```text
//! play-architect [--config <path>] [--json] [mode]
//!
//! MODES:
//!   (no mode) / tui                                   → interactive shell
//!   metadata [--name] [--keywords] [--tone]           → draft title and descriptions
//!   icon [--description] [--style] --out <file>      → generate an icon image
//!   audit --listing <file.json>                       → policy / ASO audit
//!   preview --listing <file.json>                     → storefront mock as text
//! ```

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "play-architect",
    version,
    about = "Draft Google Play Store listings with generative AI"
)]
pub struct Args {
    /// Config file (TOML, JSON or YAML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output (metadata, audit, preview)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive terminal shell (default)
    Tui,

    /// Draft title and descriptions
    Metadata {
        /// App name or idea (may be empty)
        #[arg(long, default_value = "")]
        name: String,

        /// Comma-separated keywords
        #[arg(long, default_value = "")]
        keywords: String,

        /// Writing tone
        #[arg(long, default_value = "Professional & Trustworthy")]
        tone: String,
    },

    /// Generate an app icon
    Icon {
        /// What the icon should show
        #[arg(long, default_value = "")]
        description: String,

        /// Art style
        #[arg(long, default_value = "Flat & Minimalist")]
        style: String,

        /// Output image file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Audit a listing for policy and ASO issues
    Audit {
        /// Listing JSON file
        #[arg(long, value_name = "FILE")]
        listing: PathBuf,
    },

    /// Render the store preview of a listing
    Preview {
        /// Listing JSON file
        #[arg(long, value_name = "FILE")]
        listing: PathBuf,
    },
}

impl Args {
    /// Selected mode, defaulting to the shell
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Tui)
    }

    pub fn is_tui(&self) -> bool {
        matches!(self.mode(), Mode::Tui)
    }
}

/// Parse CLI arguments (the first item is the program name)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_mode_is_tui() {
        let args = parse_args(["play-architect"]).unwrap();
        assert!(args.is_tui());
        assert!(!args.json);
    }
}
