//! Command parsing for the shell
//!
//! Commands start with "/". Anything else is not a command and is reported
//! back as a hint. Exit commands (/quit, /q, /exit) take no arguments and
//! work from any state.

use crate::ui::state::Section;

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,                // /quit, /q, /exit
    Help,                // /help
    Go(Section),         // /metadata, /icon, /audit, /preview
    Generate,            // /generate, /run
    Title(String),       // /title <text>
    Short(String),       // /short <text>
    Full(String),        // /full <text>
    Category(String),    // /category <text>
    Keywords(String),    // /keywords <csv>
    Tone(String),        // /tone <tone>
    Style(String),       // /style <style>
    Prompt(String),      // /prompt <text>
    SaveIcon(String),    // /save-icon <path>
    Dismiss,             // /dismiss
    Unknown(String),     // /something-else
    Invalid(String),     // known command, bad arguments (usage text)
    Text(String),        // no "/" prefix
}

/// Parse command input string into Command
///
/// # Examples
/// ```
/// use play_architect::ui::input::{parse_command, Command};
/// use play_architect::ui::Section;
///
/// assert_eq!(parse_command("/q"), Command::Quit);
/// assert_eq!(parse_command("/audit"), Command::Go(Section::PolicyAudit));
/// assert_eq!(parse_command("/title FitTrack"), Command::Title("FitTrack".to_string()));
/// assert!(matches!(parse_command("hello"), Command::Text(_)));
/// ```
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::None;
    }

    let Some(rest) = input.strip_prefix('/') else {
        return Command::Text(input.to_string());
    };

    // "/" alone, or "/ cmd", is not a command
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Command::None;
    }

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "quit" | "q" | "exit" => {
            if arg.is_empty() {
                Command::Quit
            } else {
                Command::Invalid(format!("/{} takes no arguments", name))
            }
        }
        "help" | "h" => Command::Help,
        "metadata" => Command::Go(Section::Metadata),
        "icon" => Command::Go(Section::IconStudio),
        "audit" => Command::Go(Section::PolicyAudit),
        "preview" => Command::Go(Section::StorePreview),
        "generate" | "run" => Command::Generate,
        "title" => Command::Title(arg.to_string()),
        "short" => Command::Short(arg.to_string()),
        // Literal "\n" in a one-line input stands for a line break
        "full" => Command::Full(arg.replace("\\n", "\n")),
        "category" => Command::Category(arg.to_string()),
        "keywords" => Command::Keywords(arg.to_string()),
        "tone" => required(arg, Command::Tone, "/tone <tone>"),
        "style" => required(arg, Command::Style, "/style <style>"),
        "prompt" => Command::Prompt(arg.to_string()),
        "save-icon" => required(arg, Command::SaveIcon, "/save-icon <path>"),
        "dismiss" => Command::Dismiss,
        other => Command::Unknown(other.to_string()),
    }
}

fn required(arg: &str, make: fn(String) -> Command, usage: &str) -> Command {
    if arg.is_empty() {
        Command::Invalid(format!("usage: {}", usage))
    } else {
        make(arg.to_string())
    }
}

/// Help text, one entry per line
pub fn render_help() -> Vec<String> {
    [
        "Sections:  /metadata  /icon  /audit  /preview   (Tab / Shift-Tab to cycle)",
        "/generate, /run       Run the current section's generator",
        "/title <text>         Set the app title",
        "/short <text>         Set the short description",
        "/full <text>          Set the full description (\\n for line breaks)",
        "/category <text>      Set the category",
        "/keywords <a, b, c>   Keywords used for the next metadata generation",
        "/tone <tone>          Brand tone for metadata",
        "/style <style>        Art style for the icon",
        "/prompt <text>        Icon subject (defaults to the app title)",
        "/save-icon <path>     Write the generated icon image to a file",
        "/dismiss, Esc         Dismiss the current notice",
        "/quit, /q, /exit      Quit (Ctrl+C also works)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
