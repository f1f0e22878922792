//! Shell command handlers

use std::path::Path;

use play_architect_core::listing::ListingField;
use play_architect_core::{IconStyle, Tone};

use crate::ui::input::{render_help, Command};
use crate::ui::state::App;

/// Execute one parsed command against the app
pub fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::None => {}
        Command::Quit => {
            app.log("Exiting...");
            app.quit();
        }
        Command::Help => {
            for line in render_help() {
                app.log(line);
            }
        }
        Command::Go(section) => app.select_section(section),
        Command::Generate => app.trigger_current(),
        Command::Title(text) => app.edit_field(ListingField::Title, text),
        Command::Short(text) => app.edit_field(ListingField::ShortDescription, text),
        Command::Full(text) => app.edit_field(ListingField::FullDescription, text),
        Command::Category(text) => app.edit_field(ListingField::Category, text),
        Command::Keywords(text) => app.metadata.set_keywords_input(text),
        Command::Tone(text) => {
            let tone = Tone::from(text.as_str());
            app.log(format!("Tone: {}", tone));
            app.metadata.set_tone(tone);
        }
        Command::Style(text) => {
            let style = IconStyle::from(text.as_str());
            app.log(format!("Style: {}", style));
            app.icon.set_style(style);
        }
        Command::Prompt(text) => app.icon.set_prompt(text),
        Command::SaveIcon(path) => handle_save_icon(app, &path),
        Command::Dismiss => app.dismiss_notice(),
        Command::Unknown(name) => {
            app.log(format!("Unknown command: /{} (try /help)", name));
        }
        Command::Invalid(usage) => app.log(usage),
        Command::Text(_) => {
            app.log("Commands start with \"/\" (try /help)");
        }
    }
}

/// Handle /save-icon command
pub fn handle_save_icon(app: &mut App, path: &str) {
    match app.save_icon(Path::new(path)) {
        Ok(bytes) => app.log(format!("Saved icon ({} bytes) to {}", bytes, path)),
        Err(e) => app.log(format!("Could not save icon: {}", e)),
    }
}
