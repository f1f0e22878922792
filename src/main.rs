//! Play Architect CLI
//!
//! No mode (or `tui`) opens the interactive shell. Every other mode runs one
//! gateway operation headless and exits.
//!
//! EXIT: /quit, /q, /exit and Ctrl+C work from any state

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

use play_architect::cli::{parse_args, run_cli_mode, Mode, EXIT_CONFIG_ERROR, EXIT_FAILURE};
use play_architect::logging::{init_logging, LogTarget};
use play_architect::ui::{handlers, parse_command, App, AppState};
use play_architect_core::{ArchitectConfig, ConfigManager, Gateway, GatewayConfig};

fn main() -> io::Result<()> {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        // Prints help / version too
        Err(e) => e.exit(),
    };

    let manager = match ConfigManager::load(args.config.as_deref()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    let config = manager.config().clone();

    let mode = args.mode();
    let target = match mode {
        Mode::Tui => LogTarget::for_tui(&config.log),
        _ => LogTarget::Stderr,
    };
    // Held until exit so buffered log lines are flushed
    let _guard = match init_logging(&config.log, &target) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };
    if let Some(source) = manager.source() {
        info!(path = %source.display(), "loaded configuration");
    }

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if !matches!(mode, Mode::Tui) {
        let code = run_cli_mode(mode, args.json, &config, &runtime);
        std::process::exit(code);
    }

    run_tui_mode(&config, &runtime)
}

/// Run the interactive shell
fn run_tui_mode(config: &ArchitectConfig, runtime: &Runtime) -> io::Result<()> {
    let gateway = match Gateway::new(GatewayConfig::from(config)) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let mut app = App::new(gateway, runtime.handle().clone(), &config.listing.category);
    app.log("Play Architect: draft your Google Play listing");
    app.log("Tab to switch sections, /help for commands, /quit to exit");
    if !app.is_configured() {
        warn!("no API key configured");
        app.log("No API key set: export API_KEY (or GEMINI_API_KEY) to enable Gemini");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = %e, "shell exited with error");
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while app.state() != AppState::Quitting {
        play_architect::ui::render(terminal, app)?;

        if poll(Duration::from_millis(100))? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Ctrl+C exits immediately from any state
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                handle_key_event(app, key);
            }
        }

        // Apply gateway results that arrived since the last frame
        app.process_completions();
    }
    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.handle_char(c),
        KeyCode::Backspace => app.handle_backspace(),
        KeyCode::Enter => {
            let input = app.take_input();
            let cmd = parse_command(&input);
            handlers::execute_command(app, cmd);
        }
        KeyCode::Esc => {
            if app.active_notice().is_some() {
                app.dismiss_notice();
            } else {
                app.input_buffer.clear();
            }
        }
        KeyCode::Tab => app.next_section(),
        KeyCode::BackTab => app.prev_section(),
        _ => {}
    }
}
