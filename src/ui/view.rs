//! Panel rendering
//!
//! Layout:
//! - Sidebar (left): sections and the current project name
//! - Editor (middle): the active section, with the console below it
//! - Live preview (right): hidden while the preview section is active
//! - Notice line and input bar (bottom)

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use play_architect_core::listing::ListingField;
use play_architect_core::{
    render_preview, AuditDisplay, FieldCounter, IconStyle, Severity, Tone,
};

use crate::ui::state::{App, Section};

const SIDEBAR_WIDTH: u16 = 26;
const CONSOLE_HEIGHT: u16 = 7;

/// Render the main UI
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    // Vertical split: main area + notice line + input bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let show_live_preview = app.section() != Section::StorePreview;
    let constraints = if show_live_preview {
        vec![
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(0),
            Constraint::Percentage(35),
        ]
    } else {
        vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]
    };
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(chunks[0]);

    render_sidebar(f, app, main_chunks[0]);

    let editor_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(CONSOLE_HEIGHT)])
        .split(main_chunks[1]);
    render_editor(f, app, editor_chunks[0]);
    render_console(f, app, editor_chunks[1]);

    if show_live_preview {
        render_preview_pane(f, app, main_chunks[2], " Live Preview ");
    }

    render_notice_line(f, app, chunks[1]);
    render_input_bar(f, app, chunks[2]);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Architect",
            Style::default().fg(Color::Indexed(99)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for section in Section::all() {
        let active = section == app.section();
        let marker = if active { "▶ " } else { "  " };
        let style = if active {
            Style::default().fg(Color::White).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let busy = match section {
            Section::Metadata => app.metadata.is_in_progress(),
            Section::IconStudio => app.icon.is_in_progress(),
            Section::PolicyAudit => app.audit.is_in_progress(),
            Section::StorePreview => false,
        };
        let mut spans = vec![Span::styled(format!("{}{}", marker, section.label()), style)];
        if busy {
            spans.push(Span::styled(" …", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Current Project",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(app.listing().display_name().to_string()));

    if !app.is_configured() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No API key set",
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Workspace "))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_editor(f: &mut Frame, app: &App, area: Rect) {
    let section = app.section();
    let mut lines = vec![Line::from(Span::styled(
        section.title(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];
    if !section.subtitle().is_empty() {
        lines.push(Line::from(Span::styled(
            section.subtitle(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    match section {
        Section::Metadata => metadata_lines(app, &mut lines),
        Section::IconStudio => icon_lines(app, &mut lines),
        Section::PolicyAudit => audit_lines(app, &mut lines),
        Section::StorePreview => {
            lines.extend(
                render_preview(app.listing())
                    .to_text_lines()
                    .into_iter()
                    .map(Line::from),
            );
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(format!(" {} ", section.label())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn counter_span(counter: FieldCounter) -> Span<'static> {
    let style = if counter.is_exceeded() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {}", counter), style)
}

fn metadata_lines(app: &App, lines: &mut Vec<Line<'static>>) {
    let surface = &app.metadata;
    let listing = app.listing();

    lines.push(Line::from(vec![
        label("Keywords (comma separated): "),
        Span::raw(surface.keywords_input().to_string()),
    ]));
    let tone = surface.tone();
    let tone_hint = if Tone::presets().contains(tone) {
        ""
    } else {
        " (custom)"
    };
    lines.push(Line::from(vec![
        label("Brand Tone: "),
        Span::raw(format!("{}{}", tone, tone_hint)),
    ]));
    lines.push(Line::from(Span::styled(
        if surface.is_in_progress() {
            "[ Gemini is thinking... ]"
        } else {
            "[ Generate Metadata ]  /generate"
        },
        Style::default().fg(Color::Cyan),
    )));

    if let Some(reasoning) = surface.reasoning() {
        lines.push(Line::from(vec![
            Span::styled("Why this works: ", Style::default().fg(Color::Indexed(99)).add_modifier(Modifier::BOLD)),
            Span::raw(reasoning.to_string()),
        ]));
    }
    lines.push(Line::from(""));

    for counter in listing.counters() {
        lines.push(Line::from(vec![
            Span::styled(counter.field.label(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            counter_span(counter),
        ]));
        let text = listing.field(counter.field);
        if text.is_empty() {
            lines.push(Line::from(label("  (empty)")));
        } else {
            lines.extend(text.lines().map(|l| Line::from(format!("  {}", l))));
        }
    }
    lines.push(Line::from(vec![
        label("Category: "),
        Span::raw(listing.field(ListingField::Category).to_string()),
    ]));
}

fn icon_lines(app: &App, lines: &mut Vec<Line<'static>>) {
    let surface = &app.icon;
    let listing = app.listing();

    let prompt = if surface.prompt().is_empty() {
        Span::styled(
            format!("Describe the icon for {}...", listing.app_name()),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(surface.prompt().to_string())
    };
    lines.push(Line::from(vec![label("Icon Subject: "), prompt]));

    let styles: Vec<Span<'static>> = IconStyle::presets()
        .iter()
        .flat_map(|style| {
            let selected = style == surface.style();
            let span = if selected {
                Span::styled(
                    format!("[{}]", style),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                )
            } else {
                Span::raw(format!(" {} ", style))
            };
            [span, Span::raw(" ")]
        })
        .collect();
    lines.push(Line::from(label("Art Style:")));
    lines.push(Line::from(styles));
    if let IconStyle::Custom(custom) = surface.style() {
        lines.push(Line::from(format!("  custom: {}", custom)));
    }

    lines.push(Line::from(Span::styled(
        if surface.is_in_progress() {
            "[ Designing... ]"
        } else {
            "[ Generate Icon ]  /generate"
        },
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));

    match listing.icon_url() {
        Some(icon) => {
            let size = icon.decode().map(|b| b.len()).unwrap_or(0);
            lines.push(Line::from(vec![
                Span::styled("Icon ready ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "({}, {} bytes)  /save-icon <path>",
                    icon.mime_type().unwrap_or("image"),
                    size
                )),
            ]));
        }
        None => lines.push(Line::from(label("No icon generated yet"))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(label(
        "Tip: Google Play icons should be simple, distinctive, and avoid text.",
    )));
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Blue,
    }
}

fn audit_lines(app: &App, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        "[ Re-Run Audit ]  /generate",
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));

    match app.audit.display() {
        AuditDisplay::NotRun => lines.push(Line::from(label(
            "Run /generate to analyze your listing with Gemini.",
        ))),
        AuditDisplay::Running => lines.push(Line::from(Span::styled(
            "Analyzing policy compliance and keyword density...",
            Style::default().fg(Color::Yellow),
        ))),
        AuditDisplay::Clean => {
            lines.push(Line::from(Span::styled(
                "Everything looks great!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("No major policy violations or ASO issues detected."));
        }
        AuditDisplay::Issues(issues) => {
            for issue in issues {
                let color = severity_color(issue.severity);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("[{}]", issue.severity.as_str().to_uppercase()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" [{}] ", issue.field),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(issue.message.clone(), Style::default().fg(color)),
                ]));
                lines.push(Line::from(format!("    Suggestion: {}", issue.suggestion)));
            }
        }
    }
}

fn render_console(f: &mut Frame, app: &App, area: Rect) {
    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let messages = app.console_messages();
    let start = messages.len().saturating_sub(visible);

    let lines: Vec<Line> = messages[start..]
        .iter()
        .map(|m| {
            Line::from(vec![
                Span::styled(format!("{} ", m.timestamp), Style::default().fg(Color::DarkGray)),
                Span::raw(m.content.clone()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Console "));
    f.render_widget(paragraph, area);
}

fn render_preview_pane(f: &mut Frame, app: &App, area: Rect, title: &str) {
    let card = render_preview(app.listing());
    let lines: Vec<Line> = card
        .to_text_lines()
        .into_iter()
        .map(Line::from)
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_notice_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.active_notice() {
        Some(notice) => Line::from(vec![
            Span::styled(
                format!(" {} ", notice.message),
                Style::default().fg(Color::White).bg(Color::Red),
            ),
            Span::styled("  Esc to dismiss", Style::default().fg(Color::DarkGray)),
        ]),
        None if app.is_busy() => Line::from(Span::styled(
            " Working...",
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_input_bar(f: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(format!("> {}", app.input_buffer)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Command (/help) "),
    );
    f.render_widget(paragraph, area);
}
