//! Headless mode dispatch
//!
//! Each mode runs one gateway operation (or the preview renderer) and prints
//! the result. Nothing is written back to listing files.

use std::io::Write;
use std::path::Path;

use play_architect_core::listing::{parse_keywords, ListingField};
use play_architect_core::{
    render_preview, AppListing, ArchitectConfig, AuditIssue, Gateway, GatewayConfig,
    OptimizationResult, Tone,
};
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::cli::{Error, Mode, Result, EXIT_SUCCESS};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run a headless mode and return the exit code
pub fn run_cli_mode(mode: Mode, json: bool, config: &ArchitectConfig, runtime: &Runtime) -> ExitCode {
    let gateway = match Gateway::new(GatewayConfig::from(config)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Error::from(e).exit_code();
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match runtime.block_on(run_mode(&mode, &gateway, json, &mut out)) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            warn!(error = %e, "headless mode failed");
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Run one headless mode, writing its output to `out`
pub async fn run_mode(
    mode: &Mode,
    gateway: &Gateway,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    match mode {
        Mode::Tui => Err(Error::InvalidInput(
            "the interactive shell is not a headless mode".to_string(),
        )),
        Mode::Metadata {
            name,
            keywords,
            tone,
        } => {
            let tone = Tone::from(tone.as_str());
            let result = gateway
                .generate_metadata(name, keywords, tone.label())
                .await?;
            let listing = AppListing::new().apply_metadata_result(&result, parse_keywords(keywords));
            write_metadata(out, &result, &listing, json)
        }
        Mode::Icon {
            description,
            style,
            out: path,
        } => {
            let style = play_architect_core::IconStyle::from(style.as_str());
            let icon = gateway.generate_icon(description, style.label()).await?;
            let bytes = icon.decode()?;
            std::fs::write(path, &bytes)?;
            info!(path = %path.display(), bytes = bytes.len(), "icon written");
            writeln!(
                out,
                "Wrote {} bytes ({}) to {}",
                bytes.len(),
                icon.mime_type().unwrap_or("image"),
                path.display()
            )?;
            Ok(())
        }
        Mode::Audit { listing } => {
            let listing = read_listing(listing)?;
            let issues = gateway.audit_listing(&listing).await?;
            write_audit(out, &issues, json)
        }
        Mode::Preview { listing } => {
            let listing = read_listing(listing)?;
            let card = render_preview(&listing);
            if json {
                write_json(out, &card)
            } else {
                for line in card.to_text_lines() {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            }
        }
    }
}

/// Read a listing JSON file (camelCase fields, all optional)
pub fn read_listing(path: &Path) -> Result<AppListing> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::InvalidInput(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::InvalidInput(format!("invalid listing {}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", text)?;
    Ok(())
}

fn write_metadata(
    out: &mut dyn Write,
    result: &OptimizationResult,
    listing: &AppListing,
    json: bool,
) -> Result<()> {
    if json {
        return write_json(out, result);
    }

    writeln!(out, "Title: {}", result.title)?;
    writeln!(out, "Short description: {}", result.short_description)?;
    writeln!(out, "Full description:")?;
    for line in result.full_description.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out, "Reasoning: {}", result.reasoning)?;

    for counter in listing.counters().iter().filter(|c| c.is_exceeded()) {
        writeln!(
            out,
            "warning: {} is over the limit ({})",
            counter.field.label(),
            counter
        )?;
    }
    if listing.field(ListingField::Title).is_empty() {
        writeln!(out, "warning: title is empty")?;
    }
    Ok(())
}

fn write_audit(out: &mut dyn Write, issues: &[AuditIssue], json: bool) -> Result<()> {
    if json {
        return write_json(out, &issues);
    }
    if issues.is_empty() {
        writeln!(out, "No issues found")?;
        return Ok(());
    }
    for issue in issues {
        writeln!(
            out,
            "[{}] {}: {}",
            issue.severity.as_str().to_uppercase(),
            issue.field,
            issue.message
        )?;
        writeln!(out, "  suggestion: {}", issue.suggestion)?;
    }
    Ok(())
}
