//! Application state for the shell
//!
//! State is split between:
//! - The listing (the only shared value, replaced on the UI thread only)
//! - One controller per editing surface
//! - Transient UI state (section, input buffer, console)
//!
//! Gateway calls run on the tokio runtime. Their completions come back on an
//! unbounded channel and are applied in `process_completions`, called once
//! per frame from the main loop.

use std::path::Path;
use std::sync::Arc;

use play_architect_core::listing::ListingField;
use play_architect_core::surfaces::Notice;
use play_architect_core::{
    AppListing, AuditSurface, Completion, Gateway, IconSurface, MetadataSurface, SurfaceRequest,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::ui::Error;

/// Maximum number of console messages to retain
const MAX_CONSOLE_MESSAGES: usize = 200;

/// Workspace sections, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Metadata,
    IconStudio,
    PolicyAudit,
    StorePreview,
}

impl Section {
    pub fn all() -> [Section; 4] {
        [
            Section::Metadata,
            Section::IconStudio,
            Section::PolicyAudit,
            Section::StorePreview,
        ]
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Metadata => "Metadata",
            Section::IconStudio => "Icon Studio",
            Section::PolicyAudit => "Policy Audit",
            Section::StorePreview => "Store Preview",
        }
    }

    /// Editor heading
    pub fn title(&self) -> &'static str {
        match self {
            Section::Metadata => "Craft your Metadata",
            Section::IconStudio => "Design your Icon",
            Section::PolicyAudit => "Review & Compliance",
            Section::StorePreview => "Store Preview",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Section::Metadata => "Use Gemini to generate optimized titles and descriptions.",
            Section::IconStudio => "Generate professional app icons using AI vision.",
            Section::PolicyAudit => "Analyze your listing for common pitfalls and policy issues.",
            Section::StorePreview => "",
        }
    }

    pub fn next(&self) -> Section {
        match self {
            Section::Metadata => Section::IconStudio,
            Section::IconStudio => Section::PolicyAudit,
            Section::PolicyAudit => Section::StorePreview,
            Section::StorePreview => Section::Metadata,
        }
    }

    pub fn prev(&self) -> Section {
        match self {
            Section::Metadata => Section::StorePreview,
            Section::IconStudio => Section::Metadata,
            Section::PolicyAudit => Section::IconStudio,
            Section::StorePreview => Section::PolicyAudit,
        }
    }
}

/// Application lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Console message for the log pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub content: String,
    /// Local time, `HH:MM:SS`
    pub timestamp: String,
}

/// Main application state
pub struct App {
    listing: AppListing,
    section: Section,
    pub metadata: MetadataSurface,
    pub icon: IconSurface,
    pub audit: AuditSurface,
    /// Current input buffer
    pub input_buffer: String,
    console_messages: Vec<ConsoleMessage>,
    state: AppState,
    gateway: Arc<Gateway>,
    runtime: Handle,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl App {
    /// New session with an empty listing in `category`
    pub fn new(gateway: Arc<Gateway>, runtime: Handle, category: &str) -> Self {
        let listing = AppListing::with_category(category);
        let (completion_tx, completion_rx) = unbounded_channel();
        Self {
            metadata: MetadataSurface::new(&listing),
            icon: IconSurface::new(),
            audit: AuditSurface::new(),
            listing,
            section: Section::Metadata,
            input_buffer: String::new(),
            console_messages: Vec::new(),
            state: AppState::Running,
            gateway,
            runtime,
            completion_tx,
            completion_rx,
        }
    }

    pub fn listing(&self) -> &AppListing {
        &self.listing
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Add a console message
    pub fn log(&mut self, message: impl Into<String>) {
        let content = message.into();
        debug!(console = %content);
        self.console_messages.push(ConsoleMessage {
            content,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
        if self.console_messages.len() > MAX_CONSOLE_MESSAGES {
            let excess = self.console_messages.len() - MAX_CONSOLE_MESSAGES;
            self.console_messages.drain(..excess);
        }
    }

    pub fn console_messages(&self) -> &[ConsoleMessage] {
        &self.console_messages
    }

    pub fn handle_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Take and clear the input buffer
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer)
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Switch section; entering the audit section may start the automatic
    /// audit
    pub fn select_section(&mut self, section: Section) {
        self.section = section;
        if section == Section::PolicyAudit {
            if let Some(request) = self.audit.on_view(&self.listing) {
                self.log("Auditing listing...");
                self.dispatch(request.into());
            }
        }
    }

    pub fn next_section(&mut self) {
        self.select_section(self.section.next());
    }

    pub fn prev_section(&mut self) {
        self.select_section(self.section.prev());
    }

    // ---------------------------------------------------------------------
    // Listing edits
    // ---------------------------------------------------------------------

    pub fn edit_field(&mut self, field: ListingField, value: impl Into<String>) {
        self.listing = self.listing.with_field(field, value);
    }

    // ---------------------------------------------------------------------
    // Gateway calls
    // ---------------------------------------------------------------------

    pub fn trigger_metadata(&mut self) {
        match self.metadata.begin(&self.listing) {
            Some(request) => {
                self.log("Gemini is thinking...");
                self.dispatch(request.into());
            }
            None => self.log("Metadata generation already in progress"),
        }
    }

    pub fn trigger_icon(&mut self) {
        match self.icon.begin(&self.listing) {
            Some(request) => {
                self.log("Designing...");
                self.dispatch(request.into());
            }
            None => self.log("Icon generation already in progress"),
        }
    }

    pub fn trigger_audit(&mut self) {
        match self.audit.begin(&self.listing) {
            Some(request) => {
                self.log("Analyzing policy compliance and keyword density...");
                self.dispatch(request.into());
            }
            None => self.log("Audit already in progress"),
        }
    }

    /// Run the current section's generator
    pub fn trigger_current(&mut self) {
        match self.section {
            Section::Metadata => self.trigger_metadata(),
            Section::IconStudio => self.trigger_icon(),
            Section::PolicyAudit => self.trigger_audit(),
            Section::StorePreview => self.log("Nothing to generate in the preview"),
        }
    }

    fn dispatch(&self, request: SurfaceRequest) {
        info!(surface = request.label(), "dispatching gateway call");
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            let completion = request.execute(&gateway).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(completion);
        });
    }

    /// Apply every completion that has arrived; returns how many
    pub fn process_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion);
            applied += 1;
        }
        applied
    }

    /// Apply one finished gateway call to its surface and the listing
    pub fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Metadata { request, result } => {
                match self.metadata.finish(request, result, &self.listing) {
                    Some(next) => {
                        self.listing = next;
                        self.log("Metadata updated");
                    }
                    None => self.log_notice(self.metadata.notice().cloned()),
                }
            }
            Completion::Icon { result, .. } => match self.icon.finish(result, &self.listing) {
                Some(next) => {
                    self.listing = next;
                    self.log("Icon updated");
                }
                None => self.log_notice(self.icon.notice().cloned()),
            },
            Completion::Audit { result, .. } => {
                self.audit.finish(result);
                match self.audit.notice().cloned() {
                    Some(notice) => self.log_notice(Some(notice)),
                    None => self.log(format!(
                        "Audit finished: {} issue(s)",
                        self.audit.issues().len()
                    )),
                }
            }
        }
    }

    fn log_notice(&mut self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            match notice.detail {
                Some(ref detail) => self.log(format!("{} ({})", notice.message, detail)),
                None => self.log(notice.message.clone()),
            }
        }
    }

    /// Notice shown on the notice line: the current section's, else any
    pub fn active_notice(&self) -> Option<&Notice> {
        let own = match self.section {
            Section::Metadata => self.metadata.notice(),
            Section::IconStudio => self.icon.notice(),
            Section::PolicyAudit => self.audit.notice(),
            Section::StorePreview => None,
        };
        own.or_else(|| self.metadata.notice())
            .or_else(|| self.icon.notice())
            .or_else(|| self.audit.notice())
    }

    /// Dismiss the notice currently shown
    pub fn dismiss_notice(&mut self) {
        let own = match self.section {
            Section::Metadata => self.metadata.notice().is_some(),
            Section::IconStudio => self.icon.notice().is_some(),
            Section::PolicyAudit => self.audit.notice().is_some(),
            Section::StorePreview => false,
        };
        if own {
            match self.section {
                Section::Metadata => self.metadata.dismiss_notice(),
                Section::IconStudio => self.icon.dismiss_notice(),
                Section::PolicyAudit => self.audit.dismiss_notice(),
                Section::StorePreview => {}
            }
        } else if self.metadata.notice().is_some() {
            self.metadata.dismiss_notice();
        } else if self.icon.notice().is_some() {
            self.icon.dismiss_notice();
        } else {
            self.audit.dismiss_notice();
        }
    }

    /// Whether any surface has a call in flight
    pub fn is_busy(&self) -> bool {
        self.metadata.is_in_progress() || self.icon.is_in_progress() || self.audit.is_in_progress()
    }

    /// Write the current icon's image bytes to `path`
    pub fn save_icon(&self, path: &Path) -> Result<usize, Error> {
        let icon = self.listing.icon_url().ok_or(Error::NoIcon)?;
        let bytes = icon.decode()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }
}
