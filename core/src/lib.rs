//! Play Architect Core
//!
//! Listing model, generation gateway and editing surfaces for drafting a
//! Google Play Store listing. Everything here is UI-agnostic: the terminal
//! shell and the headless CLI in the root crate are thin views over it.

pub mod config;
pub mod gateway;
pub mod listing;
pub mod preview;
pub mod surfaces;
pub mod types;

pub use config::{ArchitectConfig, ConfigError, ConfigFormat, ConfigManager};
pub use gateway::{
    ErrorKind, Gateway, GatewayConfig, GatewayError, GenerationFailure, TransportError,
};
pub use listing::{AppListing, FieldCounter, IconRef, ListingField};
pub use preview::{render_preview, IconSlot, PreviewCard, PreviewText};
pub use surfaces::{
    AuditDisplay, AuditSurface, Completion, IconSurface, MetadataSurface, Notice, SurfaceRequest,
};
pub use types::{AuditIssue, IconStyle, IssueField, OptimizationResult, Severity, Tone};
