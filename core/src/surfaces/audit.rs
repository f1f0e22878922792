//! Policy audit surface
//!
//! The audit runs by itself the first time the surface is viewed, provided
//! the listing has a name and a short description. After that it only runs
//! on explicit request.

use tracing::{debug, warn};

use crate::gateway::{Gateway, GatewayError};
use crate::listing::AppListing;
use crate::surfaces::{Completion, Notice};
use crate::types::AuditIssue;

pub const AUDIT_FAILURE: &str = "Audit failed.";

/// Listing snapshot to audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub listing: AppListing,
}

impl AuditRequest {
    pub async fn execute(self, gateway: &Gateway) -> Completion {
        let result = gateway.audit_listing(&self.listing).await;
        Completion::Audit {
            request: self,
            result,
        }
    }
}

/// What the audit pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditDisplay<'a> {
    NotRun,
    Running,
    /// Ran and found nothing
    Clean,
    Issues(&'a [AuditIssue]),
}

#[derive(Debug, Clone, Default)]
pub struct AuditSurface {
    issues: Vec<AuditIssue>,
    has_run: bool,
    viewed: bool,
    in_progress: bool,
    notice: Option<Notice>,
}

impl AuditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface became visible; may start the automatic audit
    pub fn on_view(&mut self, listing: &AppListing) -> Option<AuditRequest> {
        if self.viewed {
            return None;
        }
        self.viewed = true;

        if listing.app_name().is_empty() || listing.short_description().is_empty() {
            debug!("skipping automatic audit for incomplete listing");
            return None;
        }
        self.begin(listing)
    }

    /// Start an audit, or `None` while one is in flight
    pub fn begin(&mut self, listing: &AppListing) -> Option<AuditRequest> {
        if self.in_progress {
            return None;
        }
        self.in_progress = true;
        self.notice = None;
        Some(AuditRequest {
            listing: listing.clone(),
        })
    }

    pub fn finish(&mut self, result: Result<Vec<AuditIssue>, GatewayError>) {
        self.in_progress = false;
        match result {
            Ok(issues) => {
                debug!(count = issues.len(), "audit finished");
                self.issues = issues;
                self.has_run = true;
            }
            Err(e) => {
                warn!(error = %e, "audit failed");
                self.notice = Some(Notice::from_error(AUDIT_FAILURE, &e));
            }
        }
    }

    pub fn display(&self) -> AuditDisplay<'_> {
        if self.in_progress {
            AuditDisplay::Running
        } else if !self.has_run {
            AuditDisplay::NotRun
        } else if self.issues.is_empty() {
            AuditDisplay::Clean
        } else {
            AuditDisplay::Issues(&self.issues)
        }
    }

    pub fn issues(&self) -> &[AuditIssue] {
        &self.issues
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GenerationFailure;
    use crate::listing::ListingField;
    use crate::types::{IssueField, Severity};

    fn complete_listing() -> AppListing {
        AppListing::new()
            .with_field(ListingField::Title, "X")
            .with_field(ListingField::ShortDescription, "Y")
    }

    #[test]
    fn test_on_view_skips_incomplete_listing_for_good() {
        let mut surface = AuditSurface::new();
        assert!(surface.on_view(&AppListing::new()).is_none());
        assert!(surface.on_view(&complete_listing()).is_none());
        assert_eq!(surface.display(), AuditDisplay::NotRun);
    }

    #[test]
    fn test_on_view_fires_once() {
        let mut surface = AuditSurface::new();
        let listing = complete_listing();
        let request = surface.on_view(&listing).unwrap();
        assert_eq!(request.listing, listing);
        surface.finish(Ok(Vec::new()));
        assert!(surface.on_view(&listing).is_none());
        assert!(surface.on_view(&listing).is_none());
    }

    #[test]
    fn test_display_states() {
        let mut surface = AuditSurface::new();
        surface.begin(&complete_listing()).unwrap();
        assert_eq!(surface.display(), AuditDisplay::Running);

        surface.finish(Ok(Vec::new()));
        assert_eq!(surface.display(), AuditDisplay::Clean);

        let issue = AuditIssue {
            severity: Severity::High,
            field: IssueField::Title,
            message: "Claim".to_string(),
            suggestion: "Remove it".to_string(),
        };
        surface.begin(&complete_listing()).unwrap();
        surface.finish(Ok(vec![issue.clone()]));
        assert_eq!(surface.display(), AuditDisplay::Issues(&[issue]));
    }

    #[test]
    fn test_failure_keeps_previous_issues() {
        let mut surface = AuditSurface::new();
        surface.begin(&complete_listing()).unwrap();
        surface.finish(Ok(Vec::new()));

        surface.begin(&complete_listing()).unwrap();
        surface.finish(Err(GenerationFailure::EmptyResponse.into()));
        assert_eq!(surface.display(), AuditDisplay::Clean);
        assert_eq!(surface.notice().unwrap().message, AUDIT_FAILURE);
    }
}
