//! Metadata editor surface

use tracing::warn;

use crate::gateway::{Gateway, GatewayError};
use crate::listing::{parse_keywords, AppListing};
use crate::surfaces::{Completion, Notice};
use crate::types::{OptimizationResult, Tone};

pub const METADATA_FAILURE: &str = "Failed to generate metadata. Please try again.";

/// Inputs captured when a metadata call starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRequest {
    pub app_name_or_idea: String,
    pub keywords_input: String,
    pub tone: Tone,
}

impl MetadataRequest {
    pub async fn execute(self, gateway: &Gateway) -> Completion {
        let result = gateway
            .generate_metadata(&self.app_name_or_idea, &self.keywords_input, self.tone.label())
            .await;
        Completion::Metadata {
            request: self,
            result,
        }
    }
}

/// Metadata editor state
#[derive(Debug, Clone, Default)]
pub struct MetadataSurface {
    keywords_input: String,
    tone: Tone,
    in_progress: bool,
    reasoning: Option<String>,
    notice: Option<Notice>,
}

impl MetadataSurface {
    /// Surface for `listing`, with the keyword input pre-filled
    pub fn new(listing: &AppListing) -> Self {
        Self {
            keywords_input: listing.keywords_text(),
            ..Self::default()
        }
    }

    pub fn keywords_input(&self) -> &str {
        &self.keywords_input
    }

    pub fn set_keywords_input(&mut self, input: impl Into<String>) {
        self.keywords_input = input.into();
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Reasoning of the last accepted result
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Start a generation, or `None` while one is in flight
    pub fn begin(&mut self, listing: &AppListing) -> Option<MetadataRequest> {
        if self.in_progress {
            return None;
        }
        self.in_progress = true;
        self.notice = None;
        Some(MetadataRequest {
            app_name_or_idea: listing.app_name().to_string(),
            keywords_input: self.keywords_input.clone(),
            tone: self.tone.clone(),
        })
    }

    /// Apply the outcome; returns the next listing on success
    pub fn finish(
        &mut self,
        request: MetadataRequest,
        result: Result<OptimizationResult, GatewayError>,
        listing: &AppListing,
    ) -> Option<AppListing> {
        self.in_progress = false;
        match result {
            Ok(optimized) => {
                let next = listing
                    .apply_metadata_result(&optimized, parse_keywords(&request.keywords_input));
                self.reasoning = Some(optimized.reasoning);
                Some(next)
            }
            Err(e) => {
                warn!(error = %e, "metadata generation failed");
                self.notice = Some(Notice::from_error(METADATA_FAILURE, &e));
                None
            }
        }
    }
}
