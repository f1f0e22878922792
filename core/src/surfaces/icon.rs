//! Icon studio surface

use tracing::warn;

use crate::gateway::{Gateway, GatewayError};
use crate::listing::{AppListing, IconRef};
use crate::surfaces::{Completion, Notice};
use crate::types::IconStyle;

pub const ICON_FAILURE: &str = "Failed to generate icon. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub description: String,
    pub style: IconStyle,
}

impl IconRequest {
    pub async fn execute(self, gateway: &Gateway) -> Completion {
        let result = gateway
            .generate_icon(&self.description, self.style.label())
            .await;
        Completion::Icon {
            request: self,
            result,
        }
    }
}

/// Icon studio state
#[derive(Debug, Clone, Default)]
pub struct IconSurface {
    prompt: String,
    style: IconStyle,
    in_progress: bool,
    notice: Option<Notice>,
}

impl IconSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn style(&self) -> &IconStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: IconStyle) {
        self.style = style;
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

    /// Start a generation, or `None` while one is in flight
    ///
    /// An empty prompt falls back to the app name.
    pub fn begin(&mut self, listing: &AppListing) -> Option<IconRequest> {
        if self.in_progress {
            return None;
        }
        self.in_progress = true;
        self.notice = None;

        let description = if self.prompt.trim().is_empty() {
            listing.app_name().to_string()
        } else {
            self.prompt.clone()
        };
        Some(IconRequest {
            description,
            style: self.style.clone(),
        })
    }

    pub fn finish(
        &mut self,
        result: Result<IconRef, GatewayError>,
        listing: &AppListing,
    ) -> Option<AppListing> {
        self.in_progress = false;
        match result {
            Ok(icon) => Some(listing.with_icon(icon)),
            Err(e) => {
                warn!(error = %e, "icon generation failed");
                self.notice = Some(Notice::from_error(ICON_FAILURE, &e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GenerationFailure;
    use crate::listing::ListingField;

    #[test]
    fn test_description_falls_back_to_app_name() {
        let listing = AppListing::new().with_field(ListingField::Title, "FitTrack");
        let mut surface = IconSurface::new();
        let request = surface.begin(&listing).unwrap();
        assert_eq!(request.description, "FitTrack");
        assert_eq!(request.style, IconStyle::FlatMinimalist);
    }

    #[test]
    fn test_prompt_wins_over_app_name() {
        let listing = AppListing::new().with_field(ListingField::Title, "FitTrack");
        let mut surface = IconSurface::new();
        surface.set_prompt("a blue dumbbell");
        surface.set_style(IconStyle::PixelArt);
        let request = surface.begin(&listing).unwrap();
        assert_eq!(request.description, "a blue dumbbell");
        assert_eq!(request.style, IconStyle::PixelArt);
    }

    #[test]
    fn test_finish_sets_icon() {
        let listing = AppListing::new();
        let mut surface = IconSurface::new();
        surface.begin(&listing).unwrap();
        let icon = IconRef::from_inline("image/png", "AAAA");
        let next = surface.finish(Ok(icon.clone()), &listing).unwrap();
        assert_eq!(next.icon_url(), Some(&icon));
        assert!(!surface.is_in_progress());
    }

    #[test]
    fn test_finish_failure_keeps_icon_and_sets_notice() {
        let icon = IconRef::from_inline("image/png", "AAAA");
        let listing = AppListing::new().with_icon(icon.clone());
        let mut surface = IconSurface::new();
        surface.begin(&listing).unwrap();
        assert!(surface
            .finish(Err(GenerationFailure::NoImage.into()), &listing)
            .is_none());
        assert_eq!(listing.icon_url(), Some(&icon));
        assert_eq!(surface.notice().unwrap().message, ICON_FAILURE);
    }
}
