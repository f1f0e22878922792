//! Store preview renderer
//!
//! Projects a listing onto a storefront mock. Pure and infallible: empty
//! fields render as placeholders, never as errors.

use serde::Serialize;

use crate::listing::{AppListing, IconRef};

pub const TITLE_PLACEHOLDER: &str = "App Name";
pub const ICON_PLACEHOLDER: &str = "No Icon";
pub const SHORT_DESCRIPTION_PLACEHOLDER: &str =
    "This is a short description of the application to hook the user.";
pub const FULL_DESCRIPTION_PLACEHOLDER: &str = "Full description goes here...";

pub const DEVELOPER: &str = "Google Commerce Ltd";
pub const STORE_NOTICE: &str = "Contains ads • In-app purchases";
pub const RATING: &str = "4.7";
pub const CONTENT_RATING: &str = "E";
pub const SCREENSHOT_SLOTS: usize = 3;
pub const INSTALL_LABEL: &str = "Install";

const MAX_TAGS: usize = 3;

/// Text slot that may be showing a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewText {
    pub text: String,
    pub is_placeholder: bool,
}

impl PreviewText {
    fn or_placeholder(value: &str, placeholder: &str) -> Self {
        if value.is_empty() {
            Self {
                text: placeholder.to_string(),
                is_placeholder: true,
            }
        } else {
            Self {
                text: value.to_string(),
                is_placeholder: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum IconSlot {
    Image(IconRef),
    Placeholder(&'static str),
}

/// Storefront mock of one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    pub icon: IconSlot,
    pub title: PreviewText,
    pub developer: &'static str,
    pub store_notice: &'static str,
    pub rating: &'static str,
    pub content_rating: &'static str,
    pub category: String,
    pub screenshot_slots: usize,
    pub install_label: &'static str,
    pub short_description: PreviewText,
    pub full_description: PreviewText,
    pub tags: Vec<String>,
}

/// Render the storefront mock for `listing`
pub fn render_preview(listing: &AppListing) -> PreviewCard {
    let icon = match listing.icon_url() {
        Some(icon) => IconSlot::Image(icon.clone()),
        None => IconSlot::Placeholder(ICON_PLACEHOLDER),
    };

    PreviewCard {
        icon,
        title: PreviewText::or_placeholder(listing.app_name(), TITLE_PLACEHOLDER),
        developer: DEVELOPER,
        store_notice: STORE_NOTICE,
        rating: RATING,
        content_rating: CONTENT_RATING,
        category: listing.category().to_string(),
        screenshot_slots: SCREENSHOT_SLOTS,
        install_label: INSTALL_LABEL,
        short_description: PreviewText::or_placeholder(
            listing.short_description(),
            SHORT_DESCRIPTION_PLACEHOLDER,
        ),
        full_description: PreviewText::or_placeholder(
            listing.full_description(),
            FULL_DESCRIPTION_PLACEHOLDER,
        ),
        tags: listing.keywords().iter().take(MAX_TAGS).cloned().collect(),
    }
}

impl PreviewCard {
    /// Plain-text rendering, one entry per line
    pub fn to_text_lines(&self) -> Vec<String> {
        let icon = match &self.icon {
            IconSlot::Image(icon) => format!("[icon {}]", icon.mime_type().unwrap_or("image")),
            IconSlot::Placeholder(label) => format!("[{}]", label),
        };

        let mut lines = vec![
            format!("{}  {}", icon, self.title.text),
            self.developer.to_string(),
            self.store_notice.to_string(),
            format!(
                "{} ★   {}   {}",
                self.rating, self.content_rating, self.category
            ),
            format!("[ {} ]", self.install_label),
            (1..=self.screenshot_slots)
                .map(|n| format!("[screenshot {}]", n))
                .collect::<Vec<_>>()
                .join(" "),
            String::new(),
            "About this app".to_string(),
            self.short_description.text.clone(),
            String::new(),
        ];
        lines.extend(self.full_description.text.lines().map(str::to_string));
        if !self.tags.is_empty() {
            lines.push(String::new());
            lines.push(
                self.tags
                    .iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join("  "),
            );
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingField;

    #[test]
    fn test_empty_listing_renders_placeholders() {
        let card = render_preview(&AppListing::new());
        assert_eq!(card.title.text, TITLE_PLACEHOLDER);
        assert!(card.title.is_placeholder);
        assert_eq!(card.icon, IconSlot::Placeholder("No Icon"));
        assert_eq!(card.short_description.text, SHORT_DESCRIPTION_PLACEHOLDER);
        assert_eq!(card.full_description.text, FULL_DESCRIPTION_PLACEHOLDER);
        assert!(card.tags.is_empty());
        assert_eq!(card.category, "Productivity");
    }

    #[test]
    fn test_filled_fields_replace_placeholders() {
        let listing = AppListing::new()
            .with_field(ListingField::Title, "FitTrack")
            .with_field(ListingField::FullDescription, "Line one\nLine two");
        let card = render_preview(&listing);
        assert_eq!(card.title.text, "FitTrack");
        assert!(!card.title.is_placeholder);
        assert!(card.short_description.is_placeholder);

        let lines = card.to_text_lines();
        assert!(lines.contains(&"Line two".to_string()));
        assert!(lines[0].ends_with("FitTrack"));
    }

    #[test]
    fn test_static_chrome() {
        let card = render_preview(&AppListing::new());
        let lines = card.to_text_lines();
        assert!(lines.contains(&"Google Commerce Ltd".to_string()));
        assert!(lines.contains(&"Contains ads • In-app purchases".to_string()));
        assert!(lines.contains(&"[ Install ]".to_string()));
        assert_eq!(card.screenshot_slots, 3);
    }
}
