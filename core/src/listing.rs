//! Listing model
//!
//! The draft store entry for the session. Fields are private: every change
//! goes through a named operation that returns a new snapshot, so the
//! invariants below hold at this single boundary:
//! - text fields and keywords are always present (empty at creation)
//! - the icon is either absent or a non-empty reference
//!
//! Character limits are advisory. Nothing here truncates or rejects long
//! text; `counters()` reports the state for display.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::OptimizationResult;

/// Title limit (characters)
pub const TITLE_LIMIT: usize = 30;
/// Short description limit (characters)
pub const SHORT_DESCRIPTION_LIMIT: usize = 80;
/// Full description limit (characters)
pub const FULL_DESCRIPTION_LIMIT: usize = 4000;
/// Category assigned at creation
pub const DEFAULT_CATEGORY: &str = "Productivity";

const UNTITLED: &str = "Untitled App";

/// Displayable image reference (a `data:` URI for generated icons)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IconRef(String);

/// Rejected empty icon reference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("icon reference must not be empty")]
pub struct EmptyIconRef;

/// Icon payload could not be decoded to bytes
#[derive(Debug, thiserror::Error)]
pub enum IconDecodeError {
    #[error("icon is not an inline base64 data URI")]
    NotInline,

    #[error("icon payload is not valid base64: {0}")]
    Payload(#[from] base64::DecodeError),
}

impl IconRef {
    /// Wrap an existing reference; `None` if it is blank
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(Self(reference))
        }
    }

    /// Build a self-contained reference from an inline payload
    pub fn from_inline(mime_type: &str, base64_data: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, base64_data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME type of an inline reference
    pub fn mime_type(&self) -> Option<&str> {
        let (header, _) = self.split_inline()?;
        Some(header)
    }

    /// Decode an inline reference into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, IconDecodeError> {
        let (_, payload) = self.split_inline().ok_or(IconDecodeError::NotInline)?;
        Ok(STANDARD.decode(payload)?)
    }

    fn split_inline(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        Some((mime, payload))
    }
}

impl TryFrom<String> for IconRef {
    type Error = EmptyIconRef;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        IconRef::new(value).ok_or(EmptyIconRef)
    }
}

impl From<IconRef> for String {
    fn from(icon: IconRef) -> Self {
        icon.0
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable text fields of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Title,
    ShortDescription,
    FullDescription,
    Category,
}

impl ListingField {
    /// Advisory character limit, if the field has one
    pub fn limit(&self) -> Option<usize> {
        match self {
            ListingField::Title => Some(TITLE_LIMIT),
            ListingField::ShortDescription => Some(SHORT_DESCRIPTION_LIMIT),
            ListingField::FullDescription => Some(FULL_DESCRIPTION_LIMIT),
            ListingField::Category => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListingField::Title => "App Title",
            ListingField::ShortDescription => "Short Description",
            ListingField::FullDescription => "Full Description",
            ListingField::Category => "Category",
        }
    }
}

/// Character counter for one limited field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCounter {
    pub field: ListingField,
    pub length: usize,
    pub limit: usize,
}

impl FieldCounter {
    fn measure(field: ListingField, text: &str, limit: usize) -> Self {
        Self {
            field,
            length: text.chars().count(),
            limit,
        }
    }

    /// True when the text is over the advisory limit (warning state)
    pub fn is_exceeded(&self) -> bool {
        self.length > self.limit
    }
}

impl fmt::Display for FieldCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.length, self.limit)
    }
}

/// The draft store listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppListing {
    app_name: String,
    short_description: String,
    full_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<IconRef>,
    category: String,
    keywords: Vec<String>,
}

impl Default for AppListing {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            short_description: String::new(),
            full_description: String::new(),
            icon_url: None,
            category: DEFAULT_CATEGORY.to_string(),
            keywords: Vec::new(),
        }
    }
}

impl AppListing {
    /// Empty listing as created at session start
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty listing with a configured starting category
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn full_description(&self) -> &str {
        &self.full_description
    }

    pub fn icon_url(&self) -> Option<&IconRef> {
        self.icon_url.as_ref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Read one text field
    pub fn field(&self, field: ListingField) -> &str {
        match field {
            ListingField::Title => &self.app_name,
            ListingField::ShortDescription => &self.short_description,
            ListingField::FullDescription => &self.full_description,
            ListingField::Category => &self.category,
        }
    }

    /// Sidebar label: the app name, or a placeholder when unnamed
    pub fn display_name(&self) -> &str {
        if self.app_name.is_empty() {
            UNTITLED
        } else {
            &self.app_name
        }
    }

    /// Keywords as the comma-separated text the metadata editor shows
    pub fn keywords_text(&self) -> String {
        self.keywords.join(", ")
    }

    /// New snapshot with one text field replaced
    pub fn with_field(&self, field: ListingField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ListingField::Title => next.app_name = value,
            ListingField::ShortDescription => next.short_description = value,
            ListingField::FullDescription => next.full_description = value,
            ListingField::Category => next.category = value,
        }
        next
    }

    /// New snapshot with the keyword sequence replaced
    pub fn with_keywords(&self, keywords: Vec<String>) -> Self {
        Self {
            keywords,
            ..self.clone()
        }
    }

    /// New snapshot with the icon set
    pub fn with_icon(&self, icon: IconRef) -> Self {
        Self {
            icon_url: Some(icon),
            ..self.clone()
        }
    }

    /// New snapshot with accepted metadata suggestions applied
    ///
    /// Title and both descriptions are taken from the result; keywords from
    /// the editor input that produced it. Reasoning is not stored.
    pub fn apply_metadata_result(&self, result: &OptimizationResult, keywords: Vec<String>) -> Self {
        Self {
            app_name: result.title.clone(),
            short_description: result.short_description.clone(),
            full_description: result.full_description.clone(),
            keywords,
            ..self.clone()
        }
    }

    /// Counters for the three limited fields, in editor order
    pub fn counters(&self) -> [FieldCounter; 3] {
        [
            FieldCounter::measure(ListingField::Title, &self.app_name, TITLE_LIMIT),
            FieldCounter::measure(
                ListingField::ShortDescription,
                &self.short_description,
                SHORT_DESCRIPTION_LIMIT,
            ),
            FieldCounter::measure(
                ListingField::FullDescription,
                &self.full_description,
                FULL_DESCRIPTION_LIMIT,
            ),
        ]
    }

    /// Counter for a single field (`None` for unlimited fields)
    pub fn counter(&self, field: ListingField) -> Option<FieldCounter> {
        let limit = field.limit()?;
        Some(FieldCounter::measure(field, self.field(field), limit))
    }
}

/// Split comma-separated keyword input
///
/// Entries are trimmed and blanks dropped. Order and duplicates are kept.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
