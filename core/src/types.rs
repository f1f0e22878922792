//! Shared value types
//!
//! Shapes exchanged with the generation capability plus the enumerated
//! style descriptors the editing surfaces offer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proposed replacement metadata for a listing
///
/// `reasoning` is display-only and never merged into the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub reasoning: String,
}

/// Audit finding severity (ordinal, low < medium < high)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing field an audit finding refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueField {
    Title,
    ShortDescription,
    FullDescription,
    General,
}

impl IssueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueField::Title => "title",
            IssueField::ShortDescription => "shortDescription",
            IssueField::FullDescription => "fullDescription",
            IssueField::General => "general",
        }
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from a policy / ASO audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    pub severity: Severity,
    pub field: IssueField,
    pub message: String,
    pub suggestion: String,
}

/// Writing tone for generated metadata
///
/// Unknown descriptors are kept verbatim in `Custom` and passed through to
/// the prompt as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    ProfessionalTrustworthy,
    FunPlayful,
    MinimalistModern,
    UrgentSales,
    TechnicalDetailed,
    Custom(String),
}

impl Tone {
    /// Preset tones in menu order
    pub fn presets() -> [Tone; 5] {
        [
            Tone::ProfessionalTrustworthy,
            Tone::FunPlayful,
            Tone::MinimalistModern,
            Tone::UrgentSales,
            Tone::TechnicalDetailed,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Tone::ProfessionalTrustworthy => "Professional & Trustworthy",
            Tone::FunPlayful => "Fun & Playful",
            Tone::MinimalistModern => "Minimalist & Modern",
            Tone::UrgentSales => "Urgent & Sales-focused",
            Tone::TechnicalDetailed => "Technical & Detailed",
            Tone::Custom(label) => label,
        }
    }
}

impl From<&str> for Tone {
    fn from(label: &str) -> Self {
        let label = label.trim();
        Tone::presets()
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| Tone::Custom(label.to_string()))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Art style for generated icons
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconStyle {
    #[default]
    FlatMinimalist,
    Glossy3d,
    GradientModern,
    PixelArt,
    HandDrawn,
    Neumorphism,
    Custom(String),
}

impl IconStyle {
    /// Preset styles in menu order
    pub fn presets() -> [IconStyle; 6] {
        [
            IconStyle::FlatMinimalist,
            IconStyle::Glossy3d,
            IconStyle::GradientModern,
            IconStyle::PixelArt,
            IconStyle::HandDrawn,
            IconStyle::Neumorphism,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            IconStyle::FlatMinimalist => "Flat & Minimalist",
            IconStyle::Glossy3d => "3D Glossy",
            IconStyle::GradientModern => "Gradient & Modern",
            IconStyle::PixelArt => "Pixel Art",
            IconStyle::HandDrawn => "Hand Drawn",
            IconStyle::Neumorphism => "Neumorphism",
            IconStyle::Custom(label) => label,
        }
    }
}

impl From<&str> for IconStyle {
    fn from(label: &str) -> Self {
        let label = label.trim();
        IconStyle::presets()
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| IconStyle::Custom(label.to_string()))
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
