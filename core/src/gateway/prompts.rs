//! Prompt builders
//!
//! Inputs are embedded verbatim. Limits are stated to the capability but
//! never enforced on what comes back.

use crate::listing::{AppListing, SHORT_DESCRIPTION_LIMIT, TITLE_LIMIT, FULL_DESCRIPTION_LIMIT};

/// Prompt for listing metadata
///
/// `app_name_or_idea` may be empty; the capability is expected to invent a
/// concept in that case.
pub fn metadata_prompt(app_name_or_idea: &str, keywords: &str, tone: &str) -> String {
    format!(
        "You are an expert App Store Optimization (ASO) specialist.
Create a Google Play Store listing for an app with the following details:
- App Name/Idea: {app_name_or_idea}
- Keywords: {keywords}
- Desired Tone: {tone}

Constraints:
- Title: Max {TITLE_LIMIT} characters. Catchy, and includes the main keyword if possible.
- Short Description: Max {SHORT_DESCRIPTION_LIMIT} characters. Hooks the user immediately.
- Full Description: Max {FULL_DESCRIPTION_LIMIT} characters. Structured with headers, clear value propositions and features. Markdown is allowed.

Respond with structured JSON containing exactly these string fields: title, shortDescription, fullDescription, reasoning."
    )
}

/// Prompt for an app icon
pub fn icon_prompt(description: &str, style: &str) -> String {
    format!(
        "Design a mobile app icon.
Subject: {description}
Style: {style}

Requirements:
- High contrast, clearly visible at small sizes.
- Square aspect ratio (1:1).
- No text inside the icon.
- Professional, polished vector art style."
    )
}

/// Prompt for a policy / ASO audit of a listing snapshot
pub fn audit_prompt(listing: &AppListing) -> String {
    format!(
        "Audit this Google Play Store listing for policy violations and ASO improvements.

Listing Data:
- Title: \"{title}\"
- Short Description: \"{short}\"
- Full Description: \"{full}\"
- Keywords: {keywords}

Rules:
- Title limit: {TITLE_LIMIT} chars.
- Short Description limit: {SHORT_DESCRIPTION_LIMIT} chars.
- No keyword stuffing.
- No misleading or unsubstantiated claims (e.g. \"Best\", \"#1\", \"No Ads\" if not true).
- Clarity and grammar check.

Return a JSON list of issues. Return an empty list if there are none.",
        title = listing.app_name(),
        short = listing.short_description(),
        full = listing.full_description(),
        keywords = listing.keywords_text(),
    )
}
