//! Validate-or-fail boundary for structured responses
//!
//! Everything downstream trusts these shapes unconditionally, so a response
//! either matches completely or the whole operation fails:
//! - not JSON → `Unparseable`
//! - JSON with a missing field, wrong type, or unknown enum value →
//!   `ValidationMismatch`

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::gateway::errors::GenerationFailure;
use crate::types::{AuditIssue, OptimizationResult};

/// Strip a surrounding Markdown code fence (```json ... ```) if present
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag line
    let rest = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse response text into `T`, classifying failures
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, GenerationFailure> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    let value: JsonValue =
        serde_json::from_str(body).map_err(|e| GenerationFailure::Unparseable(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| GenerationFailure::ValidationMismatch(e.to_string()))
}

/// Parse a metadata response
pub fn parse_optimization(text: &str) -> Result<OptimizationResult, GenerationFailure> {
    parse_structured(text)
}

/// Parse an audit response
///
/// An empty list is a valid result. One bad item rejects the whole list.
pub fn parse_audit(text: &str) -> Result<Vec<AuditIssue>, GenerationFailure> {
    parse_structured(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueField, Severity};

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[]\n```\n"), "[]");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_optimization_complete() {
        let result = parse_optimization(
            r#"{"title":"T","shortDescription":"S","fullDescription":"F","reasoning":"R"}"#,
        )
        .unwrap();
        assert_eq!(result.title, "T");
        assert_eq!(result.reasoning, "R");
    }

    #[test]
    fn test_parse_optimization_each_missing_field_is_mismatch() {
        let fields = ["title", "shortDescription", "fullDescription", "reasoning"];
        for missing in fields {
            let mut obj = serde_json::Map::new();
            for field in fields.iter().filter(|f| **f != missing) {
                obj.insert(field.to_string(), JsonValue::String("x".to_string()));
            }
            let text = JsonValue::Object(obj).to_string();
            let err = parse_optimization(&text).unwrap_err();
            assert!(
                matches!(err, GenerationFailure::ValidationMismatch(ref m) if m.contains(missing)),
                "missing {} gave {:?}",
                missing,
                err
            );
        }
    }

    #[test]
    fn test_parse_optimization_wrong_type_is_mismatch() {
        let err = parse_optimization(
            r#"{"title":30,"shortDescription":"S","fullDescription":"F","reasoning":"R"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationFailure::ValidationMismatch(_)));
    }

    #[test]
    fn test_parse_optimization_not_json_is_unparseable() {
        let err = parse_optimization("Here is your listing: Title...").unwrap_err();
        assert!(matches!(err, GenerationFailure::Unparseable(_)));
    }

    #[test]
    fn test_parse_audit_empty_list() {
        assert!(parse_audit("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_audit_keeps_order() {
        let issues = parse_audit(
            r#"[
                {"severity":"low","field":"general","message":"a","suggestion":"x"},
                {"severity":"high","field":"title","message":"b","suggestion":"y"}
            ]"#,
        )
        .unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Low);
        assert_eq!(issues[1].field, IssueField::Title);
    }

    #[test]
    fn test_parse_audit_unknown_severity_rejects_all() {
        let err = parse_audit(
            r#"[
                {"severity":"low","field":"general","message":"a","suggestion":"x"},
                {"severity":"critical","field":"title","message":"b","suggestion":"y"}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationFailure::ValidationMismatch(_)));
    }

    #[test]
    fn test_parse_audit_object_instead_of_list_is_mismatch() {
        let err = parse_audit(r#"{"issues":[]}"#).unwrap_err();
        assert!(matches!(err, GenerationFailure::ValidationMismatch(_)));
    }

    #[test]
    fn test_parse_blank_is_empty_response() {
        assert_eq!(parse_audit("  ").unwrap_err(), GenerationFailure::EmptyResponse);
    }
}
