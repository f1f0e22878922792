//! Response schemas sent with structured requests
//!
//! Uses the capability's schema dialect (upper-case type names). The
//! capability enforces these on a best-effort basis only; `parse` still
//! validates every response.

use serde_json::{json, Value as JsonValue};

/// Required keys of an optimization result, in wire form
pub const OPTIMIZATION_FIELDS: [&str; 4] =
    ["title", "shortDescription", "fullDescription", "reasoning"];

/// Required keys of an audit issue, in wire form
pub const AUDIT_ISSUE_FIELDS: [&str; 4] = ["severity", "field", "message", "suggestion"];

/// Schema for `generate_metadata`: one object, four required strings
pub fn optimization_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "Optimized app title (max 30 chars)"
            },
            "shortDescription": {
                "type": "STRING",
                "description": "Optimized short description (max 80 chars)"
            },
            "fullDescription": {
                "type": "STRING",
                "description": "Full store description"
            },
            "reasoning": {
                "type": "STRING",
                "description": "Brief explanation of the choices made"
            }
        },
        "required": OPTIMIZATION_FIELDS
    })
}

/// Schema for `audit_listing`: a list of issue objects
pub fn audit_schema() -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "severity": { "type": "STRING", "enum": ["low", "medium", "high"] },
                "field": {
                    "type": "STRING",
                    "enum": ["title", "shortDescription", "fullDescription", "general"]
                },
                "message": { "type": "STRING" },
                "suggestion": { "type": "STRING" }
            },
            "required": AUDIT_ISSUE_FIELDS
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_schema_requires_all_fields() {
        let schema = optimization_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, OPTIMIZATION_FIELDS);
        for field in OPTIMIZATION_FIELDS {
            assert_eq!(schema["properties"][field]["type"], "STRING");
        }
    }

    #[test]
    fn test_audit_schema_enums() {
        let schema = audit_schema();
        assert_eq!(schema["type"], "ARRAY");
        let item = &schema["items"];
        assert_eq!(item["properties"]["severity"]["enum"].as_array().unwrap().len(), 3);
        assert_eq!(item["properties"]["field"]["enum"].as_array().unwrap().len(), 4);
        assert_eq!(item["required"].as_array().unwrap().len(), 4);
    }
}
