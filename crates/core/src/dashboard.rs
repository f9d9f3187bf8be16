//! Dashboard payload served by the backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::entry::ProgressEntry;
use crate::video::Video;

/// Everything the dashboard shows, as returned by `GET /api/rag/dashboard`.
///
/// Every field has a default so a partial response still renders. The
/// AI-generated text fields are passed through from the model unchecked, so
/// they are decoded leniently: a bare value where a list is expected becomes
/// a one-item list, and a shape that makes no sense falls back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// AI estimate of time to recovery, e.g. "4 weeks"
    #[serde(default = "default_estimate", deserialize_with = "lenient_estimate")]
    pub estimated_recovery: String,

    /// Nutrition suggestions
    #[serde(default, deserialize_with = "lenient_list")]
    pub diet_plan: Vec<String>,

    /// AI summary of recent progress
    #[serde(default, deserialize_with = "lenient_list")]
    pub llm_summary: Vec<String>,

    /// Logged entries, oldest first
    #[serde(default)]
    pub progress_data: Vec<ProgressEntry>,

    /// Backend recovery percentage, 0-100
    #[serde(default)]
    pub recovery_percentage: u32,

    /// Recommended videos
    #[serde(default)]
    pub videos: Vec<Video>,

    /// Account creation timestamp as sent by the backend
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,
}

fn default_estimate() -> String {
    "N/A".to_string()
}

/// Text form of a scalar; `None` for null, arrays and objects.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        v @ (Value::Bool(_) | Value::Number(_)) => Some(v.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_estimate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_else(default_estimate))
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            estimated_recovery: default_estimate(),
            diet_plan: Vec::new(),
            llm_summary: Vec::new(),
            progress_data: Vec::new(),
            recovery_percentage: 0,
            videos: Vec::new(),
            created_at: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_payload_uses_defaults() {
        let data: DashboardData = serde_json::from_value(json!({
            "progressData": [
                { "date": "2024-06-01", "painLevel": 5, "mobility": 4, "strength": 4 }
            ],
            "recoveryPercentage": 40
        }))
        .unwrap();

        assert_eq!(data.estimated_recovery, "N/A");
        assert!(data.diet_plan.is_empty());
        assert_eq!(data.progress_data.len(), 1);
        assert_eq!(data.recovery_percentage, 40);
    }

    #[test]
    fn test_odd_ai_fields_still_decode() {
        let data: DashboardData = serde_json::from_value(json!({
            "estimatedRecovery": 6,
            "dietPlan": "Eat more protein",
            "llmSummary": ["Mobility improved", 3, null, { "tip": "ice" }],
            "createdAt": [2024, 5, 1],
            "progressData": [
                { "date": "2024-06-01", "painLevel": 5, "mobility": 4, "strength": 4 }
            ]
        }))
        .unwrap();

        assert_eq!(data.estimated_recovery, "6");
        assert_eq!(data.diet_plan, vec!["Eat more protein"]);
        assert_eq!(data.llm_summary, vec!["Mobility improved", "3"]);
        assert_eq!(data.created_at, "");
        assert_eq!(data.progress_data.len(), 1);
    }

    #[test]
    fn test_null_ai_fields_use_defaults() {
        let data: DashboardData = serde_json::from_value(json!({
            "estimatedRecovery": null,
            "dietPlan": null,
            "llmSummary": { "text": "unexpected" }
        }))
        .unwrap();

        assert_eq!(data.estimated_recovery, "N/A");
        assert!(data.diet_plan.is_empty());
        assert!(data.llm_summary.is_empty());
    }
}
