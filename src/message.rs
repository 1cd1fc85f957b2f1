// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::UNKNOWN_ERROR;

/// Body of `POST /api/v1/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Forwarded in the body, not as a header. Left out entirely when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ChatRequest {
    pub fn new(query: &str, api_key: Option<&str>) -> Self {
        Self {
            query: query.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }
}

/// Answer returned by the service on a 2xx status.
///
/// Missing or `null` fields fall back to their defaults; the service treats
/// `query`, `context_found` and `processing_time` as optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    /// Echo of the (server-normalised) query.
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context_found: bool,
    /// Seconds spent by the service.
    #[serde(deserialize_with = "null_as_default")]
    pub processing_time: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app_name: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub usage: ApiUsage,
    pub example_request: ChatRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUsage {
    pub endpoint: String,
    pub method: String,
    pub max_query_length: u32,
    #[serde(default)]
    pub supported_topics: Vec<String>,
}

/// Pull `detail.message` out of a rejection body.
///
/// Any body that isn't JSON, or doesn't carry a non-empty string there
/// (FastAPI validation errors send `detail` as a list), yields `"Unknown error"`.
pub fn rejection_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return UNKNOWN_ERROR.to_string();
    };

    value
        .pointer("/detail/message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| UNKNOWN_ERROR.to_string(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_key_is_omitted_when_absent() {
        let request = ChatRequest::new("What is a Sui object?", None);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "query": "What is a Sui object?" }));
    }

    #[test]
    fn api_key_is_sent_unmodified() {
        let request = ChatRequest::new("  spaced query ", Some("k-123 "));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "query": "  spaced query ", "api_key": "k-123 " }));
    }

    #[test]
    fn empty_query_is_not_validated() {
        let request = ChatRequest::new("", None);
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"query":""}"#);
    }

    #[test]
    fn partial_response_uses_defaults() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"success": false, "response": "nothing found"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.response, "nothing found");
        assert_eq!(response.query, "");
        assert!(!response.context_found);
        assert_eq!(response.processing_time, 0.0);
    }

    #[test]
    fn null_optional_fields_use_defaults() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"success": true, "response": "hi", "query": null, "context_found": null, "processing_time": null}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.response, "hi");
        assert_eq!(response.query, "");
        assert!(!response.context_found);
        assert_eq!(response.processing_time, 0.0);
    }

    #[test]
    fn rejection_message_extraction() {
        assert_eq!(
            rejection_message(br#"{"detail": {"error": "Validation Error", "message": "bad query"}}"#),
            "bad query"
        );
        assert_eq!(rejection_message(b""), "Unknown error");
        assert_eq!(rejection_message(b"<html>502</html>"), "Unknown error");
        assert_eq!(rejection_message(br#"{"detail": "Not Found"}"#), "Unknown error");
        assert_eq!(rejection_message(br#"{"detail": {"message": ""}}"#), "Unknown error");
        assert_eq!(
            rejection_message(br#"{"detail": [{"loc": ["body", "query"], "msg": "field required"}]}"#),
            "Unknown error"
        );
    }
}
