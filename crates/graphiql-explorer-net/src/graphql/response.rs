//! What a fetch resolves with.

use serde_json::Value;
use std::fmt;

/// What a fetch resolves with: the body parsed as JSON, or the raw text
/// when it is not JSON.
///
/// Servers answer with plain text for gateway errors, proxies, and crashes;
/// the explorer shows that text rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The body was valid JSON.
    Json(Value),
    /// The body was not JSON; the text is returned unchanged.
    Text(String),
}

impl FetchResult {
    /// Classify a response body.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(err) => {
                tracing::trace!(target: "graphiql_explorer_net::graphql", %err, "response body is not JSON");
                Self::Text(body)
            }
        }
    }

    /// Whether the body parsed as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// The JSON value, if any.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The raw text, if the body was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Render the result the way the explorer's result pane shows it.
    ///
    /// JSON is pretty-printed with two-space indentation; text is returned
    /// as-is.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let result = FetchResult::from_body(r#"{"data":{"a":1}}"#.to_string());
        assert_eq!(result, FetchResult::Json(json!({"data": {"a": 1}})));
        assert_eq!(result.as_json().unwrap()["data"]["a"], 1);
    }

    #[test]
    fn test_text_body() {
        let result = FetchResult::from_body("oops".to_string());
        assert_eq!(result, FetchResult::Text("oops".to_string()));
        assert_eq!(result.as_text(), Some("oops"));
        assert!(result.as_json().is_none());
    }

    #[test]
    fn test_empty_body_is_text() {
        assert_eq!(
            FetchResult::from_body(String::new()),
            FetchResult::Text(String::new())
        );
    }

    #[test]
    fn test_display_pretty_prints_json() {
        let result = FetchResult::Json(json!({"data": null}));
        assert_eq!(result.to_string(), "{\n  \"data\": null\n}");
    }

    #[test]
    fn test_error_response_is_json() {
        let result = FetchResult::from_body(
            r#"{"errors":[{"message":"User not found","path":["user",0]}]}"#.to_string(),
        );

        let errors = &result.as_json().unwrap()["errors"];
        assert_eq!(errors[0]["message"], "User not found");
        assert_eq!(errors[0]["path"], json!(["user", 0]));
    }
}
