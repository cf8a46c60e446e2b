//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The rendered data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Route the data was rendered for, when it came from a view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                route: None,
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn for_route(route: impl Into<String>, data: T) -> Self {
        let mut output = Self::new(data);
        output.meta.route = Some(route.into());
        output
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format a view's data as pretty-printed JSON tagged with its route
pub fn format_route_json<T: Serialize + ?Sized>(
    route: &str,
    data: &T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::for_route(route, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Debug, Serialize)]
    struct TestItem {
        id: u64,
        title: String,
    }

    #[test]
    fn test_format_json_wraps_with_meta() {
        let items = vec![TestItem {
            id: 1,
            title: "Chat bot".to_string(),
        }];

        let result: Value = serde_json::from_str(&format_json(&items).unwrap()).unwrap();

        assert_eq!(result["data"][0]["title"], "Chat bot");
        assert_eq!(result["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(result["meta"]["timestamp"].is_string());
        assert!(result["meta"].get("route").is_none());
    }

    #[test]
    fn test_format_route_json() {
        let items: Vec<TestItem> = vec![];
        let result: Value =
            serde_json::from_str(&format_route_json("/applied-projects", &items).unwrap())
                .unwrap();

        assert_eq!(result["data"], serde_json::json!([]));
        assert_eq!(result["meta"]["route"], "/applied-projects");
    }
}
