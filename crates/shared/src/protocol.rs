use serde::{Deserialize, Deserializer, Serialize};

pub const PROCESS_ROUTE: &str = "/api/process";
pub const SCRIPT_FIELD: &str = "script";
pub const VIDEOS_FIELD: &str = "videos";
pub const DOWNLOAD_PLACEHOLDER: &str = "#";

/// JSON body returned by the processing endpoint on success.
///
/// Only `matched_scenes` and `download_url` are interpreted; any other
/// fields are retained untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub matched_scenes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProcessResponse {
    pub fn matched_scenes(&self) -> u64 {
        self.matched_scenes.unwrap_or(0)
    }

    pub fn download_url(&self) -> &str {
        self.download_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DOWNLOAD_PLACEHOLDER)
    }
}

/// Reads any JSON value as a count: whole non-negative numbers (including
/// `3.0`) are kept, everything else counts as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    }))
}
