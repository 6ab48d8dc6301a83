use serde::Deserialize;
use serde_json::Value;

/// Envelope returned by `GET {api_path}all`. Every level is optional; list
/// items stay as raw JSON so one malformed record does not sink the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllResponse {
    #[serde(default)]
    pub teachers: Option<Vec<Value>>,
    #[serde(default)]
    pub rooms: Option<Vec<Value>>,
    #[serde(default)]
    pub classes: Option<Vec<Value>>,
    #[serde(default)]
    pub week: Option<WeekPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPayload {
    #[serde(default)]
    pub week: Option<i32>,
    #[serde(default)]
    pub dates: Option<Vec<String>>,
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub hour_offsets: Option<Vec<Value>>,
}
