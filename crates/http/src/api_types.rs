//! Response envelope and request query types.

use serde::{Deserialize, Serialize};

/// `{"success", "data"?, "error"?, "message"?}` wrapper shared by every route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, message: None }
    }

    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub const fn failure(error: String) -> Self {
        Self { success: false, data: None, error: Some(error), message: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackerQuery {
    pub date: Option<String>,
    pub week: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct PatternIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub interaction_type: Option<String>,
    pub week: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<coach_core::CoachMessage>,
}
