//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};

/// Success envelope wrapping every 2xx payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    /// Human-readable outcome.
    pub message: String,
    /// The payload itself.
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}

/// Request body for creating or replacing a todo.
///
/// All fields are required; they are optional here so that absence maps to
/// the API's own validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoPayload {
    /// Short title.
    pub title: Option<String>,
    /// Free-form body text.
    pub content: Option<String>,
    /// Workflow status.
    pub status: Option<String>,
    /// When the item is due.
    pub deadline: Option<DateTime<Utc>>,
}

impl TodoPayload {
    /// Validate that every field is present and non-empty.
    pub fn into_fields(self) -> ApiResult<(String, String, String, DateTime<Utc>)> {
        match (self.title, self.content, self.status, self.deadline) {
            (Some(title), Some(content), Some(status), Some(deadline))
                if !title.is_empty() && !content.is_empty() && !status.is_empty() =>
            {
                Ok((title, content, status, deadline))
            }
            _ => Err(ApiError::Validation("All fields are required".to_string())),
        }
    }
}

/// Profile data exposed to the authenticated caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileData {
    /// Username from the verified token.
    pub username: String,
    /// Email from the verified token.
    pub email: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
