//! Database models for Taskgate.
//!
//! These are the row types returned by SQLx queries.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::Todo;
use crate::error::ApiError;

/// Database row for the todos table.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub deadline: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

impl TryFrom<TodoRow> for Todo {
    type Error = ApiError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: Uuid::parse_str(&row.id).map_err(|e| ApiError::Internal(e.to_string()))?,
            title: row.title,
            content: row.content,
            status: row.status,
            deadline: parse_timestamp(&row.deadline)?,
            author: row.author,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
