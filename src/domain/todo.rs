//! Todo domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A todo record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Free-form body text.
    pub content: String,
    /// Workflow status (free-form, e.g. "pending", "done").
    pub status: String,
    /// When the item is due.
    pub deadline: DateTime<Utc>,
    /// Identity id of the creator, taken from the verified token.
    pub author: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new todo authored by the given identity.
    pub fn new(
        title: String,
        content: String,
        status: String,
        deadline: DateTime<Utc>,
        author: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            status,
            deadline,
            author,
            created_at: now,
            updated_at: now,
        }
    }
}
