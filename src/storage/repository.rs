//! Repository layer for database operations.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::domain::Todo;
use crate::error::{ApiError, ApiResult};
use crate::storage::models::TodoRow;

/// Repository for todo records.
#[derive(Clone)]
pub struct TodoRepository {
    pool: SqlitePool,
}

impl TodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> ApiResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                status TEXT NOT NULL,
                deadline TEXT NOT NULL,
                author TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_todos_author ON todos(author);
            CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new todo.
    pub async fn create_todo(&self, todo: &Todo) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, title, content, status, deadline, author, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(todo.id.to_string())
        .bind(&todo.title)
        .bind(&todo.content)
        .bind(&todo.status)
        .bind(todo.deadline.to_rfc3339())
        .bind(&todo.author)
        .bind(todo.created_at.to_rfc3339())
        .bind(todo.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all todos, newest first.
    pub async fn list_todos(&self) -> ApiResult<Vec<Todo>> {
        let rows: Vec<TodoRow> =
            sqlx::query_as("SELECT * FROM todos ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Get a todo by ID.
    pub async fn get_todo(&self, id: Uuid) -> ApiResult<Todo> {
        let row: TodoRow = sqlx::query_as("SELECT * FROM todos WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

        row.try_into()
    }

    /// Replace a todo's fields, bumping `updated_at`.
    pub async fn update_todo(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        status: &str,
        deadline: DateTime<Utc>,
    ) -> ApiResult<Todo> {
        let updated_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = ?, content = ?, status = ?, deadline = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(status)
        .bind(deadline.to_rfc3339())
        .bind(&updated_at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Todo not found".to_string()));
        }

        self.get_todo(id).await
    }

    /// Delete a todo, returning the deleted record.
    pub async fn delete_todo(&self, id: Uuid) -> ApiResult<Todo> {
        let todo = self.get_todo(id).await?;

        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(todo)
    }
}
