use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::Validate;

/// Input structure for creating a task inside a project.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The name of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Percentage complete, 0 to 100. Defaults to 0.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub completion: f32,

    /// The project the task belongs to. Must be owned by the caller.
    pub project_id: i32,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub completion: f32,
    pub project_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub async fn create(pool: &PgPool, input: &TaskInput) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (name, description, completion, project_id) VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, completion, project_id, created_at, updated_at",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.completion)
        .bind(input.project_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[i32],
    ) -> Result<Vec<Task>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Task>(
            "SELECT id, name, description, completion, project_id, created_at, updated_at
             FROM tasks WHERE project_id = ANY($1) ORDER BY id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }
}
