use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Project, Task, TaskInput},
};
use actix_web::{post, web, HttpResponse, Responder};
use log::info;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Creates a new task in one of the authenticated user's projects.
///
/// ## Request Body:
/// - `name`: 1 to 200 characters (required).
/// - `description` (optional): up to 1000 characters.
/// - `completion` (optional): 0 to 100, defaults to 0.
/// - `project_id`: a project owned by the caller (required).
///
/// ## Responses:
/// - `201 Created`: `{"data": Task}`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: The project does not exist or belongs to someone else.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/task")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    AuthenticatedUserId(user_id): AuthenticatedUserId,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    if !Project::is_owned_by(&pool, task_data.project_id, user_id).await? {
        return Err(AppError::NotFound("Project not found".into()));
    }

    let task = Task::create(&pool, &task_data).await?;
    info!(
        "User {} created task {} in project {}",
        user_id, task.id, task.project_id
    );

    Ok(HttpResponse::Created().json(json!({ "data": task })))
}
