use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Project, ProjectInput, Task, UserOverview},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use log::info;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Creates a new project owned by the authenticated user.
///
/// ## Request Body:
/// - `name`: 1 to 200 characters (required).
/// - `description` (optional): up to 1000 characters.
///
/// ## Responses:
/// - `201 Created`: `{"data": Project}`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: The token's user no longer exists.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/project")]
pub async fn create_project(
    pool: web::Data<PgPool>,
    CurrentUser(user): CurrentUser,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = Project::create(&pool, &project_data, user.id).await?;
    info!("User {} created project {}", user.id, project.id);

    Ok(HttpResponse::Created().json(json!({ "data": project })))
}

/// Returns the authenticated user with all of their projects and each project's tasks.
#[get("/all")]
pub async fn get_projects_and_tasks(
    pool: web::Data<PgPool>,
    CurrentUser(user): CurrentUser,
) -> Result<impl Responder, AppError> {
    let projects = Project::list_for_user(&pool, user.id).await?;
    let project_ids: Vec<i32> = projects.iter().map(|project| project.id).collect();
    let tasks = Task::list_for_projects(&pool, &project_ids).await?;

    Ok(HttpResponse::Ok().json(json!({
        "data": UserOverview::assemble(user, projects, tasks)
    })))
}
