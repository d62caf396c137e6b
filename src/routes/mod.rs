pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::web;

use crate::error::AppError;

/// Public account endpoints, mounted under `/auth`.
pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register).service(auth::login);
}

/// Endpoints that require a bearer token, mounted under `/api` behind `AuthMiddleware`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(projects::create_project)
        .service(projects::get_projects_and_tasks)
        .service(tasks::create_task);
}

/// Renders JSON body errors in the same `{"error": ...}` shape as `AppError`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
