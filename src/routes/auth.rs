use crate::{
    auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenIssuer},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use log::{debug, info};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns it (without the password hash).
///
/// ## Responses:
/// - `201 Created`: `{"user": User}`.
/// - `400 Bad Request`: Undecodable body, or the name or email is already registered.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let register_data = register_data.into_inner().normalized();
    register_data.validate()?;

    if User::name_or_email_taken(&pool, &register_data.name, &register_data.email).await? {
        return Err(AppError::BadRequest("Name or email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;
    let user = User::create(
        &pool,
        &register_data.name,
        &register_data.email,
        &password_hash,
    )
    .await?;

    info!("Registered user {} ({})", user.id, user.name);
    Ok(HttpResponse::Created().json(json!({ "user": user })))
}

/// Login user
///
/// Authenticates a user by name and password and returns a bearer token.
/// Unknown names and wrong passwords produce the same `401` response.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = match User::find_by_name(&pool, login_data.name.trim()).await? {
        Some(user) => user,
        None => {
            debug!("Login failed: no user named {:?}", login_data.name);
            return Err(invalid_credentials());
        }
    };

    if !verify_password(&login_data.password, &user.password_hash)? {
        debug!("Login failed: wrong password for user {}", user.id);
        return Err(invalid_credentials());
    }

    let token = issuer.issue(user.id)?;
    info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
