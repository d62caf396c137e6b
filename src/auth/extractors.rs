use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};

use crate::error::{AppError, AUTHENTICATION_REQUIRED};
use crate::models::User;

/// Extracts the authenticated user's ID from request extensions.
///
/// This extractor is intended to be used on routes protected by `AuthMiddleware`,
/// which validates the bearer token once and inserts the resulting ID.
///
/// If the ID is not present (the route is not behind the middleware), this extractor
/// returns `AppError::Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticated_user_id(req))
    }
}

fn authenticated_user_id(req: &HttpRequest) -> Result<AuthenticatedUserId, AppError> {
    req.extensions()
        .get::<AuthenticatedUserId>()
        .copied()
        .ok_or_else(|| AppError::Unauthorized(AUTHENTICATION_REQUIRED.into()))
}

/// The full record of the authenticated user, loaded from the database.
///
/// Relies on the identity attached by `AuthMiddleware`; the token is not parsed again.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = authenticated_user_id(req);
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move {
            let AuthenticatedUserId(user_id) = user_id?;
            let pool = pool.ok_or_else(|| {
                AppError::InternalServerError("Database pool not configured".into())
            })?;

            User::find_by_id(&pool, user_id)
                .await?
                .map(CurrentUser)
                .ok_or_else(|| AppError::NotFound("User not found".into()))
        })
    }
}
