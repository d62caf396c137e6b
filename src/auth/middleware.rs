use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::debug;

use crate::auth::extractors::AuthenticatedUserId;
use crate::auth::token::TokenValidator;
use crate::error::AppError;

/// Rejects requests that do not carry a valid bearer token.
///
/// On success the caller's [`AuthenticatedUserId`] is stored in the request extensions;
/// on failure the wrapped service is never called and a 401 is returned.
pub struct AuthMiddleware {
    validator: Arc<TokenValidator>,
}

impl AuthMiddleware {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            validator: Arc::clone(&self.validator),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    validator: Arc<TokenValidator>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = bearer_token(
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
        );

        match self.validator.verify(token) {
            Ok(claims) => {
                req.extensions_mut()
                    .insert(AuthenticatedUserId(claims.identity()));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                debug!("Rejected request to {}: {} ({})", req.path(), err, err.kind());
                let response = AppError::from(err).error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Returns the token from an `Authorization: Bearer <token>` header value.
///
/// Anything not shaped exactly like that yields an empty token.
pub fn bearer_token(header_value: Option<&str>) -> &str {
    let Some(value) = header_value else {
        return "";
    };

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => token,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_shapes() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), "abc.def.ghi");
        assert_eq!(bearer_token(Some("Bearer   abc")), "abc");
        assert_eq!(bearer_token(None), "");
        assert_eq!(bearer_token(Some("")), "");
        assert_eq!(bearer_token(Some("Bearer")), "");
        assert_eq!(bearer_token(Some("bearer abc")), "");
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), "");
        assert_eq!(bearer_token(Some("Bearer abc extra")), "");
        assert_eq!(bearer_token(Some("abc.def.ghi")), "");
    }
}
