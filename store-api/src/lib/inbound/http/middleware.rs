use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens on protected routes.
///
/// Every rejection produces the same 401 body; the reason is only logged.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(&req).ok_or_else(|| {
            tracing::debug!("Missing or malformed Authorization header");
            ApiError::Unauthorized
        })?;

        authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            ApiError::Unauthorized
        })?
    };

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::debug!(reason = %e, "Token subject is not a user id");
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
