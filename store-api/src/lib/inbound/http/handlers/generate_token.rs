use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::GenerateTokenCommand;
use crate::inbound::http::router::AppState;

/// Exchange email and password for an access token.
///
/// Unknown email and wrong password produce the same 401.
pub async fn generate_token(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTokenRequest>, JsonRejection>,
) -> Result<ApiSuccess<GenerateTokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let access_token = state
        .user_service
        .generate_token(GenerateTokenCommand {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GenerateTokenResponseData { access_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateTokenRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateTokenResponseData {
    pub access_token: String,
}
