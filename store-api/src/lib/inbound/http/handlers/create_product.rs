use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProductResponseData;
use crate::domain::product::models::CreateProductCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    let Json(body) = payload?;

    let product = state
        .product_service
        .create_product(CreateProductCommand {
            name: body.name,
            price: body.price,
        })
        .await?;

    tracing::info!(
        product_id = %product.id,
        user_id = %caller.user_id,
        "Product created"
    );

    Ok(ApiSuccess::new(StatusCode::CREATED, (&product).into()))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    name: String,
    price: f64,
}
