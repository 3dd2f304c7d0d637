use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProductResponseData;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateProductRequest {
    name: String,
    price: f64,
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    // Parse path and body at HTTP boundary - errors automatically converted
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;
    let Json(body) = payload?;

    state
        .product_service
        .update_product(
            &product_id,
            UpdateProductCommand {
                name: body.name,
                price: body.price,
            },
        )
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
