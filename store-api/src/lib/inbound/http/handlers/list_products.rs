use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProductResponseData;
use crate::domain::product::models::ListProductsQuery;
use crate::domain::product::models::SortOrder;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    state
        .product_service
        .list_products(params.into_query())
        .await
        .map_err(ApiError::from)
        .map(|products| {
            let data: Vec<ProductResponseData> = products.iter().map(|p| p.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}

/// Query string for listings; unparsable numbers count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
}

impl ListProductsParams {
    fn into_query(self) -> ListProductsQuery {
        let number = |value: Option<String>| {
            value
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };

        ListProductsQuery {
            page: number(self.page),
            limit: number(self.limit),
            sort: SortOrder::parse(self.sort.as_deref()),
        }
    }
}
