//! Product deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    extract::ApiPath,
    product::{ProductId, delete_product},
};

/// The state needed for deleting a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a product. Responds with `204 No Content` or `404 Not Found`.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::ErrorResponse)
    )
)]
pub async fn delete_product_endpoint(
    ApiPath(product_id): ApiPath<ProductId>,
    State(state): State<DeleteProductState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_product(product_id, &connection)?;
    tracing::debug!("deleted product {product_id}");

    Ok(StatusCode::NO_CONTENT)
}
