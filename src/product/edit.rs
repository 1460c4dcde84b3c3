//! Product update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    extract::{ApiJson, ApiPath},
    product::{Product, ProductId, ProductUpdate, get_product, update_product},
};

use super::create::validate_referenced_category;

/// The state needed for updating a product.
#[derive(Debug, Clone)]
pub struct UpdateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Apply a partial update to a product.
///
/// Only the fields present in the request body change. A new category must
/// exist, otherwise the response is `400 Bad Request` and nothing changes.
#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Product ID")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "The updated product", body = Product),
        (status = 400, description = "Category does not exist", body = crate::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::ErrorResponse),
        (status = 422, description = "Invalid name or price", body = crate::ErrorResponse)
    )
)]
pub async fn update_product_endpoint(
    ApiPath(product_id): ApiPath<ProductId>,
    State(state): State<UpdateProductState>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> Result<Json<Product>, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    let product = get_product(product_id, &transaction)?;

    if let Some(category_id) = update.category_id {
        validate_referenced_category(category_id, &transaction)?;
    }

    let product = product.apply(update);
    update_product(&product, &transaction)?;

    transaction.commit()?;

    Ok(Json(product))
}
