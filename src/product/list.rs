//! Endpoints for reading products.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::CategoryId,
    extract::ApiPath,
    product::{Product, ProductId, get_all_products, get_product, get_products_by_category},
};

/// The state needed for reading products.
#[derive(Debug, Clone)]
pub struct ProductReadState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductReadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every product ordered by ID.
#[utoipa::path(
    get,
    path = "/products/",
    tag = "products",
    responses(
        (status = 200, description = "All products ordered by ID", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = crate::ErrorResponse)
    )
)]
pub async fn list_products_endpoint(
    State(state): State<ProductReadState>,
) -> Result<Json<Vec<Product>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let products = get_all_products(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve products: {error}"))?;

    Ok(Json(products))
}

/// Get a single product.
#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Product not found", body = crate::ErrorResponse),
        (status = 422, description = "Invalid product ID", body = crate::ErrorResponse)
    )
)]
pub async fn get_product_endpoint(
    ApiPath(product_id): ApiPath<ProductId>,
    State(state): State<ProductReadState>,
) -> Result<Json<Product>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_product(product_id, &connection).map(Json)
}

/// List the products in a category.
///
/// The category itself is not looked up: an unknown category yields an empty
/// list rather than an error.
#[utoipa::path(
    get,
    path = "/products/category/{category_id}",
    tag = "products",
    params(("category_id" = i64, Path, description = "Category ID, which need not exist")),
    responses(
        (status = 200, description = "Products in the category ordered by ID, possibly empty", body = Vec<Product>),
        (status = 422, description = "Invalid category ID", body = crate::ErrorResponse)
    )
)]
pub async fn list_products_by_category_endpoint(
    ApiPath(category_id): ApiPath<CategoryId>,
    State(state): State<ProductReadState>,
) -> Result<Json<Vec<Product>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let products = get_products_by_category(category_id, &connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve products for category {category_id}: {error}")
    })?;

    Ok(Json(products))
}
