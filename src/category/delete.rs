//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{CategoryId, delete_category, get_category},
    extract::ApiPath,
    validators::validate_category_deletable,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a category that no product references.
///
/// Responds with `204 No Content`, `404 Not Found` if the category does not
/// exist, or `409 Conflict` if products still belong to it.
#[utoipa::path(
    delete,
    path = "/categories/{category_id}",
    tag = "categories",
    params(("category_id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::ErrorResponse),
        (status = 409, description = "Products still belong to the category", body = crate::ErrorResponse)
    )
)]
pub async fn delete_category_endpoint(
    ApiPath(category_id): ApiPath<CategoryId>,
    State(state): State<DeleteCategoryState>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    get_category(category_id, &transaction)?;
    validate_category_deletable(category_id, &transaction)?;
    delete_category(category_id, &transaction)?;

    transaction.commit()?;
    tracing::debug!("deleted category {category_id}");

    Ok(StatusCode::NO_CONTENT)
}
