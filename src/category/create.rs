//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, NewCategory, create_category},
    extract::ApiJson,
    validators::validate_unique_category_name,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category with a name no other category uses.
///
/// Responds with `201 Created` and the new category, or `409 Conflict` if
/// the name is taken.
#[utoipa::path(
    post,
    path = "/categories/",
    tag = "categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Malformed request body", body = crate::ErrorResponse),
        (status = 409, description = "Category name already taken", body = crate::ErrorResponse),
        (status = 422, description = "Invalid category name", body = crate::ErrorResponse)
    )
)]
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    validate_unique_category_name(&new_category.name, None, &transaction)?;
    let category = create_category(new_category.name, &transaction)?;

    transaction.commit()?;
    tracing::debug!("created category {}", category.id);

    Ok((StatusCode::CREATED, Json(category)))
}
