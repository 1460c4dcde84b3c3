//! Endpoints for reading categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, CategoryId, get_all_categories, get_category},
    extract::ApiPath,
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct CategoryReadState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryReadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category ordered by ID.
#[utoipa::path(
    get,
    path = "/categories/",
    tag = "categories",
    responses(
        (status = 200, description = "All categories ordered by ID", body = Vec<Category>),
        (status = 500, description = "Internal server error", body = crate::ErrorResponse)
    )
)]
pub async fn list_categories_endpoint(
    State(state): State<CategoryReadState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(Json(categories))
}

/// Get a single category.
#[utoipa::path(
    get,
    path = "/categories/{category_id}",
    tag = "categories",
    params(("category_id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Category not found", body = crate::ErrorResponse),
        (status = 422, description = "Invalid category ID", body = crate::ErrorResponse)
    )
)]
pub async fn get_category_endpoint(
    ApiPath(category_id): ApiPath<CategoryId>,
    State(state): State<CategoryReadState>,
) -> Result<Json<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category(category_id, &connection).map(Json)
}

#[cfg(test)]
mod category_read_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, create_category},
        extract::ApiPath,
        initialize_db,
    };

    use super::{CategoryReadState, get_category_endpoint, list_categories_endpoint};

    fn get_read_state() -> CategoryReadState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        CategoryReadState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn list_is_empty_without_categories() {
        let state = get_read_state();

        let Json(categories) = list_categories_endpoint(State(state))
            .await
            .expect("Could not list categories");

        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn list_returns_categories_in_id_order() {
        let state = get_read_state();
        let want = {
            let connection = state.db_connection.lock().unwrap();
            vec![
                create_category(CategoryName::new_unchecked("Snacks"), &connection).unwrap(),
                create_category(CategoryName::new_unchecked("Drinks"), &connection).unwrap(),
            ]
        };

        let Json(categories) = list_categories_endpoint(State(state))
            .await
            .expect("Could not list categories");

        assert_eq!(categories, want);
    }

    #[tokio::test]
    async fn get_returns_category() {
        let state = get_read_state();
        let category = create_category(
            CategoryName::new_unchecked("Drinks"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let result = get_category_endpoint(ApiPath(category.id), State(state)).await;

        assert_eq!(result.map(|Json(got)| got), Ok(category));
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let state = get_read_state();

        let result = get_category_endpoint(ApiPath(42), State(state)).await;

        assert_eq!(result.map(|Json(got)| got), Err(Error::CategoryNotFound(42)));
    }
}
