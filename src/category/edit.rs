//! Category update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, CategoryId, CategoryUpdate, get_category, update_category},
    extract::{ApiJson, ApiPath},
    validators::validate_unique_category_name,
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Apply a partial update to a category.
///
/// Only the fields present in the request body change. Renaming a category to
/// its current name is allowed.
#[utoipa::path(
    put,
    path = "/categories/{category_id}",
    tag = "categories",
    params(("category_id" = i64, Path, description = "Category ID")),
    request_body = CategoryUpdate,
    responses(
        (status = 200, description = "The updated category", body = Category),
        (status = 404, description = "Category not found", body = crate::ErrorResponse),
        (status = 409, description = "Category name already taken", body = crate::ErrorResponse),
        (status = 422, description = "Invalid category name", body = crate::ErrorResponse)
    )
)]
pub async fn update_category_endpoint(
    ApiPath(category_id): ApiPath<CategoryId>,
    State(state): State<UpdateCategoryState>,
    ApiJson(update): ApiJson<CategoryUpdate>,
) -> Result<Json<Category>, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    let category = get_category(category_id, &transaction)?;

    if let Some(name) = &update.name {
        validate_unique_category_name(name, Some(category_id), &transaction)?;
    }

    let category = category.apply(update);
    update_category(&category, &transaction)?;

    transaction.commit()?;

    Ok(Json(category))
}

#[cfg(test)]
mod update_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{Category, CategoryName, CategoryUpdate, create_category, get_category},
        extract::{ApiJson, ApiPath},
        initialize_db,
    };

    use super::{UpdateCategoryState, update_category_endpoint};

    fn get_update_state() -> UpdateCategoryState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        UpdateCategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert_category(state: &UpdateCategoryState, name: &str) -> Category {
        create_category(
            CategoryName::new_unchecked(name),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category")
    }

    fn rename(name: &str) -> ApiJson<CategoryUpdate> {
        ApiJson(CategoryUpdate {
            name: Some(CategoryName::new_unchecked(name)),
        })
    }

    #[tokio::test]
    async fn update_renames_category() {
        let state = get_update_state();
        let category = insert_category(&state, "Drinks");

        let Json(updated) =
            update_category_endpoint(ApiPath(category.id), State(state.clone()), rename("Beverages"))
                .await
                .expect("Could not update category");

        assert_eq!(updated.name.as_ref(), "Beverages");
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Ok(updated)
        );
    }

    #[tokio::test]
    async fn update_to_own_name_succeeds() {
        let state = get_update_state();
        let category = insert_category(&state, "Drinks");

        let result =
            update_category_endpoint(ApiPath(category.id), State(state), rename("Drinks")).await;

        assert_eq!(result.map(|Json(got)| got), Ok(category));
    }

    #[tokio::test]
    async fn update_to_taken_name_is_conflict() {
        let state = get_update_state();
        insert_category(&state, "Drinks");
        let snacks = insert_category(&state, "Snacks");

        let result =
            update_category_endpoint(ApiPath(snacks.id), State(state.clone()), rename("Drinks"))
                .await;

        assert_eq!(
            result.map(|Json(got)| got),
            Err(Error::DuplicateCategoryName(Some("Drinks".to_owned())))
        );
        assert_eq!(
            get_category(snacks.id, &state.db_connection.lock().unwrap()),
            Ok(snacks)
        );
    }

    #[tokio::test]
    async fn empty_update_leaves_category_unchanged() {
        let state = get_update_state();
        let category = insert_category(&state, "Drinks");

        let result = update_category_endpoint(
            ApiPath(category.id),
            State(state),
            ApiJson(CategoryUpdate::default()),
        )
        .await;

        assert_eq!(result.map(|Json(got)| got), Ok(category));
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let state = get_update_state();

        let result = update_category_endpoint(ApiPath(42), State(state), rename("Drinks")).await;

        assert_eq!(result.map(|Json(got)| got), Err(Error::CategoryNotFound(42)));
    }
}
