//! Product creation endpoint.

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
    category::CategoryId,
    extract::ApiJson,
    product::{NewProduct, Product, create_product},
    validators::validate_category_exists,
};

/// The state needed for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a product in an existing category.
///
/// Responds with `201 Created` and the new product, or `400 Bad Request` if
/// the category does not exist.
#[utoipa::path(
    post,
    path = "/products/",
    tag = "products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Category does not exist or malformed request body", body = crate::ErrorResponse),
        (status = 422, description = "Invalid name or price", body = crate::ErrorResponse)
    )
)]
pub async fn create_product_endpoint(
    State(state): State<CreateProductState>,
    ApiJson(new_product): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    validate_referenced_category(new_product.category_id, &transaction)?;
    let product = create_product(new_product, &transaction)?;

    transaction.commit()?;
    tracing::debug!("created product {}", product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Check that a category named in a product payload exists.
///
/// A missing category here is bad input rather than a missing resource, so
/// it is reported as [Error::InvalidCategory].
pub(super) fn validate_referenced_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    validate_category_exists(category_id, connection).map_err(|error| match error {
        Error::CategoryNotFound(category_id) => Error::InvalidCategory(category_id),
        error => error,
    })
}

#[cfg(test)]
mod create_product_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{Category, CategoryName, create_category},
        extract::ApiJson,
        initialize_db,
        product::{NewProduct, Price, Product, ProductName, get_all_products},
    };

    use super::{CreateProductState, create_product_endpoint};

    fn get_create_state() -> (CreateProductState, Category) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");
        let category = create_category(CategoryName::new_unchecked("Drinks"), &connection)
            .expect("Could not create test category");

        let state = CreateProductState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, category)
    }

    fn cola(category_id: i64) -> ApiJson<NewProduct> {
        ApiJson(NewProduct {
            name: ProductName::new_unchecked("Cola"),
            price: Price::new_unchecked(2.5),
            category_id,
        })
    }

    #[tokio::test]
    async fn can_create_product() {
        let (state, category) = get_create_state();
        let want = Product {
            id: 1,
            name: ProductName::new_unchecked("Cola"),
            price: Price::new_unchecked(2.5),
            category_id: category.id,
        };

        let (status, Json(product)) =
            create_product_endpoint(State(state.clone()), cola(category.id))
                .await
                .expect("Could not create product");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product, want);
        assert_eq!(
            get_all_products(&state.db_connection.lock().unwrap()),
            Ok(vec![want])
        );
    }

    #[tokio::test]
    async fn create_with_missing_category_is_bad_request_and_persists_nothing() {
        let (state, category) = get_create_state();
        let missing_id = category.id + 1;

        let result = create_product_endpoint(State(state.clone()), cola(missing_id)).await;

        assert_eq!(
            result.map(|(status, _)| status),
            Err(Error::InvalidCategory(missing_id))
        );
        assert_eq!(
            get_all_products(&state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
    }
}
