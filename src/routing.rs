//! Application router configuration.

use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    AppState, Error, ErrorKind, ErrorResponse,
    category::{
        self, Category, CategoryName, CategoryUpdate, NewCategory, create_category_endpoint,
        delete_category_endpoint, get_category_endpoint, list_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    logging::logging_middleware,
    product::{
        self, NewProduct, Price, Product, ProductName, ProductUpdate, create_product_endpoint,
        delete_product_endpoint, get_product_endpoint, list_products_by_category_endpoint,
        list_products_endpoint, update_product_endpoint,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        category::list::list_categories_endpoint,
        category::create::create_category_endpoint,
        category::list::get_category_endpoint,
        category::edit::update_category_endpoint,
        category::delete::delete_category_endpoint,
        product::list::list_products_endpoint,
        product::create::create_product_endpoint,
        product::list::get_product_endpoint,
        product::edit::update_product_endpoint,
        product::delete::delete_product_endpoint,
        product::list::list_products_by_category_endpoint,
    ),
    components(schemas(
        Category,
        CategoryName,
        NewCategory,
        CategoryUpdate,
        Product,
        ProductName,
        Price,
        NewProduct,
        ProductUpdate,
        ErrorKind,
        ErrorResponse,
    )),
    tags(
        (name = "categories", description = "Product categories with unique names"),
        (name = "products", description = "Priced products that belong to a category")
    ),
    info(
        title = "API REST - Produtos & Categorias",
        version = "1.0.0",
        description = "Product and category catalog API built on axum, rusqlite and SQLite"
    )
)]
struct ApiDoc;

/// Return a router with all the app's routes.
///
/// Besides the API itself, the router serves the OpenAPI document at
/// [endpoints::OPENAPI_JSON] and Swagger UI at [endpoints::API_DOCS].
pub fn build_router(state: AppState) -> Router {
    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        );

    let product_routes = Router::new()
        .route(
            endpoints::PRODUCTS,
            get(list_products_endpoint).post(create_product_endpoint),
        )
        .route(
            endpoints::PRODUCT,
            get(get_product_endpoint)
                .put(update_product_endpoint)
                .delete(delete_product_endpoint),
        )
        .route(
            endpoints::PRODUCTS_BY_CATEGORY,
            get(list_products_by_category_endpoint),
        );

    category_routes
        .merge(product_routes)
        .merge(
            SwaggerUi::new(endpoints::API_DOCS).url(endpoints::OPENAPI_JSON, ApiDoc::openapi()),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
