//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g., '/categories/{category_id}', are in axum's
//! route syntax.

/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/categories/";
/// The route to read, update or delete a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route for listing and creating products.
pub const PRODUCTS: &str = "/products/";
/// The route to read, update or delete a single product.
pub const PRODUCT: &str = "/products/{product_id}";
/// The route for listing the products in a category.
pub const PRODUCTS_BY_CATEGORY: &str = "/products/category/{category_id}";
/// The generated OpenAPI document.
pub const OPENAPI_JSON: &str = "/openapi.json";
/// Swagger UI for browsing and trying out the API.
pub const API_DOCS: &str = "/docs";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/products/{product_id}', '{product_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
#[cfg(test)]
pub(crate) fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
