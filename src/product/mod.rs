//! Products, each belonging to one category.

pub(crate) mod create;
mod db;
pub(crate) mod delete;
mod domain;
pub(crate) mod edit;
pub(crate) mod list;

pub use create::create_product_endpoint;
pub use db::{
    count_products_in_category, create_product, create_product_table, delete_product,
    get_all_products, get_product, get_products_by_category, update_product,
};
pub use delete::delete_product_endpoint;
pub use domain::{NewProduct, Price, Product, ProductId, ProductName, ProductUpdate};
pub use edit::update_product_endpoint;
pub use list::{get_product_endpoint, list_products_by_category_endpoint, list_products_endpoint};
