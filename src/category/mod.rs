//! Categories group products. Each category name is unique.

pub(crate) mod create;
mod db;
pub(crate) mod delete;
mod domain;
pub(crate) mod edit;
pub(crate) mod list;

pub use create::create_category_endpoint;
pub use db::{
    category_exists, category_name_taken, create_category, create_category_table,
    delete_category, get_all_categories, get_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName, CategoryUpdate, NewCategory};
pub use edit::update_category_endpoint;
pub use list::{get_category_endpoint, list_categories_endpoint};
