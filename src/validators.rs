//! Checks run against the database before a mutation is applied.
//!
//! These checks give clients precise errors, but they are not atomic with the
//! write that follows. The UNIQUE and FOREIGN KEY constraints in the schema
//! remain the final word, and their violations are translated into the same
//! errors returned here.

use rusqlite::Connection;

use crate::{
    Error,
    category::{CategoryId, CategoryName, category_exists, category_name_taken},
    product::count_products_in_category,
};

/// Ensure no category other than `exclude_id` is named `name`.
///
/// Pass the ID of the category being updated as `exclude_id` so a category
/// may keep its own name.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if another category has the name.
pub fn validate_unique_category_name(
    name: &CategoryName,
    exclude_id: Option<CategoryId>,
    connection: &Connection,
) -> Result<(), Error> {
    if category_name_taken(name, exclude_id, connection)? {
        return Err(Error::DuplicateCategoryName(Some(name.to_string())));
    }

    Ok(())
}

/// Ensure the category `category_id` exists.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if it does not.
pub fn validate_category_exists(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    if !category_exists(category_id, connection)? {
        return Err(Error::CategoryNotFound(category_id));
    }

    Ok(())
}

/// Ensure no product references the category `category_id`.
///
/// # Errors
/// Returns [Error::CategoryHasProducts] if at least one product does.
pub fn validate_category_deletable(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    let product_count = count_products_in_category(category_id, connection)?;

    if product_count > 0 {
        tracing::debug!("category {category_id} still has {product_count} product(s)");
        return Err(Error::CategoryHasProducts(category_id));
    }

    Ok(())
}
