//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if the UNIQUE constraint on the
/// name fails.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection.execute("INSERT INTO category (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if no category has the ID `category_id`.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| match Error::from(error) {
            Error::NotFound => Error::CategoryNotFound(category_id),
            error => error,
        })
}

/// Retrieve all categories ordered by ID.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Write `category`'s name back to the database.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if the category doesn't exist, or
/// [Error::DuplicateCategoryName] if another category already has the name.
pub fn update_category(category: &Category, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2",
        (category.name.as_ref(), category.id),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound(category.id));
    }

    Ok(())
}

/// Delete a category by ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if the category doesn't exist, or
/// [Error::CategoryHasProducts] if a product still references it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| match Error::from(error) {
            Error::ForeignKeyViolation => Error::CategoryHasProducts(category_id),
            error => error,
        })?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound(category_id));
    }

    Ok(())
}

/// Check whether a category other than `exclude_id` already uses `name`.
pub fn category_name_taken(
    name: &CategoryName,
    exclude_id: Option<CategoryId>,
    connection: &Connection,
) -> Result<bool, Error> {
    let existing_id: Option<CategoryId> = connection
        .prepare("SELECT id FROM category WHERE name = ?1 AND id IS NOT ?2 LIMIT 1;")?
        .query_row((name.as_ref(), exclude_id), |row| row.get(0))
        .optional()?;

    Ok(existing_id.is_some())
}

/// Check whether a category with the ID `category_id` exists.
pub fn category_exists(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    let exists = connection
        .prepare("SELECT EXISTS (SELECT 1 FROM category WHERE id = ?1);")?
        .query_row([category_id], |row| row.get(0))?;

    Ok(exists)
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}
