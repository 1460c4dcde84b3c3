//! Database operations for products.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::CategoryId,
    product::{NewProduct, Price, Product, ProductId, ProductName},
};

/// Create a product and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidCategory] if the product's category does not exist.
pub fn create_product(new_product: NewProduct, connection: &Connection) -> Result<Product, Error> {
    let NewProduct {
        name,
        price,
        category_id,
    } = new_product;

    connection
        .execute(
            "INSERT INTO product (name, price, category_id) VALUES (?1, ?2, ?3);",
            (name.as_ref(), price.as_f64(), category_id),
        )
        .map_err(|error| match Error::from(error) {
            Error::ForeignKeyViolation => Error::InvalidCategory(category_id),
            error => error,
        })?;

    let id = connection.last_insert_rowid();

    Ok(Product {
        id,
        name,
        price,
        category_id,
    })
}

/// Retrieve a single product by ID.
///
/// # Errors
/// Returns [Error::ProductNotFound] if no product has the ID `product_id`.
pub fn get_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare("SELECT id, name, price, category_id FROM product WHERE id = :id;")?
        .query_row(&[(":id", &product_id)], map_row)
        .map_err(|error| match Error::from(error) {
            Error::NotFound => Error::ProductNotFound(product_id),
            error => error,
        })
}

/// Retrieve all products ordered by ID.
pub fn get_all_products(connection: &Connection) -> Result<Vec<Product>, Error> {
    connection
        .prepare("SELECT id, name, price, category_id FROM product ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the products in a category ordered by ID.
///
/// An unknown category simply has no products.
pub fn get_products_by_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    connection
        .prepare(
            "SELECT id, name, price, category_id FROM product
            WHERE category_id = :category_id
            ORDER BY id ASC;",
        )?
        .query_map(&[(":category_id", &category_id)], map_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Write every field of `product` back to the database.
///
/// # Errors
/// Returns [Error::ProductNotFound] if the product doesn't exist, or
/// [Error::InvalidCategory] if its category doesn't exist.
pub fn update_product(product: &Product, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE product SET name = ?1, price = ?2, category_id = ?3 WHERE id = ?4",
            (
                product.name.as_ref(),
                product.price.as_f64(),
                product.category_id,
                product.id,
            ),
        )
        .map_err(|error| match Error::from(error) {
            Error::ForeignKeyViolation => Error::InvalidCategory(product.category_id),
            error => error,
        })?;

    if rows_affected == 0 {
        return Err(Error::ProductNotFound(product.id));
    }

    Ok(())
}

/// Delete a product by ID.
///
/// # Errors
/// Returns [Error::ProductNotFound] if the product doesn't exist.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM product WHERE id = ?1", [product_id])?;

    if rows_affected == 0 {
        return Err(Error::ProductNotFound(product_id));
    }

    Ok(())
}

/// Count the products that reference the category `category_id`.
pub fn count_products_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<i64, Error> {
    let count = connection
        .prepare("SELECT COUNT(id) FROM product WHERE category_id = ?1;")?
        .query_row([category_id], |row| row.get(0))?;

    Ok(count)
}

/// Initialize the product table and indexes.
///
/// Deleting a category that products still reference is restricted rather
/// than cascaded.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            category_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_product_name ON product(name);
        CREATE INDEX IF NOT EXISTS idx_product_category_id ON product(category_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let price = row.get(2)?;
    let category_id = row.get(3)?;

    Ok(Product {
        id,
        name: ProductName::new_unchecked(&raw_name),
        price: Price::new_unchecked(price),
        category_id,
    })
}

#[cfg(test)]
mod product_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{Category, CategoryName, create_category},
        initialize_db,
        product::{
            NewProduct, Price, Product, ProductName, count_products_in_category, create_product,
            delete_product, get_all_products, get_product, get_products_by_category,
            update_product,
        },
    };

    fn get_test_db_connection() -> (Connection, Category) {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).expect("Could not initialize database");
        let category = create_category(CategoryName::new_unchecked("Drinks"), &connection)
            .expect("Could not create test category");
        (connection, category)
    }

    fn new_product(name: &str, category_id: i64) -> NewProduct {
        NewProduct {
            name: ProductName::new_unchecked(name),
            price: Price::new_unchecked(2.5),
            category_id,
        }
    }

    #[test]
    fn create_product_succeeds() {
        let (connection, category) = get_test_db_connection();

        let product = create_product(new_product("Cola", category.id), &connection)
            .expect("Could not create product");

        assert!(product.id > 0);
        assert_eq!(get_product(product.id, &connection), Ok(product));
    }

    #[test]
    fn create_product_with_missing_category_is_rejected_by_storage() {
        let (connection, category) = get_test_db_connection();

        let result = create_product(new_product("Cola", category.id + 1), &connection);

        assert_eq!(result, Err(Error::InvalidCategory(category.id + 1)));
        assert_eq!(get_all_products(&connection), Ok(vec![]));
    }

    #[test]
    fn get_product_with_invalid_id_returns_not_found() {
        let (connection, _) = get_test_db_connection();

        assert_eq!(
            get_product(123, &connection),
            Err(Error::ProductNotFound(123))
        );
    }

    #[test]
    fn get_products_by_category_filters() {
        let (connection, drinks) = get_test_db_connection();
        let snacks = create_category(CategoryName::new_unchecked("Snacks"), &connection).unwrap();
        let cola = create_product(new_product("Cola", drinks.id), &connection).unwrap();
        create_product(new_product("Chips", snacks.id), &connection).unwrap();
        let water = create_product(new_product("Water", drinks.id), &connection).unwrap();

        let got = get_products_by_category(drinks.id, &connection);

        assert_eq!(got, Ok(vec![cola, water]));
    }

    #[test]
    fn get_products_by_unknown_category_is_empty() {
        let (connection, category) = get_test_db_connection();
        create_product(new_product("Cola", category.id), &connection).unwrap();

        assert_eq!(get_products_by_category(999, &connection), Ok(vec![]));
    }

    #[test]
    fn update_product_succeeds() {
        let (connection, category) = get_test_db_connection();
        let product = create_product(new_product("Cola", category.id), &connection).unwrap();
        let updated = Product {
            price: Price::new_unchecked(3.0),
            ..product
        };

        assert_eq!(update_product(&updated, &connection), Ok(()));
        assert_eq!(get_product(updated.id, &connection), Ok(updated));
    }

    #[test]
    fn update_product_with_missing_category_is_rejected_by_storage() {
        let (connection, category) = get_test_db_connection();
        let product = create_product(new_product("Cola", category.id), &connection).unwrap();
        let updated = Product {
            category_id: 999,
            ..product.clone()
        };

        assert_eq!(
            update_product(&updated, &connection),
            Err(Error::InvalidCategory(999))
        );
        assert_eq!(get_product(product.id, &connection), Ok(product));
    }

    #[test]
    fn delete_product_succeeds_once() {
        let (connection, category) = get_test_db_connection();
        let product = create_product(new_product("Cola", category.id), &connection).unwrap();

        assert_eq!(delete_product(product.id, &connection), Ok(()));
        assert_eq!(
            delete_product(product.id, &connection),
            Err(Error::ProductNotFound(product.id))
        );
    }

    #[test]
    fn count_products_counts_only_category() {
        let (connection, drinks) = get_test_db_connection();
        let snacks = create_category(CategoryName::new_unchecked("Snacks"), &connection).unwrap();
        create_product(new_product("Cola", drinks.id), &connection).unwrap();
        create_product(new_product("Water", drinks.id), &connection).unwrap();

        assert_eq!(count_products_in_category(drinks.id, &connection), Ok(2));
        assert_eq!(count_products_in_category(snacks.id, &connection), Ok(0));
    }
}
