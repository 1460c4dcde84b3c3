use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use catalog_rs::{
    CategoryName, NewProduct, Price, ProductName, create_category, create_product, initialize_db,
};

/// A utility for creating a test database for the catalog REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_CATALOG: &[(&str, &[(&str, f64)])] = &[
    ("Drinks", &[("Cola", 2.5), ("Sparkling Water", 1.8)]),
    ("Snacks", &[("Salted Chips", 3.2), ("Peanuts", 2.0)]),
    ("Bakery", &[("Sourdough Loaf", 6.5)]),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample catalog...");

    let transaction = conn.transaction()?;

    for (category_name, products) in SAMPLE_CATALOG {
        let category = create_category(CategoryName::new(category_name)?, &transaction)?;

        for (product_name, price) in *products {
            create_product(
                NewProduct {
                    name: ProductName::new(product_name)?,
                    price: Price::new(*price)?,
                    category_id: category.id,
                },
                &transaction,
            )?;
        }
    }

    transaction.commit()?;

    println!("Success!");

    Ok(())
}
