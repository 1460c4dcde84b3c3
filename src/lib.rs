//! Catalog is a small REST service for managing product categories and the
//! products that belong to them.
//!
//! The library provides a JSON API backed by SQLite. Categories have globally
//! unique names and cannot be deleted while products still reference them,
//! and products must always point at an existing category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use tokio::signal;

mod app_state;
mod category;
mod db;
pub mod endpoints;
mod extract;
mod logging;
mod product;
mod routing;
mod validators;

pub use app_state::AppState;
pub use category::{
    Category, CategoryId, CategoryName, CategoryUpdate, NewCategory, create_category,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use product::{
    NewProduct, Price, Product, ProductId, ProductName, ProductUpdate, create_product,
};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No category exists with the given ID.
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),

    /// No product exists with the given ID.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows. Handlers
    /// replace it with the entity specific variant before responding.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Another category already uses the requested name.
    ///
    /// The name is `None` when the conflict was only detected by the UNIQUE
    /// constraint on the category table.
    #[error("{}", duplicate_name_message(.0.as_deref()))]
    DuplicateCategoryName(Option<String>),

    /// The category is still referenced by at least one product.
    #[error("category {0} cannot be deleted while products reference it")]
    CategoryHasProducts(CategoryId),

    /// The category ID given in a product payload does not refer to a
    /// category.
    ///
    /// Unlike [Error::CategoryNotFound] this is a client input error: the
    /// category is data in the request, not the resource being addressed.
    #[error("category {0} does not exist")]
    InvalidCategory(CategoryId),

    /// A field in the request failed validation, e.g. a name that is too long
    /// or a negative price.
    #[error("{0}")]
    ValidationError(String),

    /// The request body could not be read as JSON.
    #[error("{0}")]
    MalformedBody(String),

    /// A FOREIGN KEY constraint failed in the database.
    ///
    /// Handlers translate this into [Error::InvalidCategory] or
    /// [Error::CategoryHasProducts] depending on the operation.
    #[error("a foreign key constraint failed")]
    ForeignKeyViolation,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

fn duplicate_name_message(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("a category named \"{name}\" already exists"),
        None => "a category with this name already exists".to_owned(),
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategoryName(None)
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::ForeignKeyViolation
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The machine readable category of an [Error] as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The addressed entity does not exist.
    NotFound,
    /// The request clashes with existing data.
    Conflict,
    /// The request references data that does not exist.
    BadRequest,
    /// A field in the request is invalid.
    ValidationError,
    /// Something went wrong on the server.
    InternalError,
}

/// The JSON body sent for every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong, for machines.
    pub kind: ErrorKind,
    /// What went wrong, for humans.
    pub message: String,
}

impl Error {
    /// The kind of error reported to the client.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CategoryNotFound(_) | Error::ProductNotFound(_) | Error::NotFound => {
                ErrorKind::NotFound
            }
            Error::DuplicateCategoryName(_) | Error::CategoryHasProducts(_) => ErrorKind::Conflict,
            Error::InvalidCategory(_) | Error::MalformedBody(_) => ErrorKind::BadRequest,
            Error::ValidationError(_) => ErrorKind::ValidationError,
            Error::ForeignKeyViolation | Error::DatabaseLockError | Error::SqlError(_) => {
                ErrorKind::InternalError
            }
        }
    }

    /// The HTTP status code for the error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let message = match kind {
            // Internal errors are not intended to be shown to the client.
            ErrorKind::InternalError => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            _ => self.to_string(),
        };

        (self.status_code(), Json(ErrorResponse { kind, message })).into_response()
    }
}
