//! Request extractors that reject bad input with the crate's [Error] type.
//!
//! Axum's own `Json` and `Path` extractors answer with plain text bodies. These
//! wrappers route the same rejections through [Error] so every failure response
//! carries the JSON error body.

use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection},
};

use crate::Error;

/// A JSON request body.
///
/// Field validation happens while deserializing, so a handler only ever sees
/// values that satisfy the domain constraints.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// A path parameter, such as an entity ID.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // The body was valid JSON but did not match the expected fields or
            // failed field validation.
            JsonRejection::JsonDataError(error) => Error::ValidationError(error.body_text()),
            rejection => Error::MalformedBody(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::ValidationError(rejection.body_text())
    }
}
