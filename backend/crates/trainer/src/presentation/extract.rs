//! Extractors
//!
//! Wrappers over the axum extractors whose rejections render as
//! [`TrainerError`] problem bodies instead of plain text.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::TrainerError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(TrainerError))]
pub struct JsonBody<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(TrainerError))]
pub struct QueryParams<T>(pub T);

/// Path segments
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(TrainerError))]
pub struct PathParam<T>(pub T);

impl From<JsonRejection> for TrainerError {
    fn from(rejection: JsonRejection) -> Self {
        TrainerError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for TrainerError {
    fn from(rejection: QueryRejection) -> Self {
        TrainerError::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for TrainerError {
    fn from(rejection: PathRejection) -> Self {
        TrainerError::InvalidId(rejection.body_text())
    }
}
