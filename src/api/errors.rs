//! Error type returned by the HTTP handlers
//!
//! Client errors come from payload validation, server errors from storage.
//! Both are rendered as an `ErrorResponse` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::database::DatabaseError;

use super::requests::PayloadRejection;
use super::responses::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation
    #[error("Invalid order payload: {0}")]
    InvalidPayload(#[from] PayloadRejection),

    /// Storage failed; not recoverable by the client
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(
                PayloadRejection::MalformedJson(_) | PayloadRejection::Unreadable(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPayload(PayloadRejection::UnsupportedContentType) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the client can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Log the failure with its context and hand it back
    ///
    /// Client errors are expected traffic and go to `debug`; storage
    /// failures go to `error`.
    pub fn logged(self, context: &str) -> Self {
        if self.is_client_error() {
            tracing::debug!("{}: {}", context, self);
        } else {
            tracing::error!("{}: {}", context, self);
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
