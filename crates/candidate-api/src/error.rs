//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the server as `{"status": <code>, "title": "<key>"}`.
//! Internal details are logged, never sent to the client.

use std::any::Any;

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use candidate_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub status: u16,
  pub title:  String,
}

/// Build an error response with the standard body.
pub fn error_response(status: StatusCode, title: &str) -> Response {
  let body = ErrorBody { status: status.as_u16(), title: title.to_owned() };
  (status, Json(body)).into_response()
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request was rejected before reaching the service.
  #[error("bad request: {0}")]
  BadRequest(&'static str),

  #[error(transparent)]
  Service(#[from] candidate_service::Error),
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::BadRequest(e.key()) }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self {
    debug!(error = %e, "rejected request body");
    ApiError::BadRequest("invalid_request_body")
  }
}

impl From<PathRejection> for ApiError {
  fn from(e: PathRejection) -> Self {
    debug!(error = %e, "rejected path parameter");
    ApiError::BadRequest("invalid_candidate_id")
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (code, title) = match &self {
      ApiError::BadRequest(key) => (400, *key),
      ApiError::Service(e) => (e.status_code(), e.key()),
    };
    let status =
      StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
      let source = std::error::Error::source(&self).map(ToString::to_string);
      error!(error = %self, source = ?source, "request failed");
    }
    error_response(status, title)
  }
}

/// Response for a handler that panicked; used with
/// [`tower_http::catch_panic::CatchPanicLayer`].
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = panic
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| panic.downcast_ref::<&str>().copied())
    .unwrap_or("<non-string panic payload>");
  error!(panic = detail, "handler panicked");
  error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_server_error")
}
