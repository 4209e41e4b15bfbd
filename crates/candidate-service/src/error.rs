//! Domain errors raised by the service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("candidate {0} not found")]
  NotFound(i64),

  #[error("a candidate with this first name and email already exists")]
  AlreadyExists,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// HTTP-style status code for this error.
  pub fn status_code(&self) -> u16 {
    match self {
      Self::NotFound(_) => 404,
      Self::AlreadyExists => 409,
      Self::Store(_) => 500,
    }
  }

  /// Machine-readable key reported to clients.
  pub fn key(&self) -> &'static str {
    match self {
      Self::NotFound(_) => "candidate_not_found",
      Self::AlreadyExists => "candidate_already_exist",
      Self::Store(_) => "internal_server_error",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
