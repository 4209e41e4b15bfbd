//! Error types for `candidate-core`.

use thiserror::Error;

/// A request DTO failed field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("first name is required")]
  FirstNameRequired,

  #[error("last name is required")]
  LastNameRequired,

  #[error("email is required")]
  EmailRequired,

  #[error("email address is malformed: {0:?}")]
  EmailInvalid(String),
}

impl ValidationError {
  /// Machine-readable key reported to API clients.
  pub fn key(&self) -> &'static str {
    match self {
      Self::FirstNameRequired => "first_name_required",
      Self::LastNameRequired => "last_name_required",
      Self::EmailRequired => "email_required",
      Self::EmailInvalid(_) => "email_invalid",
    }
  }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
