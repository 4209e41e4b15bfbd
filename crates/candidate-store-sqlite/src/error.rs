//! Error type for `candidate-store-sqlite`.

use candidate_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The write collided with the (first name, email) unique index.
  #[error("a candidate with this first name and email already exists")]
  Duplicate,

  /// A staged update or delete found no row with this id at flush time.
  #[error("candidate {0} no longer exists")]
  Missing(i64),
}

impl Error {
  /// Classify a database error, singling out unique-index violations.
  pub(crate) fn from_db(err: tokio_rusqlite::Error) -> Self {
    match &err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
      {
        Error::Duplicate
      }
      _ => Error::Database(err),
    }
  }
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool { matches!(self, Error::Duplicate) }

  fn missing_id(&self) -> Option<i64> {
    match self {
      Error::Missing(id) => Some(*id),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
