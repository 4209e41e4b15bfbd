//! The `CandidateStore` / `CandidateSession` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `candidate-store-sqlite`). Higher layers (`candidate-service`,
//! `candidate-api`) depend on this abstraction, not on any concrete backend.
//!
//! A store is a shared, cheaply cloneable handle. Work happens in a
//! [`CandidateSession`]: reads and inserts go straight to storage, while
//! updates and deletes are staged in the session and only reach storage on
//! [`CandidateSession::flush`]. Dropping a session discards whatever is still
//! staged.

use std::future::Future;

use crate::candidate::{Candidate, NewCandidate};

/// Errors raised by a store backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` if the write was rejected by the (first name, email) uniqueness
  /// rule rather than by an infrastructure failure.
  fn is_conflict(&self) -> bool;

  /// The id of the record a staged write expected to find, if the write
  /// failed because that record no longer exists.
  fn missing_id(&self) -> Option<i64> { None }
}

/// Abstraction over a Candidate store backend.
pub trait CandidateStore: Send + Sync {
  type Error: StoreError;
  type Session: CandidateSession<Error = Self::Error>;

  /// Open a new unit of work.
  fn session(&self) -> Self::Session;
}

/// One unit of work against a [`CandidateStore`].
///
/// All methods return `Send` futures so sessions can be driven from
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CandidateSession: Send + Sync {
  type Error: StoreError;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every stored candidate, ordered by id.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;

  /// Retrieve a candidate by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + '_;

  /// First candidate whose first name and email both match, ignoring case.
  fn find_by_name_and_email<'a>(
    &'a self,
    first_name: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert and commit immediately, returning the row with its assigned id.
  fn create(
    &mut self,
    input: NewCandidate,
  ) -> impl Future<Output = Result<Candidate, Self::Error>> + Send + '_;

  /// Stage a full overwrite of the row identified by `candidate.id`.
  fn update(
    &mut self,
    candidate: Candidate,
  ) -> impl Future<Output = Result<Candidate, Self::Error>> + Send + '_;

  /// Stage a hard delete. Returns `false` (and stages nothing) if no row has
  /// that id.
  fn delete(
    &mut self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Commit all staged writes atomically. A no-op when nothing is staged.
  fn flush(&mut self)
  -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
