//! [`SqliteStore`] — the SQLite implementation of [`CandidateStore`].

use std::path::Path;

use candidate_core::{
  candidate::{Candidate, NewCandidate},
  store::{CandidateSession, CandidateStore},
};
use rusqlite::OptionalExtension as _;
use tracing::{debug, warn};

use crate::{
  Error, Result,
  encode::{COLUMNS, RawCandidate, encode_dt, fold},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Candidate store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl CandidateStore for SqliteStore {
  type Error = Error;
  type Session = SqliteSession;

  fn session(&self) -> SqliteSession {
    SqliteSession { conn: self.conn.clone(), pending: Vec::new() }
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A write staged by a session, applied on flush.
#[derive(Debug)]
enum PendingWrite {
  Update(Candidate),
  Delete(i64),
}

/// A unit of work over a [`SqliteStore`].
///
/// Updates and deletes are held in memory until [`CandidateSession::flush`],
/// which applies them inside one SQLite transaction.
pub struct SqliteSession {
  conn:    tokio_rusqlite::Connection,
  pending: Vec<PendingWrite>,
}

impl SqliteSession {
  /// Number of writes waiting for the next flush.
  pub fn pending_writes(&self) -> usize { self.pending.len() }
}

impl Drop for SqliteSession {
  fn drop(&mut self) {
    if !self.pending.is_empty() {
      warn!(
        count = self.pending.len(),
        "session dropped with unflushed writes; discarding them"
      );
    }
  }
}

impl CandidateSession for SqliteSession {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_all(&self) -> Result<Vec<Candidate>> {
    let raws: Vec<RawCandidate> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {COLUMNS} FROM candidates ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawCandidate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCandidate::into_candidate).collect()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Candidate>> {
    let raw: Option<RawCandidate> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM candidates WHERE id = ?1"),
            rusqlite::params![id],
            RawCandidate::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCandidate::into_candidate).transpose()
  }

  async fn find_by_name_and_email(
    &self,
    first_name: &str,
    email: &str,
  ) -> Result<Option<Candidate>> {
    let first_name_key = fold(first_name);
    let email_key      = fold(email);

    let raw: Option<RawCandidate> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {COLUMNS} FROM candidates
               WHERE first_name_key = ?1 AND email_key = ?2
               ORDER BY id LIMIT 1"
            ),
            rusqlite::params![first_name_key, email_key],
            RawCandidate::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCandidate::into_candidate).transpose()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&mut self, input: NewCandidate) -> Result<Candidate> {
    let row = input.clone();
    let best_call_time = row.best_call_time.map(encode_dt);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO candidates (
             first_name, last_name, email, phone_number, best_call_time,
             linked_in_profile, git_hub_profile, comment,
             first_name_key, email_key
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            row.first_name,
            row.last_name,
            row.email,
            row.phone_number,
            best_call_time,
            row.linked_in_profile,
            row.git_hub_profile,
            row.comment,
            fold(&row.first_name),
            fold(&row.email),
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_db)?;

    debug!(id, "inserted candidate");
    Ok(input.with_id(id))
  }

  async fn update(&mut self, candidate: Candidate) -> Result<Candidate> {
    self.pending.push(PendingWrite::Update(candidate.clone()));
    Ok(candidate)
  }

  async fn delete(&mut self, id: i64) -> Result<bool> {
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM candidates WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;

    if exists {
      self.pending.push(PendingWrite::Delete(id));
    }
    Ok(exists)
  }

  async fn flush(&mut self) -> Result<()> {
    if self.pending.is_empty() {
      return Ok(());
    }
    let writes = std::mem::take(&mut self.pending);
    let count  = writes.len();

    // Each staged write must hit exactly one row; otherwise the transaction
    // is dropped uncommitted and the id is reported back.
    let missing: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for write in writes {
          let (id, affected) = match write {
            PendingWrite::Update(c) => {
              let affected = tx.execute(
                "UPDATE candidates SET
                   first_name = ?2, last_name = ?3, email = ?4,
                   phone_number = ?5, best_call_time = ?6,
                   linked_in_profile = ?7, git_hub_profile = ?8, comment = ?9,
                   first_name_key = ?10, email_key = ?11
                 WHERE id = ?1",
                rusqlite::params![
                  c.id,
                  c.first_name,
                  c.last_name,
                  c.email,
                  c.phone_number,
                  c.best_call_time.map(encode_dt),
                  c.linked_in_profile,
                  c.git_hub_profile,
                  c.comment,
                  fold(&c.first_name),
                  fold(&c.email),
                ],
              )?;
              (c.id, affected)
            }
            PendingWrite::Delete(id) => {
              let affected = tx.execute(
                "DELETE FROM candidates WHERE id = ?1",
                rusqlite::params![id],
              )?;
              (id, affected)
            }
          };
          if affected != 1 {
            return Ok(Some(id));
          }
        }
        tx.commit()?;
        Ok(None)
      })
      .await
      .map_err(Error::from_db)?;

    if let Some(id) = missing {
      warn!(id, "staged write found no row; flush rolled back");
      return Err(Error::Missing(id));
    }

    debug!(count, "flushed staged writes");
    Ok(())
  }
}
