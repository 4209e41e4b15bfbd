//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use candidate_core::candidate::Candidate;
use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Column list shared by every `SELECT` so [`RawCandidate::from_row`] can
/// read by position.
pub const COLUMNS: &str = "id, first_name, last_name, email, phone_number, \
                           best_call_time, linked_in_profile, git_hub_profile, comment";

// ─── Lookup keys ─────────────────────────────────────────────────────────────

/// Case-folded form stored in the `*_key` columns. SQLite's `lower()` only
/// folds ASCII, so folding happens here instead.
pub fn fold(s: &str) -> String { s.to_lowercase() }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `candidates` row.
pub struct RawCandidate {
  pub id:                i64,
  pub first_name:        String,
  pub last_name:         String,
  pub email:             String,
  pub phone_number:      Option<String>,
  pub best_call_time:    Option<String>,
  pub linked_in_profile: Option<String>,
  pub git_hub_profile:   Option<String>,
  pub comment:           Option<String>,
}

impl RawCandidate {
  /// Read a row selected with [`COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawCandidate {
      id:                row.get(0)?,
      first_name:        row.get(1)?,
      last_name:         row.get(2)?,
      email:             row.get(3)?,
      phone_number:      row.get(4)?,
      best_call_time:    row.get(5)?,
      linked_in_profile: row.get(6)?,
      git_hub_profile:   row.get(7)?,
      comment:           row.get(8)?,
    })
  }

  pub fn into_candidate(self) -> Result<Candidate> {
    Ok(Candidate {
      id:                self.id,
      first_name:        self.first_name,
      last_name:         self.last_name,
      email:             self.email,
      phone_number:      self.phone_number,
      best_call_time:    self.best_call_time.as_deref().map(decode_dt).transpose()?,
      linked_in_profile: self.linked_in_profile,
      git_hub_profile:   self.git_hub_profile,
      comment:           self.comment,
    })
  }
}
