//! The persisted Candidate entity.

use chrono::{DateTime, Utc};

/// A job candidate as stored in the backing table.
///
/// `id` is assigned by the store on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub id:                i64,
  pub first_name:        String,
  pub last_name:         String,
  pub email:             String,
  pub phone_number:      Option<String>,
  pub best_call_time:    Option<DateTime<Utc>>,
  pub linked_in_profile: Option<String>,
  pub git_hub_profile:   Option<String>,
  pub comment:           Option<String>,
}

/// Input to [`crate::store::CandidateSession::create`].
/// `id` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
  pub first_name:        String,
  pub last_name:         String,
  pub email:             String,
  pub phone_number:      Option<String>,
  pub best_call_time:    Option<DateTime<Utc>>,
  pub linked_in_profile: Option<String>,
  pub git_hub_profile:   Option<String>,
  pub comment:           Option<String>,
}

impl NewCandidate {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name:        first_name.into(),
      last_name:         last_name.into(),
      email:             email.into(),
      phone_number:      None,
      best_call_time:    None,
      linked_in_profile: None,
      git_hub_profile:   None,
      comment:           None,
    }
  }

  /// Attach the store-assigned identifier.
  pub fn with_id(self, id: i64) -> Candidate {
    Candidate {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      phone_number: self.phone_number,
      best_call_time: self.best_call_time,
      linked_in_profile: self.linked_in_profile,
      git_hub_profile: self.git_hub_profile,
      comment: self.comment,
    }
  }
}
