//! Wire shapes used at the service/controller boundary.
//!
//! These are distinct from [`Candidate`](crate::candidate::Candidate): the
//! entity is what the store persists, the DTOs are what clients send and
//! receive. All three serialise with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, ValidationError};

// ─── Output ──────────────────────────────────────────────────────────────────

/// A candidate as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
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

// ─── Create ──────────────────────────────────────────────────────────────────

/// Body accepted when creating a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCreate {
  pub first_name:        String,
  pub last_name:         String,
  pub email:             String,
  #[serde(default)]
  pub phone_number:      Option<String>,
  #[serde(default)]
  pub best_call_time:    Option<DateTime<Utc>>,
  #[serde(default)]
  pub linked_in_profile: Option<String>,
  #[serde(default)]
  pub git_hub_profile:   Option<String>,
  #[serde(default)]
  pub comment:           Option<String>,
}

impl CandidateCreate {
  /// Check the required fields. The first failing field wins.
  pub fn validate(&self) -> Result<()> {
    require(&self.first_name, ValidationError::FirstNameRequired)?;
    require(&self.last_name, ValidationError::LastNameRequired)?;
    check_email(&self.email)
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Body accepted when updating a candidate.
///
/// Every field is optional. An absent (or `null`) field leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
  #[serde(default)]
  pub first_name:        Option<String>,
  #[serde(default)]
  pub last_name:         Option<String>,
  #[serde(default)]
  pub email:             Option<String>,
  #[serde(default)]
  pub phone_number:      Option<String>,
  #[serde(default)]
  pub best_call_time:    Option<DateTime<Utc>>,
  #[serde(default)]
  pub linked_in_profile: Option<String>,
  #[serde(default)]
  pub git_hub_profile:   Option<String>,
  #[serde(default)]
  pub comment:           Option<String>,
}

impl CandidateUpdate {
  /// Apply the create-time rules to whichever fields are present.
  pub fn validate(&self) -> Result<()> {
    if let Some(first_name) = &self.first_name {
      require(first_name, ValidationError::FirstNameRequired)?;
    }
    if let Some(last_name) = &self.last_name {
      require(last_name, ValidationError::LastNameRequired)?;
    }
    match &self.email {
      Some(email) => check_email(email),
      None => Ok(()),
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn require(value: &str, err: ValidationError) -> Result<()> {
  if value.trim().is_empty() { Err(err) } else { Ok(()) }
}

fn check_email(email: &str) -> Result<()> {
  require(email, ValidationError::EmailRequired)?;
  let valid = email
    .split_once('@')
    .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
  if valid {
    Ok(())
  } else {
    Err(ValidationError::EmailInvalid(email.to_owned()))
  }
}
