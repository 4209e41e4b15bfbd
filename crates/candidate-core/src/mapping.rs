//! Conversions between the persisted entity and the DTO shapes.

use crate::{
  candidate::{Candidate, NewCandidate},
  dto::{CandidateCreate, CandidateDto, CandidateUpdate},
};

impl From<Candidate> for CandidateDto {
  fn from(c: Candidate) -> Self {
    CandidateDto {
      id:                c.id,
      first_name:        c.first_name,
      last_name:         c.last_name,
      email:             c.email,
      phone_number:      c.phone_number,
      best_call_time:    c.best_call_time,
      linked_in_profile: c.linked_in_profile,
      git_hub_profile:   c.git_hub_profile,
      comment:           c.comment,
    }
  }
}

impl From<CandidateCreate> for NewCandidate {
  fn from(b: CandidateCreate) -> Self {
    NewCandidate {
      first_name:        b.first_name,
      last_name:         b.last_name,
      email:             b.email,
      phone_number:      b.phone_number,
      best_call_time:    b.best_call_time,
      linked_in_profile: b.linked_in_profile,
      git_hub_profile:   b.git_hub_profile,
      comment:           b.comment,
    }
  }
}

impl CandidateUpdate {
  /// Overlay the present fields onto `target`. `id` is never touched.
  pub fn apply_to(self, target: &mut Candidate) {
    fn overlay<T>(slot: &mut T, value: Option<T>) {
      if let Some(v) = value {
        *slot = v;
      }
    }
    fn overlay_opt<T>(slot: &mut Option<T>, value: Option<T>) {
      if value.is_some() {
        *slot = value;
      }
    }

    overlay(&mut target.first_name, self.first_name);
    overlay(&mut target.last_name, self.last_name);
    overlay(&mut target.email, self.email);
    overlay_opt(&mut target.phone_number, self.phone_number);
    overlay_opt(&mut target.best_call_time, self.best_call_time);
    overlay_opt(&mut target.linked_in_profile, self.linked_in_profile);
    overlay_opt(&mut target.git_hub_profile, self.git_hub_profile);
    overlay_opt(&mut target.comment, self.comment);
  }
}
