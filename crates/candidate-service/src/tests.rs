//! Service tests over a real in-memory `SqliteStore` and a `MemoryCache`,
//! plus a scripted fake store for failure paths.

use std::time::Duration;

use candidate_core::{
  candidate::{Candidate, NewCandidate},
  dto::{CandidateCreate, CandidateUpdate},
  store::{CandidateSession, CandidateStore, StoreError},
};
use candidate_store_sqlite::SqliteStore;

use crate::{CandidateService, DEFAULT_LIST_TTL, Error, MemoryCache, Snapshot};

type Service = CandidateService<SqliteStore, MemoryCache<Snapshot>>;

/// Returns the service plus a second handle on the same database, used to
/// write behind the service's back.
async fn service() -> (Service, SqliteStore) {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  (CandidateService::new(store.clone(), MemoryCache::new()), store)
}

fn create_body(first: &str, last: &str, email: &str) -> CandidateCreate {
  CandidateCreate {
    first_name:        first.into(),
    last_name:         last.into(),
    email:             email.into(),
    phone_number:      None,
    best_call_time:    None,
    linked_in_profile: None,
    git_hub_profile:   None,
    comment:           None,
  }
}

fn last_name(value: &str) -> CandidateUpdate {
  CandidateUpdate { last_name: Some(value.into()), ..Default::default() }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn created_candidate_can_be_read_back() {
  let (svc, _) = service().await;
  let mut body = create_body("Ana", "Li", "ana@x.io");
  body.phone_number = Some("+1 555 0100".into());

  let created = svc.create(body).await.unwrap();
  let fetched = svc.get_by_id(created.id).await.unwrap();

  assert_eq!(fetched, created);
  assert_eq!(fetched.phone_number.as_deref(), Some("+1 555 0100"));
}

#[tokio::test]
async fn missing_id_is_not_found_everywhere() {
  let (svc, _) = service().await;

  let get = svc.get_by_id(999).await.unwrap_err();
  let update = svc.update(999, last_name("Lee")).await.unwrap_err();
  let delete = svc.delete(999).await.unwrap_err();

  for err in [get, update, delete] {
    assert!(matches!(err, Error::NotFound(999)), "got {err:?}");
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.key(), "candidate_not_found");
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_name_and_email_conflicts_ignoring_case() {
  let (svc, _) = service().await;
  svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap();

  let err = svc
    .create(create_body("ANA", "Someone", "Ana@X.io"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AlreadyExists), "got {err:?}");
  assert_eq!(err.status_code(), 409);
  assert_eq!(err.key(), "candidate_already_exist");

  // Same first name, different email is a different candidate.
  svc.create(create_body("Ana", "Li", "ana@y.io")).await.unwrap();
  assert_eq!(svc.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_duplicate_creates_yield_one_row() {
  let (svc, _) = service().await;

  let (a, b) = tokio::join!(
    svc.create(create_body("Ana", "Li", "ana@x.io")),
    svc.create(create_body("ana", "Li", "ANA@x.io")),
  );

  let outcomes = [a, b];
  assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
  assert!(
    outcomes
      .iter()
      .any(|r| matches!(r, Err(Error::AlreadyExists)))
  );
  assert_eq!(svc.list_all().await.unwrap().len(), 1);
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overlays_only_present_fields() {
  let (svc, _) = service().await;
  let mut body = create_body("Ana", "Li", "ana@x.io");
  body.comment = Some("open to work".into());
  let created = svc.create(body).await.unwrap();

  let updated = svc.update(created.id, last_name("Lee")).await.unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.last_name, "Lee");
  assert_eq!(updated.first_name, "Ana");
  assert_eq!(updated.comment.as_deref(), Some("open to work"));

  assert_eq!(svc.get_by_id(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_onto_existing_pair_conflicts() {
  let (svc, _) = service().await;
  svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap();
  let bo = svc.create(create_body("Bo", "Ek", "bo@x.io")).await.unwrap();

  let err = svc
    .update(bo.id, CandidateUpdate {
      first_name: Some("ana".into()),
      email: Some("ANA@x.io".into()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AlreadyExists), "got {err:?}");
  assert_eq!(svc.get_by_id(bo.id).await.unwrap().first_name, "Bo");
}

#[tokio::test]
async fn delete_removes_the_candidate() {
  let (svc, _) = service().await;
  let created = svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap();

  assert!(svc.delete(created.id).await.unwrap());
  assert!(matches!(
    svc.get_by_id(created.id).await,
    Err(Error::NotFound(_))
  ));
  assert!(matches!(svc.delete(created.id).await, Err(Error::NotFound(_))));
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_write_invalidates_the_list() {
  let (svc, _) = service().await;
  assert!(svc.list_all().await.unwrap().is_empty());

  let created = svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap();
  assert_eq!(svc.list_all().await.unwrap(), vec![created.clone()]);

  let updated = svc.update(created.id, last_name("Lee")).await.unwrap();
  assert_eq!(svc.list_all().await.unwrap(), vec![updated]);

  svc.delete(created.id).await.unwrap();
  assert!(svc.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_served_from_cache_until_ttl() {
  let (svc, store) = service().await;
  let svc = svc.with_list_ttl(Duration::from_millis(200));
  svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap();
  let first = svc.list_all().await.unwrap();

  // Written straight to the store, so the service never invalidates.
  store
    .session()
    .create(NewCandidate::new("Bo", "Ek", "bo@x.io"))
    .await
    .unwrap();

  assert_eq!(svc.list_all().await.unwrap(), first);

  tokio::time::sleep(Duration::from_millis(300)).await;
  assert_eq!(svc.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn default_list_ttl_is_five_minutes() {
  assert_eq!(DEFAULT_LIST_TTL, Duration::from_secs(300));
}

// ─── Conflicts detected by the store ─────────────────────────────────────────

#[tokio::test]
async fn pair_written_behind_the_service_still_conflicts() {
  let (svc, store) = service().await;
  store
    .session()
    .create(NewCandidate::new("Ana", "Li", "ana@x.io"))
    .await
    .unwrap();

  let err = svc
    .create(create_body("ana", "Other", "ANA@x.io"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AlreadyExists), "got {err:?}");
  assert_eq!(store.session().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn insert_rejected_by_the_store_is_a_conflict() {
  let svc = CandidateService::new(
    FakeStore(Failure::Conflict),
    MemoryCache::<Snapshot>::new(),
  );

  let err = svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyExists), "got {err:?}");
  assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn update_of_row_deleted_before_flush_is_not_found() {
  let svc = CandidateService::new(
    FakeStore(Failure::Vanished),
    MemoryCache::<Snapshot>::new(),
  );

  let err = svc.update(VANISHED_ID, last_name("Lee")).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(VANISHED_ID)), "got {err:?}");
  assert_eq!(err.status_code(), 404);
}

// ─── Store failures ──────────────────────────────────────────────────────────

const VANISHED_ID: i64 = 7;

/// How a [`FakeStore`] misbehaves.
#[derive(Clone, Copy)]
enum Failure {
  /// Every call fails.
  Offline,
  /// Lookups find nothing, inserts hit the unique index.
  Conflict,
  /// Lookups find [`VANISHED_ID`], but the row is gone by flush time.
  Vanished,
}

#[derive(Debug, thiserror::Error)]
enum FakeError {
  #[error("store offline")]
  Offline,
  #[error("unique index violated")]
  Conflict,
  #[error("candidate {0} is gone")]
  Missing(i64),
}

impl StoreError for FakeError {
  fn is_conflict(&self) -> bool { matches!(self, FakeError::Conflict) }

  fn missing_id(&self) -> Option<i64> {
    match self {
      FakeError::Missing(id) => Some(*id),
      _ => None,
    }
  }
}

#[derive(Clone, Copy)]
struct FakeStore(Failure);

impl FakeStore {
  fn offline(&self) -> Result<(), FakeError> {
    match self.0 {
      Failure::Offline => Err(FakeError::Offline),
      _ => Ok(()),
    }
  }
}

impl CandidateStore for FakeStore {
  type Error = FakeError;
  type Session = FakeStore;

  fn session(&self) -> FakeStore { *self }
}

impl CandidateSession for FakeStore {
  type Error = FakeError;

  async fn find_all(&self) -> Result<Vec<Candidate>, FakeError> {
    self.offline()?;
    Ok(Vec::new())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Candidate>, FakeError> {
    self.offline()?;
    Ok(match self.0 {
      Failure::Vanished if id == VANISHED_ID => {
        Some(NewCandidate::new("Ana", "Li", "ana@x.io").with_id(id))
      }
      _ => None,
    })
  }

  async fn find_by_name_and_email(
    &self,
    _first_name: &str,
    _email: &str,
  ) -> Result<Option<Candidate>, FakeError> {
    self.offline()?;
    Ok(None)
  }

  async fn create(&mut self, input: NewCandidate) -> Result<Candidate, FakeError> {
    self.offline()?;
    match self.0 {
      Failure::Conflict => Err(FakeError::Conflict),
      _ => Ok(input.with_id(1)),
    }
  }

  async fn update(&mut self, candidate: Candidate) -> Result<Candidate, FakeError> {
    self.offline()?;
    Ok(candidate)
  }

  async fn delete(&mut self, _id: i64) -> Result<bool, FakeError> {
    self.offline()?;
    Ok(true)
  }

  async fn flush(&mut self) -> Result<(), FakeError> {
    self.offline()?;
    match self.0 {
      Failure::Vanished => Err(FakeError::Missing(VANISHED_ID)),
      _ => Ok(()),
    }
  }
}

#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
  let svc = CandidateService::new(
    FakeStore(Failure::Offline),
    MemoryCache::<Snapshot>::new(),
  );

  let err = svc.list_all().await.unwrap_err();
  assert!(matches!(err, Error::Store(_)), "got {err:?}");
  assert_eq!(err.status_code(), 500);
  assert_eq!(err.key(), "internal_server_error");

  let err = svc.create(create_body("Ana", "Li", "ana@x.io")).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)), "got {err:?}");
}
