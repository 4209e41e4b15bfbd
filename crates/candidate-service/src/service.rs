//! [`CandidateService`]: existence checks, caching and unit-of-work
//! boundaries over a [`CandidateStore`].

use std::{sync::Arc, time::Duration};

use candidate_core::{
  cache::SnapshotCache,
  candidate::NewCandidate,
  dto::{CandidateCreate, CandidateDto, CandidateUpdate},
  store::{CandidateSession, CandidateStore, StoreError},
};
use tracing::{debug, info};

use crate::{Error, Result};

/// Cache key of the "list all" snapshot.
pub const LIST_CACHE_KEY: &str = "candidates:all";

/// How long a "list all" snapshot is served before the store is re-read.
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(5 * 60);

/// The cached "list all" read model.
pub type Snapshot = Arc<Vec<CandidateDto>>;

fn store_error<E: StoreError>(err: E) -> Error {
  if err.is_conflict() {
    Error::AlreadyExists
  } else if let Some(id) = err.missing_id() {
    Error::NotFound(id)
  } else {
    Error::Store(Box::new(err))
  }
}

/// Candidate use cases.
///
/// Every mutating call opens one session, ends it with an explicit flush and
/// then drops the cached list so the next [`list_all`](Self::list_all) sees
/// the write.
pub struct CandidateService<S, C> {
  store:    S,
  cache:    C,
  list_ttl: Duration,
}

impl<S, C> CandidateService<S, C>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  pub fn new(store: S, cache: C) -> Self {
    Self { store, cache, list_ttl: DEFAULT_LIST_TTL }
  }

  /// Override the lifetime of the cached candidate list.
  pub fn with_list_ttl(mut self, ttl: Duration) -> Self {
    self.list_ttl = ttl;
    self
  }

  /// All candidates, served from the cached snapshot while it is live.
  pub async fn list_all(&self) -> Result<Vec<CandidateDto>> {
    if let Some(snapshot) = self.cache.get(LIST_CACHE_KEY) {
      debug!(count = snapshot.len(), "candidate list cache hit");
      return Ok(snapshot.to_vec());
    }

    let candidates = self.store.session().find_all().await.map_err(store_error)?;
    let dtos: Vec<CandidateDto> =
      candidates.into_iter().map(CandidateDto::from).collect();

    debug!(count = dtos.len(), "candidate list cache miss; snapshot stored");
    self.cache.set(LIST_CACHE_KEY, Arc::new(dtos.clone()), self.list_ttl);
    Ok(dtos)
  }

  pub async fn get_by_id(&self, id: i64) -> Result<CandidateDto> {
    let candidate = self
      .store
      .session()
      .find_by_id(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::NotFound(id))?;
    Ok(candidate.into())
  }

  /// Create a candidate unless one with the same first name and email
  /// (ignoring case) already exists.
  pub async fn create(&self, input: CandidateCreate) -> Result<CandidateDto> {
    let mut session = self.store.session();

    let existing = session
      .find_by_name_and_email(&input.first_name, &input.email)
      .await
      .map_err(store_error)?;
    if let Some(existing) = existing {
      debug!(id = existing.id, "create rejected: duplicate name and email");
      return Err(Error::AlreadyExists);
    }

    let created = session
      .create(NewCandidate::from(input))
      .await
      .map_err(store_error)?;
    session.flush().await.map_err(store_error)?;
    self.invalidate_list();

    info!(id = created.id, "candidate created");
    Ok(created.into())
  }

  /// Overlay the present fields of `input` onto candidate `id`.
  pub async fn update(
    &self,
    id: i64,
    input: CandidateUpdate,
  ) -> Result<CandidateDto> {
    let mut session = self.store.session();

    let mut candidate = session
      .find_by_id(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::NotFound(id))?;
    input.apply_to(&mut candidate);

    let updated = session.update(candidate).await.map_err(store_error)?;
    session.flush().await.map_err(store_error)?;
    self.invalidate_list();

    info!(id, "candidate updated");
    Ok(updated.into())
  }

  pub async fn delete(&self, id: i64) -> Result<bool> {
    let mut session = self.store.session();

    if session.find_by_id(id).await.map_err(store_error)?.is_none() {
      return Err(Error::NotFound(id));
    }
    // A concurrent delete may have won since the check above.
    if !session.delete(id).await.map_err(store_error)? {
      return Err(Error::NotFound(id));
    }
    session.flush().await.map_err(store_error)?;
    self.invalidate_list();

    info!(id, "candidate deleted");
    Ok(true)
  }

  fn invalidate_list(&self) { self.cache.invalidate(LIST_CACHE_KEY); }
}
