//! Handlers for `/candidates` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/candidates` | Cached list |
//! | `POST`   | `/candidates` | Body: [`CandidateCreate`]; 200 + created item, 409 on duplicate |
//! | `GET`    | `/candidates/{id}` | 404 if not found |
//! | `PUT`    | `/candidates/{id}` | Body: [`CandidateUpdate`]; partial overlay |
//! | `DELETE` | `/candidates/{id}` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
};
use candidate_core::{
  cache::SnapshotCache,
  dto::{CandidateCreate, CandidateDto, CandidateUpdate},
  store::CandidateStore,
};
use candidate_service::{CandidateService, Snapshot};

use crate::error::ApiError;

type Service<S, C> = Arc<CandidateService<S, C>>;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /candidates`
pub async fn list<S, C>(
  State(service): State<Service<S, C>>,
) -> Result<Json<Vec<CandidateDto>>, ApiError>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  Ok(Json(service.list_all().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /candidates/{id}`
pub async fn get_one<S, C>(
  State(service): State<Service<S, C>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CandidateDto>, ApiError>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  let Path(id) = id?;
  Ok(Json(service.get_by_id(id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /candidates`: returns 200 + the stored candidate.
pub async fn create<S, C>(
  State(service): State<Service<S, C>>,
  body: Result<Json<CandidateCreate>, JsonRejection>,
) -> Result<Json<CandidateDto>, ApiError>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  let Json(body) = body?;
  body.validate()?;
  Ok(Json(service.create(body).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /candidates/{id}`: fields missing from the body are left unchanged.
pub async fn update<S, C>(
  State(service): State<Service<S, C>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<CandidateUpdate>, JsonRejection>,
) -> Result<Json<CandidateDto>, ApiError>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  let Path(id) = id?;
  let Json(body) = body?;
  body.validate()?;
  Ok(Json(service.update(id, body).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /candidates/{id}`: 204 with no body.
pub async fn remove<S, C>(
  State(service): State<Service<S, C>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  let Path(id) = id?;
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
