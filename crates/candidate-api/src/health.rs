//! `GET /health` liveness probe.
//!
//! Healthy only when the candidate list can be produced, which exercises the
//! cache and, on a miss, the store.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use candidate_core::{cache::SnapshotCache, store::CandidateStore};
use candidate_service::{CandidateService, Snapshot};
use serde_json::json;
use tracing::warn;

pub async fn handler<S, C>(
  State(service): State<Arc<CandidateService<S, C>>>,
) -> Response
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  let (status, label) = match service.list_all().await {
    Ok(_) => (StatusCode::OK, "healthy"),
    Err(e) => {
      warn!(error = %e, "health check failed");
      (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    }
  };

  (
    status,
    [(header::CACHE_CONTROL, "no-store")],
    Json(json!({ "status": label })),
  )
    .into_response()
}
