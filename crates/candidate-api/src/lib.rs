//! JSON REST API for the Candidate Hub.
//!
//! Exposes an axum [`Router`] backed by a [`CandidateService`] over any
//! [`CandidateStore`]. TLS and other transport concerns are the caller's
//! responsibility.

pub mod candidates;
pub mod error;
pub mod health;

pub use error::{ApiError, ErrorBody};

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use candidate_core::{cache::SnapshotCache, dto::CandidateCreate, store::CandidateStore};
use candidate_service::{CandidateService, DEFAULT_LIST_TTL, Snapshot};
use serde::Deserialize;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::info;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CANDIDATE_HUB_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Lifetime of the cached candidate list, in seconds.
  pub cache_ttl_secs: u64,
  /// Insert a sample candidate at startup when the store is empty.
  pub seed_sample:    bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           8080,
      store_path:     PathBuf::from("candidates.db"),
      cache_ttl_secs: DEFAULT_LIST_TTL.as_secs(),
      seed_sample:    false,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` and the environment over the
  /// defaults.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::with_prefix("CANDIDATE_HUB"))
      .build()?
      .try_deserialize()
  }

  pub fn list_ttl(&self) -> Duration { Duration::from_secs(self.cache_ttl_secs) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router.
pub fn router<S, C>(service: Arc<CandidateService<S, C>>) -> Router
where
  S: CandidateStore + 'static,
  C: SnapshotCache<Snapshot> + 'static,
{
  Router::new()
    .route(
      "/candidates",
      get(candidates::list::<S, C>).post(candidates::create::<S, C>),
    )
    .route(
      "/candidates/{id}",
      get(candidates::get_one::<S, C>)
        .put(candidates::update::<S, C>)
        .delete(candidates::remove::<S, C>),
    )
    .route("/health", get(health::handler::<S, C>))
    .layer(CatchPanicLayer::custom(error::panic_response))
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

// ─── Startup seeding ──────────────────────────────────────────────────────────

/// The candidate inserted by [`seed_sample`].
pub fn sample_candidate() -> CandidateCreate {
  CandidateCreate {
    first_name:        "Sample".to_string(),
    last_name:         "Candidate".to_string(),
    email:             "sample.candidate@example.com".to_string(),
    phone_number:      Some("+1 555 0100".to_string()),
    best_call_time:    None,
    linked_in_profile: Some("https://www.linkedin.com/in/sample-candidate".to_string()),
    git_hub_profile:   Some("https://github.com/sample-candidate".to_string()),
    comment:           Some("Open to work".to_string()),
  }
}

/// Insert [`sample_candidate`] if the store holds no candidates yet.
/// Returns whether a row was inserted.
pub async fn seed_sample<S, C>(
  service: &CandidateService<S, C>,
) -> Result<bool, candidate_service::Error>
where
  S: CandidateStore,
  C: SnapshotCache<Snapshot>,
{
  if !service.list_all().await?.is_empty() {
    return Ok(false);
  }
  let created = service.create(sample_candidate()).await?;
  info!(id = created.id, "seeded sample candidate");
  Ok(true)
}

// ─── Integration tests ────────────────────────────────────────────────────────
