//! Business rules for the Candidate Hub.
//!
//! [`CandidateService`] sits between the HTTP layer and any
//! [`candidate_core::store::CandidateStore`]. It owns duplicate detection,
//! not-found semantics and invalidation of the cached candidate list.

pub mod cache;
pub mod error;
pub mod service;

pub use cache::MemoryCache;
pub use error::{Error, Result};
pub use service::{CandidateService, DEFAULT_LIST_TTL, Snapshot};

#[cfg(test)]
mod tests;
