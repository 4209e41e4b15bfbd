//! [`MemoryCache`], a process-local implementation of [`SnapshotCache`].

use std::time::{Duration, Instant};

use candidate_core::cache::SnapshotCache;
use moka::{Expiry, sync::Cache};

/// Upper bound on the cache capacity, in entries.
const DEFAULT_MAX_ENTRIES: u64 = 1_024;

/// Longest TTL handed to moka; longer requests are clamped to it.
const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Clone)]
struct Entry<V> {
  value: V,
  ttl:   Duration,
}

/// Expires each entry after the TTL it was stored with, restarting the
/// countdown whenever the entry is replaced.
struct PerEntryTtl;

impl<V> Expiry<String, Entry<V>> for PerEntryTtl {
  fn expire_after_create(
    &self,
    _key: &String,
    entry: &Entry<V>,
    _created_at: Instant,
  ) -> Option<Duration> {
    Some(entry.ttl)
  }

  fn expire_after_update(
    &self,
    _key: &String,
    entry: &Entry<V>,
    _updated_at: Instant,
    _duration_until_expiry: Option<Duration>,
  ) -> Option<Duration> {
    Some(entry.ttl)
  }
}

/// A [`moka`] cache whose entries each carry their own TTL.
pub struct MemoryCache<V> {
  entries: Cache<String, Entry<V>>,
}

impl<V> MemoryCache<V>
where
  V: Clone + Send + Sync + 'static,
{
  pub fn new() -> Self { Self::with_capacity(DEFAULT_MAX_ENTRIES) }

  pub fn with_capacity(max_entries: u64) -> Self {
    let entries = Cache::builder()
      .max_capacity(max_entries)
      .expire_after(PerEntryTtl)
      .build();
    Self { entries }
  }
}

impl<V> Default for MemoryCache<V>
where
  V: Clone + Send + Sync + 'static,
{
  fn default() -> Self { Self::new() }
}

impl<V> SnapshotCache<V> for MemoryCache<V>
where
  V: Clone + Send + Sync + 'static,
{
  fn get(&self, key: &str) -> Option<V> {
    self.entries.get(key).map(|entry| entry.value)
  }

  fn set(&self, key: &str, value: V, ttl: Duration) {
    let ttl = ttl.min(MAX_TTL);
    self.entries.insert(key.to_owned(), Entry { value, ttl });
  }

  fn invalidate(&self, key: &str) { self.entries.invalidate(key); }
}
