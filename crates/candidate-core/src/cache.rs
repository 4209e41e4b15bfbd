//! The cache port used by the service for its read snapshots.

use std::time::Duration;

/// A keyed, time-bound cache.
///
/// Implementations must treat an entry whose TTL has elapsed exactly like a
/// missing one.
pub trait SnapshotCache<V: Clone>: Send + Sync {
  /// The live entry for `key`, if any.
  fn get(&self, key: &str) -> Option<V>;

  /// Store `value` under `key`, replacing any previous entry. The entry
  /// expires `ttl` after this call.
  fn set(&self, key: &str, value: V, ttl: Duration);

  /// Drop the entry for `key`, if present.
  fn invalidate(&self, key: &str);
}
