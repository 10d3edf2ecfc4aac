//! Fingerprint cache for validation results.
//!
//! Keyed by a SHA-256 fingerprint of `(config_version, original_text)`,
//! following the same "hash the canonical bytes" idiom the workspace
//! already uses for schema-drift fingerprints. LRU-evicted at a size cap,
//! with a per-entry TTL, mirroring the bounded-`VecDeque` eviction idiom
//! used elsewhere in this codebase for bounded state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::decision::SecurityDecision;

/// Compute the cache key for `(config_version, original_text)`.
pub fn fingerprint(config_version: u64, original_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config_version.to_le_bytes());
    hasher.update([0u8]);
    hasher.update(original_text.as_bytes());
    format!("{:x}", hasher.finalize())
}

struct Entry {
    decision: SecurityDecision,
    inserted_at: Instant,
    last_used: u64,
}

/// A bounded, TTL-aware cache of validation results.
///
/// Reads acquire a shared lock; writes (insert, evict, prune) acquire an
/// exclusive lock. Writes are rare relative to reads, so a reader-biased
/// `tokio::sync::RwLock` is the right tool.
pub struct DecisionCache {
    entries: RwLock<HashMap<String, Entry>>,
    capacity: usize,
    ttl: Duration,
    clock: std::sync::atomic::AtomicU64,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl DecisionCache {
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            ttl: Duration::from_secs(ttl_seconds),
            clock: std::sync::atomic::AtomicU64::new(0),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }

    pub async fn get(&self, key: &str) -> Option<SecurityDecision> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                Some(entry.decision.clone())
            }
            _ => {
                self.misses.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn insert(&self, key: String, decision: SecurityDecision) {
        let mut entries = self.entries.write().await;
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            evict_lru(&mut entries);
        }
        let last_used = self.tick();
        entries.insert(key, Entry { decision, inserted_at: Instant::now(), last_used });
    }

    /// Drop every entry whose TTL has expired. Called periodically, not
    /// on every request, to bound the cost of pruning.
    pub async fn prune_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Clear every entry, for use on configuration reload.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed) as f64;
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed) as f64;
        if hits + misses == 0.0 {
            0.0
        } else {
            hits / (hits + misses)
        }
    }
}

fn evict_lru(entries: &mut HashMap<String, Entry>) {
    if let Some(oldest_key) = entries.iter().min_by_key(|(_, entry)| entry.last_used).map(|(k, _)| k.clone()) {
        entries.remove(&oldest_key);
    }
}
