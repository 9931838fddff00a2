//! Analysis cache — bounded, injected store of per-job analysis results.
//!
//! Entries are keyed by job id and tagged with a fingerprint of the inputs that
//! produced them (requirement lines + normalized profile skills). A lookup with a
//! different fingerprint is a miss, so an edited profile never sees a stale result.
//! `AppState` holds an `Arc<dyn AnalysisStore>`; nothing here is global.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::analysis::{JobAnalysis, JobRequirements};
use crate::matching::normalize::normalize;

/// A cached analysis together with the time it was computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnalysis {
    pub analysis: JobAnalysis,
    pub computed_at: DateTime<Utc>,
}

/// Store trait. Implement this to back the cache with something other than memory.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn get(&self, job_id: Uuid, fingerprint: u64) -> Option<CachedAnalysis>;
    async fn put(&self, job_id: Uuid, fingerprint: u64, entry: CachedAnalysis);
    /// Returns true when an entry was removed.
    async fn invalidate(&self, job_id: Uuid) -> bool;
}

/// Fingerprint of everything an analysis depends on.
///
/// Skills are normalized, sorted and deduplicated first: duplicate or re-cased
/// skills produce the same analysis and therefore the same fingerprint.
pub fn analysis_fingerprint(requirements: &JobRequirements, profile_skills: &[String]) -> u64 {
    let mut skills: Vec<String> = profile_skills
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect();
    skills.sort_unstable();
    skills.dedup();

    let mut hasher = DefaultHasher::new();
    requirements.required.hash(&mut hasher);
    requirements.preferred.hash(&mut hasher);
    skills.hash(&mut hasher);
    hasher.finish()
}

/// In-process store bounded by entry count. Eviction is moka's (TinyLFU admission
/// with LRU eviction); a capacity of 0 disables caching.
pub struct InMemoryAnalysisStore {
    capacity: u64,
    cache: Cache<Uuid, (u64, CachedAnalysis)>,
}

impl InMemoryAnalysisStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity as u64;
        Self {
            capacity,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn get(&self, job_id: Uuid, fingerprint: u64) -> Option<CachedAnalysis> {
        let (stored, entry) = self.cache.get(&job_id).await?;
        (stored == fingerprint).then_some(entry)
    }

    async fn put(&self, job_id: Uuid, fingerprint: u64, entry: CachedAnalysis) {
        if self.capacity == 0 {
            return;
        }
        self.cache.insert(job_id, (fingerprint, entry)).await;
        tracing::debug!(%job_id, "cached analysis");
    }

    async fn invalidate(&self, job_id: Uuid) -> bool {
        self.cache.remove(&job_id).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::aggregate::WeightPolicy;
    use crate::matching::analysis::analyze_job;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_entry() -> CachedAnalysis {
        let requirements = JobRequirements {
            required: strings(&["Rust"]),
            preferred: vec![],
        };
        CachedAnalysis {
            analysis: analyze_job(&requirements, &strings(&["rust"]), &WeightPolicy::EvenSplit),
            computed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get_hits() {
        let store = InMemoryAnalysisStore::new(4);
        let job = Uuid::new_v4();
        store.put(job, 7, make_entry()).await;
        assert!(store.get(job, 7).await.is_some());
    }

    #[tokio::test]
    async fn test_fingerprint_mismatch_misses() {
        let store = InMemoryAnalysisStore::new(4);
        let job = Uuid::new_v4();
        store.put(job, 7, make_entry()).await;
        assert!(store.get(job, 8).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let store = InMemoryAnalysisStore::new(4);
        let job = Uuid::new_v4();
        store.put(job, 1, make_entry()).await;
        assert!(store.invalidate(job).await);
        assert!(!store.invalidate(job).await);
        assert!(store.get(job, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_entry_count_stays_within_capacity() {
        let store = InMemoryAnalysisStore::new(2);
        for _ in 0..10 {
            store.put(Uuid::new_v4(), 1, make_entry()).await;
        }
        store.cache.run_pending_tasks().await;
        assert!(store.cache.entry_count() <= 2);
    }

    #[tokio::test]
    async fn test_replacing_existing_key_keeps_latest_fingerprint() {
        let store = InMemoryAnalysisStore::new(2);
        let job = Uuid::new_v4();
        store.put(job, 1, make_entry()).await;
        store.put(job, 2, make_entry()).await;

        assert!(store.get(job, 1).await.is_none());
        assert!(store.get(job, 2).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_stores_nothing() {
        let store = InMemoryAnalysisStore::new(0);
        let job = Uuid::new_v4();
        store.put(job, 1, make_entry()).await;
        assert!(store.get(job, 1).await.is_none());
    }

    #[test]
    fn test_fingerprint_ignores_skill_order_case_and_duplicates() {
        let requirements = JobRequirements {
            required: strings(&["Rust", "Docker"]),
            preferred: strings(&["Kafka"]),
        };
        let a = analysis_fingerprint(&requirements, &strings(&["Rust", "Docker"]));
        let b = analysis_fingerprint(&requirements, &strings(&["docker", " RUST ", "rust"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_inputs() {
        let requirements = JobRequirements {
            required: strings(&["Rust"]),
            preferred: vec![],
        };
        let base = analysis_fingerprint(&requirements, &strings(&["rust"]));
        assert_ne!(base, analysis_fingerprint(&requirements, &strings(&["go"])));

        let moved = JobRequirements {
            required: vec![],
            preferred: strings(&["Rust"]),
        };
        assert_ne!(base, analysis_fingerprint(&moved, &strings(&["rust"])));
    }
}
