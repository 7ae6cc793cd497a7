//! Query-level caching of mined evidence.
//!
//! A full mining round costs one network call per configured miner, so
//! the merged evidence is kept in a process-wide [`moka`] cache for a
//! configurable TTL. Askers that repeat a question inside the TTL get
//! the same evidence without touching the network.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;
use sibyl_rank::Answer;

use crate::search::MinerKind;

/// Upper bound on distinct queries held at once.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Process-wide evidence cache.
///
/// Built on first use. Whatever TTL that first caller passes sticks for
/// the life of the process.
static CACHE: OnceLock<Cache<CacheKey, Vec<Answer>>> = OnceLock::new();

/// Cache key pairing a normalised query with the miner set that answered it.
///
/// Evidence mined by `[Bing]` must never satisfy a lookup for
/// `[Bing, DuckDuckGo]`, so the miner names are part of the key. They are
/// sorted and deduplicated first; listing the same miners in a different
/// order yields the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    miners: Vec<&'static str>,
}

impl CacheKey {
    /// Build the key for a query and miner list.
    pub fn new(query: &str, miners: &[MinerKind]) -> Self {
        let mut names: Vec<&'static str> = miners.iter().map(MinerKind::name).collect();
        names.sort_unstable();
        names.dedup();
        Self {
            query: query.trim().to_lowercase(),
            miners: names,
        }
    }
}

fn shared_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, Vec<Answer>> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Cached evidence for the key, if any is still live.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<Vec<Answer>> {
    shared_cache(ttl_seconds).get(key).await
}

/// Store a mining round's merged evidence.
pub async fn insert(key: CacheKey, answers: Vec<Answer>, ttl_seconds: u64) {
    shared_cache(ttl_seconds).insert(key, answers).await;
}
