//! Knowledge miners: web retrieval of answer evidence.
//!
//! Each module provides a struct implementing [`KnowledgeMiner`] that turns
//! a query into scored [`Answer`] evidence from one search backend. Miners
//! are queried concurrently and their output merged, position-scored, and
//! capped before ranking.

use sibyl_rank::Answer;

use crate::cache;
use crate::config::RetrievalConfig;
use crate::error::{Result, SibylError};

pub mod bing;
pub mod duckduckgo;

pub use bing::BingMiner;
pub use duckduckgo::DuckDuckGoMiner;

/// Supported retrieval backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MinerKind {
    /// DuckDuckGo HTML scrape — no key required, scraper-friendly.
    DuckDuckGo,
    /// Bing Web Search v7 API — needs a subscription key, clean JSON.
    Bing,
}

impl MinerKind {
    /// Returns the human-readable name of this miner.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
        }
    }

    /// Returns the default weight of this miner's evidence in ranking.
    /// Higher weight means its answers score higher.
    pub fn weight(&self) -> f32 {
        match self {
            Self::DuckDuckGo => 1.0,
            Self::Bing => 1.2,
        }
    }

    /// Every backend Sibyl can be configured with.
    pub fn all() -> &'static [MinerKind] {
        &[Self::DuckDuckGo, Self::Bing]
    }
}

impl std::fmt::Display for MinerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A retrieval backend that turns queries into answer evidence.
///
/// One implementation exists per [`MinerKind`]. A miner owns its request
/// construction, authentication, and response parsing; [`mine_all`] treats
/// miners uniformly and polls them concurrently, hence the `Send + Sync`
/// bound.
pub trait KnowledgeMiner: Send + Sync {
    /// Fetch evidence for one query.
    ///
    /// # Errors
    ///
    /// Returns [`SibylError`] when the request fails or the response
    /// cannot be decoded.
    fn mine(
        &self,
        query: &str,
        config: &RetrievalConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Answer>>> + Send;

    /// The [`MinerKind`] this implementation answers for.
    fn kind(&self) -> MinerKind;

    /// Ranking weight of this miner's evidence.
    fn weight(&self) -> f32 {
        self.kind().weight()
    }
}

/// Query every configured miner concurrently and merge their evidence.
///
/// Answers are scored by miner weight and result position, sorted by that
/// score, and capped at `config.max_results`. Individual miner failures are
/// logged and skipped; the call fails only when every miner failed. Merged
/// evidence is cached per (query, miner set) when a cache TTL is
/// configured.
///
/// # Errors
///
/// Returns [`SibylError::AllMinersFailed`] when no miner produced results
/// and at least one reported an error.
pub async fn mine_all(query: &str, config: &RetrievalConfig) -> Result<Vec<Answer>> {
    let key = cache::CacheKey::new(query, &config.miners);
    if config.cache_ttl_seconds > 0 {
        if let Some(hit) = cache::get(&key, config.cache_ttl_seconds).await {
            tracing::debug!(count = hit.len(), "retrieval cache hit");
            return Ok(hit);
        }
    }

    let queries = config.miners.iter().map(|kind| {
        let kind = *kind;
        async move { (kind, query_miner(kind, query, config).await) }
    });
    let outcomes = futures::future::join_all(queries).await;

    let merged = merge_outcomes(outcomes, config.max_results)?;

    if config.cache_ttl_seconds > 0 {
        cache::insert(key, merged.clone(), config.cache_ttl_seconds).await;
    }
    Ok(merged)
}

/// Dispatch a query to the implementation behind a [`MinerKind`].
async fn query_miner(
    kind: MinerKind,
    query: &str,
    config: &RetrievalConfig,
) -> Result<Vec<Answer>> {
    match kind {
        MinerKind::DuckDuckGo => DuckDuckGoMiner.mine(query, config).await,
        MinerKind::Bing => BingMiner.mine(query, config).await,
    }
}

/// Collect per-miner outcomes into one scored, capped evidence list.
fn merge_outcomes(
    outcomes: Vec<(MinerKind, Result<Vec<Answer>>)>,
    max_results: usize,
) -> Result<Vec<Answer>> {
    let mut all: Vec<Answer> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (kind, outcome) in outcomes {
        match outcome {
            Ok(answers) => {
                tracing::debug!(miner = %kind, count = answers.len(), "miner returned evidence");
                all.extend(score_answers(answers, kind.weight()));
            }
            Err(err) => {
                tracing::warn!(miner = %kind, error = %err, "miner failed");
                errors.push(format!("{kind}: {err}"));
            }
        }
    }

    if all.is_empty() && !errors.is_empty() {
        return Err(SibylError::AllMinersFailed(errors.join("; ")));
    }

    all.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    all.truncate(max_results);
    Ok(all)
}

/// Position-decay scoring: the further down a miner's list an answer
/// appears, the less it is worth.
fn score_answers(mut answers: Vec<Answer>, weight: f32) -> Vec<Answer> {
    for (position, answer) in answers.iter_mut().enumerate() {
        answer.score = weight * (1.0 / (1.0 + position as f32 * 0.1));
    }
    answers
}
