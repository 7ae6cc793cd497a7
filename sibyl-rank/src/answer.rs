//! Core answer type shared by retrieval, filtering, and ranking.

use serde::{Deserialize, Serialize};

/// A single scored answer.
///
/// Produced by retrieval backends from raw search hits, reshaped by
/// [`Filter`](crate::Filter) stages, and re-scored by the selection
/// operations. The `text` of an answer returned by the engine is never
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The answer or evidence text.
    pub text: String,
    /// Relevance or confidence score. Producer-defined until the engine
    /// reassigns it during aggregation.
    pub score: f32,
    /// Where the text came from, if known. Never consulted for scoring.
    pub source_url: Option<String>,
}

impl Answer {
    /// An answer with no recorded provenance.
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
            source_url: None,
        }
    }

    /// An answer attributed to a source URL.
    pub fn with_source(text: impl Into<String>, score: f32, source_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score,
            source_url: Some(source_url.into()),
        }
    }
}
