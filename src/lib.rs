//! Sibyl: open-domain factoid question answering over live web search.
//!
//! This crate turns a natural-language question into scored answers:
//! Question → Miners → Filters → Voting → Confidence scores
//!
//! # Architecture
//!
//! The service is built from independent layers:
//! - **Retrieval**: Mines evidence snippets from web search engines via `reqwest`
//! - **Caching**: Deduplicates repeated queries with a TTL cache (`moka`)
//! - **Ranking**: Filter pipelines and fuzzy token-set voting, provided by
//!   the `sibyl-rank` crate
//! - **HTTP API**: Serves `POST /ask` and `GET /health` via `axum`

pub mod ask;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod question;
pub mod search;
pub mod server;

pub use ask::ask;
pub use config::SibylConfig;
pub use error::{Result, SibylError};
pub use server::AskServer;

// Ranking types that appear in this crate's public signatures.
pub use sibyl_rank::{Answer, FilterPipeline, default_pipeline};
