//! # sibyl-rank
//!
//! Answer selection and ranking for Sibyl.
//!
//! This crate turns an unordered pile of retrieved evidence into a scored,
//! ordered set of answers. It is pure computation, with no I/O and no
//! global state, so the same inputs always rank the same way. Retrieval
//! and the HTTP surface live in the parent crate.
//!
//! ## Design
//!
//! - A caller-owned [`FilterPipeline`] of [`Filter`] stages reshapes raw
//!   evidence (cleaning, per-source dedup, ordering, or custom stages)
//! - [`select`] keeps the top answers above a score floor
//! - [`select_matching`] votes caller-supplied candidate answers against
//!   the evidence with fuzzy token-set matching, weights near-exact
//!   matches among the kept top results, and normalises the tally into
//!   confidence percentages
//! - An inverse mode flips the distribution for questions asking which
//!   candidate the evidence supports *least*
//!
//! ## Example
//!
//! ```
//! use sibyl_rank::{select_matching, Answer, FilterPipeline};
//!
//! let evidence = vec![
//!     Answer::with_source("Paris is the capital of France", 1.0, "https://example.com/fr"),
//!     Answer::new("The capital of France is Paris", 0.9),
//! ];
//! let candidates = vec!["Paris".to_owned(), "Berlin".to_owned()];
//!
//! let pipeline = FilterPipeline::new();
//! let ranked = select_matching(&pipeline, evidence, &candidates, 10, 0.0, false);
//!
//! assert_eq!(ranked[0].text, "Paris");
//! assert!(ranked[0].score > ranked[1].score);
//! ```

pub mod answer;
pub mod filter;
pub mod filters;
pub mod fuzzy;
pub mod select;

pub use answer::Answer;
pub use filter::{Filter, FilterPipeline};
pub use fuzzy::token_set_ratio;
pub use select::{select, select_matching};

/// The stages the Sibyl service registers by default: text hygiene,
/// per-source deduplication, then score-descending order.
pub fn default_pipeline() -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    pipeline.push(filters::TextCleaner);
    pipeline.push(filters::SourceDedup);
    pipeline.push(filters::ScoreSorter);
    pipeline
}
