//! Shipped [`Filter`](crate::Filter) implementations.
//!
//! Each module provides one stage suitable for cleaning raw retrieval
//! output before ranking. Callers compose them (or their own stages) into a
//! [`FilterPipeline`](crate::FilterPipeline) in whatever order suits them.

pub mod clean;
pub mod dedup;
pub mod score_sort;

pub use clean::TextCleaner;
pub use dedup::SourceDedup;
pub use score_sort::ScoreSorter;
