//! The question-answering flow: retrieve evidence, then rank.

use sibyl_rank::{Answer, FilterPipeline};

use crate::config::SibylConfig;
use crate::error::Result;
use crate::question;
use crate::search;

/// Answer a question by mining the web and ranking against the evidence.
///
/// With `candidates` supplied, each candidate is fuzzy-voted against the
/// retrieved evidence and scored as a confidence percentage; questions
/// phrased in the negative ("which of these is NOT…") flip into inverse
/// ranking automatically. With no candidates the filtered evidence itself
/// is returned, best first. A blank question short-circuits to an empty
/// result without touching the network.
///
/// # Errors
///
/// Returns [`SibylError::AllMinersFailed`](crate::SibylError::AllMinersFailed)
/// when every retrieval backend failed.
pub async fn ask(
    question_text: &str,
    candidates: &[String],
    pipeline: &FilterPipeline,
    config: &SibylConfig,
) -> Result<Vec<Answer>> {
    let query = question::build_query(question_text);
    if query.is_empty() {
        tracing::debug!("blank question, skipping retrieval");
        return Ok(Vec::new());
    }

    let evidence = search::mine_all(&query, &config.retrieval).await?;
    tracing::debug!(count = evidence.len(), "evidence retrieval complete");

    let ranked = if candidates.is_empty() {
        sibyl_rank::select(
            pipeline,
            evidence,
            config.ranking.max_results,
            config.ranking.min_score,
        )
    } else {
        let inverse = question::is_inverse_question(question_text);
        if inverse {
            tracing::debug!("inverse question detected");
        }
        sibyl_rank::select_matching(
            pipeline,
            evidence,
            candidates,
            config.ranking.max_results,
            config.ranking.min_score,
            inverse,
        )
    };
    Ok(ranked)
}
