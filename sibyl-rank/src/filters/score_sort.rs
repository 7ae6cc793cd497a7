//! Score-descending ordering stage.

use crate::answer::Answer;
use crate::filter::Filter;

/// Sorts answers by score, highest first. The sort is stable, so answers
/// with equal scores keep their input order and repeated application
/// changes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreSorter;

impl Filter for ScoreSorter {
    fn apply(&self, mut answers: Vec<Answer>) -> Vec<Answer> {
        answers.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        answers
    }

    fn name(&self) -> &str {
        "ScoreSorter"
    }
}
