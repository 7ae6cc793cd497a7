//! Text hygiene for raw retrieval output.

use crate::answer::Answer;
use crate::filter::Filter;

/// Trims surrounding whitespace from answer text and drops answers whose
/// text is empty after trimming. Retrieval backends occasionally emit blank
/// snippets; this stage keeps them out of the vote.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCleaner;

impl Filter for TextCleaner {
    fn apply(&self, answers: Vec<Answer>) -> Vec<Answer> {
        answers
            .into_iter()
            .filter_map(|mut answer| {
                let trimmed = answer.text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != answer.text.len() {
                    answer.text = trimmed.to_owned();
                }
                Some(answer)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "TextCleaner"
    }
}
