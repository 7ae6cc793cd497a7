//! Question normalisation and inverse-mode detection.

/// Words that flip ranking into inverse mode when they appear in the
/// question.
const NEGATION_MARKERS: &[&str] = &["not", "never", "except"];

/// Build the retrieval query for a question.
///
/// The question text itself is the query; this only collapses whitespace
/// runs and trims the ends. Linguistic rewriting (keyword extraction,
/// answer-type analysis) is deliberately not attempted.
pub fn build_query(question: &str) -> String {
    question.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the question asks for the candidate the evidence supports
/// least ("Which of these is NOT a planet?").
///
/// Detection looks for whole-word negation markers and `n't` contractions,
/// so "knot" or "nothing" never trigger it.
pub fn is_inverse_question(question: &str) -> bool {
    question
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '\u{2019}')
        .any(|word| {
            NEGATION_MARKERS.contains(&word)
                || word.ends_with("n't")
                || word.ends_with("n\u{2019}t")
        })
}
