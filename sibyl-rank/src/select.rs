//! Top-K selection and fuzzy-vote aggregation over candidate answers.

use std::collections::HashMap;

use crate::answer::Answer;
use crate::filter::FilterPipeline;
use crate::fuzzy::{token_set_ratio, STRONG_MATCH, WEAK_MATCH};

/// Filter `answers` through `pipeline`, then keep the first `max_results`
/// answers scoring at least `min_score`.
///
/// Selection scans the filtered sequence in order and never reorders it;
/// put a [`ScoreSorter`](crate::filters::ScoreSorter) (or any ordering of
/// your own) in the pipeline when "first" should mean "best". A
/// `max_results` of 0 selects nothing.
pub fn select(
    pipeline: &FilterPipeline,
    answers: Vec<Answer>,
    max_results: usize,
    min_score: f32,
) -> Vec<Answer> {
    let filtered = pipeline.apply(answers);
    let mut kept = Vec::new();
    for answer in filtered {
        if kept.len() == max_results {
            break;
        }
        if answer.score >= min_score {
            kept.push(answer);
        }
    }
    tracing::trace!(kept = kept.len(), "selection complete");
    kept
}

/// Score `candidates` against retrieved `answers` by fuzzy vote counting.
///
/// Every raw answer whose text weakly matches a candidate (token-set ratio
/// above [`WEAK_MATCH`]) contributes one vote. The answers are then pushed
/// through `pipeline` and the top `max_results` at or above `min_score` are
/// re-examined: a near-exact match there ([`STRONG_MATCH`] or higher) is
/// worth a bonus of half the raw answer count. Votes are finally normalised
/// by the raw answer count into percentages, which a strong consensus can
/// push past 100. With `inverse` set the distribution is flipped
/// (`100 - score`), ranking the candidate the evidence supports least
/// highest; flipped scores can go below zero.
///
/// The output carries one entry per distinct candidate, in first-occurrence
/// order. Repeated candidate strings share that single entry and still vote
/// once per occurrence, so duplicates inflate their own score. Empty
/// candidate strings are ignored. The result is empty when nothing matched;
/// an empty candidate list and a raw answer count of zero both land in that
/// same no-answer outcome.
pub fn select_matching(
    pipeline: &FilterPipeline,
    answers: Vec<Answer>,
    candidates: &[String],
    max_results: usize,
    min_score: f32,
    inverse: bool,
) -> Vec<Answer> {
    let result_count = answers.len();
    let mut found_any = false;

    // Tally keyed by candidate text, with first-occurrence order kept
    // separately for the output.
    let mut order: Vec<&str> = Vec::with_capacity(candidates.len());
    let mut votes: HashMap<&str, usize> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if !votes.contains_key(candidate.as_str()) {
            order.push(candidate);
            votes.insert(candidate, 0);
        }
    }

    // Weak pass over the raw answers. Runs before filtering so that every
    // retrieved answer counts toward the vote, whether or not it survives
    // the pipeline.
    for answer in &answers {
        for candidate in candidates {
            if token_set_ratio(candidate, &answer.text) > WEAK_MATCH {
                if let Some(count) = votes.get_mut(candidate.as_str()) {
                    *count += 1;
                    found_any = true;
                }
            }
        }
    }

    // Strong pass over the kept top answers. A near-exact match is weighted
    // at half the raw answer count.
    let kept = select(pipeline, answers, max_results, min_score);
    let bonus = result_count / 2;
    for answer in &kept {
        for candidate in candidates {
            if token_set_ratio(candidate, &answer.text) >= STRONG_MATCH {
                if let Some(count) = votes.get_mut(candidate.as_str()) {
                    *count += bonus;
                    found_any = true;
                    tracing::trace!(candidate = %candidate, "strong candidate match");
                }
            }
        }
    }

    if !found_any {
        tracing::debug!("no candidate matched any retrieved answer");
        return Vec::new();
    }
    if result_count == 0 {
        tracing::debug!("no raw answers to normalise votes against");
        return Vec::new();
    }

    let mut ranked = Vec::with_capacity(order.len());
    for candidate in order {
        let count = votes.get(candidate).copied().unwrap_or(0);
        let mut fraction = count as f64 / result_count as f64;
        if inverse {
            fraction = 1.0 - fraction;
        }
        ranked.push(Answer::new(candidate, (fraction * 100.0) as f32));
    }
    tracing::debug!(
        candidates = ranked.len(),
        result_count,
        inverse,
        "candidate votes normalised"
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::filters::ScoreSorter;

    fn make_answer(text: &str, score: f32) -> Answer {
        Answer::new(text, score)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    /// Drops answers scoring below the floor.
    struct Floor(f32);

    impl Filter for Floor {
        fn apply(&self, answers: Vec<Answer>) -> Vec<Answer> {
            answers.into_iter().filter(|a| a.score >= self.0).collect()
        }

        fn name(&self) -> &str {
            "Floor"
        }
    }

    /// Appends one synthetic answer regardless of input.
    struct Synth;

    impl Filter for Synth {
        fn apply(&self, mut answers: Vec<Answer>) -> Vec<Answer> {
            answers.push(make_answer("synthetic", 1.0));
            answers
        }

        fn name(&self) -> &str {
            "Synth"
        }
    }

    #[test]
    fn select_with_zero_max_results_is_empty() {
        let pipeline = FilterPipeline::new();
        let out = select(&pipeline, vec![make_answer("a", 1.0)], 0, 0.0);
        assert!(out.is_empty());
    }

    #[test]
    fn select_keeps_first_qualifying_answers_in_order() {
        let pipeline = FilterPipeline::new();
        let answers = vec![
            make_answer("a", 1.0),
            make_answer("b", 0.2),
            make_answer("c", 0.8),
            make_answer("d", 0.9),
        ];
        let out = select(&pipeline, answers, 2, 0.5);
        let texts: Vec<&str> = out.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn select_drops_everything_below_min_score() {
        let pipeline = FilterPipeline::new();
        let out = select(&pipeline, vec![make_answer("a", 0.1), make_answer("b", 0.4)], 10, 0.5);
        assert!(out.is_empty());
    }

    #[test]
    fn select_on_empty_input_is_empty() {
        let pipeline = FilterPipeline::new();
        assert!(select(&pipeline, Vec::new(), 10, 0.0).is_empty());
    }

    #[test]
    fn select_applies_pipeline_before_the_cut() {
        let answers = vec![make_answer("low", 0.1), make_answer("high", 0.9)];

        let plain = select(&FilterPipeline::new(), answers.clone(), 1, 0.0);
        assert_eq!(plain[0].text, "low");

        let mut pipeline = FilterPipeline::new();
        pipeline.push(ScoreSorter);
        let sorted = select(&pipeline, answers, 1, 0.0);
        assert_eq!(sorted[0].text, "high");
    }

    #[test]
    fn weak_matches_earn_single_votes() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("george bush", 0.0), make_answer("tony blair", 0.0)];
        let candidates = strings(&["george washington"]);
        let out = select_matching(&pipeline, answers, &candidates, 10, 0.0, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "george washington");
        assert!((out[0].score - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn strong_matches_earn_the_bonus() {
        let pipeline = FilterPipeline::new();
        let answers = vec![
            make_answer("Paris is the capital of France", 0.0),
            make_answer("tartan kilts", 0.0),
        ];
        let out = select_matching(&pipeline, answers, &strings(&["Paris"]), 10, 0.0, false);
        assert_eq!(out.len(), 1);
        assert!((out[0].score - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unanimous_evidence_can_exceed_100() {
        let pipeline = FilterPipeline::new();
        let answers = vec![
            make_answer("Paris is the capital of France", 0.0),
            make_answer("The capital of France is Paris", 0.0),
            make_answer("France's capital city is Paris", 0.0),
        ];
        let out = select_matching(&pipeline, answers, &strings(&["Paris"]), 10, 0.0, false);
        assert!((out[0].score - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_match_anywhere_gives_empty() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("quartz crystal lattice", 0.0)];
        let out = select_matching(&pipeline, answers, &strings(&["Berlin"]), 10, 0.0, false);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_candidates_give_empty() {
        let pipeline = FilterPipeline::new();
        let out = select_matching(&pipeline, vec![make_answer("a", 0.0)], &[], 10, 0.0, false);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_answers_give_empty() {
        let pipeline = FilterPipeline::new();
        let out = select_matching(&pipeline, Vec::new(), &strings(&["Paris"]), 10, 0.0, false);
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_candidates_share_one_entry_and_double_vote() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("Paris is the capital", 0.0)];
        let candidates = strings(&["Paris", "Paris"]);
        let out = select_matching(&pipeline, answers, &candidates, 10, 0.0, false);
        assert_eq!(out.len(), 1);
        // Two occurrences vote on one raw answer; the strong bonus is
        // 1 / 2 == 0, so the tally is 2 of 1.
        assert!((out[0].score - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn output_follows_candidate_order() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("Paris is the capital of France", 0.0)];
        let out = select_matching(
            &pipeline,
            answers,
            &strings(&["Zurich", "Paris", "Oslo"]),
            10,
            0.0,
            false,
        );
        let texts: Vec<&str> = out.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["Zurich", "Paris", "Oslo"]);
        assert!(out[0].score.abs() < f32::EPSILON);
        assert!((out[1].score - 100.0).abs() < f32::EPSILON);
        assert!(out[2].score.abs() < f32::EPSILON);
    }

    #[test]
    fn inverse_flips_the_distribution() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("Paris is the capital of France", 0.0)];
        let out = select_matching(
            &pipeline,
            answers,
            &strings(&["Zurich", "Paris", "Oslo"]),
            10,
            0.0,
            true,
        );
        assert!((out[0].score - 100.0).abs() < f32::EPSILON);
        assert!(out[1].score.abs() < f32::EPSILON);
        assert!((out[2].score - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn inverse_of_an_oversupported_candidate_goes_negative() {
        let pipeline = FilterPipeline::new();
        let answers = vec![
            make_answer("Paris is the capital of France", 0.0),
            make_answer("The capital of France is Paris", 0.0),
            make_answer("France's capital city is Paris", 0.0),
        ];
        let out = select_matching(&pipeline, answers, &strings(&["Paris"]), 10, 0.0, true);
        assert!((out[0].score + 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn votes_normalise_against_the_prefilter_count() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Floor(0.5));
        let answers = vec![
            make_answer("quartz crystal lattice", 0.9),
            make_answer("quartz crystal lattice", 0.9),
            make_answer("wooden park bench", 0.2),
            make_answer("wooden park bench", 0.2),
        ];
        // 2 weak votes + 2 strong hits worth 4/2 each = 6 of 4 raw answers.
        let candidates = strings(&["quartz crystal lattice"]);
        let out = select_matching(&pipeline, answers, &candidates, 10, 0.0, false);
        assert!((out[0].score - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn filtered_out_answers_still_vote() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Floor(0.5));
        let answers = vec![make_answer("Paris is the capital", 0.1)];
        let out = select_matching(&pipeline, answers, &strings(&["Paris"]), 10, 0.0, false);
        assert_eq!(out.len(), 1);
        assert!((out[0].score - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn blank_candidates_are_ignored() {
        let pipeline = FilterPipeline::new();
        let answers = vec![make_answer("Paris is the capital", 0.0)];
        let out = select_matching(&pipeline, answers, &strings(&["", "Paris"]), 10, 0.0, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Paris");
    }

    #[test]
    fn synthesized_answers_without_raw_input_give_empty() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Synth);
        let out = select_matching(&pipeline, Vec::new(), &strings(&["synthetic"]), 10, 0.0, false);
        assert!(out.is_empty());
    }
}
