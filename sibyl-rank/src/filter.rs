//! Filter trait and the ordered pipeline applied before selection.

use crate::answer::Answer;

/// A transformation stage over a set of answers.
///
/// A filter may reorder, rescore, drop, merge, or synthesize answers. It
/// must be deterministic for a given input and must not hold state across
/// applications; the pipeline relies on this to stay reproducible.
pub trait Filter: Send + Sync {
    /// Transform one stage's answers into the next stage's input.
    fn apply(&self, answers: Vec<Answer>) -> Vec<Answer>;

    /// Identity used in pipeline progress logs.
    fn name(&self) -> &str;
}

/// An ordered, caller-owned sequence of filters.
///
/// Filters run in push order, each consuming the previous stage's output.
/// Ranking calls borrow the pipeline immutably, so it cannot be reordered
/// or cleared while a selection is in flight.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// An empty pipeline. Applying it is the identity transformation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. Duplicates are allowed and run once per entry.
    pub fn push<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Remove every registered filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when no filters are registered.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter over `answers` in registration order.
    pub fn apply(&self, mut answers: Vec<Answer>) -> Vec<Answer> {
        for filter in &self.filters {
            let input = answers.len();
            answers = filter.apply(answers);
            tracing::trace!(
                filter = filter.name(),
                input,
                output = answers.len(),
                "filter applied"
            );
        }
        answers
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends its tag to every answer's text. Makes application order
    /// observable.
    struct Tag(&'static str);

    impl Filter for Tag {
        fn apply(&self, answers: Vec<Answer>) -> Vec<Answer> {
            answers
                .into_iter()
                .map(|mut answer| {
                    answer.text.push_str(self.0);
                    answer
                })
                .collect()
        }

        fn name(&self) -> &str {
            self.0
        }
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

    /// Appends one synthetic answer.
    struct Synth;

    impl Filter for Synth {
        fn apply(&self, mut answers: Vec<Answer>) -> Vec<Answer> {
            answers.push(Answer::new("synthetic", 1.0));
            answers
        }

        fn name(&self) -> &str {
            "Synth"
        }
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = FilterPipeline::new();
        let answers = vec![Answer::new("a", 0.1), Answer::new("b", 0.2)];
        let out = pipeline.apply(answers.clone());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, answers[0].text);
        assert_eq!(out[1].text, answers[1].text);
    }

    #[test]
    fn filters_run_in_push_order() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Tag("-a"));
        pipeline.push(Tag("-b"));
        let out = pipeline.apply(vec![Answer::new("x", 0.0)]);
        assert_eq!(out[0].text, "x-a-b");
    }

    #[test]
    fn duplicate_filters_run_once_per_entry() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Tag("-a"));
        pipeline.push(Tag("-a"));
        let out = pipeline.apply(vec![Answer::new("x", 0.0)]);
        assert_eq!(out[0].text, "x-a-a");
    }

    #[test]
    fn filters_can_change_cardinality() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Floor(0.5));
        pipeline.push(Synth);
        let out = pipeline.apply(vec![Answer::new("low", 0.1), Answer::new("high", 0.9)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "high");
        assert_eq!(out[1].text, "synthetic");
    }

    #[test]
    fn clear_removes_all_filters() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Tag("-a"));
        pipeline.clear();
        assert!(pipeline.is_empty());
        let out = pipeline.apply(vec![Answer::new("x", 0.0)]);
        assert_eq!(out[0].text, "x");
    }

    #[test]
    fn len_tracks_registrations() {
        let mut pipeline = FilterPipeline::new();
        assert_eq!(pipeline.len(), 0);
        pipeline.push(Synth);
        pipeline.push(Floor(0.0));
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn debug_lists_filter_names() {
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Tag("-a"));
        pipeline.push(Synth);
        assert_eq!(format!("{pipeline:?}"), r#"["-a", "Synth"]"#);
    }

    #[test]
    fn pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterPipeline>();
    }
}
