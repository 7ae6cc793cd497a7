//! Deduplication of answers that share a source page.
//!
//! Miners frequently return several hits for the same page, differing only
//! in tracking parameters or fragments. Counting those as independent
//! evidence would inflate votes, so URLs are canonicalised and each page
//! contributes its single best answer.

use std::collections::HashMap;

use url::Url;

use crate::answer::Answer;
use crate::filter::Filter;

/// Tracking query parameters stripped during URL canonicalisation.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
];

/// Keeps one answer per source page.
///
/// Answers are grouped by normalised `source_url`; within a group the
/// highest-scored answer wins and takes the group's first-seen position, so
/// the stage is order-stable. Answers without a source are never grouped
/// and pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceDedup;

impl Filter for SourceDedup {
    fn apply(&self, answers: Vec<Answer>) -> Vec<Answer> {
        let mut kept: Vec<Answer> = Vec::with_capacity(answers.len());
        let mut by_source: HashMap<String, usize> = HashMap::new();

        for answer in answers {
            let Some(url) = answer.source_url.as_deref() else {
                kept.push(answer);
                continue;
            };
            let key = normalize_url(url);
            match by_source.get(&key) {
                Some(&index) => {
                    if answer.score > kept[index].score {
                        kept[index] = answer;
                    }
                }
                None => {
                    by_source.insert(key, kept.len());
                    kept.push(answer);
                }
            }
        }

        kept
    }

    fn name(&self) -> &str {
        "SourceDedup"
    }
}

/// Canonicalise a URL for grouping.
///
/// Lowercases scheme and host (via the parser), removes the fragment and
/// default ports, strips known tracking parameters while keeping the
/// remaining parameters in their original order, and trims trailing
/// slashes unless the path is exactly `"/"`. Unparseable input is
/// returned unchanged.
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        let _ = parsed.set_port(None);
    }

    strip_tracking_params(&mut parsed);

    if parsed.path().len() > 1 && parsed.path().ends_with('/') {
        let trimmed = parsed.path().trim_end_matches('/').to_string();
        parsed.set_path(&trimmed);
    }

    parsed.to_string()
}

/// Drop [`TRACKING_PARAMS`] from the query, preserving the order of what
/// remains.
fn strip_tracking_params(url: &mut Url) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
        return;
    }

    let rebuilt = kept
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&rebuilt));
}
