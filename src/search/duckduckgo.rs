//! DuckDuckGo evidence miner.
//!
//! Scrapes the JavaScript-free endpoint at `https://html.duckduckgo.com/html/`,
//! which serves plain results to POSTed queries and needs no API key.
//! Result snippets become the answer evidence; the page title stands in
//! when a result has no snippet.

use scraper::{Html, Selector};
use sibyl_rank::Answer;
use url::Url;

use crate::config::RetrievalConfig;
use crate::error::{Result, SibylError};
use crate::http;
use crate::search::{KnowledgeMiner, MinerKind};

/// Organic result containers. The `:not` arms drop sponsored entries,
/// which carry an extra `result--ad` class.
const RESULT_SELECTOR: &str =
    ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)";

/// Scraping miner for DuckDuckGo's HTML-only frontend.
pub struct DuckDuckGoMiner;

impl KnowledgeMiner for DuckDuckGoMiner {
    async fn mine(&self, query: &str, config: &RetrievalConfig) -> Result<Vec<Answer>> {
        tracing::trace!(query, "mining DuckDuckGo");

        let client = http::build_client(config)?;

        let response = client
            .post("https://html.duckduckgo.com/html/")
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| SibylError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SibylError::Http(format!("DuckDuckGo returned an error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SibylError::Http(format!("failed to read DuckDuckGo response: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo page fetched");

        parse_results_page(&html, config.per_miner_results)
    }

    fn kind(&self) -> MinerKind {
        MinerKind::DuckDuckGo
    }
}

/// Resolve a result link to its destination URL.
///
/// DuckDuckGo routes organic links through
/// `//duckduckgo.com/l/?uddg=<encoded>&rut=..`; the destination sits
/// URL-encoded in the `uddg` parameter. Links that are not wrapped pass
/// through unchanged.
fn unwrap_redirect(href: &str) -> Option<String> {
    let absolute = match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_owned(),
    };

    let parsed = Url::parse(&absolute).ok()?;
    if parsed.host_str() != Some("duckduckgo.com") || !parsed.path().starts_with("/l/") {
        return Some(absolute);
    }

    let (_, target) = parsed.query_pairs().find(|(key, _)| key == "uddg")?;
    Some(target.into_owned())
}

/// Pull answer evidence out of a results page.
///
/// Split from the request path so canned pages can drive the parser in
/// tests.
fn parse_results_page(html: &str, max_results: usize) -> Result<Vec<Answer>> {
    let document = Html::parse_document(html);

    let result_sel = selector(RESULT_SELECTOR)?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut answers = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };
        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        let Some(url) = unwrap_redirect(href) else {
            continue;
        };

        let title = title_el.text().collect::<String>();
        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        let text = if snippet.trim().is_empty() {
            title.trim()
        } else {
            snippet.trim()
        };
        if text.is_empty() {
            continue;
        }

        answers.push(Answer::with_source(text, 0.0, url));

        if answers.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = answers.len(), "DuckDuckGo evidence extracted");
    Ok(answers)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SibylError::Parse(format!("selector {css:?}: {e:?}")))
}
