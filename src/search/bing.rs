//! Bing Web Search v7 miner.
//!
//! Queries the JSON API with a subscription key sent in the
//! `Ocp-Apim-Subscription-Key` header. Responses omit the `webPages`
//! container entirely when nothing matched, so every level of the
//! deserialised structure tolerates absence.

use serde::Deserialize;
use sibyl_rank::Answer;

use crate::config::RetrievalConfig;
use crate::error::{Result, SibylError};
use crate::http;
use crate::search::{KnowledgeMiner, MinerKind};

/// Miner backed by the Bing Web Search v7 API.
pub struct BingMiner;

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

/// One web hit. `snippet` carries the evidence text; `name` (the page
/// title) stands in when the snippet is blank.
#[derive(Debug, Deserialize)]
struct WebPage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: String,
}

impl KnowledgeMiner for BingMiner {
    async fn mine(&self, query: &str, config: &RetrievalConfig) -> Result<Vec<Answer>> {
        tracing::trace!(query, "mining Bing");

        let api_key = config
            .bing_api_key
            .as_deref()
            .ok_or_else(|| SibylError::Config("bing api key not configured".into()))?;

        let client = http::build_client(config)?;
        let count = config.per_miner_results.to_string();

        let response = client
            .get(&config.bing_endpoint)
            .query(&[("q", query), ("count", count.as_str())])
            .header("Ocp-Apim-Subscription-Key", api_key)
            .send()
            .await
            .map_err(|e| SibylError::Http(format!("Bing request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SibylError::Http(format!("Bing returned an error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SibylError::Http(format!("failed to read Bing response: {e}")))?;

        tracing::trace!(bytes = body.len(), "Bing response fetched");

        parse_bing_response(&body, config.per_miner_results)
    }

    fn kind(&self) -> MinerKind {
        MinerKind::Bing
    }
}

/// Parse a Bing v7 JSON body into answers. Split out for testability with
/// canned responses.
fn parse_bing_response(body: &str, max_results: usize) -> Result<Vec<Answer>> {
    let parsed: BingResponse = serde_json::from_str(body)
        .map_err(|e| SibylError::Parse(format!("Bing JSON decode failed: {e}")))?;

    let mut answers = Vec::new();
    let Some(web_pages) = parsed.web_pages else {
        tracing::debug!("Bing response had no webPages container");
        return Ok(answers);
    };

    for page in web_pages.value {
        let text = if page.snippet.trim().is_empty() {
            page.name.trim()
        } else {
            page.snippet.trim()
        };
        if text.is_empty() {
            continue;
        }
        let source_url = if page.url.is_empty() {
            None
        } else {
            Some(page.url.clone())
        };
        answers.push(Answer {
            text: text.to_owned(),
            score: 0.0,
            source_url,
        });
        if answers.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = answers.len(), "Bing evidence extracted");
    Ok(answers)
}
