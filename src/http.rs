//! HTTP client construction for knowledge miners.
//!
//! All miners share one [`reqwest::Client`] per request cycle. Scraped
//! backends get served the consent-wall version of their pages unless the
//! client looks like a browser, so the client carries a rotating
//! User-Agent, an Accept-Language header, and a cookie store.

use std::time::Duration;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::config::RetrievalConfig;
use crate::error::SibylError;

/// Browser User-Agent strings a miner client can present.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36 Edg/134.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:136.0) Gecko/20100101 Firefox/136.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:136.0) Gecko/20100101 Firefox/136.0",
];

/// Pick a User-Agent from the rotation list.
pub fn random_user_agent() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..USER_AGENTS.len());
    USER_AGENTS[idx]
}

/// Build the [`reqwest::Client`] used for a round of mining.
///
/// Respects `config.user_agent` when set, otherwise rotates. Timeout
/// comes from `config.timeout_seconds` and applies per request, not per
/// mining round.
///
/// # Errors
///
/// Returns [`SibylError::Http`] when client construction fails.
pub fn build_client(config: &RetrievalConfig) -> Result<reqwest::Client, SibylError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| random_user_agent().to_owned());

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .user_agent(ua)
        .default_headers(headers)
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SibylError::Http(format!("miner client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_serves_only_browser_uas() {
        for ua in USER_AGENTS {
            assert!(ua.starts_with("Mozilla/5.0"));
        }
        assert!(USER_AGENTS.contains(&random_user_agent()));
    }

    #[test]
    fn client_builds_with_defaults() {
        assert!(build_client(&RetrievalConfig::default()).is_ok());
    }

    #[test]
    fn client_builds_with_pinned_user_agent() {
        let config = RetrievalConfig {
            user_agent: Some("SibylBot/0.1".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
