//! HTTP content fetcher.
//!
//! One GET per call, then a fixed pause. Callers await each fetch before
//! issuing the next, so at most one request is ever in flight.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use thesaurus_shared::config::SLUG_PLACEHOLDER;
use thesaurus_shared::{Result, SourceConfig, Term, ThesaurusError};

/// Fetches raw page content for a term from the configured source.
pub struct HttpFetcher {
    config: SourceConfig,
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given source configuration.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ThesaurusError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The page URL for `term`.
    pub fn url_for(&self, term: &Term) -> Result<Url> {
        let slug = term.slug(&self.config.slug_separator);
        let path = self.config.path_template.replace(SLUG_PLACEHOLDER, &slug);
        self.config
            .base_url
            .join(&path)
            .map_err(|e| ThesaurusError::validation(format!("bad page path '{path}': {e}")))
    }

    /// Fetch the page for `term`. Any failure is logged and yields `None`.
    #[instrument(skip_all, fields(term = %term))]
    pub async fn fetch(&self, term: &Term) -> Option<String> {
        let url = match self.url_for(term) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build page url");
                return None;
            }
        };

        debug!(%url, "fetching page");

        let response = match self.client.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "fetch returned non-success status");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%url, error = %e, "body read failed");
                return None;
            }
        };

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        Some(body)
    }
}
