//! HTTP client for storefront collection and product pages.

mod origin;

use std::time::Duration;

use gymcat_core::{ScrapedProduct, ScraperConfig};
use reqwest::Client;

use crate::error::ScraperError;
use crate::links::parse_product_links;
use crate::page::parse_product_page;
use crate::rate_limit::retry_with_backoff;

pub use origin::{extract_store_origin, is_valid_http_url, resolve_against_origin};

/// Upper bound on the TCP/TLS connect phase; the overall request timeout
/// still applies on top.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches storefront HTML with a hard per-request timeout and retries.
///
/// Any failure (network error, timeout, non-2xx status) counts as one failed
/// attempt; attempts are separated by exponential backoff.
pub struct CatalogClient {
    client: Client,
    /// Total attempts per URL, including the first.
    max_retries: u32,
    /// Base delay for backoff: the pause after failed attempt `n` is
    /// `backoff_base_ms * 2^n`.
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with a request timeout, `User-Agent`, and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_ms: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let timeout = Duration::from_millis(timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the HTTP settings of a scrape run.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.timeout_ms,
            &config.user_agent,
            config.max_retries,
            config.backoff_base_ms,
        )
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::FetchFailed`] once every attempt has failed;
    /// its message embeds `url` and the last underlying error.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(url, self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }

    /// Fetches a collection page and returns the absolute product-page URL
    /// of every grid tile, in document order.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::FetchFailed`] if the collection page cannot be
    /// fetched, or [`ScraperError::InvalidSelector`] if `grid_selector` does
    /// not parse.
    pub async fn extract_product_links(
        &self,
        collection_url: &str,
        grid_selector: &str,
    ) -> Result<Vec<String>, ScraperError> {
        let html = self.fetch_html(collection_url).await?;
        let links = parse_product_links(&html, collection_url, grid_selector)?;
        tracing::info!(
            collection_url,
            count = links.len(),
            "found product links on collection page"
        );
        Ok(links)
    }

    /// Fetches one product page and reads it into a raw [`ScrapedProduct`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::FetchFailed`] if the page cannot be fetched.
    pub async fn scrape_product_page(&self, url: &str) -> Result<ScrapedProduct, ScraperError> {
        let html = self.fetch_html(url).await?;
        Ok(parse_product_page(&html, url))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
