//! Raw scrape records and per-run scraper settings.
//!
//! A [`ScrapedProduct`] is the loosely-typed record read off one product
//! page. It is only ever sanitized, validated and transformed; the catalog
//! stores [`crate::Product`] values instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_SELECTOR: &str = ".productgrid--item";
pub const DEFAULT_DELAY_BETWEEN_REQUESTS_MS: u64 = 1_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// With this base the retry schedule is 2 s, 4 s, 8 s, ...
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; gymcat/0.1; +catalog-sync)";

/// A product as read off its storefront page, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Price text as shown on the page (e.g. `"39.99"`); parsed later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl ScrapedProduct {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Settings for one scrape run. Immutable once the run starts.
///
/// Deserializing a partial document fills every omitted field with its
/// default, so `{"base_url": "..."}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Collection page listing every product tile.
    pub base_url: String,
    #[serde(default = "default_grid_selector")]
    pub product_grid_selector: String,
    #[serde(default = "default_delay")]
    pub delay_between_requests_ms: u64,
    /// Total attempts per HTTP request, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,
}

impl ScraperConfig {
    /// Settings for `base_url` with every other field at its default.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            product_grid_selector: default_grid_selector(),
            delay_between_requests_ms: DEFAULT_DELAY_BETWEEN_REQUESTS_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        }
    }
}

fn default_grid_selector() -> String {
    DEFAULT_GRID_SELECTOR.to_string()
}

fn default_delay() -> u64 {
    DEFAULT_DELAY_BETWEEN_REQUESTS_MS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_backoff_base() -> u64 {
    DEFAULT_BACKOFF_BASE_MS
}

/// One product page that could not be scraped or failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub url: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a full scrape run. Built once, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperResult {
    /// Sanitized records that passed validation, in link order.
    pub products: Vec<ScrapedProduct>,
    pub total_scraped: usize,
    pub errors: Vec<ScrapeFailure>,
    pub scraped_at: DateTime<Utc>,
}

impl ScraperResult {
    /// A successful run that found nothing to scrape.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            total_scraped: 0,
            errors: Vec::new(),
            scraped_at: Utc::now(),
        }
    }
}
