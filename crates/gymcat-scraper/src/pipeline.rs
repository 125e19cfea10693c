//! One full scrape run: collection page, then every product page in order.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use gymcat_core::{ScrapeFailure, ScrapedProduct, ScraperConfig, ScraperResult};

use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::sanitize::{sanitize_scraped_product, validate_scraped_product};

/// Scrapes every product listed on `config.base_url`.
///
/// # Errors
///
/// Returns [`ScraperError`] if the HTTP client cannot be built or the
/// collection page cannot be fetched. Product-level failures never abort the
/// run; see [`scrape_products_with`].
pub async fn scrape_products(config: &ScraperConfig) -> Result<ScraperResult, ScraperError> {
    let client = CatalogClient::from_config(config)?;
    scrape_products_with(&client, config).await
}

/// Runs a scrape with an existing client.
///
/// Product pages are fetched one at a time in link order, with
/// `delay_between_requests_ms` between consecutive pages. A page that cannot
/// be fetched, or whose record fails validation, is recorded in
/// [`ScraperResult::errors`] and the loop moves on.
///
/// # Errors
///
/// Returns [`ScraperError`] only when the collection page itself cannot be
/// fetched or the grid selector is invalid.
pub async fn scrape_products_with(
    client: &CatalogClient,
    config: &ScraperConfig,
) -> Result<ScraperResult, ScraperError> {
    let links = client
        .extract_product_links(&config.base_url, &config.product_grid_selector)
        .await?;

    if links.is_empty() {
        tracing::warn!(base_url = %config.base_url, "no product links found; nothing to scrape");
        return Ok(ScraperResult::empty());
    }

    let delay = Duration::from_millis(config.delay_between_requests_ms);
    let (products, errors) = scrape_each(&links, delay, |url: String| async move {
        scrape_one(client, &url).await
    })
    .await;

    tracing::info!(
        scraped = products.len(),
        failed = errors.len(),
        "scrape run complete"
    );

    Ok(ScraperResult {
        total_scraped: products.len(),
        products,
        errors,
        scraped_at: Utc::now(),
    })
}

/// Runs `scrape` over `links` in order, pausing `delay` between consecutive
/// links only.
async fn scrape_each<F, Fut>(
    links: &[String],
    delay: Duration,
    mut scrape: F,
) -> (Vec<ScrapedProduct>, Vec<ScrapeFailure>)
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ScrapedProduct, ScraperError>>,
{
    let total = links.len();
    let mut products = Vec::new();
    let mut errors = Vec::new();

    for (i, url) in links.iter().enumerate() {
        tracing::info!(url = %url, index = i + 1, total, "scraping product page");

        match scrape(url.clone()).await {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "product page failed; continuing");
                errors.push(ScrapeFailure {
                    url: url.clone(),
                    error: e.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    (products, errors)
}

async fn scrape_one(client: &CatalogClient, url: &str) -> Result<ScrapedProduct, ScraperError> {
    let raw = client.scrape_product_page(url).await?;
    let clean = sanitize_scraped_product(&raw);
    validate_scraped_product(&clean).map_err(|source| ScraperError::InvalidProduct {
        url: url.to_owned(),
        source,
    })?;
    Ok(clean)
}
