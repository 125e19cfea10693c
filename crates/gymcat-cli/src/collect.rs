//! The `scrape` command: scrape, transform, audit, then sync.
//!
//! Product-level failures (unreachable pages, invalid records, transform
//! rejections, store errors) are logged and counted rather than propagated,
//! so one bad page never aborts the run. Only a collection-page failure or a
//! database connection failure ends it early.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use gymcat_core::{AppConfig, Product, ScraperConfig, ScraperResult};
use gymcat_db::{sync_products, MemoryProductStore, PgProductStore, SyncReport};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Collection page to scrape (defaults to `GYMCAT_BASE_URL`)
    #[arg(long)]
    pub base_url: Option<String>,

    /// CSS selector matching each product tile on the collection page
    #[arg(long)]
    pub grid_selector: Option<String>,

    /// Pause between product pages, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Total attempts per HTTP request
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Per-request timeout, in milliseconds (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Write the scrape result and transformed products to this JSON file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Sync into an in-memory store instead of the database
    #[arg(long)]
    pub dry_run: bool,
}

/// A scraped record that did not become a product.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Rejected {
    pub url: String,
    pub reason: String,
}

/// Everything a scrape run produced before anything was stored.
#[derive(Debug, Serialize)]
pub(crate) struct ScrapeOutcome {
    pub result: ScraperResult,
    pub products: Vec<Product>,
    pub rejected: Vec<Rejected>,
}

/// Environment settings with any command-line overrides applied.
pub(crate) fn build_scraper_config(
    config: &AppConfig,
    args: &ScrapeArgs,
) -> anyhow::Result<ScraperConfig> {
    let base_url = args
        .base_url
        .as_deref()
        .or(config.scraper_base_url.as_deref())
        .context("no collection URL given; pass --base-url or set GYMCAT_BASE_URL")?;

    let mut scraper_config = config.scraper_config(base_url);
    if let Some(selector) = &args.grid_selector {
        scraper_config.product_grid_selector.clone_from(selector);
    }
    if let Some(delay_ms) = args.delay_ms {
        scraper_config.delay_between_requests_ms = delay_ms;
    }
    if let Some(max_retries) = args.max_retries {
        scraper_config.max_retries = max_retries;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        scraper_config.timeout_ms = timeout_ms;
    }
    Ok(scraper_config)
}

/// Scrapes the collection and transforms every valid record.
pub(crate) async fn scrape_and_transform(
    scraper_config: &ScraperConfig,
) -> anyhow::Result<ScrapeOutcome> {
    let result = gymcat_scraper::scrape_products(scraper_config)
        .await
        .with_context(|| format!("failed to scrape {}", scraper_config.base_url))?;

    let mut products = Vec::with_capacity(result.products.len());
    let mut rejected = Vec::new();
    for scraped in &result.products {
        match gymcat_scraper::try_transform(scraped) {
            Ok(product) => products.push(product),
            Err(reason) => {
                tracing::warn!(url = %scraped.url, reason = %reason, "skipping product");
                rejected.push(Rejected {
                    url: scraped.url.clone(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    Ok(ScrapeOutcome {
        result,
        products,
        rejected,
    })
}

pub(crate) fn write_audit(path: &Path, outcome: &ScrapeOutcome) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("failed to serialize scrape result")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write scrape result to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote scrape result");
    Ok(())
}

pub(crate) fn summary_line(outcome: &ScrapeOutcome, report: &SyncReport, dry_run: bool) -> String {
    format!(
        "{prefix}scraped {scraped} product pages ({failed} failed); {products} products, \
         {rejected} rejected; inserted {inserted}, updated {updated}, unchanged {unchanged}, \
         {store_errors} store errors",
        prefix = if dry_run { "dry-run: " } else { "" },
        scraped = outcome.result.total_scraped,
        failed = outcome.result.errors.len(),
        products = outcome.products.len(),
        rejected = outcome.rejected.len(),
        inserted = report.inserted,
        updated = report.updated,
        unchanged = report.unchanged,
        store_errors = report.errors.len(),
    )
}

/// Handler for `gymcat-cli scrape`.
///
/// # Errors
///
/// Returns an error if no collection URL is configured, the collection page
/// cannot be scraped, the audit file cannot be written, or the database
/// cannot be reached.
pub(crate) async fn run_scrape(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    let scraper_config = build_scraper_config(config, args)?;
    tracing::info!(
        base_url = %scraper_config.base_url,
        dry_run = args.dry_run,
        "starting scrape run"
    );

    let outcome = scrape_and_transform(&scraper_config).await?;

    if let Some(path) = &args.output {
        write_audit(path, &outcome)?;
    }

    let report = if args.dry_run {
        let store = MemoryProductStore::new();
        sync_products(&store, &outcome.products).await
    } else {
        let database_url = config.require_database_url()?;
        let pool = gymcat_db::connect_pool(
            database_url,
            gymcat_db::PoolConfig::from_app_config(config),
        )
        .await
        .context("failed to connect to the catalog database")?;
        let store = PgProductStore::new(pool);
        sync_products(&store, &outcome.products).await
    };

    if !report.errors.is_empty() {
        tracing::warn!(
            failed = report.errors.len(),
            "some products could not be stored"
        );
    }

    println!("{}", summary_line(&outcome, &report, args.dry_run));
    Ok(())
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
