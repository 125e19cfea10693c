//! Product-link extraction from a collection page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::client::{extract_store_origin, resolve_against_origin};
use crate::error::ScraperError;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));

/// Returns the product-page URL of every tile matching `grid_selector`.
///
/// Each tile contributes the `href` of the first anchor inside it; tiles
/// without an anchor (or with an empty `href`) are skipped. Relative hrefs
/// are resolved against the origin of `collection_url`. Links keep document
/// order and are not deduplicated.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if `grid_selector` is not a
/// valid CSS selector.
pub fn parse_product_links(
    html: &str,
    collection_url: &str,
    grid_selector: &str,
) -> Result<Vec<String>, ScraperError> {
    let grid = Selector::parse(grid_selector).map_err(|e| ScraperError::InvalidSelector {
        selector: grid_selector.to_owned(),
        reason: e.to_string(),
    })?;

    let origin = extract_store_origin(collection_url);
    let document = Html::parse_document(html);

    let links = document
        .select(&grid)
        .filter_map(|tile| tile.select(&ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| resolve_against_origin(href, &origin))
        .collect();

    Ok(links)
}
