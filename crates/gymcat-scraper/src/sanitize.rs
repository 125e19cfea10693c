//! Cleanup and the validation gate for raw scrape records.

use std::sync::LazyLock;

use gymcat_core::ScrapedProduct;
use regex::Regex;

use crate::client::is_valid_http_url;
use crate::error::InvalidProduct;
use crate::html_text::{collapse_whitespace, html_to_text};
use crate::price::parse_price;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_AVAILABILITY_CHARS: usize = 50;

/// Entities left after the common ones were decoded (`&#8482;`, `&eacute;`).
static LEFTOVER_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:#\d+|#x[0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex"));

/// Emoji, pictographs and the joiners/selectors that glue them together.
fn is_emoji_or_symbol(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x2300..=0x23FF
            | 0x2B00..=0x2BFF
            | 0xFE00..=0xFE0F
            | 0x200D
            | 0x20E3
            | 0xE0020..=0xE007F
    )
}

/// Rounds `value` to `places` decimal places, halves away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn clean_text(raw: &str, max_chars: usize) -> Option<String> {
    let text = html_to_text(raw);
    let text = LEFTOVER_ENTITY.replace_all(&text, " ");
    let text: String = text.chars().filter(|c| !is_emoji_or_symbol(*c)).collect();
    let text = collapse_whitespace(&text);
    let capped: String = text.chars().take(max_chars).collect();
    let capped = capped.trim_end();
    if capped.is_empty() {
        None
    } else {
        Some(capped.to_owned())
    }
}

/// Returns a cleaned copy of `scraped`. Never fails.
///
/// Text fields lose markup, entities and emoji and are capped (title 200,
/// description 5000, availability 50 characters); a field left empty becomes
/// `None`. A malformed `image_url` is dropped, while `url` is kept verbatim
/// and left for [`validate_scraped_product`] to judge. A rating outside
/// `[0, 5]` is dropped with a warning, otherwise rounded to one decimal.
/// Review counts of zero are dropped. `price` is passed through unchanged.
#[must_use]
pub fn sanitize_scraped_product(scraped: &ScrapedProduct) -> ScrapedProduct {
    let rating = scraped.rating.and_then(|rating| {
        if rating.is_finite() && (0.0..=5.0).contains(&rating) {
            Some(round_to(rating, 1))
        } else {
            tracing::warn!(url = %scraped.url, rating, "dropping out-of-range rating");
            None
        }
    });

    ScrapedProduct {
        url: scraped.url.clone(),
        title: scraped
            .title
            .as_deref()
            .and_then(|t| clean_text(t, MAX_TITLE_CHARS)),
        price: scraped.price.clone(),
        description: scraped
            .description
            .as_deref()
            .and_then(|d| clean_text(d, MAX_DESCRIPTION_CHARS)),
        image_url: scraped
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|u| is_valid_http_url(u))
            .map(str::to_owned),
        rating,
        reviews: scraped.reviews.filter(|&n| n > 0),
        availability: scraped
            .availability
            .as_deref()
            .and_then(|a| clean_text(a, MAX_AVAILABILITY_CHARS)),
    }
}

/// The single gate a record passes before it may become a catalog product.
///
/// # Errors
///
/// Returns the first [`InvalidProduct`] reason found, checking the URL, then
/// the title, then the price.
pub fn validate_scraped_product(scraped: &ScrapedProduct) -> Result<(), InvalidProduct> {
    let url = scraped.url.trim();
    if url.is_empty() {
        return Err(InvalidProduct::MissingUrl);
    }
    if !is_valid_http_url(url) {
        return Err(InvalidProduct::InvalidUrl(url.to_owned()));
    }

    if scraped.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        return Err(InvalidProduct::MissingTitle);
    }

    if scraped.price.as_deref().and_then(parse_price).is_none() {
        return Err(InvalidProduct::InvalidPrice);
    }

    Ok(())
}
