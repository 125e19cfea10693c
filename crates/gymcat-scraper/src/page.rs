//! Field extraction from a single product page.
//!
//! Each field has an ordered list of selector candidates covering the common
//! storefront themes. The first candidate whose first match yields non-empty
//! content wins; later candidates are fallbacks only.

use std::sync::LazyLock;

use gymcat_core::ScrapedProduct;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::client::{extract_store_origin, resolve_against_origin};
use crate::html_text::element_text;

fn compile(candidates: &[&str]) -> Vec<Selector> {
    candidates
        .iter()
        .map(|css| Selector::parse(css).expect("valid product page selector"))
        .collect()
}

static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "h1.product-single__title",
        "h1.product__title",
        ".product__title",
        ".product-title",
        "h1[itemprop='name']",
        "h1",
    ])
});

static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "[itemprop='price']",
        ".product-single__price",
        ".price-item--sale",
        ".price-item--regular",
        ".product__price",
        ".price",
    ])
});

static DESCRIPTION: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".product-single__description",
        ".product__description",
        "[itemprop='description']",
        ".product-description",
        ".rte",
    ])
});

static AVAILABILITY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".product-form__inventory",
        ".product__inventory",
        ".product-single__availability",
        "[itemprop='availability']",
        ".availability",
        ".stock",
    ])
});

static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[property='og:image']").expect("valid og:image selector")
});

static IMAGE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".product-single__photo img",
        ".product__media img",
        "img[itemprop='image']",
        ".product img",
        "img",
    ])
});

static RATING: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&["[itemprop='ratingValue']"]));

static REVIEWS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&["[itemprop='reviewCount']"]));

static PRICE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*(\d[\d,]*(?:\.\d+)?)").expect("valid price number regex")
});

/// Leading number of rating text such as `"4.8 out of 5"`.
static RATING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+))").expect("valid rating number regex")
});

static JSON_PRICE_CENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""price"\s*:\s*(\d+)\s*[,}\]]"#).expect("valid json cents regex")
});

static JSON_PRICE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""price"\s*:\s*\{\s*"amount"\s*:\s*"?(\d+(?:\.\d+)?)"#)
        .expect("valid json amount regex")
});

/// Reads every known field of a product page into a raw [`ScrapedProduct`].
///
/// Missing fields stay `None`; nothing here fails. `url` is the page's own
/// address and is used to make the image URL absolute.
#[must_use]
pub fn parse_product_page(html: &str, url: &str) -> ScrapedProduct {
    let document = Html::parse_document(html);

    let price = first_text_or_content(&document, &PRICE)
        .or_else(|| inline_json_price(html))
        .map(|text| reduce_price_text(&text));

    ScrapedProduct {
        url: url.to_owned(),
        title: first_text(&document, &TITLE),
        price,
        description: first_text(&document, &DESCRIPTION),
        image_url: image_url(&document, url),
        rating: first_text_or_content(&document, &RATING).and_then(|t| parse_rating(&t)),
        reviews: first_text_or_content(&document, &REVIEWS).and_then(|t| parse_review_count(&t)),
        availability: first_text(&document, &AVAILABILITY),
    }
}

fn first_text(document: &Html, candidates: &[Selector]) -> Option<String> {
    candidates.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        non_empty(element_text(element))
    })
}

/// Like [`first_text`], but an element with no text may still supply its
/// `content` attribute (microdata such as `<meta itemprop="price">`).
fn first_text_or_content(document: &Html, candidates: &[Selector]) -> Option<String> {
    candidates.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        non_empty(element_text(element)).or_else(|| content_attr(element))
    })
}

fn content_attr(element: ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("content")
        .and_then(|c| non_empty(c.trim().to_owned()))
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Price from JSON embedded in the page: an integer `"price"` is cents,
/// otherwise a `"price": {"amount": ...}` object is taken as-is.
fn inline_json_price(html: &str) -> Option<String> {
    if let Some(cents) = JSON_PRICE_CENTS
        .captures(html)
        .and_then(|caps| caps[1].parse::<i64>().ok())
    {
        return Some(Decimal::new(cents, 2).to_string());
    }

    JSON_PRICE_AMOUNT
        .captures(html)
        .map(|caps| caps[1].to_owned())
}

/// Keeps the first number of the price text; text with no number is kept
/// whole so validation can report it.
fn reduce_price_text(text: &str) -> String {
    PRICE_NUMBER
        .captures(text)
        .map_or_else(|| text.to_owned(), |caps| caps[1].to_owned())
}

fn image_url(document: &Html, page_url: &str) -> Option<String> {
    let raw = document
        .select(&OG_IMAGE)
        .next()
        .and_then(content_attr)
        .or_else(|| {
            IMAGE.iter().find_map(|selector| {
                let img = document.select(selector).next()?;
                ["src", "data-src"]
                    .iter()
                    .filter_map(|attr| img.value().attr(attr))
                    .map(str::trim)
                    .find(|value| !value.is_empty())
                    .map(str::to_owned)
            })
        })?;

    let origin = extract_store_origin(page_url);
    Some(resolve_against_origin(&raw, &origin))
}

fn parse_rating(text: &str) -> Option<f64> {
    let caps = RATING_NUMBER.captures(text)?;
    caps[1].parse::<f64>().ok().filter(|r| r.is_finite())
}

fn parse_review_count(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
