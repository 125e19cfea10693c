//! Turns a validated scrape record into a catalog [`Product`].

use gymcat_core::{Product, ScrapedProduct};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::InvalidProduct;
use crate::extract::{
    extract_benefits, extract_flavour, extract_ingredients, extract_nutrition, infer_product_type,
};
use crate::price::parse_price;
use crate::sanitize::{sanitize_scraped_product, validate_scraped_product};

/// Why a scrape record did not become a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformRejection {
    #[error(transparent)]
    Invalid(#[from] InvalidProduct),

    #[error("could not derive a flavour from the title")]
    NoFlavour,

    #[error("invalid or missing price")]
    NoPrice,

    #[error("could not infer a product type")]
    UnknownType,
}

/// Builds a [`Product`] from `scraped`, or explains why it cannot.
///
/// The record is sanitized and validated again before anything is derived
/// from it. Flavour, price and type are required; nutrition, ingredients and
/// benefits are best-effort extractions from the description.
///
/// # Errors
///
/// Returns the first [`TransformRejection`] hit, in the order validation,
/// flavour, price, type.
pub fn try_transform(scraped: &ScrapedProduct) -> Result<Product, TransformRejection> {
    let clean = sanitize_scraped_product(scraped);
    validate_scraped_product(&clean)?;

    let title = clean.title.as_deref().unwrap_or_default();
    let flavour = extract_flavour(title).ok_or(TransformRejection::NoFlavour)?;
    let price = clean
        .price
        .as_deref()
        .and_then(parse_price)
        .ok_or(TransformRejection::NoPrice)?;
    let description = clean.description;
    let product_type = infer_product_type(title, description.as_deref())
        .ok_or(TransformRejection::UnknownType)?;

    let (nutrition, ingredients, benefits) = match description.as_deref() {
        Some(text) => (
            extract_nutrition(text),
            non_empty(extract_ingredients(text)),
            non_empty(extract_benefits(text)),
        ),
        None => (None, None, None),
    };

    Ok(Product {
        flavour,
        product_type,
        price,
        description,
        ingredients,
        benefits,
        nutrition,
        rating: clean
            .rating
            .and_then(|rating| Decimal::try_from(rating).ok())
            .map(|rating| rating.round_dp(1)),
    })
}

/// Like [`try_transform`], but logs the rejection with the page URL and
/// returns `None`.
#[must_use]
pub fn transform_scraped_to_product(scraped: &ScrapedProduct) -> Option<Product> {
    match try_transform(scraped) {
        Ok(product) => Some(product),
        Err(reason) => {
            tracing::warn!(url = %scraped.url, reason = %reason, "skipping product");
            None
        }
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
