use std::sync::LazyLock;

use gymcat_core::ProductType;
use regex::Regex;

static PRE_WORKOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpre[-\s]?workout\b").expect("valid pre-workout regex"));

const PROTEIN_KEYWORDS: &[&str] = &[
    "protein",
    "whey",
    "isolate",
    "casein",
    "vegan protein",
    "mass gainer",
    "gainer",
    "collagen",
    "plant protein",
];

/// Classifies a product from its title and description.
///
/// Pre-workout wins over protein when both match, since pre-workout copy
/// routinely mentions protein. Returns `None` when neither matches.
#[must_use]
pub fn infer_product_type(title: &str, description: Option<&str>) -> Option<ProductType> {
    let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();

    if PRE_WORKOUT.is_match(&text) {
        Some(ProductType::PreWorkout)
    } else if PROTEIN_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Some(ProductType::ProteinPowder)
    } else {
        None
    }
}
