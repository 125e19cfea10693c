use std::sync::LazyLock;

use gymcat_core::Nutrition;
use regex::Regex;

use crate::sanitize::round_to;

static CALORIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+)\s*(?:high[-\s]quality\s+)?calories\b")
        .expect("valid calories regex")
});

/// `<number>g` followed by optional qualifiers, then the nutrient name.
fn macro_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)(\d+(?:\.\d+)?)\s*g(?:rams?)?\b(?:\s+(?:of|pure|clean|healthy|high[-\s]quality|premium|quality|total|lean))*\s+(?:{label})\b"
    ))
    .expect("valid macro regex")
}

static PROTEIN: LazyLock<Regex> = LazyLock::new(|| macro_regex("protein"));
static CARBS: LazyLock<Regex> = LazyLock::new(|| macro_regex("carbs|carbohydrates"));
static FAT: LazyLock<Regex> = LazyLock::new(|| macro_regex("fat"));

fn calories(text: &str) -> Option<f64> {
    let caps = CALORIES.captures(text)?;
    let value: f64 = caps[1].replace(',', "").parse().ok()?;
    (value > 0.0 && value < 10_000.0).then_some(value)
}

fn grams(regex: &Regex, text: &str) -> Option<f64> {
    let caps = regex.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    (0.0..1000.0)
        .contains(&value)
        .then(|| round_to(value, 1))
}

/// Pulls per-serving macros out of marketing copy.
///
/// Returns `None` unless calories or protein were found; any other missing
/// value defaults to zero.
#[must_use]
pub fn extract_nutrition(description: &str) -> Option<Nutrition> {
    let calories = calories(description);
    let protein = grams(&PROTEIN, description);
    if calories.is_none() && protein.is_none() {
        return None;
    }

    Some(Nutrition {
        calories: calories.unwrap_or_default(),
        protein: protein.unwrap_or_default(),
        carbs: grams(&CARBS, description).unwrap_or_default(),
        fat: grams(&FAT, description).unwrap_or_default(),
    })
}
