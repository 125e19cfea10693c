use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Keyword-introduced lists, most specific first. Each captures up to the
/// end of the sentence.
static KEYWORD_LISTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:contains|ingredients|made\s+with|includes|featuring)\b\s*:?\s*([^.!?\n]+)",
        r"(?i)\breal\s+food\s+complex\b\s*(?::|of|with|includes?)?\s*([^.!?\n]+)",
        r"(?i)\bfat\s+sources?\b\s*(?::|from|include|includes|like|such\s+as)?\s*([^.!?\n]+)",
        r"(?i)\bsources?\b\s*(?::|include|includes|are|like|such\s+as)\s*([^.!?\n]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid ingredient list regex"))
    .collect()
});

/// Three or more comma-separated lowercase phrases.
static LOWERCASE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-z]+(?:[ -][a-z]+){0,3}(?:,\s*[a-z]+(?:[ -][a-z]+){0,3}){2,})")
        .expect("valid lowercase run regex")
});

/// Three or more comma-separated capitalized phrases.
static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+(?:[ -][A-Z][a-z]+){0,3}(?:,\s*(?:and\s+)?[A-Z][a-z]+(?:[ -][A-Z][a-z]+){0,3}){2,})",
    )
    .expect("valid capitalized run regex")
});

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:[,;&]|\band\b)\s*").expect("valid separator regex"));

static LEADING_CONJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:and|or)\s+").expect("valid conjunction regex"));

const MAX_INGREDIENT_CHARS: usize = 99;

/// Best-effort ingredient list from marketing copy.
///
/// Keyword-introduced lists are tried first, in order; the first pattern that
/// yields anything wins. Otherwise an inline run of comma-separated phrases
/// is used. Entries are deduplicated and 1 to 99 characters long.
#[must_use]
pub fn extract_ingredients(description: &str) -> Vec<String> {
    for pattern in KEYWORD_LISTS.iter() {
        let found = collect_items(
            pattern
                .captures_iter(description)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str())),
        );
        if !found.is_empty() {
            return found;
        }
    }

    [&*LOWERCASE_RUN, &*CAPITALIZED_RUN]
        .into_iter()
        .find_map(|run| {
            let found = collect_items(
                run.captures_iter(description)
                    .filter_map(|caps| caps.get(1).map(|m| m.as_str())),
            );
            (!found.is_empty()).then_some(found)
        })
        .unwrap_or_default()
}

fn collect_items<'a>(lists: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for list in lists {
        for raw in SEPARATOR.split(list) {
            let item = LEADING_CONJUNCTION
                .replace(raw.trim(), "")
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '(' | ')'))
                .to_string();
            let len = item.chars().count();
            if len == 0 || len > MAX_INGREDIENT_CHARS {
                continue;
            }
            if seen.insert(item.to_lowercase()) {
                items.push(item);
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_ingredient_list() {
        assert_eq!(
            extract_ingredients(
                "Ingredients: whey protein isolate, cocoa, natural flavors; sucralose. Enjoy!"
            ),
            vec!["whey protein isolate", "cocoa", "natural flavors", "sucralose"]
        );
    }

    #[test]
    fn made_with_list_splits_on_and_and_ampersand() {
        assert_eq!(
            extract_ingredients("Made with oats, sweet potato & brown rice and quinoa."),
            vec!["oats", "sweet potato", "brown rice", "quinoa"]
        );
    }

    #[test]
    fn duplicates_are_removed() {
        assert_eq!(
            extract_ingredients("Contains oats, Oats, rice."),
            vec!["oats", "rice"]
        );
    }

    #[test]
    fn real_food_complex_list() {
        assert_eq!(
            extract_ingredients("Our Real Food Complex: oats, rice, sweet potato."),
            vec!["oats", "rice", "sweet potato"]
        );
    }

    #[test]
    fn fat_sources_list() {
        assert_eq!(
            extract_ingredients("Fat sources: MCT oil, flaxseed."),
            vec!["MCT oil", "flaxseed"]
        );
    }

    #[test]
    fn lowercase_run_fallback() {
        assert_eq!(
            extract_ingredients("Carb blend: oats, barley, quinoa."),
            vec!["oats", "barley", "quinoa"]
        );
    }

    #[test]
    fn capitalized_run_fallback() {
        assert_eq!(
            extract_ingredients("Our blend uses Oats, Barley, Quinoa. Great taste."),
            vec!["Oats", "Barley", "Quinoa"]
        );
    }

    #[test]
    fn copy_without_lists_yields_nothing() {
        assert!(extract_ingredients("Tastes great. Mixes easily.").is_empty());
    }
}
