use std::sync::LazyLock;

use regex::Regex;

use crate::html_text::collapse_whitespace;

const MAX_FLAVOUR_CHARS: usize = 100;

/// Leading run of letters and spaces that stops at a dash, paren or digit,
/// optionally preceded by spaces. A title with none of these never matches.
static LEADING_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*[-\u{2013}\u{2014}(\d]")
        .expect("valid leading flavour regex")
});

/// Derives the flavour name from a product title.
///
/// Rules are tried in order and the first that produces a name wins:
///
/// 1. the leading alphabetic run before a separator
///    (`"Chocolate Fudge - 2lb"` gives `"Chocolate Fudge"`);
/// 2. the first whitespace-delimited word made only of letters
///    (`"Vanilla Whey"` gives `"Vanilla"`);
/// 3. the title with everything but letters and spaces removed
///    (`"3x-Berry!"` gives `"xBerry"`).
///
/// The result must be 1 to 100 characters of ASCII letters and spaces.
#[must_use]
pub fn extract_flavour(title: &str) -> Option<String> {
    let title = title.trim();
    let candidate = leading_name(title)
        .or_else(|| first_alphabetic_word(title))
        .or_else(|| letters_only(title))?;

    is_acceptable(&candidate).then_some(candidate)
}

fn leading_name(title: &str) -> Option<String> {
    let caps = LEADING_NAME.captures(title)?;
    let name = collapse_whitespace(&caps[1]);
    (!name.is_empty()).then_some(name)
}

fn first_alphabetic_word(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .find(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_owned)
}

fn letters_only(title: &str) -> Option<String> {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    let name = collapse_whitespace(&kept);
    (!name.is_empty()).then_some(name)
}

fn is_acceptable(name: &str) -> bool {
    let len = name.chars().count();
    (1..=MAX_FLAVOUR_CHARS).contains(&len)
        && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_before_dash() {
        assert_eq!(
            extract_flavour("Chocolate Fudge - 2lb").as_deref(),
            Some("Chocolate Fudge")
        );
    }

    #[test]
    fn name_before_en_dash_and_paren() {
        assert_eq!(
            extract_flavour("Salted Caramel \u{2013} 5lb").as_deref(),
            Some("Salted Caramel")
        );
        assert_eq!(
            extract_flavour("Blue Raspberry (30 servings)").as_deref(),
            Some("Blue Raspberry")
        );
    }

    #[test]
    fn name_before_digit() {
        assert_eq!(
            extract_flavour("Strawberry Banana 2lb").as_deref(),
            Some("Strawberry Banana")
        );
    }

    #[test]
    fn title_without_separator_takes_first_word() {
        assert_eq!(extract_flavour("Vanilla Whey").as_deref(), Some("Vanilla"));
    }

    #[test]
    fn first_word_skips_words_with_digits_or_symbols() {
        assert_eq!(
            extract_flavour("100% Mocha Isolate").as_deref(),
            Some("Mocha")
        );
    }

    #[test]
    fn digits_glued_to_name_end_the_leading_run() {
        assert_eq!(
            extract_flavour("XtremePower3000").as_deref(),
            Some("XtremePower")
        );
        assert_eq!(
            extract_flavour("Chocolate Fudge2lb").as_deref(),
            Some("Chocolate Fudge")
        );
    }

    #[test]
    fn letter_strip_collapses_spacing() {
        assert_eq!(extract_flavour("3x-Berry!").as_deref(), Some("xBerry"));
    }

    #[test]
    fn title_without_letters_has_no_flavour() {
        assert_eq!(extract_flavour("2000 / 500"), None);
        assert_eq!(extract_flavour(""), None);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let title = format!("{} - 2lb", "a".repeat(101));
        assert_eq!(extract_flavour(&title), None);
    }
}
