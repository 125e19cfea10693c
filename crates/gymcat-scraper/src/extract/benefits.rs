use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::html_text::collapse_whitespace;

const ACTION_VERBS: &str = "increases?|improves?|supports?|helps?|enhances?|boosts?|promotes?|\
    aids?|builds?|reduces?|delivers?|fuels?|maximizes?|accelerates?|speeds?|provides?|\
    strengthens?|sustains?|elevates?|amplifies?";

/// A verb-led clause running to the end of its sentence.
static VERB_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{ACTION_VERBS})\b[^.!?\n]*")).expect("valid benefit regex")
});

static LEADING_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{ACTION_VERBS})\b")).expect("valid leading verb regex")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\n]+").expect("valid sentence regex"));

const EXCLUDED_PHRASES: &[&str] = &["what", "how to", "difference between"];
const MAX_BENEFITS: usize = 10;

/// Best-effort list of product claims such as "Supports lean muscle growth".
///
/// Verb-led clauses are collected first, then whole sentences that open with
/// one of the same verbs. Each benefit is 11 to 149 characters, question-like
/// copy is skipped, and at most ten are returned.
#[must_use]
pub fn extract_benefits(description: &str) -> Vec<String> {
    let clauses = VERB_CLAUSE.find_iter(description).map(|m| m.as_str());
    let sentences = SENTENCE_END
        .split(description)
        .map(str::trim)
        .filter(|sentence| LEADING_VERB.is_match(sentence));

    let mut seen = HashSet::new();
    clauses
        .chain(sentences)
        .map(|raw| {
            collapse_whitespace(raw)
                .trim_end_matches([',', ';', ':'])
                .to_string()
        })
        .filter(|benefit| is_acceptable(benefit))
        .filter(|benefit| seen.insert(benefit.to_lowercase()))
        .take(MAX_BENEFITS)
        .collect()
}

fn is_acceptable(benefit: &str) -> bool {
    let len = benefit.chars().count();
    if len <= 10 || len >= 150 {
        return false;
    }
    let lower = benefit.to_lowercase();
    !EXCLUDED_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
