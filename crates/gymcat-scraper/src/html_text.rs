//! Reducing HTML fragments to readable single-line text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static BREAK_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<br\s*/?>|</(?:p|div|li|ul|ol|h[1-6]|tr|td|th|table|section|article|blockquote|dd|dt)\s*>",
    )
    .expect("valid break-tag regex")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

/// Replaces the handful of entities storefront themes emit in product copy.
/// `&amp;` goes last so `&amp;lt;` decodes to the literal text `&lt;`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapses every run of whitespace (including non-breaking spaces) into a
/// single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduces an HTML fragment to text: line breaks and block-closing tags
/// become a space, every other tag is dropped, entities are unescaped and
/// whitespace is collapsed.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let spaced = BREAK_TAGS.replace_all(html, " ");
    let stripped = ANY_TAG.replace_all(&spaced, "");
    collapse_whitespace(&decode_entities(&stripped))
}

/// Readable text of `element`, preferring its inner HTML reduced with
/// [`html_to_text`] and falling back to its plain text nodes.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    let from_html = html_to_text(&element.inner_html());
    if from_html.is_empty() {
        collapse_whitespace(&element.text().collect::<String>())
    } else {
        from_html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn block_tags_become_spaces() {
        assert_eq!(
            html_to_text("<p>Fast acting</p><p>Great taste</p>"),
            "Fast acting Great taste"
        );
    }

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(html_to_text("Line one<br>Line two<BR />end"), "Line one Line two end");
    }

    #[test]
    fn inline_tags_are_dropped_without_spacing() {
        assert_eq!(html_to_text("<strong>35</strong>g protein"), "35g protein");
    }

    #[test]
    fn entities_are_unescaped() {
        assert_eq!(
            html_to_text("Cookies &amp; Cream&nbsp;&quot;Classic&quot; &#39;24 &lt;3"),
            "Cookies & Cream \"Classic\" '24 <3"
        );
    }

    #[test]
    fn double_escaped_entity_decodes_once() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(collapse_whitespace("  a \n\t b\u{a0} c  "), "a b c");
    }

    #[test]
    fn element_text_reads_inner_html() {
        let doc = Html::parse_fragment("<div class=\"d\"><p>One</p><p>Two &amp; three</p></div>");
        let sel = Selector::parse(".d").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el), "One Two & three");
    }

    #[test]
    fn element_text_of_empty_element_is_empty() {
        let doc = Html::parse_fragment("<span class=\"p\">   </span>");
        let sel = Selector::parse(".p").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el), "");
    }
}
