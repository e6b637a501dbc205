//! Text Cleaner: turns scraped page text into plain prompt-ready text.

use std::sync::LazyLock;

use regex::Regex;

/// Tag shapes only (`<p>`, `</div>`, `<!-- x -->`); a bare `<` in prose is not a tag.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^<>]*>").expect("valid tag pattern"));
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*").expect("valid url pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strips tags, URLs and control characters, then collapses whitespace.
///
/// Every removal is replaced by a space so two neighbouring fragments can
/// never be glued into a new tag or URL, which keeps `clean` idempotent.
pub fn clean_text(raw: &str) -> String {
    let text = HTML_TAG.replace_all(raw, " ");
    let text = text.replace(['<', '>'], " ");
    let text = URL.replace_all(&text, " ");
    let text: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        assert_eq!(clean_text("<p>Hello   world</p>\n\n"), "Hello world");
    }

    #[test]
    fn test_empty_input_returns_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("  \n\t "), "");
    }

    #[test]
    fn test_removes_urls() {
        assert_eq!(
            clean_text("Apply at https://jobs.example.com/apply?id=7 today"),
            "Apply at today"
        );
        assert_eq!(clean_text("see http://x.io"), "see");
    }

    #[test]
    fn test_removes_control_characters() {
        assert_eq!(clean_text("Rust\u{0}Engineer\u{7}"), "Rust Engineer");
    }

    #[test]
    fn test_adjacent_tags_do_not_glue_words() {
        assert_eq!(clean_text("Senior<br>Engineer"), "Senior Engineer");
    }

    #[test]
    fn test_nested_brackets_leave_no_tags() {
        let once = clean_text("<<b>i>bold</b>");
        assert!(!once.contains('<') && !once.contains('>'));
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_comparison_brackets_keep_the_prose_between_them() {
        assert_eq!(
            clean_text("salary < 100k, experience > 5 years"),
            "salary 100k, experience 5 years"
        );
        assert_eq!(clean_text("<!-- hiring --><b>Rust</b>"), "Rust");
    }

    #[test]
    fn test_keeps_unicode_text() {
        assert_eq!(clean_text("Gehalt 60.000 €  –  90.000 €"), "Gehalt 60.000 € – 90.000 €");
    }

    #[test]
    fn test_is_idempotent() {
        let samples = [
            "<div class=\"job\">Rust   Developer</div>\r\n<a href=\"https://x.y\">apply</a>",
            "plain text",
            "a < b > c",
            "http<i>://</i>example.com",
            "\u{feff}BOM and\u{200b}zero width",
            "",
        ];
        for s in samples {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once, "not idempotent for {s:?}");
        }
    }
}
