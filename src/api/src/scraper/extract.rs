//! Selector-based text extraction shared by the page parsers.
//!
//! Missing elements are not errors: every lookup degrades to an empty string,
//! since calscape.org omits whole sections for plants without the data.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::error::ScrapeError;

/// Matches the inline navigation target in a row's `onclick` handler,
/// e.g. `showPlant({url:'/search/x/Quercus-agrifolia'})`.
static REDIRECT_TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"url:'(.+?)'").expect("redirect target pattern is valid"));

/// Compile a CSS selector.
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// Trimmed text of the first element in `document` matching `selector`, or `""`.
pub fn extract_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Same as [`extract_text`], scoped to the descendants of `element`.
pub fn extract_text_in(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Pull the quoted `url:'...'` target out of an inline script attribute.
pub fn extract_redirect_target(script: &str) -> Option<&str> {
    REDIRECT_TARGET_RE
        .captures(script)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Last non-empty path segment of a URL or absolute path, ignoring query and fragment.
pub fn last_path_fragment(target: &str) -> String {
    let without_query = target.split(['?', '#']).next().unwrap_or_default();
    // Drop scheme and authority so a bare origin yields no segment.
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => without_query,
    };
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Slug encoded in an inline redirect script; `""` when there is none.
pub fn slug_from_redirect(script: &str) -> String {
    extract_redirect_target(script)
        .map(last_path_fragment)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="common_name">
    Coast Live Oak
</div>
<div class="row"><span class="species">Quercus agrifolia</span></div>
<div class="common_name">Second match</div>
</body>
</html>"#;

    #[test]
    fn test_extract_text_trims_first_match() {
        let document = Html::parse_document(SAMPLE_HTML);
        let sel = selector(".common_name").unwrap();
        assert_eq!(extract_text(&document, &sel), "Coast Live Oak");
    }

    #[test]
    fn test_extract_text_missing_is_empty() {
        let document = Html::parse_document(SAMPLE_HTML);
        let sel = selector(".flowering_season .info").unwrap();
        assert_eq!(extract_text(&document, &sel), "");
    }

    #[test]
    fn test_extract_text_in_scope() {
        let document = Html::parse_document(SAMPLE_HTML);
        let row_sel = selector(".row").unwrap();
        let row = document.select(&row_sel).next().unwrap();

        assert_eq!(
            extract_text_in(row, &selector(".species").unwrap()),
            "Quercus agrifolia"
        );
        // .common_name exists in the document but not inside the row
        assert_eq!(extract_text_in(row, &selector(".common_name").unwrap()), "");
    }

    #[test]
    fn test_invalid_selector() {
        let err = selector("div[[").unwrap_err();
        assert!(matches!(err, ScrapeError::Selector(css) if css == "div[["));
    }

    #[test]
    fn test_extract_redirect_target() {
        assert_eq!(
            extract_redirect_target("loadPlant({url:'/search/x/bar-baz', modal:true})"),
            Some("/search/x/bar-baz")
        );
        assert_eq!(extract_redirect_target("return false;"), None);
        assert_eq!(extract_redirect_target("url:''"), None);
    }

    #[test]
    fn test_extract_redirect_target_is_non_greedy() {
        assert_eq!(
            extract_redirect_target("go({url:'/search/x/a'}); log({url:'/search/x/b'})"),
            Some("/search/x/a")
        );
    }

    #[test]
    fn test_last_path_fragment() {
        assert_eq!(last_path_fragment("/search/x/bar-baz"), "bar-baz");
        assert_eq!(last_path_fragment("/search/x/bar-baz/"), "bar-baz");
        assert_eq!(last_path_fragment("/search/x/oak?ref=list#top"), "oak");
        assert_eq!(
            last_path_fragment("https://calscape.org/search/x/Salvia-apiana"),
            "Salvia-apiana"
        );
        assert_eq!(last_path_fragment("https://calscape.org"), "");
        assert_eq!(last_path_fragment(""), "");
    }

    #[test]
    fn test_slug_from_redirect() {
        assert_eq!(slug_from_redirect("open({url:'/search/x/bar-baz'})"), "bar-baz");
        assert_eq!(slug_from_redirect("open()"), "");
    }
}
