use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;

/// `<http...>` after whitespace, `](http...)`, or bare `http...` after whitespace.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s<(http.+?)>|\]\((http.+?)\)|\s(http\S+)").expect("url regex should compile")
});

/// A URL and the entry file it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub file: String,
    pub url: String,
}

/// External URLs in the order they appear.
///
/// Bare URLs lose trailing list punctuation, so `- Home: https://a, https://b`
/// yields two clean URLs.
pub fn extract_links(text: &str) -> Vec<String> {
    URL.captures_iter(text)
        .filter_map(|caps| {
            if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
                return Some(m.as_str().to_string());
            }
            caps.get(3)
                .map(|m| m.as_str().trim_end_matches([',', ';', '.']).to_string())
        })
        .filter(|url| !url.is_empty())
        .collect()
}

/// Every link of every entry.
pub fn collect_link_targets(catalog: &Catalog) -> Vec<LinkTarget> {
    catalog
        .entries()
        .flat_map(|item| {
            extract_links(&item.text)
                .into_iter()
                .map(move |url| LinkTarget {
                    file: item.file_name.clone(),
                    url,
                })
        })
        .collect()
}
