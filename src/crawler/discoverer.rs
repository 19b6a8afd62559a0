//! In-scope link discovery
//!
//! Given one fetched page and the crawl scope, yields the ordered set of
//! documentation links worth visiting. The discoverer is stateless:
//! de-duplication against crawl history belongs to the coordinator, but
//! the returned list never contains intra-call duplicates, and links the
//! caller already visited are filtered out up front.

use crate::crawler::fetcher::Page;
use crate::url::CrawlScope;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Navigational containers candidate links are pulled from, in order.
/// Item listings and the sidebar come first, then any remaining anchor
/// inside the main-content region; the union is de-duplicated while
/// preserving first-seen document order.
const LINK_CONTAINER_SELECTORS: &[&str] = &[
    "ul.item-table div.item-name a[href]",
    "nav.sidebar a[href]",
    ".sidebar a[href]",
    "#main-content a[href]",
    "div.rustdoc a[href]",
];

/// Discovers in-scope, not-yet-visited links on a page
///
/// Candidate hrefs resolve against the page's own URL; the resolved form
/// must start with the crawl prefix and carry none of the configured
/// non-canonical markers. Output order is deterministic for identical
/// markup.
pub fn discover_links(page: &Page, scope: &CrawlScope, visited: &HashSet<String>) -> Vec<Url> {
    let document = Html::parse_document(&page.html);

    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for selector_str in LINK_CONTAINER_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let href = match element.value().attr("href") {
                    Some(href) => href,
                    None => continue,
                };

                let resolved = match scope.resolve(&page.url, href) {
                    Some(url) => url,
                    None => continue,
                };

                if !scope.in_scope(&resolved) {
                    continue;
                }

                let key = resolved.as_str().to_string();
                if visited.contains(&key) || !seen.insert(key) {
                    continue;
                }

                links.push(resolved);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> Page {
        Page {
            url: Url::parse("https://docs.rs/demo/latest/demo").unwrap(),
            html: html.to_string(),
        }
    }

    fn scope() -> CrawlScope {
        let seed = Url::parse("https://docs.rs/demo/latest/demo").unwrap();
        CrawlScope::new(
            &seed,
            vec!["target-redirect".to_string(), "index.html".to_string()],
        )
    }

    #[test]
    fn test_item_table_links_discovered() {
        let html = r#"
            <div id="main-content">
                <ul class="item-table">
                    <div class="item-name"><a href="struct.Widget.html">Widget</a></div>
                    <div class="item-name"><a href="./enum.Mode.html">Mode</a></div>
                </ul>
            </div>"#;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        let texts: Vec<&str> = links.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "https://docs.rs/demo/latest/demo/struct.Widget.html",
                "https://docs.rs/demo/latest/demo/enum.Mode.html",
            ]
        );
    }

    #[test]
    fn test_sidebar_and_main_content_union_deduplicated() {
        let html = r#"
            <nav class="sidebar"><a href="struct.Widget.html">Widget</a></nav>
            <div id="main-content">
                <a href="struct.Widget.html">Widget again</a>
                <a href="fn.run.html">run</a>
            </div>"#;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].as_str(),
            "https://docs.rs/demo/latest/demo/struct.Widget.html"
        );
    }

    #[test]
    fn test_out_of_scope_links_excluded() {
        let html = r#"
            <div id="main-content">
                <a href="https://docs.rs/other/latest/other">other crate</a>
                <a href="https://example.com/">elsewhere</a>
                <a href="struct.Widget.html">Widget</a>
            </div>"#;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_non_canonical_markers_excluded() {
        let html = r#"
            <div id="main-content">
                <a href="util/index.html">util index</a>
                <a href="?go_to_first=true&target-redirect=struct.Widget.html">redirect</a>
                <a href="struct.Widget.html">Widget</a>
            </div>"#;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].as_str(),
            "https://docs.rs/demo/latest/demo/struct.Widget.html"
        );
    }

    #[test]
    fn test_fragment_only_and_visited_excluded() {
        let html = r##"
            <div id="main-content">
                <a href="#fields">fields</a>
                <a href="struct.Widget.html">Widget</a>
                <a href="struct.Seen.html">Seen</a>
            </div>"##;
        let mut visited = HashSet::new();
        visited.insert("https://docs.rs/demo/latest/demo/struct.Seen.html".to_string());

        let links = discover_links(&page(html), &scope(), &visited);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].as_str(),
            "https://docs.rs/demo/latest/demo/struct.Widget.html"
        );
    }

    #[test]
    fn test_fragment_variants_collapse_to_one_link() {
        let html = r##"
            <div id="main-content">
                <a href="struct.Widget.html#method.new">new</a>
                <a href="struct.Widget.html#method.run">run</a>
            </div>"##;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].as_str(),
            "https://docs.rs/demo/latest/demo/struct.Widget.html"
        );
    }

    #[test]
    fn test_no_links_yields_empty() {
        let html = r#"<div id="main-content"><p>Nothing here.</p></div>"#;
        let links = discover_links(&page(html), &scope(), &HashSet::new());
        assert!(links.is_empty());
    }
}
