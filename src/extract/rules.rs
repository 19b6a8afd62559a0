use crate::extract::block::{ExtractedBlock, PageContent};
use crate::progress::ProgressSink;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Container selectors tried in priority order to locate the page's
/// main-content region. If none match, the page contributes nothing.
const MAIN_CONTENT_SELECTORS: &[&str] = &["#main-content", "div.rustdoc", "div.rustdoc.mod.crate"];

/// Declaration keywords marking a named-section body as code rather than prose
const DECLARATION_KEYWORDS: &[&str] =
    &["fn ", "struct ", "enum ", "trait ", "type ", "impl ", "pub "];

/// One extraction rule: the containers it anchors on, decoupled from the
/// page loop. Returns a human-readable status line when the rule matched.
type RuleFn = fn(&Html, ElementRef<'_>, &mut Vec<ExtractedBlock>) -> Option<String>;

struct ExtractionRule {
    name: &'static str,
    apply: RuleFn,
}

/// The fixed, ordered rule list. Order determines the human-readable order
/// of the final document and must not change.
const RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "title",
        apply: rule_title,
    },
    ExtractionRule {
        name: "signature",
        apply: rule_signature,
    },
    ExtractionRule {
        name: "summary",
        apply: rule_summary,
    },
    ExtractionRule {
        name: "details",
        apply: rule_details,
    },
    ExtractionRule {
        name: "named-sections",
        apply: rule_named_sections,
    },
];

/// Extracts one page's content blocks by running the rule list in order
///
/// Returns None when no main-content container matches; the page still
/// counts as visited, it just contributes nothing to the document. Every
/// rule is independently optional and runs in a single pass; given
/// identical markup the block sequence is byte-identical on every call.
pub fn extract_page(url: &Url, html: &str, progress: &ProgressSink) -> Option<PageContent> {
    let document = Html::parse_document(html);

    let main = match find_main_content(&document) {
        Some(element) => element,
        None => {
            progress.status("No main content found");
            return None;
        }
    };

    progress.status(format!("Parsing content from: {}", url));

    let mut blocks = Vec::new();
    for rule in RULES {
        if let Some(message) = (rule.apply)(&document, main, &mut blocks) {
            tracing::debug!(rule = rule.name, url = %url, "extraction rule matched");
            progress.status(message);
        }
    }

    Some(PageContent {
        url: url.to_string(),
        blocks,
    })
}

fn find_main_content(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in MAIN_CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                return Some(element);
            }
        }
    }
    None
}

/// Concatenated, trimmed text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn looks_like_code(text: &str) -> bool {
    DECLARATION_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
}

/// Rule 1: page title from the fully-qualified-name heading
fn rule_title(
    document: &Html,
    _main: ElementRef<'_>,
    blocks: &mut Vec<ExtractedBlock>,
) -> Option<String> {
    let selector = Selector::parse("h1.fqn").ok()?;
    let title = document.select(&selector).next().map(element_text)?;
    if title.is_empty() {
        return None;
    }

    blocks.push(ExtractedBlock::Heading {
        level: 1,
        text: title.clone(),
    });
    Some(format!("Found title: {}", title))
}

/// Rule 2: the primary signature from the first Rust code element
fn rule_signature(
    _document: &Html,
    main: ElementRef<'_>,
    blocks: &mut Vec<ExtractedBlock>,
) -> Option<String> {
    let pre_selector = Selector::parse("pre.rust").ok()?;
    let code_selector = Selector::parse("code").ok()?;

    let pre = main.select(&pre_selector).next()?;
    let code = pre.select(&code_selector).next().map(element_text)?;
    if code.is_empty() {
        return None;
    }

    blocks.push(ExtractedBlock::Code(code));
    Some("Found code block".to_string())
}

/// Rule 3: summary prose, preferring the short form over the long form
fn rule_summary(
    _document: &Html,
    main: ElementRef<'_>,
    blocks: &mut Vec<ExtractedBlock>,
) -> Option<String> {
    let docblock = ["div.docblock", "div.docblock-short"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| main.select(&selector).next())?;

    // Short form wins; never both.
    let short_selector = Selector::parse("p.docblock-short").ok()?;
    let text = match docblock.select(&short_selector).next() {
        Some(short) => element_text(short),
        None => element_text(docblock),
    };
    if text.is_empty() {
        return None;
    }

    blocks.push(ExtractedBlock::Prose(text));
    Some("Found docblock".to_string())
}

/// Rule 4: long-form details from an expandable toggle container
fn rule_details(
    _document: &Html,
    main: ElementRef<'_>,
    blocks: &mut Vec<ExtractedBlock>,
) -> Option<String> {
    let details_selector = Selector::parse("details.toggle").ok()?;
    let docblock_selector = Selector::parse("div.docblock").ok()?;

    let details = main.select(&details_selector).next()?;
    let body = details.select(&docblock_selector).next().map(element_text)?;
    if body.is_empty() {
        return None;
    }

    blocks.push(ExtractedBlock::RawSection {
        title: "Details".to_string(),
        body,
    });
    Some("Found detailed documentation".to_string())
}

/// Rule 5: named sub-sections (impl groups and item listings)
///
/// Each sub-section contributes its heading followed by its body, rendered
/// as code when the body text carries a declaration keyword, otherwise as
/// prose. Impl sections come first, then the item-group headings
/// (modules, structs, enums, traits, functions, re-exports and friends).
fn rule_named_sections(
    _document: &Html,
    main: ElementRef<'_>,
    blocks: &mut Vec<ExtractedBlock>,
) -> Option<String> {
    let mut matched = 0;

    matched += extract_impl_sections(main, blocks);
    matched += extract_item_groups(main, blocks);

    if matched == 0 {
        None
    } else {
        Some(format!("Found {} named sections", matched))
    }
}

fn extract_impl_sections(main: ElementRef<'_>, blocks: &mut Vec<ExtractedBlock>) -> usize {
    let section_selector = match Selector::parse("section") {
        Ok(s) => s,
        Err(_) => return 0,
    };
    let heading_selector = match Selector::parse("h2, h3") {
        Ok(s) => s,
        Err(_) => return 0,
    };
    let items_selector = match Selector::parse(".impl-items") {
        Ok(s) => s,
        Err(_) => return 0,
    };

    let mut matched = 0;
    for section in main.select(&section_selector) {
        let is_impl = section
            .value()
            .id()
            .map(|id| id.starts_with("impl"))
            .unwrap_or(false);
        if !is_impl {
            continue;
        }

        if let Some(heading) = section.select(&heading_selector).next() {
            let text = element_text(heading);
            if !text.is_empty() {
                blocks.push(ExtractedBlock::Heading { level: 2, text });
                matched += 1;
            }
        }

        for items in section.select(&items_selector) {
            let body = element_text(items);
            if body.is_empty() {
                continue;
            }
            if looks_like_code(&body) {
                blocks.push(ExtractedBlock::Code(body));
            } else {
                blocks.push(ExtractedBlock::Prose(body));
            }
        }
    }
    matched
}

fn extract_item_groups(main: ElementRef<'_>, blocks: &mut Vec<ExtractedBlock>) -> usize {
    let heading_selector = match Selector::parse("h2.section-header") {
        Ok(s) => s,
        Err(_) => return 0,
    };

    let mut matched = 0;
    for heading in main.select(&heading_selector) {
        let text = element_text(heading);
        if text.is_empty() {
            continue;
        }

        blocks.push(ExtractedBlock::Heading { level: 2, text });
        matched += 1;

        if let Some(body_element) = next_sibling_element(heading) {
            let body = element_text(body_element);
            if body.is_empty() {
                continue;
            }
            if looks_like_code(&body) {
                blocks.push(ExtractedBlock::Code(body));
            } else {
                blocks.push(ExtractedBlock::Prose(body));
            }
        }
    }
    matched
}

/// First element sibling after `element`, skipping text and comment nodes
fn next_sibling_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut node = element.next_sibling();
    while let Some(current) = node {
        if let Some(sibling) = ElementRef::wrap(current) {
            return Some(sibling);
        }
        node = current.next_sibling();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://docs.rs/demo/latest/demo").unwrap()
    }

    fn extract(html: &str) -> Option<PageContent> {
        extract_page(&url(), html, &ProgressSink::discard())
    }

    #[test]
    fn test_no_main_content_yields_nothing() {
        let html = r#"<html><body><div class="other">hi</div></body></html>"#;
        assert!(extract(html).is_none());
    }

    #[test]
    fn test_main_content_without_matches_yields_empty_page() {
        let html = r#"<html><body><div id="main-content"></div></body></html>"#;
        let page = extract(html).unwrap();
        assert!(page.blocks.is_empty());
        assert_eq!(page.url, "https://docs.rs/demo/latest/demo");
    }

    #[test]
    fn test_rustdoc_container_fallback() {
        let html = r#"<html><body><div class="rustdoc"><h1 class="fqn">Crate demo</h1></div></body></html>"#;
        let page = extract(html).unwrap();
        assert_eq!(
            page.blocks[0],
            ExtractedBlock::Heading {
                level: 1,
                text: "Crate demo".to_string()
            }
        );
    }

    #[test]
    fn test_title_and_signature_order() {
        let html = r#"
            <div id="main-content">
                <h1 class="fqn">Struct demo::Widget</h1>
                <pre class="rust"><code>pub struct Widget { count: u32 }</code></pre>
            </div>"#;
        let page = extract(html).unwrap();
        assert_eq!(page.blocks.len(), 2);
        assert!(matches!(
            page.blocks[0],
            ExtractedBlock::Heading { level: 1, .. }
        ));
        assert_eq!(
            page.blocks[1],
            ExtractedBlock::Code("pub struct Widget { count: u32 }".to_string())
        );
    }

    #[test]
    fn test_short_form_summary_wins_over_long_form() {
        let html = r#"
            <div id="main-content">
                <div class="docblock">
                    <p class="docblock-short">The short description.</p>
                    <p>The much longer description that should not appear.</p>
                </div>
            </div>"#;
        let page = extract(html).unwrap();
        assert_eq!(
            page.blocks,
            vec![ExtractedBlock::Prose("The short description.".to_string())]
        );
    }

    #[test]
    fn test_long_form_summary_used_when_no_short_form() {
        let html = r#"
            <div id="main-content">
                <div class="docblock"><p>Only the long description.</p></div>
            </div>"#;
        let page = extract(html).unwrap();
        assert_eq!(
            page.blocks,
            vec![ExtractedBlock::Prose("Only the long description.".to_string())]
        );
    }

    #[test]
    fn test_details_toggle_becomes_raw_section() {
        let html = r#"
            <div id="main-content">
                <details class="toggle">
                    <div class="docblock">Expanded documentation body.</div>
                </details>
            </div>"#;
        let page = extract(html).unwrap();
        assert!(page.blocks.iter().any(|b| matches!(
            b,
            ExtractedBlock::RawSection { title, body }
                if title == "Details" && body == "Expanded documentation body."
        )));
    }

    #[test]
    fn test_impl_section_heading_and_code_body() {
        let html = r#"
            <div id="main-content">
                <section id="impl-Widget">
                    <h3>impl Widget</h3>
                    <div class="impl-items">pub fn new() -> Widget</div>
                </section>
            </div>"#;
        let page = extract(html).unwrap();
        assert_eq!(
            page.blocks,
            vec![
                ExtractedBlock::Heading {
                    level: 2,
                    text: "impl Widget".to_string()
                },
                ExtractedBlock::Code("pub fn new() -> Widget".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_impl_section_ignored() {
        let html = r#"
            <div id="main-content">
                <section id="deprecated"><h2>Deprecated</h2></section>
            </div>"#;
        let page = extract(html).unwrap();
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn test_item_group_code_heuristic() {
        let html = r#"
            <div id="main-content">
                <h2 class="section-header">Structs</h2>
                <ul class="item-table"><li>struct Widget does things</li></ul>
                <h2 class="section-header">Re-exports</h2>
                <ul class="item-table"><li>everything from elsewhere</li></ul>
            </div>"#;
        let page = extract(html).unwrap();
        assert_eq!(
            page.blocks,
            vec![
                ExtractedBlock::Heading {
                    level: 2,
                    text: "Structs".to_string()
                },
                ExtractedBlock::Code("struct Widget does things".to_string()),
                ExtractedBlock::Heading {
                    level: 2,
                    text: "Re-exports".to_string()
                },
                ExtractedBlock::Prose("everything from elsewhere".to_string()),
            ]
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = r#"
            <div id="main-content">
                <h1 class="fqn">Crate demo</h1>
                <pre class="rust"><code>pub fn run()</code></pre>
                <div class="docblock">A demo crate.</div>
                <h2 class="section-header">Functions</h2>
                <ul class="item-table"><li>fn run starts the demo</li></ul>
            </div>"#;
        let first = extract(html).unwrap();
        let second = extract(html).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_rule_matches_emit_progress() {
        let (sink, mut rx) = ProgressSink::channel();
        let html = r#"<div id="main-content"><h1 class="fqn">Crate demo</h1></div>"#;
        extract_page(&url(), html, &sink).unwrap();

        let mut lines = Vec::new();
        while let Ok(event) = rx.try_recv() {
            lines.push(event.as_line());
        }
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Parsing content from:")));
        assert!(lines.contains(&"Found title: Crate demo".to_string()));
    }
}
