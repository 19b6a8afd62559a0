use crate::extract::PageContent;

/// The final crawl artifact: every page's content in breadth-first visit
/// order, immutable once created
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<PageContent>,
}

impl Document {
    /// Wraps the accumulated pages; order is the crawl's visit order and
    /// is never re-sorted
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    /// Number of pages that contributed content
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total extracted blocks across all pages
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// True when the crawl extracted zero blocks
    ///
    /// "Nothing was extracted" is a failure of the overall operation; the
    /// store refuses to write an empty document.
    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }

    /// Renders the full document as UTF-8 text
    ///
    /// Pages appear in stored order, each framed by the separator and its
    /// `Source:` marker. Byte-identical for identical input.
    pub fn render(&self) -> String {
        self.pages.iter().map(PageContent::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedBlock;

    fn page(url: &str, blocks: Vec<ExtractedBlock>) -> PageContent {
        PageContent {
            url: url.to_string(),
            blocks,
        }
    }

    #[test]
    fn test_empty_document() {
        let document = Document::new(vec![]);
        assert!(document.is_empty());
        assert_eq!(document.page_count(), 0);
        assert_eq!(document.render(), "");
    }

    #[test]
    fn test_frame_only_pages_count_as_empty() {
        let document = Document::new(vec![page("https://docs.rs/x/latest/x", vec![])]);
        assert!(document.is_empty());
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn test_pages_render_in_visit_order() {
        let document = Document::new(vec![
            page(
                "https://docs.rs/x/latest/x",
                vec![ExtractedBlock::Prose("first".to_string())],
            ),
            page(
                "https://docs.rs/x/latest/x/struct.A.html",
                vec![ExtractedBlock::Prose("second".to_string())],
            ),
        ]);

        assert!(!document.is_empty());
        assert_eq!(document.block_count(), 2);

        let rendered = document.render();
        assert_eq!(rendered.matches("Source: ").count(), 2);
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();
        assert!(first < second);
    }
}
