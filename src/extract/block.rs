/// One unit of extracted content contributing to the output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedBlock {
    /// A section heading (level 1 = page title, level 2 = named section)
    Heading { level: u8, text: String },

    /// A fenced code block (signatures, member listings)
    Code(String),

    /// Free-form descriptive text
    Prose(String),

    /// A titled raw text section (details toggles, non-code member bodies)
    RawSection { title: String, body: String },
}

impl ExtractedBlock {
    /// Renders the block into its document text form
    ///
    /// Rendering is pure string formatting; given the same block the
    /// output is byte-identical on every call.
    pub fn render(&self) -> String {
        match self {
            ExtractedBlock::Heading { level: 1, text } => format!("# {}\n", text),
            ExtractedBlock::Heading { level, text } => {
                format!("\n{} {}\n", "#".repeat(*level as usize), text)
            }
            ExtractedBlock::Code(code) => format!("\n```rust\n{}\n```\n", code),
            ExtractedBlock::Prose(text) => format!("\n{}\n", text),
            ExtractedBlock::RawSection { title, body } => {
                format!("\n## {}\n\n{}\n", title, body)
            }
        }
    }
}

/// One page's contribution to the document, in extraction-rule order
///
/// Rendering frames the blocks with the page separator and a
/// `Source: <url>` marker, so every extracted page contributes exactly
/// one marker regardless of how many rules matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub blocks: Vec<ExtractedBlock>,
}

impl PageContent {
    /// Renders the framed page: separator, source marker, blocks in order
    pub fn render(&self) -> String {
        let mut out = format!("\n\n{}\n", "=".repeat(80));
        out.push_str(&format!("Source: {}\n", self.url));
        for block in &self.blocks {
            out.push_str(&block.render());
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_title_heading() {
        let block = ExtractedBlock::Heading {
            level: 1,
            text: "Struct wgpu::Device".to_string(),
        };
        assert_eq!(block.render(), "# Struct wgpu::Device\n");
    }

    #[test]
    fn test_render_section_heading() {
        let block = ExtractedBlock::Heading {
            level: 2,
            text: "Implementations".to_string(),
        };
        assert_eq!(block.render(), "\n## Implementations\n");
    }

    #[test]
    fn test_render_code_block() {
        let block = ExtractedBlock::Code("pub struct Device { /* fields */ }".to_string());
        assert_eq!(
            block.render(),
            "\n```rust\npub struct Device { /* fields */ }\n```\n"
        );
    }

    #[test]
    fn test_render_prose() {
        let block = ExtractedBlock::Prose("An open connection to a device.".to_string());
        assert_eq!(block.render(), "\nAn open connection to a device.\n");
    }

    #[test]
    fn test_render_raw_section() {
        let block = ExtractedBlock::RawSection {
            title: "Details".to_string(),
            body: "The lifetime of the device...".to_string(),
        };
        assert_eq!(
            block.render(),
            "\n## Details\n\nThe lifetime of the device...\n"
        );
    }

    #[test]
    fn test_page_frame_contains_single_source_marker() {
        let page = PageContent {
            url: "https://docs.rs/wgpu/latest/wgpu".to_string(),
            blocks: vec![ExtractedBlock::Prose("hello".to_string())],
        };
        let rendered = page.render();
        assert_eq!(rendered.matches("Source: ").count(), 1);
        assert!(rendered.starts_with(&format!("\n\n{}\n", "=".repeat(80))));
        assert!(rendered.contains("Source: https://docs.rs/wgpu/latest/wgpu\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let page = PageContent {
            url: "https://docs.rs/x/latest/x".to_string(),
            blocks: vec![
                ExtractedBlock::Heading {
                    level: 1,
                    text: "Crate x".to_string(),
                },
                ExtractedBlock::Code("pub fn x()".to_string()),
            ],
        };
        assert_eq!(page.render(), page.render());
    }
}
