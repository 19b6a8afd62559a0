use url::Url;

/// The scope boundary for one crawl
///
/// A discovered link is followed only if its resolved absolute form starts
/// with the crawl prefix (the seed URL with any trailing slash stripped)
/// and contains none of the configured non-canonical markers. Redirect
/// aliases and explicit index pages are duplicates of canonical pages, so
/// following them would inflate the document without adding content.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    prefix: String,
    skip_markers: Vec<String>,
}

impl CrawlScope {
    /// Creates a scope from the seed URL and the configured skip markers
    pub fn new(seed: &Url, skip_markers: Vec<String>) -> Self {
        Self {
            prefix: seed.as_str().trim_end_matches('/').to_string(),
            skip_markers,
        }
    }

    /// The crawl prefix (seed URL, trailing slash stripped)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether an absolute URL is inside this crawl's scope
    pub fn in_scope(&self, url: &Url) -> bool {
        let text = url.as_str();
        text.starts_with(&self.prefix)
            && !self.skip_markers.iter().any(|marker| text.contains(marker))
    }

    /// Resolves an href against the page it appeared on
    ///
    /// Relative links resolve against the page's own URL scope, not the
    /// seed: a module page without a trailing slash is treated as a
    /// directory, so `struct.Foo.html` on `.../wgpu` resolves inside the
    /// module rather than replacing its last path segment. Fragments are
    /// stripped from the result so the de-duplication key is stable.
    ///
    /// Returns None for hrefs that can never be crawl candidates:
    /// fragment-only self links, non-navigational schemes, and anything
    /// that fails to resolve.
    pub fn resolve(&self, page_url: &Url, href: &str) -> Option<Url> {
        let href = href.trim();

        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            return None;
        }

        let base = directory_base(page_url);
        let mut resolved = base.join(href).ok()?;
        resolved.set_fragment(None);

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        Some(resolved)
    }
}

/// Returns the page URL in directory form for relative resolution
///
/// Leaf pages (`*.html`) resolve siblings; anything else is a module or
/// crate index and resolves children.
fn directory_base(page_url: &Url) -> Url {
    let path = page_url.path();
    if path.ends_with('/') || path.ends_with(".html") {
        return page_url.clone();
    }

    let mut base = page_url.clone();
    base.set_path(&format!("{}/", path));
    base
}
