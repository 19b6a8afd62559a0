use crate::PathError;
use url::Url;

/// A validated documentation path of the shape `name/version/name[/...]`
///
/// The path identifies one documentation tree on the host, e.g.
/// `wgpu/latest/wgpu` or `serde/1.0.200/serde/de`. Validation happens
/// before any network activity; a malformed path never produces a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parses and validates a documentation path
    ///
    /// # Rules
    ///
    /// - At least three segments: `name/version/name`
    /// - Name segments contain only ASCII alphanumerics, `_` and `-`
    /// - The version segment is `latest`, or dotted digits with an
    ///   optional `-prerelease` suffix (e.g. `1.0.0`, `0.20.0-alpha.1`)
    /// - Leading and trailing slashes are ignored
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let trimmed = input.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() < 3 {
            return Err(PathError::Shape(input.to_string()));
        }

        for (index, segment) in segments.iter().enumerate() {
            if index == 1 {
                if !is_valid_version(segment) {
                    return Err(PathError::Version(segment.to_string()));
                }
            } else if !is_valid_name(segment) {
                return Err(PathError::Segment(segment.to_string()));
            }
        }

        Ok(Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// The crate name (first segment)
    pub fn name(&self) -> &str {
        &self.segments[0]
    }

    /// The version segment (`latest` or a dotted version)
    pub fn version(&self) -> &str {
        &self.segments[1]
    }

    /// Resolves this path against a host base URL to form the seed URL
    ///
    /// The seed carries no trailing slash; the crawl prefix is derived
    /// from it directly.
    pub fn seed_url(&self, host_base: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            host_base.trim_end_matches('/'),
            self.segments.join("/")
        ))
    }
}

impl std::fmt::Display for DocPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A name segment: non-empty, ASCII alphanumeric plus `_` and `-`
fn is_valid_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A version segment: `latest`, or `[0-9.]+` with an optional `-[word.]+` suffix
fn is_valid_version(segment: &str) -> bool {
    if segment == "latest" {
        return true;
    }

    let (numeric, prerelease) = match segment.split_once('-') {
        Some((head, tail)) => (head, Some(tail)),
        None => (segment, None),
    };

    if numeric.is_empty() || !numeric.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return false;
    }
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    match prerelease {
        Some(tail) => {
            !tail.is_empty()
                && tail
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        None => true,
    }
}
