//! URL Utility Functions
//!
//! Address validation, resolution of relative hrefs, and the small
//! classification helpers the link and media inventories need.

use url::Url;

/// Parse an absolute `http://` or `https://` URL with a host.
///
/// # Returns
/// * `Some(Url)` if valid, `None` otherwise
#[must_use]
pub fn parse_url(s: &str) -> Option<Url> {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Whether the string is an acceptable document address.
#[must_use]
pub fn is_valid_address(s: &str) -> bool {
    parse_url(s).is_some()
}

/// Convert a relative or absolute URL to absolute form.
///
/// Special schemes (`data:`, `javascript:`, `mailto:`, `tel:`) are returned
/// unchanged, as is anything that fails to resolve.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if parse_url(url_str).is_some() {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Kind of a raw href, as counted by the link inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrefKind {
    /// `#fragment` only.
    Anchor,
    /// `javascript:` pseudo-link.
    Script,
    /// Same host as the document.
    Internal,
    /// Any other host.
    External,
}

/// Classify an href relative to the document base.
#[must_use]
pub fn classify_href(href: &str, base: &Url) -> (HrefKind, String) {
    let href = href.trim();

    if href.starts_with('#') {
        return (HrefKind::Anchor, href.to_string());
    }
    if href.to_ascii_lowercase().starts_with("javascript:") {
        return (HrefKind::Script, href.to_string());
    }

    let resolved = create_absolute_url(href, base);
    let same_host = Url::parse(&resolved)
        .ok()
        .is_some_and(|url| url.host_str() == base.host_str());

    if same_host {
        (HrefKind::Internal, resolved)
    } else {
        (HrefKind::External, resolved)
    }
}

/// Lowercased text after the last `.` of a src, as the image format.
///
/// Mirrors a naive split: query strings stay attached, and a src without a
/// dot yields the whole src.
#[must_use]
pub fn src_extension(src: &str) -> String {
    src.rsplit('.').next().unwrap_or(src).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/articles/").unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_parse_url_valid() {
        assert!(parse_url("https://example.com/path").is_some());
        assert!(parse_url("  http://example.com  ").is_some());
    }

    #[test]
    fn test_parse_url_invalid() {
        assert!(parse_url("/relative/path").is_none());
        assert!(parse_url("example.com").is_none());
        assert!(parse_url("").is_none());
        assert!(parse_url("ftp://example.com").is_none());
    }

    #[test]
    fn test_create_absolute_url() {
        let base = base();

        assert_eq!(
            create_absolute_url("page.html", &base),
            "https://example.com/articles/page.html"
        );
        assert_eq!(
            create_absolute_url("/root/page.html", &base),
            "https://example.com/root/page.html"
        );
        assert_eq!(
            create_absolute_url("https://other.org/x", &base),
            "https://other.org/x"
        );
        assert_eq!(create_absolute_url("mailto:a@b.c", &base), "mailto:a@b.c");
        assert_eq!(create_absolute_url("   ", &base), "");
    }

    #[test]
    fn test_classify_href() {
        let base = base();

        assert_eq!(classify_href("#top", &base).0, HrefKind::Anchor);
        assert_eq!(classify_href("javascript:void(0)", &base).0, HrefKind::Script);
        assert_eq!(classify_href("/about", &base).0, HrefKind::Internal);
        assert_eq!(classify_href("https://other.org/", &base).0, HrefKind::External);
    }

    #[test]
    fn test_src_extension() {
        assert_eq!(src_extension("/img/photo.JPG"), "jpg");
        assert_eq!(src_extension("https://cdn.example.com/a.webp"), "webp");
    }
}
