//! Normalization rules that turn a raw link into a bare note identifier.

/// Whether a markdown link target points outside the vault
///
/// # Examples
///
/// ```
/// use vaultgraph_parser::link_utils::is_external_url;
///
/// assert!(is_external_url("https://example.com/page.md"));
/// assert!(!is_external_url("notes/page.md"));
/// ```
pub fn is_external_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Drop everything from the first `#` (heading or block reference)
pub fn strip_anchor(target: &str) -> &str {
    match target.find('#') {
        Some(idx) => &target[..idx],
        None => target,
    }
}

/// Bare target of a wikilink or embed body (alias already separated).
///
/// Returns `None` for same-note anchors such as `[[#Heading]]`.
pub fn normalize_wikilink_target(raw: &str) -> Option<String> {
    let target = strip_anchor(raw).trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

/// Bare target of a markdown link URL.
///
/// Returns `None` for external URLs and pure anchors such as `(#section)`.
///
/// # Examples
///
/// ```
/// use vaultgraph_parser::link_utils::normalize_markdown_target;
///
/// assert_eq!(normalize_markdown_target("folder/Note.md#Intro"), Some("folder/Note".to_string()));
/// assert_eq!(normalize_markdown_target("#section"), None);
/// assert_eq!(normalize_markdown_target("https://example.com"), None);
/// ```
pub fn normalize_markdown_target(url: &str) -> Option<String> {
    let url = url.trim();
    if is_external_url(url) {
        return None;
    }

    let target = strip_anchor(url).trim();
    let target = target.strip_suffix(".md").unwrap_or(target).trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_anchor() {
        assert_eq!(strip_anchor("Note#Heading"), "Note");
        assert_eq!(strip_anchor("Note#^block"), "Note");
        assert_eq!(strip_anchor("#Heading"), "");
        assert_eq!(strip_anchor("Note"), "Note");
    }

    #[test]
    fn test_wikilink_target() {
        assert_eq!(normalize_wikilink_target(" Note "), Some("Note".to_string()));
        assert_eq!(
            normalize_wikilink_target("folder/Note#Part"),
            Some("folder/Note".to_string())
        );
        assert_eq!(normalize_wikilink_target("#Local"), None);
    }

    #[test]
    fn test_markdown_target() {
        assert_eq!(normalize_markdown_target("Note.md"), Some("Note".to_string()));
        assert_eq!(normalize_markdown_target("Note"), Some("Note".to_string()));
        assert_eq!(normalize_markdown_target("http://x.org/a.md"), None);
        assert_eq!(
            normalize_markdown_target("assets/diagram.png"),
            Some("assets/diagram.png".to_string())
        );
    }
}
