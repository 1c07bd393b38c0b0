//! Compiled patterns shared by the link extractor.

use regex::Regex;
use std::sync::LazyLock;

/// `[[target]]` or `[[target|alias]]`, including the link inside an embed
pub(crate) static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());

/// `![[target]]` or `![[target|alias]]`
pub(crate) static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap());

/// `[text](url)`; callers reject image syntax preceded by `!`
pub(crate) static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// True when the match at `start` is preceded by `!`
pub(crate) fn preceded_by_bang(content: &str, start: usize) -> bool {
    start > 0 && content.as_bytes().get(start - 1) == Some(&b'!')
}
