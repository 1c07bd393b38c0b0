//! Frontmatter extraction: ---\nYAML\n---

use regex::Regex;
use std::sync::LazyLock;

/// Matches a leading YAML frontmatter block
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

/// A leading frontmatter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// YAML between the fences
    pub yaml: &'a str,
    /// Body text after the closing fence
    pub body: &'a str,
    /// Number of source lines the block occupies, fences included
    pub line_count: usize,
}

/// Split a leading frontmatter block from the body, if there is one
pub fn split_frontmatter(content: &str) -> Option<Frontmatter<'_>> {
    let caps = FRONTMATTER_PATTERN.captures(content)?;
    let full = caps.get(0)?;
    let yaml = caps.get(1)?.as_str();
    let block = full.as_str();

    let mut line_count = block.matches('\n').count();
    if !block.ends_with('\n') {
        line_count += 1;
    }

    Some(Frontmatter {
        yaml,
        body: &content[full.end()..],
        line_count,
    })
}
