//! Link extractor: wikilinks, relative markdown links, and embeds.

use crate::link_utils::{normalize_markdown_target, normalize_wikilink_target};
use crate::patterns::{EMBED, MARKDOWN_LINK, WIKILINK, preceded_by_bang};
use vaultgraph_core::ExtractedLinks;

/// Extract every link from a note, grouped by kind.
///
/// Targets are bare note identifiers: heading/block anchors and aliases are
/// stripped, markdown links lose a trailing `.md`, and external URLs are
/// skipped. `all_links` is the union of the three lists in first-seen order
/// (wikilinks, then markdown links, then embeds) with duplicates removed.
///
/// An embed `![[X]]` is also a wikilink to `X`, so it appears in both lists.
/// Fenced code is scanned like any other text.
pub fn extract_links(content: &str) -> ExtractedLinks {
    let wikilinks = extract_wikilinks(content);
    let markdown_links = extract_markdown_links(content);
    let embeds = extract_embeds(content);

    let mut all_links: Vec<String> = Vec::new();
    for target in wikilinks.iter().chain(&markdown_links).chain(&embeds) {
        if !all_links.contains(target) {
            all_links.push(target.clone());
        }
    }

    ExtractedLinks {
        wikilinks,
        markdown_links,
        embeds,
        all_links,
    }
}

fn extract_wikilinks(content: &str) -> Vec<String> {
    WIKILINK
        .captures_iter(content)
        .filter_map(|caps| normalize_wikilink_target(caps.get(1)?.as_str()))
        .collect()
}

fn extract_markdown_links(content: &str) -> Vec<String> {
    MARKDOWN_LINK
        .captures_iter(content)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            // ![alt](image.png) is an image, not a link
            if preceded_by_bang(content, full.start()) {
                return None;
            }
            normalize_markdown_target(caps.get(2)?.as_str())
        })
        .collect()
}

fn extract_embeds(content: &str) -> Vec<String> {
    EMBED
        .captures_iter(content)
        .filter_map(|caps| normalize_wikilink_target(caps.get(1)?.as_str()))
        .collect()
}

/// A wikilink as written on a specific line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikilinkOccurrence {
    /// Target text before the alias, anchor kept (`Note#Heading`)
    pub raw_target: String,
    /// Bare target, `None` for same-note anchors
    pub target: Option<String>,
    /// 1-based line number
    pub line_number: usize,
    /// The trimmed source line
    pub context: String,
}

/// Every wikilink in `content` with its line, in reading order.
///
/// Embeds are included as wikilinks to their target.
pub fn wikilink_occurrences(content: &str) -> Vec<WikilinkOccurrence> {
    let mut occurrences = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if !line.contains("[[") {
            continue;
        }

        for caps in WIKILINK.captures_iter(line) {
            let Some(raw) = caps.get(1) else {
                continue;
            };

            occurrences.push(WikilinkOccurrence {
                raw_target: raw.as_str().trim().to_string(),
                target: normalize_wikilink_target(raw.as_str()),
                line_number: idx + 1,
                context: line.trim().to_string(),
            });
        }
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_wikilink() {
        let links = extract_links("Link to [[Note]]");
        assert_eq!(links.wikilinks, vec!["Note"]);
        assert_eq!(links.all_links, vec!["Note"]);
    }

    #[test]
    fn test_wikilink_alias_and_anchor() {
        let links = extract_links("[[Note#Section|Shown]] and [[Other#^block]]");
        assert_eq!(links.wikilinks, vec!["Note", "Other"]);
    }

    #[test]
    fn test_same_note_anchor_yields_nothing() {
        let links = extract_links("Jump to [[#Heading]]");
        assert!(links.wikilinks.is_empty());
        assert!(links.is_empty());
    }

    #[test]
    fn test_embed_is_also_a_wikilink() {
        let links = extract_links("![[B]]");
        assert_eq!(links.wikilinks, vec!["B"]);
        assert_eq!(links.embeds, vec!["B"]);
        assert_eq!(links.all_links, vec!["B"]);
    }

    #[test]
    fn test_embed_and_wikilink_same_target() {
        let links = extract_links("![[Diagram]] then [[Diagram]]");
        assert_eq!(links.embeds, vec!["Diagram"]);
        assert_eq!(links.wikilinks, vec!["Diagram", "Diagram"]);
        assert_eq!(links.all_links, vec!["Diagram"]);
    }

    #[test]
    fn test_embed_with_alias() {
        let links = extract_links("![[image.png|300]]");
        assert_eq!(links.embeds, vec!["image.png"]);
        assert_eq!(links.wikilinks, vec!["image.png"]);
    }

    #[test]
    fn test_markdown_links() {
        let content = "[a](notes/A.md) [b](B.md#part) [web](https://example.com) [top](#top)";
        let links = extract_links(content);
        assert_eq!(links.markdown_links, vec!["notes/A", "B"]);
    }

    #[test]
    fn test_markdown_image_skipped() {
        let links = extract_links("![chart](chart.png) and [doc](doc.md)");
        assert_eq!(links.markdown_links, vec!["doc"]);
    }

    #[test]
    fn test_all_links_order_and_dedup() {
        let content = "[[B]] [[A]] [x](A.md) [y](C.md) ![[B]] ![[D]]";
        let links = extract_links(content);
        assert_eq!(links.wikilinks, vec!["B", "A", "B", "D"]);
        assert_eq!(links.all_links, vec!["B", "A", "D", "C"]);
        assert_eq!(links.counts().total(), 8);
    }

    #[test]
    fn test_code_fence_not_excluded() {
        let content = "```\n[[InFence]]\n```\n";
        let links = extract_links(content);
        assert_eq!(links.wikilinks, vec!["InFence"]);
    }

    #[test]
    fn test_mixed_note_snapshot() {
        let content = "[[Roadmap|the roadmap]] and [spec](docs/Spec.md)\n![[arch.png]] [[Team#Q3]]";
        let links = extract_links(content);
        let summary = format!(
            "wikilinks: {:?}\nmarkdown: {:?}\nembeds: {:?}\nall: {:?}",
            links.wikilinks, links.markdown_links, links.embeds, links.all_links
        );
        insta::assert_snapshot!(summary, @r#"
        wikilinks: ["Roadmap", "arch.png", "Team"]
        markdown: ["docs/Spec"]
        embeds: ["arch.png"]
        all: ["Roadmap", "arch.png", "Team", "docs/Spec"]
        "#);
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(extract_links(""), ExtractedLinks::default());
    }

    #[test]
    fn test_wikilink_occurrences() {
        let content = "intro\nsee [[Target#Part|t]] here\n![[Target]]\n  [[#Local]]";
        let found = wikilink_occurrences(content);
        assert_eq!(found.len(), 3);

        assert_eq!(found[0].raw_target, "Target#Part");
        assert_eq!(found[0].target.as_deref(), Some("Target"));
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[0].context, "see [[Target#Part|t]] here");

        assert_eq!(found[1].target.as_deref(), Some("Target"));
        assert_eq!(found[1].line_number, 3);
        assert_eq!(found[1].context, "![[Target]]");

        assert_eq!(found[2].target, None);
        assert_eq!(found[2].line_number, 4);
    }
}
