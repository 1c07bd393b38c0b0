//! # VaultGraph Parser
//!
//! Regex-based extraction of the Obsidian syntax the link graph and the
//! Kanban engine care about:
//!
//! - Wikilinks `[[Note]]`, `[[Note|alias]]`, `[[Note#Heading]]`
//! - Relative markdown links `[text](note.md)`
//! - Embeds `![[Note]]`
//! - Card metadata: `@{YYYY-MM-DD}` due dates, `#tags`, inline wikilinks
//! - Leading `---` frontmatter blocks
//!
//! ## Quick Start
//!
//! ```
//! use vaultgraph_parser::extract_links;
//!
//! let links = extract_links("See [[Projects#Q3|plans]] and [notes](daily/today.md).");
//! assert_eq!(links.wikilinks, vec!["Projects"]);
//! assert_eq!(links.markdown_links, vec!["daily/today"]);
//! assert_eq!(links.all_links.len(), 2);
//! ```
//!
//! Fenced code blocks are not special: a link inside a fence is extracted
//! like any other.

pub mod card_metadata;
pub mod frontmatter;
pub mod link_utils;
pub mod links;
mod patterns;

pub use card_metadata::{CardMetadata, parse_card_metadata};
pub use frontmatter::{Frontmatter, split_frontmatter};
pub use links::{WikilinkOccurrence, extract_links, wikilink_occurrences};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::card_metadata::{CardMetadata, parse_card_metadata};
    pub use crate::frontmatter::{Frontmatter, split_frontmatter};
    pub use crate::links::{WikilinkOccurrence, extract_links, wikilink_occurrences};
    pub use vaultgraph_core::prelude::*;
}
