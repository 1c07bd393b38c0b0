//! Line-level wikilink reports: backlinks to a note and broken wikilinks.

use crate::scanner::VaultScanner;
use serde::{Deserialize, Serialize};
use vaultgraph_core::prelude::*;
use vaultgraph_core::{matches_note_reference, strip_md_extension};
use vaultgraph_parser::wikilink_occurrences;

/// A wikilink whose target matches no note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenWikilink {
    pub source_path: String,
    /// Bare target (anchor and alias stripped)
    pub link_target: String,
    pub line_number: usize,
    pub context: String,
}

impl VaultScanner {
    /// Every wikilink in other notes that points at `note`.
    ///
    /// A link matches when its bare target equals the reference or resolves
    /// to the same file. The note's own file is not scanned.
    pub fn find_backlinks(&self, note: &str) -> Result<Vec<Backlink>> {
        let bare = strip_md_extension(note.trim());
        if bare.is_empty() {
            return Err(Error::validation_error("Note name cannot be empty"));
        }

        let snapshot = self.snapshot()?;
        let target_path = snapshot.index.resolve(note);

        let mut backlinks = Vec::new();
        for doc in &snapshot.documents {
            if Some(doc.path.as_str()) == target_path || matches_note_reference(&doc.path, note) {
                continue;
            }

            for occurrence in wikilink_occurrences(&doc.content) {
                let Some(target) = occurrence.target.as_deref() else {
                    continue;
                };
                let points_here = target == bare
                    || (target_path.is_some() && snapshot.index.resolve(target) == target_path);
                if points_here {
                    backlinks.push(Backlink {
                        source_path: doc.path.clone(),
                        link_target: occurrence.raw_target,
                        line_number: occurrence.line_number,
                        context: occurrence.context,
                    });
                }
            }
        }

        log::debug!("Found {} backlinks to {}", backlinks.len(), note);
        Ok(backlinks)
    }

    /// Every wikilink, with its line, whose target resolves to no readable note
    pub fn find_broken_wikilinks(&self) -> Result<Vec<BrokenWikilink>> {
        let snapshot = self.snapshot()?;
        let readable: std::collections::HashSet<&str> =
            snapshot.documents.iter().map(|d| d.path.as_str()).collect();

        let mut broken = Vec::new();
        for doc in &snapshot.documents {
            for occurrence in wikilink_occurrences(&doc.content) {
                let Some(target) = occurrence.target else {
                    continue;
                };
                let resolved = snapshot
                    .index
                    .resolve(&target)
                    .filter(|path| readable.contains(path));
                if resolved.is_none() {
                    broken.push(BrokenWikilink {
                        source_path: doc.path.clone(),
                        link_target: target,
                        line_number: occurrence.line_number,
                        context: occurrence.context,
                    });
                }
            }
        }

        Ok(broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    #[test]
    fn test_backlinks_with_context() {
        let temp = vault(&[
            ("Target.md", "self [[Target]]"),
            ("a.md", "first line\nsee [[Target#Intro|intro]] here"),
            ("b.md", "[[Other]]"),
            ("nested/c.md", "[[nested/../Target]] [[Target.md]]"),
        ]);
        let backlinks = VaultScanner::new(temp.path()).find_backlinks("Target").unwrap();

        assert_eq!(backlinks.len(), 2);
        assert_eq!(backlinks[0].source_path, "a.md");
        assert_eq!(backlinks[0].link_target, "Target#Intro");
        assert_eq!(backlinks[0].line_number, 2);
        assert_eq!(backlinks[0].context, "see [[Target#Intro|intro]] here");
        assert_eq!(backlinks[1].source_path, "nested/c.md");
        assert_eq!(backlinks[1].link_target, "Target.md");
    }

    #[test]
    fn test_embed_counts_as_backlink() {
        let temp = vault(&[("B.md", ""), ("A.md", "![[B]]"), ("C.md", "![[Gone]]")]);
        let scanner = VaultScanner::new(temp.path());

        let backlinks = scanner.find_backlinks("B").unwrap();
        assert_eq!(backlinks.len(), 1);
        assert_eq!(backlinks[0].source_path, "A.md");
        assert_eq!(backlinks[0].context, "![[B]]");

        let broken = scanner.find_broken_wikilinks().unwrap();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].link_target, "Gone");
    }

    #[test]
    fn test_backlinks_by_folder_path() {
        let temp = vault(&[("notes/Plan.md", ""), ("index.md", "[[notes/Plan]]")]);
        let backlinks = VaultScanner::new(temp.path()).find_backlinks("Plan").unwrap();
        assert_eq!(backlinks.len(), 1);
        assert_eq!(backlinks[0].source_path, "index.md");
    }

    #[test]
    fn test_backlinks_empty_name_rejected() {
        let temp = vault(&[("a.md", "")]);
        assert!(VaultScanner::new(temp.path()).find_backlinks("  ").is_err());
    }

    #[test]
    fn test_broken_wikilinks() {
        let temp = vault(&[("a.md", "ok [[b]]\n\nmissing [[ghost#part]]"), ("b.md", "")]);
        let broken = VaultScanner::new(temp.path()).find_broken_wikilinks().unwrap();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].link_target, "ghost");
        assert_eq!(broken[0].line_number, 3);
        assert_eq!(broken[0].context, "missing [[ghost#part]]");
    }
}
