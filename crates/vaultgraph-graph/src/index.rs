//! Note resolution: loose references to canonical vault-relative paths.

use std::collections::HashMap;
use vaultgraph_core::{note_stem, strip_md_extension};

/// Maps a loose note reference (`Note`, `Note.md`, `folder/Note`) to the
/// canonical relative path of one markdown file.
pub trait NoteResolver {
    /// Canonical path of the matching note, `None` when nothing matches
    fn resolve_note(&self, reference: &str) -> Option<String>;
}

/// Prebuilt resolution table keyed by stem and relative path (with and
/// without `.md`).
///
/// When two files share a key, the one inserted first keeps it. Inserting in
/// lexicographic path order therefore reproduces a sorted vault walk.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    keys: HashMap<String, String>,
    paths: Vec<String>,
}

impl NoteIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from relative paths, sorting them into canonical order first
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted: Vec<&str> = paths.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut index = Self::new();
        for path in sorted {
            index.insert(path);
        }
        index
    }

    /// Register a note; keys already taken by an earlier note are kept
    pub fn insert(&mut self, relative_path: &str) {
        let keys = [
            note_stem(relative_path),
            relative_path,
            strip_md_extension(relative_path),
        ];
        for key in keys {
            self.keys
                .entry(key.to_string())
                .or_insert_with(|| relative_path.to_string());
        }
        self.paths.push(relative_path.to_string());
    }

    /// Look up a reference as given, then with one trailing `.md` removed
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.keys
            .get(reference)
            .or_else(|| self.keys.get(strip_md_extension(reference)))
            .map(String::as_str)
    }

    /// Every indexed path, in insertion order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl NoteResolver for NoteIndex {
    fn resolve_note(&self, reference: &str) -> Option<String> {
        self.resolve(reference).map(str::to_string)
    }
}
