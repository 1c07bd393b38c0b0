//! Vault walking and whole-vault link analysis.
//!
//! Every analysis re-walks the vault: there is no cache between calls. Files
//! are visited in lexicographic order of their vault-relative path, so note
//! resolution and hub tie-breaking are the same on every platform.

use std::path::{Path, PathBuf};
use vaultgraph_core::prelude::*;
use vaultgraph_core::{DEFAULT_EXCLUDED_DIRS, matches_note_reference, to_posix_relative};
use vaultgraph_graph::{
    HealthAnalyzer, HealthReport, HubNote, LinkGraph, Neighborhood, NoteIndex, NoteResolver,
};
use walkdir::{DirEntry, WalkDir};

/// Readable documents plus the resolution index over every markdown file
#[derive(Debug, Clone, Default)]
pub struct VaultSnapshot {
    pub documents: Vec<Document>,
    pub index: NoteIndex,
}

impl VaultSnapshot {
    /// Build the link graph for this snapshot
    pub fn link_graph(&self) -> LinkGraph {
        LinkGraph::from_documents(&self.documents, &self.index)
    }
}

/// Walks one vault directory
#[derive(Debug, Clone)]
pub struct VaultScanner {
    root: PathBuf,
    excluded_dirs: Vec<String>,
    extension: String,
    max_file_size: u64,
}

impl VaultScanner {
    /// Scanner with the default exclusions (`.obsidian`, `.git`, ...)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = ServerConfig::default();
        Self {
            root: root.into(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            extension: defaults.markdown_extension,
            max_file_size: defaults.max_file_size,
        }
    }

    /// Scanner honoring server settings and per-vault overrides
    pub fn from_config(config: &ServerConfig, vault: &VaultConfig) -> Self {
        Self {
            root: vault.path.clone(),
            excluded_dirs: config.excluded_dirs_for(vault),
            extension: config.markdown_extension.clone(),
            max_file_size: config.max_file_size_for(vault),
        }
    }

    /// Replace the excluded directory names
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Files larger than this are treated as unreadable
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
    }

    fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// Vault-relative paths of every markdown file, in canonical order
    pub fn markdown_files(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(Error::invalid_path(format!(
                "Vault path is not a directory: {}",
                self.root.display()
            )));
        }

        let mut files: Vec<String> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable vault entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_markdown(entry.path()))
            .filter_map(|entry| to_posix_relative(&self.root, entry.path()))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Read one vault-relative file, `None` when it cannot be read as UTF-8
    fn read_document(&self, relative_path: &str) -> Option<Document> {
        let full_path = self.root.join(relative_path);

        match std::fs::metadata(&full_path) {
            Ok(meta) if meta.len() > self.max_file_size => {
                log::warn!(
                    "Skipping {}: {} bytes exceeds limit of {}",
                    relative_path,
                    meta.len(),
                    self.max_file_size
                );
                return None;
            }
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", relative_path, e);
                return None;
            }
            Ok(_) => {}
        }

        match std::fs::read_to_string(&full_path) {
            Ok(content) => Some(Document::new(relative_path, content)),
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", relative_path, e);
                None
            }
        }
    }

    /// Enumerate and read the vault once
    pub fn snapshot(&self) -> Result<VaultSnapshot> {
        let files = self.markdown_files()?;
        let index = NoteIndex::from_paths(files.iter().map(String::as_str));

        let documents: Vec<Document> = files
            .iter()
            .filter_map(|path| {
                log::debug!("Reading {}", path);
                self.read_document(path)
            })
            .collect();

        log::info!(
            "Scanned {}: {} markdown files, {} readable",
            self.root.display(),
            files.len(),
            documents.len()
        );

        Ok(VaultSnapshot { documents, index })
    }

    /// First markdown file in canonical order whose stem or extensionless
    /// relative path equals the reference (one trailing `.md` ignored).
    pub fn resolve_note(&self, reference: &str) -> Option<String> {
        let files = match self.markdown_files() {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot resolve '{}': {}", reference, e);
                return None;
            }
        };
        files
            .into_iter()
            .find(|path| matches_note_reference(path, reference))
    }

    /// Build the link graph
    pub fn build_link_graph(&self) -> Result<LinkGraph> {
        Ok(self.snapshot()?.link_graph())
    }

    /// Notes with no inlinks and no outlinks
    pub fn find_orphans(&self) -> Result<Vec<String>> {
        Ok(self.build_link_graph()?.orphaned_notes())
    }

    /// Notes with at least `min_outlinks` outlinks, most-linking first
    pub fn find_hubs(&self, min_outlinks: usize) -> Result<Vec<HubNote>> {
        Ok(self.build_link_graph()?.hub_notes(min_outlinks))
    }

    /// Aggregate link metrics with an independent broken-link scan
    pub fn analyze_health(&self) -> Result<HealthReport> {
        let snapshot = self.snapshot()?;
        let graph = snapshot.link_graph();
        Ok(HealthAnalyzer::new(&graph, &snapshot.documents, &snapshot.index).analyze())
    }

    /// Outlink neighborhood of a note up to `depth` hops
    pub fn get_neighborhood(&self, reference: &str, depth: usize) -> Result<Neighborhood> {
        let snapshot = self.snapshot()?;
        let note = snapshot
            .index
            .resolve(reference)
            .ok_or_else(|| Error::not_found(format!("Note not found: {}", reference)))?;

        Ok(snapshot.link_graph().neighborhood(note, depth))
    }

    /// Groups of notes linking to each other in a loop
    pub fn find_cycles(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.build_link_graph()?.cycles())
    }
}

impl NoteResolver for VaultScanner {
    fn resolve_note(&self, reference: &str) -> Option<String> {
        VaultScanner::resolve_note(self, reference)
    }
}
