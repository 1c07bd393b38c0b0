//! # Vault Access
//!
//! Vault walking, note resolution, file I/O, and whole-vault link analysis.
//!
//! This crate provides:
//! - Markdown enumeration with directory exclusions ([`VaultScanner`])
//! - Note resolution by stem or relative path, first match in path order
//! - Link graph construction and the analytics built on it
//! - Line-level backlinks and broken wikilink reports
//! - Configured file reads and atomic writes ([`VaultManager`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultgraph_vault::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let orphans = find_orphans("/path/to/vault")?;
//! let hubs = find_hubs("/path/to/vault", 5)?;
//! let around = get_neighborhood("/path/to/vault", "Projects", 2)?;
//! println!("{} orphans, {} hubs, {} neighbors", orphans.len(), hubs.len(), around.connections.len());
//! # Ok(())
//! # }
//! ```
//!
//! Every call re-reads the vault. Nothing is cached between calls.

pub mod backlinks;
pub mod manager;
pub mod scanner;

use std::path::Path;

pub use backlinks::BrokenWikilink;
pub use manager::VaultManager;
pub use scanner::{VaultScanner, VaultSnapshot};
pub use vaultgraph_parser::extract_links;

use vaultgraph_core::prelude::*;
use vaultgraph_graph::{HealthReport, HubNote, LinkGraph, Neighborhood};

/// Canonical relative path of a note reference, if any file matches
pub fn resolve_note(vault_root: impl AsRef<Path>, reference: &str) -> Option<String> {
    VaultScanner::new(vault_root.as_ref()).resolve_note(reference)
}

/// Link graph of every readable markdown file under `vault_root`
pub fn build_link_graph(vault_root: impl AsRef<Path>) -> Result<LinkGraph> {
    VaultScanner::new(vault_root.as_ref()).build_link_graph()
}

/// Notes with neither inlinks nor outlinks
pub fn find_orphans(vault_root: impl AsRef<Path>) -> Result<Vec<String>> {
    VaultScanner::new(vault_root.as_ref()).find_orphans()
}

/// Notes with at least `min_outlinks` distinct outlinks
pub fn find_hubs(vault_root: impl AsRef<Path>, min_outlinks: usize) -> Result<Vec<HubNote>> {
    VaultScanner::new(vault_root.as_ref()).find_hubs(min_outlinks)
}

pub fn analyze_health(vault_root: impl AsRef<Path>) -> Result<HealthReport> {
    VaultScanner::new(vault_root.as_ref()).analyze_health()
}

pub fn get_neighborhood(
    vault_root: impl AsRef<Path>,
    reference: &str,
    depth: usize,
) -> Result<Neighborhood> {
    VaultScanner::new(vault_root.as_ref()).get_neighborhood(reference, depth)
}

pub fn find_backlinks(vault_root: impl AsRef<Path>, note: &str) -> Result<Vec<Backlink>> {
    VaultScanner::new(vault_root.as_ref()).find_backlinks(note)
}

pub fn find_broken_wikilinks(vault_root: impl AsRef<Path>) -> Result<Vec<BrokenWikilink>> {
    VaultScanner::new(vault_root.as_ref()).find_broken_wikilinks()
}

pub mod prelude {
    pub use crate::backlinks::BrokenWikilink;
    pub use crate::manager::VaultManager;
    pub use crate::scanner::{VaultScanner, VaultSnapshot};
    pub use crate::{
        analyze_health, build_link_graph, extract_links, find_backlinks, find_broken_wikilinks,
        find_hubs, find_orphans, get_neighborhood, resolve_note,
    };
    pub use vaultgraph_core::prelude::*;
    pub use vaultgraph_graph::{HealthReport, HubNote, LinkGraph, Neighborhood};
}
