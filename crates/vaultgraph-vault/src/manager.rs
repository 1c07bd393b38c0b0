//! Vault manager: configured access to one vault's files and link analytics

use crate::backlinks::BrokenWikilink;
use crate::scanner::VaultScanner;
use std::path::{Component, Path, PathBuf};
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_graph::{HealthReport, HubNote, LinkGraph, Neighborhood};

/// Main vault manager
///
/// Holds no cached state: every analysis walks the vault again, and every
/// write goes straight to disk.
#[derive(Debug, Clone)]
pub struct VaultManager {
    config: ServerConfig,
    vault: VaultConfig,
    vault_path: PathBuf,
    scanner: VaultScanner,
}

impl VaultManager {
    /// Create a manager for the configured default vault
    pub fn new(config: ServerConfig) -> Result<Self> {
        let vault = config.default_vault()?.clone();
        let vault_path = vault.path.clone();
        let scanner = VaultScanner::from_config(&config, &vault);

        Ok(Self {
            config,
            vault,
            vault_path,
            scanner,
        })
    }

    /// Manager for an ad-hoc vault directory, sharing this manager's settings.
    /// The vault is named after its directory.
    pub fn for_path(&self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.vault.name)
            .to_string();
        let vault = VaultConfig::builder(name, path)
            .read_only(self.is_read_only())
            .build()?;
        let mut config = self.config.clone();
        config.vaults = vec![vault];
        Self::new(config)
    }

    /// Get vault path
    pub fn vault_path(&self) -> &PathBuf {
        &self.vault_path
    }

    /// Get vault name
    pub fn vault_name(&self) -> &str {
        &self.vault.name
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn scanner(&self) -> &VaultScanner {
        &self.scanner
    }

    /// Whether writes are refused for this vault
    pub fn is_read_only(&self) -> bool {
        self.config.is_read_only(&self.vault)
    }

    /// Read a vault file
    #[instrument(skip(self), fields(file = ?path), name = "vault_read_file")]
    pub async fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve_path(path)?;

        let metadata = tokio::fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(&full_path)
            } else {
                Error::io(e)
            }
        })?;

        let max = self.config.max_file_size_for(&self.vault);
        if metadata.len() > max {
            return Err(Error::file_too_large(&full_path, metadata.len(), max));
        }

        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(Error::io)
    }

    /// Write a vault file, atomically unless disabled in config
    #[instrument(skip(self, content), fields(file = ?path, size = content.len()), name = "vault_write_file")]
    pub async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.is_read_only() {
            return Err(Error::config_error(format!(
                "Vault '{}' is read-only",
                self.vault.name
            )));
        }

        let full_path = self.resolve_path(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        if !self.config.atomic_writes {
            return tokio::fs::write(&full_path, content)
                .await
                .map_err(Error::io);
        }

        let temp_path = full_path.with_extension("tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(Error::io)?;

        if let Err(e) = tokio::fs::rename(&temp_path, &full_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::io(e));
        }

        log::debug!("Wrote {} bytes to {}", content.len(), full_path.display());
        Ok(())
    }

    /// Resolve a path to an absolute path inside the vault
    pub fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_path("Path cannot be empty"));
        }

        if path.is_absolute() {
            return self.check_inside_vault(path);
        }

        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(Error::path_traversal(path));
        }

        self.check_inside_vault(&self.vault_path.join(path))
    }

    fn check_inside_vault(&self, full_path: &Path) -> Result<PathBuf> {
        if full_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(Error::path_traversal(full_path));
        }

        let canonical_vault = self
            .vault_path
            .canonicalize()
            .unwrap_or_else(|_| self.vault_path.clone());

        // Symlinks may point outside the vault
        if let Ok(canonical) = full_path.canonicalize() {
            if !canonical.starts_with(&canonical_vault) && !canonical.starts_with(&self.vault_path)
            {
                return Err(Error::path_traversal(full_path));
            }
            return Ok(full_path.to_path_buf());
        }

        if full_path.starts_with(&self.vault_path) || full_path.starts_with(&canonical_vault) {
            Ok(full_path.to_path_buf())
        } else {
            Err(Error::path_traversal(full_path))
        }
    }

    /// Canonical path of a note reference
    #[instrument(skip(self), name = "vault_resolve_note")]
    pub fn resolve_note(&self, reference: &str) -> Option<String> {
        self.scanner.resolve_note(reference)
    }

    /// Vault-relative paths of every markdown file
    #[instrument(skip(self), name = "vault_scan")]
    pub fn scan_vault(&self) -> Result<Vec<String>> {
        self.scanner.markdown_files()
    }

    /// Build the link graph from the current vault contents
    #[instrument(skip(self), name = "vault_link_graph")]
    pub fn link_graph(&self) -> Result<LinkGraph> {
        self.scanner.build_link_graph()
    }

    #[instrument(skip(self), name = "vault_orphans")]
    pub fn orphaned_notes(&self) -> Result<Vec<String>> {
        self.scanner.find_orphans()
    }

    #[instrument(skip(self), name = "vault_hubs")]
    pub fn hub_notes(&self, min_outlinks: usize) -> Result<Vec<HubNote>> {
        self.scanner.find_hubs(min_outlinks)
    }

    #[instrument(skip(self), name = "vault_health")]
    pub fn health_report(&self) -> Result<HealthReport> {
        self.scanner.analyze_health()
    }

    #[instrument(skip(self), name = "vault_neighborhood")]
    pub fn neighborhood(&self, reference: &str, depth: usize) -> Result<Neighborhood> {
        self.scanner.get_neighborhood(reference, depth)
    }

    #[instrument(skip(self), name = "vault_backlinks")]
    pub fn backlinks(&self, note: &str) -> Result<Vec<Backlink>> {
        self.scanner.find_backlinks(note)
    }

    #[instrument(skip(self), name = "vault_broken_wikilinks")]
    pub fn broken_wikilinks(&self) -> Result<Vec<BrokenWikilink>> {
        self.scanner.find_broken_wikilinks()
    }

    #[instrument(skip(self), name = "vault_cycles")]
    pub fn cycles(&self) -> Result<Vec<Vec<String>>> {
        self.scanner.find_cycles()
    }
}
