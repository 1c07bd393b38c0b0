//! Configuration types for the VaultGraph server.
//!
//! Follows a builder pattern for vault configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directory names never traversed during a vault walk
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".obsidian", ".git", ".trash", "node_modules"];

/// Configuration for a single vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Unique identifier for this vault
    pub name: String,
    /// Path to the vault directory
    pub path: PathBuf,
    /// Whether this is the default vault
    #[serde(default)]
    pub is_default: bool,

    // Optional overrides
    #[serde(default)]
    pub excluded_dirs: Option<Vec<String>>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub read_only: Option<bool>,
}

impl VaultConfig {
    /// Create a new vault config with builder
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> VaultConfigBuilder {
        VaultConfigBuilder::new(name, path)
    }

    /// Validate the vault configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config_error("Vault name cannot be empty"));
        }

        if !self.path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.path.display()
            )));
        }

        if !self.path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    name: String,
    path: PathBuf,
    is_default: bool,
    excluded_dirs: Option<Vec<String>>,
    max_file_size: Option<u64>,
    read_only: Option<bool>,
}

impl VaultConfigBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_default: false,
            excluded_dirs: None,
            max_file_size: None,
            read_only: None,
        }
    }

    /// Mark as default vault
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Override the excluded directory names for this vault
    pub fn excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Override the maximum readable file size
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Refuse Kanban writes for this vault
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<VaultConfig> {
        let config = VaultConfig {
            name: self.name,
            path: self.path,
            is_default: self.is_default,
            excluded_dirs: self.excluded_dirs,
            max_file_size: self.max_file_size,
            read_only: self.read_only,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Global server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// List of configured vaults
    pub vaults: Vec<VaultConfig>,
    /// Configuration profile name
    pub profile: String,

    // Walk settings
    pub markdown_extension: String,
    pub excluded_dirs: Vec<String>,
    pub max_file_size: u64,

    // Analysis defaults
    pub default_hub_threshold: usize,
    pub default_neighborhood_depth: usize,

    // Write settings
    pub read_only: bool,
    pub atomic_writes: bool,

    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            vaults: vec![],
            profile: "default".to_string(),
            markdown_extension: "md".to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            default_hub_threshold: 5,
            default_neighborhood_depth: 1,
            read_only: false,
            atomic_writes: true,
            log_level: "INFO".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.vaults.is_empty() {
            return Err(Error::config_error("At least one vault must be configured"));
        }

        let names: HashSet<_> = self.vaults.iter().map(|v| &v.name).collect();
        if names.len() != self.vaults.len() {
            return Err(Error::config_error("Vault names must be unique"));
        }

        let defaults = self.vaults.iter().filter(|v| v.is_default).count();
        if defaults > 1 {
            return Err(Error::config_error("Only one vault can be default"));
        }

        if self.markdown_extension.is_empty() || self.markdown_extension.starts_with('.') {
            return Err(Error::config_error(
                "Markdown extension must be non-empty and given without a leading dot",
            ));
        }

        for vault in &self.vaults {
            vault.validate()?;
        }

        Ok(())
    }

    /// Get default vault config
    pub fn default_vault(&self) -> Result<&VaultConfig> {
        self.vaults
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.vaults.first())
            .ok_or_else(|| Error::config_error("No default vault configured"))
    }

    /// Excluded directory names in effect for a vault
    pub fn excluded_dirs_for(&self, vault: &VaultConfig) -> Vec<String> {
        vault
            .excluded_dirs
            .clone()
            .unwrap_or_else(|| self.excluded_dirs.clone())
    }

    /// Maximum readable file size in effect for a vault
    pub fn max_file_size_for(&self, vault: &VaultConfig) -> u64 {
        vault.max_file_size.unwrap_or(self.max_file_size)
    }

    /// Whether writes are refused for a vault
    pub fn is_read_only(&self, vault: &VaultConfig) -> bool {
        vault.read_only.unwrap_or(self.read_only)
    }

    /// Parse a full server configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config_error(format!("Invalid server configuration: {}", e)))
    }

    /// Load a full server configuration from a YAML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vault_config_builder() {
        let temp = TempDir::new().unwrap();
        let vault = VaultConfig::builder("main", temp.path())
            .as_default()
            .excluded_dirs([".obsidian", "archive"])
            .build();

        assert!(vault.is_ok());
        let v = vault.unwrap();
        assert_eq!(v.name, "main");
        assert!(v.is_default);
        assert_eq!(
            v.excluded_dirs,
            Some(vec![".obsidian".to_string(), "archive".to_string()])
        );
    }

    #[test]
    fn test_vault_config_rejects_missing_dir() {
        let vault = VaultConfig::builder("ghost", "/definitely/not/a/vault").build();
        assert!(vault.is_err());
    }

    #[test]
    fn test_server_config_validation() {
        let mut config = ServerConfig::new();
        config.vaults.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_config_rejects_dotted_extension() {
        let temp = TempDir::new().unwrap();
        let mut config = ServerConfig::new();
        config.vaults.push(VaultConfig::builder("v", temp.path()).build().unwrap());
        config.markdown_extension = ".md".to_string();
        assert!(config.validate().is_err());

        config.markdown_extension = "md".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.default_hub_threshold, 5);
        assert_eq!(config.default_neighborhood_depth, 1);
        assert!(config.excluded_dirs.contains(&".obsidian".to_string()));
    }

    #[test]
    fn test_vault_overrides() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::new();
        let vault = VaultConfig::builder("v", temp.path())
            .excluded_dirs(["drafts"])
            .read_only(true)
            .build()
            .unwrap();

        assert_eq!(config.excluded_dirs_for(&vault), vec!["drafts".to_string()]);
        assert!(config.is_read_only(&vault));
        assert_eq!(config.max_file_size_for(&vault), config.max_file_size);
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = "default_hub_threshold: 3\nread_only: true\n";
        let config = ServerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.default_hub_threshold, 3);
        assert!(config.read_only);
        assert_eq!(config.markdown_extension, "md");
    }
}
