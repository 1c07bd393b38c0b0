//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: Verbose logging, writes enabled
//! - Production: Quiet logging, atomic writes
//! - ReadOnly: Graph analysis only, Kanban mutations refused
//! - Minimal: Errors only, tight file size limit

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: Verbose logging, all operations
    Development,
    /// Production: Reliable writes, informational logging
    Production,
    /// ReadOnly: Analysis only, no write operations
    ReadOnly,
    /// Minimal: Bare essentials only
    Minimal,
}

impl ConfigProfile {
    /// Create a ServerConfig from this profile
    pub fn create_config(self) -> ServerConfig {
        let mut config = ServerConfig::new();
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
                config.max_file_size = 50 * 1024 * 1024; // 50MB
                config.read_only = false;
            }

            Self::Production => {
                config.log_level = "INFO".to_string();
                config.max_file_size = 10 * 1024 * 1024; // 10MB
                config.read_only = false;
                config.atomic_writes = true;
            }

            Self::ReadOnly => {
                config.log_level = "WARN".to_string();
                config.read_only = true;
                config.atomic_writes = false;
            }

            Self::Minimal => {
                config.log_level = "ERROR".to_string();
                config.max_file_size = 1024 * 1024; // 1MB
            }
        }

        config
    }

    /// Get profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::ReadOnly => "read-only",
            Self::Minimal => "minimal",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Verbose logging, all operations enabled",
            Self::Production => "Optimized for reliability",
            Self::ReadOnly => "Graph analysis only, no board mutations",
            Self::Minimal => "Bare essentials only",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "read-only" | "readonly" => Ok(Self::ReadOnly),
            "minimal" => Ok(Self::Minimal),
            other => Err(Error::config_error(format!("Unknown profile: {}", other))),
        }
    }
}

impl std::fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
