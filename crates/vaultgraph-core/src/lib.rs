//! # VaultGraph Core
//!
//! Core data models, error types, and configuration shared by every VaultGraph crate.
//!
//! ## Core Modules
//!
//! - [`models`] - Link records, graph nodes, and the Kanban board tree
//! - [`error`] - Error enum and the [`Result`] alias
//! - [`config`] - Server and vault configuration
//! - [`profiles`] - Preset configurations for common deployments
//! - [`utils`] - Note-path helpers used by the resolver and graph builder
//!
//! ## Usage Examples
//!
//! ```
//! use vaultgraph_core::prelude::*;
//!
//! let card = KanbanCard::new("Write release notes", CardStatus::Incomplete);
//! assert!(card.is_ok());
//!
//! let err = Error::not_found("Missing.md");
//! assert!(err.to_string().contains("Missing.md"));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;
pub use utils::{
    expand_vault_path, matches_note_reference, note_stem, round_to, strip_md_extension,
    to_posix_relative,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ServerConfig, VaultConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Backlink, CardLocation, CardStatus, Document, ExtractedLinks, GraphNode, KanbanBoard,
        KanbanCard, KanbanColumn, LinkTypeCounts,
    };
    pub use crate::profiles::ConfigProfile;
}
