//! # Vault Tools
//!
//! Tool-layer services behind the MCP server. Each service wraps a shared
//! [`VaultManager`](vaultgraph_vault::VaultManager) and returns plain
//! serializable records.
//!
//! ### Graph Tools
//!
//! [`graph_tools::GraphTools`] - Link analysis:
//! - Full link graph dump
//! - Orphan and hub detection
//! - Link health metrics
//! - Note neighborhoods, backlinks, broken wikilinks, cycles
//!
//! Whole-vault scans run on the blocking thread pool.
//!
//! ### Kanban Tools
//!
//! [`kanban_tools::KanbanTools`] - Board files:
//! - Parse a board into columns and nested cards
//! - Add, move, and toggle cards, writing the board back atomically
//! - Completion statistics
//!
//! Edits are refused for read-only vaults. A failed write is reported through
//! the result's `success` flag rather than as an error.

pub mod graph_tools;
pub mod kanban_tools;

pub use graph_tools::{GraphTools, HubInfo, LinkGraphInfo, OrphanInfo};
pub use kanban_tools::{
    AddCardResult, BoardInfo, ColumnInfo, KanbanTools, MoveCardResult, ToggleCardResult,
};
pub use vaultgraph_kanban::{BoardStatistics, CardPosition, NewCard};
