//! # VaultGraph Server
//!
//! MCP server exposing vault link analysis and Kanban board editing, plus
//! the `vaultgraph` CLI that runs it.

pub mod tools;

pub use tools::{StandardResponse, VaultGraphMcpServer};
pub use vaultgraph_core::prelude::*;
pub use vaultgraph_tools::*;
