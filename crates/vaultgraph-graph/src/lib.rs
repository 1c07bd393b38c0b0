//! # Link Graph Analysis
//!
//! Directed graph of vault notes built from extracted links, plus the
//! read-only analytics computed over it.
//!
//! Provides:
//! - Note resolution via a prebuilt [`NoteIndex`]
//! - Graph construction with symmetric, deduplicated in/out edges
//! - Orphan and hub detection
//! - Health metrics with an independent broken-link scan
//! - Bounded-depth neighborhood exploration along outlinks
//! - Cycle detection (strongly connected components via `petgraph`)
//!
//! ## Quick Start
//!
//! ```
//! use vaultgraph_core::Document;
//! use vaultgraph_graph::{LinkGraph, NoteIndex};
//!
//! let docs = vec![
//!     Document::new("A.md", "Links to [[B]]"),
//!     Document::new("B.md", ""),
//! ];
//! let index = NoteIndex::from_paths(docs.iter().map(|d| d.path.as_str()));
//! let graph = LinkGraph::from_documents(&docs, &index);
//!
//! assert_eq!(graph.node("A.md").unwrap().outlinks, vec!["B.md"]);
//! assert_eq!(graph.node("B.md").unwrap().inlinks, vec!["A.md"]);
//! assert!(graph.orphaned_notes().is_empty());
//! ```
//!
//! ## Ordering
//!
//! Nodes iterate in lexicographic order of their vault-relative path. Hub
//! ties, orphan lists, and stem collisions in the index all follow that order.

pub mod graph;
pub mod health;
pub mod index;
pub mod neighborhood;

pub use graph::{GraphStats, HubNote, LinkGraph};
pub use health::{BrokenLink, HealthAnalyzer, HealthReport};
pub use index::{NoteIndex, NoteResolver};
pub use neighborhood::{Connection, Neighborhood};

pub mod prelude {
    pub use crate::graph::{GraphStats, HubNote, LinkGraph};
    pub use crate::health::{BrokenLink, HealthAnalyzer, HealthReport};
    pub use crate::index::{NoteIndex, NoteResolver};
    pub use crate::neighborhood::{Connection, Neighborhood};
    pub use vaultgraph_core::prelude::*;
}
