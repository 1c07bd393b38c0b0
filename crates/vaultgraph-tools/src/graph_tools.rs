//! Link graph operations and analytics tools

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_graph::{GraphStats, HealthReport, Neighborhood};
use vaultgraph_vault::{BrokenWikilink, VaultManager};

/// Graph tools context
pub struct GraphTools {
    pub manager: Arc<VaultManager>,
}

/// Whole graph for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGraphInfo {
    pub total_notes: usize,
    pub stats: GraphStats,
    pub graph: BTreeMap<String, GraphNode>,
}

/// A note with no connections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanInfo {
    pub file_path: String,
    pub inlink_count: usize,
    pub outlink_count: usize,
}

/// A note at or above the hub threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubInfo {
    pub file_path: String,
    pub outlink_count: usize,
    pub inlink_count: usize,
    pub outlinks: Vec<String>,
}

impl GraphTools {
    /// Create new graph tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Run a whole-vault scan off the async runtime
    async fn scan<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&VaultManager) -> Result<T> + Send + 'static,
    {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || op(&manager))
            .await
            .map_err(|e| Error::other(format!("Vault scan task failed: {}", e)))?
    }

    /// Complete link graph with every node's links
    pub async fn get_link_graph(&self) -> Result<LinkGraphInfo> {
        let graph = self.scan(|m| m.link_graph()).await?;
        Ok(LinkGraphInfo {
            total_notes: graph.node_count(),
            stats: graph.stats(),
            graph: graph.as_map().clone(),
        })
    }

    /// Notes with neither inlinks nor outlinks
    pub async fn find_orphaned_notes(&self) -> Result<Vec<OrphanInfo>> {
        let orphans = self.scan(|m| m.orphaned_notes()).await?;
        Ok(orphans
            .into_iter()
            .map(|file_path| OrphanInfo {
                file_path,
                inlink_count: 0,
                outlink_count: 0,
            })
            .collect())
    }

    /// Notes with at least `min_outlinks` outlinks (configured default when `None`)
    #[instrument(skip(self), name = "graph_find_hubs")]
    pub async fn find_hub_notes(&self, min_outlinks: Option<usize>) -> Result<Vec<HubInfo>> {
        let min_outlinks = min_outlinks.unwrap_or(self.manager.config().default_hub_threshold);
        let hubs = self.scan(move |m| m.hub_notes(min_outlinks)).await?;
        Ok(hubs
            .into_iter()
            .map(|hub| HubInfo {
                file_path: hub.path,
                outlink_count: hub.outlink_count,
                inlink_count: hub.inlink_count,
                outlinks: hub.outlinks,
            })
            .collect())
    }

    /// Vault-wide link health metrics
    pub async fn analyze_link_health(&self) -> Result<HealthReport> {
        self.scan(|m| m.health_report()).await
    }

    /// Outlink neighborhood of a note (configured default depth when `None`)
    #[instrument(skip(self), name = "graph_note_connections")]
    pub async fn get_note_connections(
        &self,
        note: &str,
        depth: Option<usize>,
    ) -> Result<Neighborhood> {
        let depth = depth.unwrap_or(self.manager.config().default_neighborhood_depth);
        let note = note.to_string();
        self.scan(move |m| m.neighborhood(&note, depth)).await
    }

    /// Line-level wikilinks pointing at a note
    #[instrument(skip(self), name = "graph_backlinks")]
    pub async fn get_backlinks(&self, note: &str) -> Result<Vec<Backlink>> {
        let note = note.to_string();
        self.scan(move |m| m.backlinks(&note)).await
    }

    /// Wikilinks whose targets match no note
    pub async fn get_broken_links(&self) -> Result<Vec<BrokenWikilink>> {
        self.scan(|m| m.broken_wikilinks()).await
    }

    /// Groups of notes that link to each other in a loop
    pub async fn detect_cycles(&self) -> Result<Vec<Vec<String>>> {
        self.scan(|m| m.cycles()).await
    }
}
