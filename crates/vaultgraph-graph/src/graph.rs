//! Link graph built from vault documents

use crate::index::NoteIndex;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use vaultgraph_core::{Document, GraphNode};
use vaultgraph_parser::extract_links;

/// Link graph for analyzing vault relationships
///
/// Keyed by vault-relative path. Every edge is stored twice: as an outlink on
/// the source and as an inlink on the target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkGraph {
    nodes: BTreeMap<String, GraphNode>,
}

/// A note whose outlink count reached the hub threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubNote {
    pub path: String,
    pub outlink_count: usize,
    pub inlink_count: usize,
    pub outlinks: Vec<String>,
}

/// Graph statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_files: usize,
    pub total_links: usize,
    pub orphaned_files: usize,
    pub average_links_per_file: f64,
}

impl LinkGraph {
    /// Create an empty link graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from readable documents.
    ///
    /// `index` may cover more files than `documents` (for example files that
    /// could not be read); links resolving to such files produce no edge.
    pub fn from_documents(documents: &[Document], index: &NoteIndex) -> Self {
        let mut graph = Self::new();

        for doc in documents {
            graph
                .nodes
                .entry(doc.path.clone())
                .or_insert_with(|| GraphNode::new(doc.path.clone()));
        }

        for doc in documents {
            graph.add_links(doc, index);
        }

        log::debug!(
            "Built link graph: {} notes, {} links",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn add_links(&mut self, doc: &Document, index: &NoteIndex) {
        let links = extract_links(&doc.content);

        if let Some(node) = self.nodes.get_mut(&doc.path) {
            node.link_type_counts = links.counts();
        }

        for target in &links.all_links {
            let Some(target_path) = index.resolve(target) else {
                continue;
            };
            if !self.nodes.contains_key(target_path) {
                continue;
            }
            self.add_edge(&doc.path, target_path);
        }
    }

    /// Record `source -> target` on both nodes. Both must already exist.
    fn add_edge(&mut self, source: &str, target: &str) {
        if let Some(node) = self.nodes.get_mut(source) {
            node.add_outlink(target);
        }
        if let Some(node) = self.nodes.get_mut(target) {
            node.add_inlink(source);
        }
    }

    /// Node for a canonical path
    pub fn node(&self, path: &str) -> Option<&GraphNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// All nodes in canonical order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// The underlying path-to-node map
    pub fn as_map(&self) -> &BTreeMap<String, GraphNode> {
        &self.nodes
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sum of outlinks over all nodes
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(GraphNode::outlink_count).sum()
    }

    /// Notes with neither inlinks nor outlinks
    pub fn orphaned_notes(&self) -> Vec<String> {
        self.nodes
            .values()
            .filter(|node| node.is_orphan())
            .map(|node| node.path.clone())
            .collect()
    }

    /// Notes with at least `min_outlinks` outlinks, most-linking first.
    ///
    /// Ties keep canonical path order.
    pub fn hub_notes(&self, min_outlinks: usize) -> Vec<HubNote> {
        let mut hubs: Vec<HubNote> = self
            .nodes
            .values()
            .filter(|node| node.outlink_count() >= min_outlinks)
            .map(|node| HubNote {
                path: node.path.clone(),
                outlink_count: node.outlink_count(),
                inlink_count: node.inlink_count(),
                outlinks: node.outlinks.clone(),
            })
            .collect();

        hubs.sort_by(|a, b| b.outlink_count.cmp(&a.outlink_count));
        hubs
    }

    /// Groups of notes that link to each other in a loop.
    ///
    /// Strongly connected components with more than one member, plus notes
    /// that link to themselves. Members and groups are sorted.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.to_petgraph();

        let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<String> =
                    scc.iter().map(|&idx| graph[idx].to_string()).collect();
                members.sort();
                members
            })
            .collect();

        cycles.sort();
        cycles
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.node_count();
        let edge_count = self.edge_count();

        let average_links_per_file = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_files: node_count,
            total_links: edge_count,
            orphaned_files: self.orphaned_notes().len(),
            average_links_per_file,
        }
    }

    fn to_petgraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.node_count());

        for path in self.nodes.keys() {
            indices.insert(path.as_str(), graph.add_node(path.as_str()));
        }

        for node in self.nodes.values() {
            let source = indices[node.path.as_str()];
            for target in &node.outlinks {
                if let Some(&target_idx) = indices.get(target.as_str()) {
                    graph.add_edge(source, target_idx, ());
                }
            }
        }

        graph
    }
}
