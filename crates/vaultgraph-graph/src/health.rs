//! Vault link health metrics and broken link detection.
//!
//! Connectivity metrics come from the graph. Broken links come from a
//! separate re-scan of every document's raw link targets, because the graph
//! drops unresolved links instead of recording them.

use crate::graph::LinkGraph;
use crate::index::NoteResolver;
use serde::{Deserialize, Serialize};
use vaultgraph_core::{Document, LinkTypeCounts, round_to};
use vaultgraph_parser::extract_links;

/// A link whose target does not resolve to a note in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    /// Source file containing the broken link
    pub source_file: String,
    /// Bare target that couldn't be resolved
    pub target: String,
}

/// Health analysis report for the vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub total_notes: usize,
    /// Sum of outlinks over all notes
    pub total_links: usize,
    /// Notes with neither inlinks nor outlinks
    pub orphaned_notes: usize,
    pub notes_with_no_inlinks: usize,
    pub notes_with_no_outlinks: usize,
    pub broken_links_count: usize,
    pub average_outlinks_per_note: f64,
    pub average_inlinks_per_note: f64,
    pub link_density_score: f64,
    /// Raw link occurrences by kind, summed over all notes
    pub link_types: LinkTypeCounts,
    pub broken_links: Vec<BrokenLink>,
}

/// Vault health analyzer
pub struct HealthAnalyzer<'a> {
    graph: &'a LinkGraph,
    documents: &'a [Document],
    resolver: &'a dyn NoteResolver,
}

impl<'a> HealthAnalyzer<'a> {
    /// `documents` are re-scanned for broken links against `resolver`
    pub fn new(
        graph: &'a LinkGraph,
        documents: &'a [Document],
        resolver: &'a dyn NoteResolver,
    ) -> Self {
        Self {
            graph,
            documents,
            resolver,
        }
    }

    /// Run the health analysis
    pub fn analyze(&self) -> HealthReport {
        let total_notes = self.graph.node_count();
        let total_outlinks = self.graph.edge_count();
        let total_inlinks: usize = self.graph.nodes().map(|n| n.inlink_count()).sum();

        let average = |total: usize| {
            if total_notes == 0 {
                0.0
            } else {
                round_to(total as f64 / total_notes as f64, 2)
            }
        };

        let link_types = self
            .graph
            .nodes()
            .fold(LinkTypeCounts::default(), |acc, node| LinkTypeCounts {
                wikilinks: acc.wikilinks + node.link_type_counts.wikilinks,
                markdown_links: acc.markdown_links + node.link_type_counts.markdown_links,
                embeds: acc.embeds + node.link_type_counts.embeds,
            });

        let broken_links = self.find_broken_links();

        let report = HealthReport {
            total_notes,
            total_links: total_outlinks,
            orphaned_notes: self.graph.nodes().filter(|n| n.is_orphan()).count(),
            notes_with_no_inlinks: self.graph.nodes().filter(|n| n.inlinks.is_empty()).count(),
            notes_with_no_outlinks: self
                .graph
                .nodes()
                .filter(|n| n.outlinks.is_empty())
                .count(),
            broken_links_count: broken_links.len(),
            average_outlinks_per_note: average(total_outlinks),
            average_inlinks_per_note: average(total_inlinks),
            link_density_score: average(total_outlinks),
            link_types,
            broken_links,
        };

        log::info!(
            "Health analysis: {} notes, {} links, {} broken",
            report.total_notes,
            report.total_links,
            report.broken_links_count
        );

        report
    }

    /// Every raw link target that does not resolve to a graph node.
    ///
    /// One entry per distinct target per source file.
    pub fn find_broken_links(&self) -> Vec<BrokenLink> {
        let mut broken = Vec::new();
        for doc in self.documents {
            for target in extract_links(&doc.content).all_links {
                let resolved = self
                    .resolver
                    .resolve_note(&target)
                    .filter(|path| self.graph.contains(path));
                if resolved.is_none() {
                    log::debug!("Broken link in {}: {}", doc.path, target);
                    broken.push(BrokenLink {
                        source_file: doc.path.clone(),
                        target,
                    });
                }
            }
        }
        broken
    }
}
