//! Bounded-depth exploration of a note's outgoing connections

use crate::graph::LinkGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A note reached while exploring outward from the start note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Hops along the path on which the note was first reached
    pub depth: usize,
    pub inlinks: Vec<String>,
    pub outlinks: Vec<String>,
}

/// Connections of one note up to a depth bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub note: String,
    pub direct_inlinks: Vec<String>,
    pub direct_outlinks: Vec<String>,
    pub direct_inlink_count: usize,
    pub direct_outlink_count: usize,
    pub connection_depth: usize,
    pub total_connections_explored: usize,
    /// Reached notes keyed by path; never contains the start note
    pub connections: BTreeMap<String, Connection>,
}

impl Neighborhood {
    /// Record for a note that resolved but has no graph node
    pub fn empty(note: impl Into<String>, depth: usize) -> Self {
        Self {
            note: note.into(),
            direct_inlinks: Vec::new(),
            direct_outlinks: Vec::new(),
            direct_inlink_count: 0,
            direct_outlink_count: 0,
            connection_depth: depth,
            total_connections_explored: 0,
            connections: BTreeMap::new(),
        }
    }
}

impl LinkGraph {
    /// Depth-first walk along outlinks from `start`, up to `depth` hops.
    ///
    /// Outlinks are followed in order and each note is entered once, so a
    /// note keeps the depth of the first path that reached it. A note first
    /// reached at the depth bound is not expanded even if a shorter path
    /// to it is found later.
    ///
    /// `start` must be a canonical path. A path with no node yields an empty
    /// record rather than an error.
    pub fn neighborhood(&self, start: &str, depth: usize) -> Neighborhood {
        let Some(start_node) = self.node(start) else {
            return Neighborhood::empty(start, depth);
        };

        let mut connections = BTreeMap::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start);

        for target in &start_node.outlinks {
            self.explore(target, 1, depth, &mut visited, &mut connections);
        }

        Neighborhood {
            note: start.to_string(),
            direct_inlinks: start_node.inlinks.clone(),
            direct_outlinks: start_node.outlinks.clone(),
            direct_inlink_count: start_node.inlink_count(),
            direct_outlink_count: start_node.outlink_count(),
            connection_depth: depth,
            total_connections_explored: connections.len(),
            connections,
        }
    }

    fn explore<'a>(
        &'a self,
        path: &'a str,
        hops: usize,
        depth: usize,
        visited: &mut HashSet<&'a str>,
        connections: &mut BTreeMap<String, Connection>,
    ) {
        if hops > depth || !visited.insert(path) {
            return;
        }
        let Some(node) = self.node(path) else {
            return;
        };

        connections.insert(
            path.to_string(),
            Connection {
                depth: hops,
                inlinks: node.inlinks.clone(),
                outlinks: node.outlinks.clone(),
            },
        );

        for target in &node.outlinks {
            self.explore(target, hops + 1, depth, visited, connections);
        }
    }
}
