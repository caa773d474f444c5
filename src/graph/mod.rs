//! MentionGraph - directed who-mentions-whom adjacency
//!
//! Adjacency sets keyed by source identity, with in-degree counters kept in
//! a parallel map for O(1) access. Every identity that appears in either
//! role is a first-class vertex, including players nobody mentions and who
//! mention nobody - the size-consistency check against the identity count
//! depends on that.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

/// Directed graph where an edge A -> B means "A's profile mentions B".
///
/// In-degree counts distinct (source, target) pairs, not occurrences:
/// re-adding an existing edge is a no-op for both maps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MentionGraph {
    adj: HashMap<String, HashSet<String>>,
    in_degrees: HashMap<String, u32>,
}

impl MentionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the identity exists as a vertex, with an empty neighbor set
    /// and zero in-degree if it was unknown. Idempotent.
    pub fn add_vertex(&mut self, identity: &str) {
        self.adj.entry(identity.to_string()).or_default();
        self.in_degrees.entry(identity.to_string()).or_insert(0);
    }

    /// Record "`from` mentions `to`". Both endpoints become vertices if
    /// they were not already.
    ///
    /// The in-degree increment is guarded on first insertion of this exact
    /// (from, to) pair; reprocessing the same document cannot double-count.
    /// Self-mention exclusion is the caller's responsibility.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let inserted = self
            .adj
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());

        self.add_vertex(to);
        if inserted {
            *self.in_degrees.entry(to.to_string()).or_insert(0) += 1;
        }
    }

    /// All (from, to) pairs pointing at `to`. Linear scan over the
    /// adjacency map; used by the reporting stage only.
    pub fn in_edges(&self, to: &str) -> HashSet<(String, String)> {
        self.adj
            .iter()
            .filter(|(_, targets)| targets.contains(to))
            .map(|(from, _)| (from.clone(), to.to_string()))
            .collect()
    }

    /// In-degree of a vertex; zero for unknown identities.
    pub fn in_degree(&self, identity: &str) -> u32 {
        self.in_degrees.get(identity).copied().unwrap_or(0)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.adj.contains_key(identity)
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(HashSet::len).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adj.keys().map(String::as_str)
    }

    /// Outgoing neighbor set of a vertex, if it exists.
    pub fn neighbors(&self, identity: &str) -> Option<&HashSet<String>> {
        self.adj.get(identity)
    }

    /// All edges as (from, to) pairs, in arbitrary order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adj.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |to| (from.as_str(), to.as_str()))
        })
    }

    /// In-degree counters keyed by identity.
    pub fn in_degrees(&self) -> &HashMap<String, u32> {
        &self.in_degrees
    }
}

/// Sorted, line-per-vertex rendering for debugging dumps.
impl fmt::Display for MentionGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.adj.is_empty() {
            return writeln!(f, "graph is empty");
        }

        let mut vertices: Vec<&String> = self.adj.keys().collect();
        vertices.sort();
        for vertex in vertices {
            let mut targets: Vec<&String> = self.adj[vertex].iter().collect();
            targets.sort();
            writeln!(
                f,
                "{} (in: {}): {:?}",
                vertex,
                self.in_degree(vertex),
                targets
            )?;
        }
        Ok(())
    }
}

// ==================== TESTS ====================
