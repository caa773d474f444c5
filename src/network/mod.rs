//! Mention network pipeline
//!
//! Wires the core together in construction order: alias index ->
//! trie population (honoring the ignore list) -> per-profile scans ->
//! directed graph. Everything is built to completion before the scan phase
//! starts and nothing is mutated afterwards.

pub mod report;

pub use report::*;

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreError;
use crate::graph::MentionGraph;
use crate::identity::{AliasIndex, UserRecord};
use crate::matcher::{AliasTrie, MentionExtractor};

// ==================== TYPE DEFINITIONS ====================

/// Pipeline configuration.
///
/// The ignore list holds aliases (not players): an ignored alias never
/// enters the trie and therefore can never be matched as a mention, but it
/// still receives its canonical binding, and the owner's other aliases are
/// unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub ignored_aliases: Vec<String>,
    /// Report threshold: flag identities in the top X% of in-degree.
    #[serde(default = "default_top_percentile")]
    pub mentions_top_percentile: f64,
    /// Report threshold: flag identities with at most this many followers.
    #[serde(default = "default_max_followers")]
    pub max_follower_count: u32,
    /// Usage lines collected per flagged identity.
    #[serde(default = "default_max_usage_examples")]
    pub max_usage_examples: usize,
}

fn default_top_percentile() -> f64 {
    5.0
}

fn default_max_followers() -> u32 {
    1000
}

fn default_max_usage_examples() -> usize {
    10
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ignored_aliases: Vec::new(),
            mentions_top_percentile: default_top_percentile(),
            max_follower_count: default_max_followers(),
            max_usage_examples: default_max_usage_examples(),
        }
    }
}

/// Counters accumulated during a build, returned with the result instead
/// of living in shared progress state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildStats {
    pub users: usize,
    pub aliases_indexed: usize,
    pub ignored_alias_hits: usize,
    pub documents_scanned: usize,
    pub mention_edges: usize,
    pub elapsed_ms: f64,
}

/// The finished, read-only mention network.
#[derive(Debug, Clone, Serialize)]
pub struct MentionNetwork {
    pub graph: MentionGraph,
    /// Identity -> global rank, pass-through from the input records.
    pub rank_by_identity: HashMap<String, u32>,
    /// Sorted listing of every alias the trie indexed. Diagnostics only.
    pub indexed_aliases: Vec<String>,
    pub stats: BuildStats,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Build the mention network from a complete record set.
///
/// The full set is required up front (not a stream) because alias collision
/// resolution depends on a global priority sort over all records.
pub fn build_network(
    records: &[UserRecord],
    config: &NetworkConfig,
) -> Result<MentionNetwork, CoreError> {
    let start = Instant::now();
    info!(users = records.len(), "building mention network");

    let ignored: HashSet<String> = config
        .ignored_aliases
        .iter()
        .map(|alias| alias.to_lowercase())
        .collect();

    // Phase 1: consolidation. Every alias gets a canonical binding,
    // ignored or not.
    let index = AliasIndex::build(records);

    // Phase 2: trie population. Ignored aliases contribute no trie entries.
    let mut trie = AliasTrie::new();
    let mut ignored_alias_hits = 0;
    for record in records {
        for alias in std::iter::once(record.identity()).chain(record.secondary_aliases()) {
            if ignored.contains(&alias) {
                ignored_alias_hits += 1;
            } else {
                trie.insert(&alias);
            }
        }
    }
    info!(
        aliases = trie.len(),
        ignored_alias_hits, "indexed aliases"
    );

    // Phase 3: scan every profile body and record edges. Self-mentions are
    // excluded here, before the graph sees them.
    let extractor = MentionExtractor::new(&trie, index.alias_to_current());
    let mut graph = MentionGraph::new();
    for record in records {
        let identity = record.identity();
        graph.add_vertex(&identity);

        for mentioned in extractor.extract(&record.about_me)? {
            if mentioned != identity {
                graph.add_edge(&identity, &mentioned);
            }
        }
    }

    let stats = BuildStats {
        users: records.len(),
        aliases_indexed: trie.len(),
        ignored_alias_hits,
        documents_scanned: records.len(),
        mention_edges: graph.edge_count(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    info!(
        vertices = graph.vertex_count(),
        edges = stats.mention_edges,
        elapsed_ms = stats.elapsed_ms,
        "mention network built"
    );

    Ok(MentionNetwork {
        graph,
        rank_by_identity: index.rank_map().clone(),
        indexed_aliases: trie.all_aliases(),
        stats,
    })
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    /// Capture pipeline logging in test output; honors RUST_LOG.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn record(
        user_id: u64,
        name: &str,
        previous: &[&str],
        about_me: &str,
        followers: u32,
        rank: u32,
    ) -> UserRecord {
        UserRecord {
            user_id,
            current_username: name.to_string(),
            previous_usernames: previous.iter().map(|s| s.to_string()).collect(),
            about_me: about_me.to_string(),
            follower_count: followers,
            global_rank: rank,
        }
    }

    #[test]
    fn test_end_to_end_single_mention() {
        init_tracing();
        let records = vec![
            record(1, "alph", &[], "I love anna", 50, 10),
            record(2, "anna", &[], "no mentions here", 40, 20),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.vertex_count(), 2);
        assert!(network.graph.neighbors("alph").unwrap().contains("anna"));
        assert_eq!(network.graph.in_degree("anna"), 1);
        assert_eq!(network.graph.in_degree("alph"), 0);
        assert_eq!(network.stats.mention_edges, 1);
    }

    #[test]
    fn test_vertex_count_matches_identity_count() {
        let records = vec![
            record(1, "a", &[], "", 3, 1),
            record(2, "b", &[], "", 2, 2),
            record(3, "c", &[], "", 1, 3),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.vertex_count(), records.len());
        for identity in ["a", "b", "c"] {
            assert!(network.graph.contains(identity));
            assert_eq!(network.graph.in_degree(identity), 0);
        }
    }

    #[test]
    fn test_self_mentions_are_excluded() {
        let records = vec![record(1, "echo", &[], "echo echo echo", 1, 1)];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.edge_count(), 0);
        assert_eq!(network.graph.in_degree("echo"), 0);
    }

    #[test]
    fn test_historical_alias_routes_to_current_identity() {
        let records = vec![
            record(1, "cookiezi", &["shigetora"], "", 100, 1),
            record(2, "fan", &[], "shigetora was the best", 1, 50),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert!(network.graph.neighbors("fan").unwrap().contains("cookiezi"));
        assert_eq!(network.graph.in_degree("cookiezi"), 1);
    }

    #[test]
    fn test_mention_by_user_id_alias() {
        let records = vec![
            record(124493, "cookiezi", &[], "", 100, 1),
            record(2, "collab", &[], "players: users/124493 and others", 1, 50),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.in_degree("cookiezi"), 1);
    }

    #[test]
    fn test_ignored_alias_never_matches() {
        init_tracing();
        let records = vec![
            record(1, "about", &[], "", 5, 1),
            record(2, "writer", &[], "about me pages are fun", 1, 2),
        ];
        let config = NetworkConfig {
            ignored_aliases: vec!["About".to_string()],
            ..NetworkConfig::default()
        };
        let network = build_network(&records, &config).unwrap();

        assert_eq!(network.graph.in_degree("about"), 0);
        assert_eq!(network.stats.ignored_alias_hits, 1);
        // Still a first-class vertex with a canonical binding.
        assert!(network.graph.contains("about"));
        assert!(!network.indexed_aliases.contains(&"about".to_string()));
    }

    #[test]
    fn test_rank_map_pass_through() {
        let records = vec![
            record(1, "a", &[], "", 10, 7),
            record(2, "b", &[], "", 5, 3),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.rank_by_identity["a"], 7);
        assert_eq!(network.rank_by_identity["b"], 3);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let network = build_network(&[], &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.vertex_count(), 0);
        assert_eq!(network.stats.mention_edges, 0);
        assert!(network.indexed_aliases.is_empty());
    }

    #[test]
    fn test_reprocessing_is_idempotent() {
        // Same alias mentioned through two surface forms in one document
        // still produces a single edge and in-degree 1.
        let records = vec![
            record(1, "cookiezi", &["shigetora"], "", 100, 1),
            record(2, "fan", &[], "cookiezi aka shigetora", 1, 50),
        ];
        let network = build_network(&records, &NetworkConfig::default()).unwrap();

        assert_eq!(network.graph.edge_count(), 1);
        assert_eq!(network.graph.in_degree("cookiezi"), 1);
    }

    #[test]
    fn test_config_defaults() {
        let config: NetworkConfig = serde_json::from_str("{}").unwrap();
        assert!(config.ignored_aliases.is_empty());
        assert_eq!(config.mentions_top_percentile, 5.0);
        assert_eq!(config.max_follower_count, 1000);
        assert_eq!(config.max_usage_examples, 10);
    }
}
