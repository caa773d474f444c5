//! MentionCore: alias-trie mention scanner + directed mention graph
//!
//! The matching core of a ranked-player mention-graph tool: given scraped
//! profile records (current username, previous usernames, free-text body,
//! follower count, global rank), it finds every cross-reference between
//! profile owners and builds a directed who-mentions-whom graph for the
//! reporting and visualization stages.
//!
//! # Architecture
//!
//! - `matcher::trie` - AliasTrie: arena-based prefix tree over
//!   boundary-delimited alias variants; whole-token, longest-match scanning
//! - `matcher::extract` - MentionExtractor: trie scan + canonical identity
//!   resolution
//! - `identity` - UserRecord + AliasIndex: first-claimant-wins alias
//!   consolidation under a follower/rank priority order
//! - `graph` - MentionGraph: adjacency sets + in-degree counters
//! - `network` - pipeline composing the above, plus the false-positive
//!   analysis used by report tooling
//!
//! # Usage
//!
//! ```
//! use mentioncore::{build_network, NetworkConfig, UserRecord};
//!
//! let records = vec![
//!     UserRecord {
//!         user_id: 124493,
//!         current_username: "Cookiezi".into(),
//!         previous_usernames: vec!["shigetora".into()],
//!         about_me: String::new(),
//!         follower_count: 21000,
//!         global_rank: 3,
//!     },
//!     UserRecord {
//!         user_id: 2,
//!         current_username: "fan".into(),
//!         previous_usernames: vec![],
//!         about_me: "shigetora was the greatest".into(),
//!         follower_count: 12,
//!         global_rank: 4821,
//!     },
//! ];
//!
//! let network = build_network(&records, &NetworkConfig::default()).unwrap();
//! assert_eq!(network.graph.in_degree("cookiezi"), 1);
//! ```

pub mod error;
pub mod graph;
pub mod identity;
pub mod matcher;
pub mod network;

pub use error::CoreError;
pub use graph::MentionGraph;
pub use identity::{priority_order, AliasIndex, UserRecord};
pub use matcher::{prepare_document, AliasTrie, MentionExtractor};
pub use network::{
    build_network, find_false_positive_candidates, BuildStats, FalsePositiveCandidate,
    MentionNetwork, NetworkConfig, UsageExample,
};

/// Get version information
pub fn version() -> String {
    format!("mentioncore v{}", env!("CARGO_PKG_VERSION"))
}
