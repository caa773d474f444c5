//! Crate error type
//!
//! Only invariant violations surface as errors: the core assumes records
//! were validated upstream, and none of the data-structure mutations can
//! fail. There is no retry concept here - retries belong to the network
//! layer that feeds this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The trie returned an alias the alias index has never heard of.
    /// Construction-order bug: trie and index were built out of sync.
    #[error("alias '{alias}' matched in a document but is missing from the alias index")]
    UnresolvedAlias { alias: String },

    /// A graph vertex has no backing user record. The graph and the record
    /// set given to the analysis stage disagree.
    #[error("graph vertex '{identity}' has no backing user record")]
    MissingRecord { identity: String },
}
