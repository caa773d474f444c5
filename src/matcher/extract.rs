//! MentionExtractor - trie scan + canonical identity resolution
//!
//! Composes an [`AliasTrie`] with the alias->canonical map so callers get
//! back current identities rather than whatever surface form a profile
//! happened to use.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::trie::{prepare_document, AliasTrie};
use crate::error::CoreError;

/// Resolves the aliases found in a document to canonical identities.
///
/// Borrows both structures; they are built to completion before any
/// extraction starts and stay read-only for the lifetime of the scan phase.
pub struct MentionExtractor<'a> {
    trie: &'a AliasTrie,
    alias_to_current: &'a HashMap<String, String>,
}

impl<'a> MentionExtractor<'a> {
    pub fn new(trie: &'a AliasTrie, alias_to_current: &'a HashMap<String, String>) -> Self {
        Self {
            trie,
            alias_to_current,
        }
    }

    /// Scan a raw document and return the set of canonical identities it
    /// mentions.
    ///
    /// A matched alias that is missing from the alias map means the trie
    /// and the map were built out of sync. That is a construction bug, not
    /// a data problem: it fails the whole run with
    /// [`CoreError::UnresolvedAlias`] instead of producing a silently
    /// incomplete graph.
    pub fn extract(&self, document: &str) -> Result<HashSet<String>, CoreError> {
        let prepared = prepare_document(document);
        let mut identities = HashSet::new();

        for alias in self.trie.scan(&prepared) {
            let identity = self.alias_to_current.get(&alias).ok_or_else(|| {
                CoreError::UnresolvedAlias {
                    alias: alias.clone(),
                }
            })?;
            identities.insert(identity.clone());
        }

        debug!(
            document_len = document.len(),
            identities = identities.len(),
            "extracted mentions"
        );
        Ok(identities)
    }
}

// ==================== TESTS ====================
