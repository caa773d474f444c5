//! Identity consolidation - alias -> canonical username resolution
//!
//! A player's current username may be somebody else's former username
//! (Cookiezi's old name "shigetora" belongs to a different account today).
//! Conflicts are resolved by a deterministic priority order: records are
//! sorted by follower count descending, then global rank ascending, and the
//! first claimant of any alias keeps it permanently. This is a documented
//! heuristic, not guaranteed-correct disambiguation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ==================== TYPE DEFINITIONS ====================

/// One scraped player profile, validated upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u64,
    pub current_username: String,
    #[serde(default)]
    pub previous_usernames: Vec<String>,
    /// Free-text profile body, markup already stripped by the caller.
    #[serde(default)]
    pub about_me: String,
    pub follower_count: u32,
    /// 1 = best.
    pub global_rank: u32,
}

impl UserRecord {
    /// Canonical (lowercased) current username.
    pub fn identity(&self) -> String {
        self.current_username.to_lowercase()
    }

    /// Non-current aliases this record claims, lowercased: every previous
    /// username plus the synthetic "users/<id>" form, so collabs that link
    /// players by user ID still resolve to the owner.
    pub fn secondary_aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .previous_usernames
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        aliases.push(format!("users/{}", self.user_id));
        aliases
    }
}

/// Immutable alias -> canonical map plus the identity -> rank pass-through.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AliasIndex {
    alias_to_current: HashMap<String, String>,
    current_to_rank: HashMap<String, u32>,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Records in collision-resolution priority order: follower count
/// descending, rank ascending on ties. The sort is stable, so equal keys
/// keep their input order.
pub fn priority_order(records: &[UserRecord]) -> Vec<&UserRecord> {
    let mut ordered: Vec<&UserRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        b.follower_count
            .cmp(&a.follower_count)
            .then(a.global_rank.cmp(&b.global_rank))
    });
    ordered
}

impl AliasIndex {
    /// Build the alias map from the full record set.
    ///
    /// Needs every record up front (not a stream): collision resolution
    /// depends on the global priority sort. Within a record the current
    /// username claims before the historical ones; every canonical
    /// identity maps to itself.
    pub fn build(records: &[UserRecord]) -> Self {
        let mut index = AliasIndex::default();

        for record in priority_order(records) {
            let identity = record.identity();
            index
                .alias_to_current
                .entry(identity.clone())
                .or_insert_with(|| identity.clone());

            for alias in record.secondary_aliases() {
                index
                    .alias_to_current
                    .entry(alias)
                    .or_insert_with(|| identity.clone());
            }

            index.current_to_rank.insert(identity, record.global_rank);
        }

        debug!(
            aliases = index.alias_to_current.len(),
            identities = index.current_to_rank.len(),
            "built alias index"
        );
        index
    }

    /// Canonical identity for an alias, if any record claimed it.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.alias_to_current.get(alias).map(String::as_str)
    }

    pub fn rank_of(&self, identity: &str) -> Option<u32> {
        self.current_to_rank.get(identity).copied()
    }

    /// Number of distinct canonical identities.
    pub fn identity_count(&self) -> usize {
        self.current_to_rank.len()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.current_to_rank.keys().map(String::as_str)
    }

    pub fn alias_to_current(&self) -> &HashMap<String, String> {
        &self.alias_to_current
    }

    /// Identity -> global rank, pass-through from the input records.
    pub fn rank_map(&self) -> &HashMap<String, u32> {
        &self.current_to_rank
    }
}

// ==================== TESTS ====================
