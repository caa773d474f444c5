//! AliasTrie - boundary-delimited multi-pattern alias matching
//!
//! A prefix tree over every known alias (current and historical usernames),
//! stored as boundary-delimited variants so that whole-token matching falls
//! out of the tree walk itself with no adjacency checks at scan time.
//!
//! Nodes live in a flat arena (`Vec<TrieNode>`) addressed by index; child
//! links are per-character hash maps. Ownership is strictly tree-shaped.

use std::collections::{BTreeSet, HashMap, HashSet};

// ==================== CONSTANTS ====================

/// The only characters recognized as token boundaries. Punctuation is not
/// a delimiter: "cookiezi!!" does not contain the alias "cookiezi".
pub const BOUNDARY_CHARS: [char; 2] = [' ', '\n'];

/// Index of a node in the trie arena.
type NodeId = usize;

const ROOT: NodeId = 0;

// ==================== TYPE DEFINITIONS ====================

/// A single arena slot. `payload.is_some()` marks the end of a stored
/// boundary variant and holds the lowercased, un-delimited alias.
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, NodeId>,
    payload: Option<String>,
}

/// Prefix tree over boundary-delimited alias variants.
///
/// Built once per run, then read-only during scanning.
#[derive(Debug)]
pub struct AliasTrie {
    nodes: Vec<TrieNode>,
    alias_count: usize,
}

impl Default for AliasTrie {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== MAIN IMPLEMENTATION ====================

impl AliasTrie {
    /// Create an empty trie (root node only).
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            alias_count: 0,
        }
    }

    /// Insert an alias, storing one variant per (leading, trailing)
    /// delimiter pair from [`BOUNDARY_CHARS`].
    ///
    /// Every stored variant is delimited on both sides; a variant without a
    /// trailing delimiter would terminate inside longer words and break the
    /// no-partial-word-match guarantee. Re-inserting an alias is a no-op.
    /// Empty aliases are ignored.
    pub fn insert(&mut self, alias: &str) {
        let alias = alias.to_lowercase();
        if alias.is_empty() {
            return;
        }

        let mut fresh = false;
        for lead in BOUNDARY_CHARS {
            for trail in BOUNDARY_CHARS {
                let mut node = self.descend(ROOT, lead);
                for ch in alias.chars() {
                    node = self.descend(node, ch);
                }
                node = self.descend(node, trail);

                if self.nodes[node].payload.is_none() {
                    self.nodes[node].payload = Some(alias.clone());
                    fresh = true;
                }
            }
        }

        if fresh {
            self.alias_count += 1;
        }
    }

    /// Walk one edge, allocating the child node if it does not exist yet.
    fn descend(&mut self, from: NodeId, ch: char) -> NodeId {
        if let Some(&next) = self.nodes[from].children.get(&ch) {
            return next;
        }
        let id = self.nodes.len();
        self.nodes.push(TrieNode::default());
        self.nodes[from].children.insert(ch, id);
        id
    }

    /// Return the set of aliases that occur, boundary-delimited, in the
    /// prepared document.
    ///
    /// The caller must prepare the document with [`prepare_document`]
    /// (lowercase, wrapped in newlines) so that aliases touching the
    /// physical start or end of the text match through the same variant
    /// encoding as interior occurrences.
    ///
    /// From every start offset the walk follows child links until a
    /// character has no edge; the deepest terminal reached on the way wins
    /// (longest match at that start position). There is no backtracking -
    /// the start offset simply advances by one.
    pub fn scan(&self, prepared_document: &str) -> HashSet<String> {
        let chars: Vec<char> = prepared_document.chars().collect();
        let mut found = HashSet::new();

        for start in 0..chars.len() {
            let mut node = ROOT;
            let mut best: Option<&str> = None;

            for &ch in &chars[start..] {
                match self.nodes[node].children.get(&ch) {
                    Some(&next) => node = next,
                    None => break,
                }
                if let Some(alias) = self.nodes[node].payload.as_deref() {
                    best = Some(alias);
                }
            }

            if let Some(alias) = best {
                found.insert(alias.to_string());
            }
        }

        found
    }

    /// Return every stored alias, deduplicated across its boundary variants
    /// and sorted lexicographically. Diagnostics only.
    pub fn all_aliases(&self) -> Vec<String> {
        let mut out = BTreeSet::new();
        self.collect_payloads(ROOT, &mut out);
        out.into_iter().collect()
    }

    fn collect_payloads(&self, node: NodeId, out: &mut BTreeSet<String>) {
        if let Some(alias) = &self.nodes[node].payload {
            out.insert(alias.clone());
        }
        for &child in self.nodes[node].children.values() {
            self.collect_payloads(child, out);
        }
    }

    /// Number of distinct aliases stored.
    pub fn len(&self) -> usize {
        self.alias_count
    }

    pub fn is_empty(&self) -> bool {
        self.alias_count == 0
    }

    /// Number of arena nodes, including the root. Diagnostics only.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Lowercase a raw document and wrap it in newlines so that document edges
/// behave like interior boundaries during [`AliasTrie::scan`].
pub fn prepare_document(raw: &str) -> String {
    format!("\n{}\n", raw.to_lowercase())
}

// ==================== TESTS ====================
