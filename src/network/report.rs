//! False-positive analysis
//!
//! Some usernames are also ordinary words ("About", "Skill", "RTX"), and
//! no algorithm can tell a mention from a word. The heuristic flags
//! identities that are both heavily mentioned (top X% of in-degree) and
//! obscure (at most Y followers), and attaches newline-bounded usage lines
//! so a human can judge each one. Rendering the result to a file is the
//! caller's concern.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::error::CoreError;
use crate::graph::MentionGraph;
use crate::identity::UserRecord;
use crate::network::NetworkConfig;

// ==================== TYPE DEFINITIONS ====================

/// One line of context showing how an alias is used on another profile.
#[derive(Debug, Clone, Serialize)]
pub struct UsageExample {
    pub mentioner: String,
    pub alias: String,
    pub line: String,
}

/// An identity that looks like a common-word match rather than a mention.
#[derive(Debug, Clone, Serialize)]
pub struct FalsePositiveCandidate {
    pub identity: String,
    pub previous_usernames: Vec<String>,
    pub mention_count: u32,
    pub follower_count: u32,
    pub usage_examples: Vec<UsageExample>,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Flag identities in the top `mentions_top_percentile` of in-degree with
/// at most `max_follower_count` followers, most-mentioned first.
///
/// Fails with [`CoreError::MissingRecord`] if the graph contains a vertex
/// the record set does not - the two must describe the same run.
pub fn find_false_positive_candidates(
    records: &[UserRecord],
    graph: &MentionGraph,
    config: &NetworkConfig,
) -> Result<Vec<FalsePositiveCandidate>, CoreError> {
    let by_identity: HashMap<String, &UserRecord> = records
        .iter()
        .map(|record| (record.identity(), record))
        .collect();

    for identity in graph.vertices() {
        if !by_identity.contains_key(identity) {
            return Err(CoreError::MissingRecord {
                identity: identity.to_string(),
            });
        }
    }

    // Top X% by in-degree, name as the deterministic tie-break.
    let mut ranked: Vec<(&str, u32)> = graph
        .vertices()
        .map(|identity| (identity, graph.in_degree(identity)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let keep = (ranked.len() as f64 * (config.mentions_top_percentile / 100.0)).round() as usize;

    let mut candidates = Vec::new();
    for (identity, mention_count) in ranked.into_iter().take(keep) {
        let record = by_identity[identity];
        if record.follower_count > config.max_follower_count {
            continue;
        }

        candidates.push(FalsePositiveCandidate {
            identity: identity.to_string(),
            previous_usernames: record.previous_usernames.clone(),
            mention_count,
            follower_count: record.follower_count,
            usage_examples: collect_usage_examples(record, graph, &by_identity, config),
        });
    }

    Ok(candidates)
}

/// Up to `max_usage_examples` lines showing the candidate's aliases in use,
/// taken from mentioning profiles in sorted-name order for reproducibility.
fn collect_usage_examples(
    candidate: &UserRecord,
    graph: &MentionGraph,
    by_identity: &HashMap<String, &UserRecord>,
    config: &NetworkConfig,
) -> Vec<UsageExample> {
    let identity = candidate.identity();
    let mut aliases = vec![identity.clone()];
    aliases.extend(candidate.secondary_aliases());

    let mut mentioners: Vec<String> = graph
        .in_edges(&identity)
        .into_iter()
        .map(|(from, _)| from)
        .collect();
    mentioners.sort();

    let mut examples = Vec::new();
    for mentioner in mentioners.into_iter().take(config.max_usage_examples) {
        let Some(record) = by_identity.get(&mentioner) else {
            continue;
        };
        let body = record.about_me.to_lowercase();

        let found = aliases.iter().find_map(|alias| {
            bounded_line(&body, alias, '\n').map(|line| UsageExample {
                mentioner: mentioner.clone(),
                alias: alias.clone(),
                line: line.to_string(),
            })
        });

        match found {
            Some(example) => examples.push(example),
            // The edge exists, so some alias matched during the scan; not
            // finding one here means the record set changed under us.
            None => warn!(%mentioner, %identity, "no usage line found for recorded mention"),
        }
    }

    examples
}

/// The stretch of `text` containing `needle`, bounded by `delimiter` on
/// both sides (or by the ends of the text). `None` if the needle does not
/// occur at all.
fn bounded_line<'a>(text: &'a str, needle: &str, delimiter: char) -> Option<&'a str> {
    let pos = text.find(needle)?;

    let start = match text[..pos].rfind(delimiter) {
        Some(idx) => idx + delimiter.len_utf8(),
        None => 0,
    };
    let end = match text[pos..].find(delimiter) {
        Some(idx) => pos + idx,
        None => text.len(),
    };

    Some(&text[start..end])
}

// ==================== TESTS ====================
