//! Strategy catalog parsing and heuristic resolution
//!
//! The upstream catalog exposes sorts only as opaque ids plus free-text
//! labels, and neither is stable across releases. Resolution therefore
//! degrades from exact knowledge to fuzzy text to "try everything".
//!
//! # Rule Order
//!
//! [`resolve_strategy_order`] applies an explicit, ordered rule list:
//!
//! 1. **Known ids** - legacy sort ids observed to be stable, in fixed order
//! 2. **Name patterns** - intent synonyms and generic tokens matched as
//!    substrings of the lowercased label or id, in catalog order
//! 3. **Remainder** - everything else, in catalog order
//!
//! Each id appears once, at the position of the first rule that selected it.
//!
//! # Examples
//!
//! ```
//! use rodex_lib::discovery::catalog::{StrategyDescriptor, resolve_strategy_order};
//!
//! let catalog = vec![
//!     StrategyDescriptor::new("U1", "Up and Coming"),
//!     StrategyDescriptor::new("F1", "Fun with Friends"),
//!     StrategyDescriptor::new("T1", "Top Trending"),
//! ];
//!
//! assert_eq!(resolve_strategy_order(&catalog, "trending"), vec!["U1", "T1", "F1"]);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Legacy sort ids observed to be stable for trending/popular views
pub const KNOWN_TRENDING_SORT_IDS: &[&str] = &[
    "top-trending",
    "up-and-coming",
    "most-engaging",
    "top-playing-now",
];

/// Synonyms used for the `popular` and `trending` intents
pub const TRENDING_SYNONYMS: &[&str] = &[
    "top trending",
    "trending",
    "up and coming",
    "engaging",
    "popular",
    "ccu",
];

/// Tokens that mark a sort as trending-like regardless of intent
pub const GENERIC_TOKENS: &[&str] = &["trend", "coming", "ccu"];

/// Patterns for the single best-guess top rated sort
pub const TOP_RATED_PATTERNS: &[&str] = &[
    "top rated",
    "top-rated",
    "toprated",
    "highest rated",
    "rated",
    "rating",
];

const ID_KEYS: &[&str] = &["id", "sortId"];
const NAME_KEYS: &[&str] = &["name", "displayName", "displayText", "title"];
const NESTED_TITLE_KEYS: &[&str] = &["text", "displayText", "name"];

/// One sort/strategy advertised by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    pub id: String,
    pub display_name: String,
}

impl StrategyDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Case-insensitive substring match against the label or the id
    pub fn mentions_any<S: AsRef<str>>(&self, patterns: &[S]) -> bool {
        let name = self.display_name.to_lowercase();
        let id = self.id.to_lowercase();
        patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| name.contains(pattern) || id.contains(pattern))
    }
}

/// One step of the ordered resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionRule {
    /// Exact ids, emitted in the rule's own order when present in the catalog
    KnownIds(Vec<String>),
    /// Lowercase substrings matched against label or id, catalog order
    NamePatterns(Vec<String>),
    /// Every catalog entry, catalog order
    Remainder,
}

impl ResolutionRule {
    fn select<'c>(&self, catalog: &'c [StrategyDescriptor]) -> Vec<&'c str> {
        match self {
            ResolutionRule::KnownIds(ids) => ids
                .iter()
                .filter_map(|known| {
                    catalog
                        .iter()
                        .find(|descriptor| descriptor.id.eq_ignore_ascii_case(known))
                        .map(|descriptor| descriptor.id.as_str())
                })
                .collect(),
            ResolutionRule::NamePatterns(patterns) => catalog
                .iter()
                .filter(|descriptor| descriptor.mentions_any(patterns))
                .map(|descriptor| descriptor.id.as_str())
                .collect(),
            ResolutionRule::Remainder => catalog
                .iter()
                .map(|descriptor| descriptor.id.as_str())
                .collect(),
        }
    }
}

/// Lowercase patterns for an intent
pub fn patterns_for_intent(intent: &str) -> Vec<String> {
    let lowered = intent.trim().to_lowercase();
    match lowered.as_str() {
        "popular" | "trending" => TRENDING_SYNONYMS.iter().map(|s| s.to_string()).collect(),
        "" => Vec::new(),
        _ => vec![lowered],
    }
}

/// Default rule list for an intent
pub fn rules_for_intent(intent: &str) -> Vec<ResolutionRule> {
    let mut patterns = patterns_for_intent(intent);
    patterns.extend(GENERIC_TOKENS.iter().map(|s| s.to_string()));

    vec![
        ResolutionRule::KnownIds(KNOWN_TRENDING_SORT_IDS.iter().map(|s| s.to_string()).collect()),
        ResolutionRule::NamePatterns(patterns),
        ResolutionRule::Remainder,
    ]
}

/// Apply `rules` in order, keeping the first position of every id
pub fn resolve_with_rules(catalog: &[StrategyDescriptor], rules: &[ResolutionRule]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for rule in rules {
        for id in rule.select(catalog) {
            if seen.insert(id) {
                ordered.push(id.to_string());
            }
        }
    }

    ordered
}

/// Ordered candidate sort ids for `intent`, most preferred first.
///
/// Never empty for a non-empty catalog.
pub fn resolve_strategy_order(catalog: &[StrategyDescriptor], intent: &str) -> Vec<String> {
    resolve_with_rules(catalog, &rules_for_intent(intent))
}

/// Single best guess: first entry mentioning any pattern, else the first
/// catalog entry. `None` only for an empty catalog.
pub fn resolve_best_strategy<S: AsRef<str>>(
    catalog: &[StrategyDescriptor],
    patterns: &[S],
) -> Option<String> {
    catalog
        .iter()
        .find(|descriptor| descriptor.mentions_any(patterns))
        .or_else(|| catalog.first())
        .map(|descriptor| descriptor.id.clone())
}

/// Read descriptors from a catalog document (`sorts`, `Sorts`, or a bare array).
///
/// Entries without a usable id are skipped.
pub fn parse_catalog(document: &Value) -> Vec<StrategyDescriptor> {
    let entries = match document {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("sorts")
            .or_else(|| map.get("Sorts"))
            .and_then(Value::as_array),
        _ => None,
    };

    entries
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let id = descriptor_id(entry)?;
            Some(StrategyDescriptor {
                id,
                display_name: descriptor_name(entry),
            })
        })
        .collect()
}

fn descriptor_id(entry: &Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match entry.get(*key)? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn descriptor_name(entry: &Map<String, Value>) -> String {
    if let Some(name) = first_string(entry, NAME_KEYS) {
        return name;
    }

    if let Some(Value::Object(title)) = entry.get("title") {
        if let Some(name) = first_string(title, NESTED_TITLE_KEYS) {
            return name;
        }
        let joined = join_strings(title);
        if !joined.is_empty() {
            return joined;
        }
    }

    join_strings(entry)
}

fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

fn join_strings(map: &Map<String, Value>) -> String {
    map.values()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    include!("catalog.test.rs");
}
