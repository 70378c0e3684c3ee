//! Schema-agnostic identifier extraction
//!
//! Upstream documents nest game references at arbitrary depths and in
//! shapes that change per endpoint, so instead of decoding a fixed path the
//! extractor walks the whole `serde_json::Value` tree and collects the id of
//! every object whose discriminator field matches.
//!
//! # Traversal order
//!
//! Depth-first, pre-order: an object's own match is collected before any of
//! its children, object fields are visited in document order, array items in
//! index order. Collection stops as soon as `cap` unique ids are held.

use serde_json::Value;
use std::collections::HashSet;
use std::ops::ControlFlow;

/// Structural predicate selecting which objects carry an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPredicate<'a> {
    /// Discriminator field name (e.g. `contentType`)
    pub field: &'a str,
    /// Value the discriminator must equal (e.g. `Game`)
    pub value: &'a str,
    /// Field holding the identifier (e.g. `contentId`)
    pub id_field: &'a str,
}

/// `contentType == "Game"` / `contentId`, shared by the explore, search and
/// recommendation documents
pub const GAME_CONTENT: IdPredicate<'static> = IdPredicate {
    field: "contentType",
    value: "Game",
    id_field: "contentId",
};

struct Collector {
    ids: Vec<u64>,
    seen: HashSet<u64>,
    cap: usize,
}

impl Collector {
    fn push(&mut self, id: u64) -> ControlFlow<()> {
        if self.seen.insert(id) {
            self.ids.push(id);
        }
        if self.ids.len() >= self.cap {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Collect up to `cap` unique identifiers in first-seen order.
pub fn extract_ids(
    document: &Value,
    predicate_field: &str,
    predicate_value: &str,
    id_field: &str,
    cap: usize,
) -> Vec<u64> {
    let predicate = IdPredicate {
        field: predicate_field,
        value: predicate_value,
        id_field,
    };
    extract_matching(document, &predicate, cap)
}

/// [`extract_ids`] with a prepared predicate
pub fn extract_matching(document: &Value, predicate: &IdPredicate<'_>, cap: usize) -> Vec<u64> {
    if cap == 0 {
        return Vec::new();
    }

    let mut collector = Collector {
        ids: Vec::new(),
        seen: HashSet::new(),
        cap,
    };
    let _ = visit(document, predicate, &mut collector);
    collector.ids
}

/// Parse `bytes` and extract; anything that is not JSON yields no ids.
pub fn extract_ids_from_bytes(bytes: &[u8], predicate: &IdPredicate<'_>, cap: usize) -> Vec<u64> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(document) => extract_matching(&document, predicate, cap),
        Err(e) => {
            tracing::debug!("Unparseable document, extracting nothing: {}", e);
            Vec::new()
        }
    }
}

fn visit(node: &Value, predicate: &IdPredicate<'_>, collector: &mut Collector) -> ControlFlow<()> {
    match node {
        Value::Object(map) => {
            if map.get(predicate.field).and_then(Value::as_str) == Some(predicate.value)
                && let Some(id) = map.get(predicate.id_field).and_then(coerce_id)
            {
                collector.push(id)?;
            }
            for child in map.values() {
                visit(child, predicate, collector)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, predicate, collector)?;
            }
        }
        _ => {}
    }
    ControlFlow::Continue(())
}

/// Native unsigned integer or numeric string; zero is not an identifier.
fn coerce_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

#[cfg(test)]
mod tests {
    include!("extract.test.rs");
}
