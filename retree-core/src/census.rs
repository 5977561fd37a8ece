//! Kind census over a corpus
//!
//! Counts the source kinds fed to the translator and the target kinds and
//! field sets it produced. Source kinds outside [`SourceKind`] are the gaps
//! in the dispatch table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde_json::Value;

use crate::kinds::SourceKind;

const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Occurrence counts for one corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindCensus {
    pub source_kinds: BTreeMap<String, usize>,
    pub target_kinds: BTreeMap<String, usize>,
    /// Every field name seen on each target kind
    pub target_fields: BTreeMap<String, BTreeSet<String>>,
}

impl KindCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tagged nodes of an SWC tree
    pub fn record_source(&mut self, tree: &Value) {
        walk(tree, &mut |kind, _| {
            *self.source_kinds.entry(kind.to_string()).or_default() += 1;
        });
    }

    /// Count the nodes of a typescript-estree tree and their fields
    pub fn record_target(&mut self, tree: &Value) {
        walk(tree, &mut |kind, fields| {
            *self.target_kinds.entry(kind.to_string()).or_default() += 1;
            let seen = self.target_fields.entry(kind.to_string()).or_default();
            for field in fields.keys() {
                if field != "type" && !seen.contains(field) {
                    seen.insert(field.clone());
                }
            }
        });
    }

    /// Fold another census into this one
    pub fn merge(&mut self, other: KindCensus) {
        for (kind, count) in other.source_kinds {
            *self.source_kinds.entry(kind).or_default() += count;
        }
        for (kind, count) in other.target_kinds {
            *self.target_kinds.entry(kind).or_default() += count;
        }
        for (kind, fields) in other.target_fields {
            self.target_fields.entry(kind).or_default().extend(fields);
        }
    }

    /// Source kinds the dispatch table does not know, with their counts
    pub fn unmapped(&self) -> Vec<(&str, usize)> {
        self.source_kinds
            .iter()
            .filter(|(kind, _)| SourceKind::parse(kind).is_none())
            .map(|(kind, count)| (kind.as_str(), *count))
            .collect()
    }

    pub fn is_total(&self) -> bool {
        self.unmapped().is_empty()
    }

    /// Plain-text summary, one kind per line
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "source kinds: {}", self.source_kinds.len());
        for (kind, count) in &self.source_kinds {
            let mark = if SourceKind::parse(kind).is_some() { ' ' } else { '!' };
            let _ = writeln!(out, "  {mark} {kind:<40} {count:>8}");
        }
        let _ = writeln!(out, "target kinds: {}", self.target_kinds.len());
        for (kind, count) in &self.target_kinds {
            let fields = self
                .target_fields
                .get(kind)
                .map(|fields| fields.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            let _ = writeln!(out, "    {kind:<40} {count:>8}  [{fields}]");
        }
        let unmapped = self.unmapped();
        if !unmapped.is_empty() {
            let names: Vec<&str> = unmapped.iter().map(|(kind, _)| *kind).collect();
            let _ = writeln!(out, "unmapped: {}", names.join(", "));
        }
        out
    }
}

/// Visit every object carrying a string `type` tag
fn walk(value: &Value, visit: &mut dyn FnMut(&str, &serde_json::Map<String, Value>)) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || match value {
        Value::Object(map) => {
            if let Some(kind) = map.get("type").and_then(Value::as_str) {
                visit(kind, map);
            }
            for child in map.values() {
                walk(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visit);
            }
        }
        _ => {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_census_and_unmapped() {
        let tree = json!({
            "type": "Module",
            "body": [
                {"type": "EmptyStatement"},
                {"type": "EmptyStatement"},
                {"type": "HologramStatement"}
            ]
        });
        let mut census = KindCensus::new();
        census.record_source(&tree);
        assert_eq!(census.source_kinds["EmptyStatement"], 2);
        assert_eq!(census.unmapped(), vec![("HologramStatement", 1)]);
        assert!(!census.is_total());
        assert!(census.report().contains("unmapped: HologramStatement"));
    }

    #[test]
    fn test_target_fields_and_merge() {
        let mut left = KindCensus::new();
        left.record_target(&json!({"type": "Identifier", "range": [0, 1], "name": "a"}));
        let mut right = KindCensus::new();
        right.record_target(&json!({"type": "Identifier", "range": [0, 2], "name": "b", "optional": true}));

        left.merge(right);
        assert_eq!(left.target_kinds["Identifier"], 2);
        let fields: Vec<&str> = left.target_fields["Identifier"].iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["name", "optional", "range"]);
        assert!(left.is_total());
    }
}
