//! Canonical key order and structural comparison of JSON trees
//!
//! Translated trees and reference trees are compared ignoring key insertion
//! order. [`canonicalize`] fixes one order for printing, [`diff`] finds the
//! first place two trees disagree.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Map, Value};

/// Remaining stack below which a new segment is allocated
const STACK_RED_ZONE: usize = 128 * 1024;

const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Ordering of object keys: `type`, `range`, then case-insensitive
/// alphabetical with the exact spelling as tie-breaker
fn key_order(a: &str, b: &str) -> Ordering {
    fn rank(key: &str) -> u8 {
        match key {
            "type" => 0,
            "range" => 1,
            _ => 2,
        }
    }
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Deep copy of `value` with every object's keys in canonical order
pub fn canonicalize(value: &Value) -> Value {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| key_order(a, b));
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    })
}

/// First divergence between two trees
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// `$.body[0].expression.range` style location
    pub path: String,
    /// `None` when the key is missing on that side
    pub expected: Option<Value>,
    pub actual: Option<Value>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path,
            describe(self.expected.as_ref()),
            describe(self.actual.as_ref())
        )
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => {
            let text = value.to_string();
            if text.len() > 80 {
                let cut = (0..=77).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
                format!("{}...", &text[..cut])
            } else {
                text
            }
        }
        Some(value) => value.to_string(),
    }
}

/// Compare two trees, ignoring key order.
///
/// Numbers compare by value, so `1` and `1.0` are equal. Returns `None`
/// when the trees match.
pub fn diff(expected: &Value, actual: &Value) -> Option<Difference> {
    let mut path = String::from("$");
    diff_at(&mut path, expected, actual)
}

fn diff_at(path: &mut String, expected: &Value, actual: &Value) -> Option<Difference> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
        match (expected, actual) {
            (Value::Object(left), Value::Object(right)) => diff_objects(path, left, right),
            (Value::Array(left), Value::Array(right)) => {
                for (index, (l, r)) in left.iter().zip(right).enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{index}]"));
                    let found = diff_at(path, l, r);
                    path.truncate(len);
                    if found.is_some() {
                        return found;
                    }
                }
                if left.len() != right.len() {
                    let index = left.len().min(right.len());
                    return Some(Difference {
                        path: format!("{path}[{index}]"),
                        expected: left.get(index).cloned(),
                        actual: right.get(index).cloned(),
                    });
                }
                None
            }
            (Value::Number(left), Value::Number(right)) if left.as_f64() == right.as_f64() => None,
            (left, right) if left == right => None,
            (left, right) => Some(Difference {
                path: path.clone(),
                expected: Some(left.clone()),
                actual: Some(right.clone()),
            }),
        }
    })
}

fn diff_objects(
    path: &mut String,
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
) -> Option<Difference> {
    let mut keys: Vec<&String> = expected
        .keys()
        .chain(actual.keys().filter(|key| !expected.contains_key(*key)))
        .collect();
    keys.sort_by(|a, b| key_order(a, b));

    for key in keys {
        let len = path.len();
        path.push('.');
        path.push_str(key);
        let found = match (expected.get(key.as_str()), actual.get(key.as_str())) {
            (Some(l), Some(r)) => diff_at(path, l, r),
            (l, r) => Some(Difference {
                path: path.clone(),
                expected: l.cloned(),
                actual: r.cloned(),
            }),
        };
        path.truncate(len);
        if found.is_some() {
            return found;
        }
    }
    None
}
