//! Read-only view over SWC JSON trees
//!
//! The translator never deserializes SWC trees into Rust types; it reads the
//! JSON produced by `@swc/core` through [`SourceNode`], whose accessors turn
//! every unexpected shape into a [`TranslateError::ShapeMismatch`] naming the
//! node kind and field.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, TranslateError};
use crate::kinds::SourceKind;
use crate::span::Span;

/// Stack segment for parsing arbitrarily nested JSON
const PARSE_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Parse SWC JSON without serde_json's nesting limit.
///
/// Real trees easily exceed 128 levels; depth is bounded later by
/// `TranslateConfig::max_depth`.
pub fn parse_tree(text: &str) -> serde_json::Result<Value> {
    stacker::grow(PARSE_STACK_SIZE, || {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(value)
    })
}

/// Human name of a JSON value's type, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A borrowed SWC node: its tag plus its fields
#[derive(Debug, Clone, Copy)]
pub struct SourceNode<'a> {
    kind: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> SourceNode<'a> {
    /// View a tagged object
    pub fn new(value: &'a Value) -> Result<Self> {
        let fields = value.as_object().ok_or(TranslateError::NotANode {
            found: json_type_name(value),
        })?;
        let kind = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or(TranslateError::NotANode {
                found: "an object without a `type` tag",
            })?;
        Ok(Self { kind, fields })
    }

    /// View an untagged record (SWC's `ExprOrSpread`) under a descriptive name
    pub fn untagged(value: &'a Value, kind: &'a str) -> Result<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| TranslateError::shape(kind, "", "an object"))?;
        Ok(Self { kind, fields })
    }

    pub fn kind(&self) -> &'a str {
        self.kind
    }

    /// The tag resolved against the closed kind set
    pub fn source_kind(&self) -> Result<SourceKind> {
        SourceKind::parse(self.kind).ok_or_else(|| TranslateError::UnmappedKind {
            kind: self.kind.to_string(),
        })
    }

    pub fn is(&self, kind: SourceKind) -> bool {
        self.kind == kind.name()
    }

    fn mismatch(&self, field: &str, expected: &'static str) -> TranslateError {
        TranslateError::shape(self.kind, field, expected)
    }

    /// A field's value; absent and `null` are both `None`
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// First of `fields` that is present, else the first name
    ///
    /// SWC renamed a few fields between releases (`typeAnn`/`typeAnnotation`,
    /// `prop`/`property`); rules accept both spellings.
    pub fn pick(&self, fields: &[&'static str]) -> &'static str {
        fields
            .iter()
            .copied()
            .find(|field| self.has(field))
            .unwrap_or_else(|| fields.first().copied().unwrap_or(""))
    }

    pub fn value(&self, field: &str) -> Result<&'a Value> {
        self.get(field).ok_or_else(|| self.mismatch(field, "a value"))
    }

    pub fn node(&self, field: &str) -> Result<SourceNode<'a>> {
        let value = self.get(field).ok_or_else(|| self.mismatch(field, "a node"))?;
        SourceNode::new(value).map_err(|_| self.mismatch(field, "a node"))
    }

    pub fn opt_node(&self, field: &str) -> Result<Option<SourceNode<'a>>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => SourceNode::new(value)
                .map(Some)
                .map_err(|_| self.mismatch(field, "a node or null")),
        }
    }

    /// Tag of a child node without building a view
    pub fn child_kind(&self, field: &str) -> Option<&'a str> {
        self.get(field)?.get("type")?.as_str()
    }

    pub fn array(&self, field: &str) -> Result<&'a [Value]> {
        match self.get(field) {
            Some(Value::Array(items)) => Ok(items.as_slice()),
            _ => Err(self.mismatch(field, "an array")),
        }
    }

    /// Absent or `null` reads as empty
    pub fn opt_array(&self, field: &str) -> Result<&'a [Value]> {
        match self.get(field) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(self.mismatch(field, "an array or null")),
        }
    }

    pub fn str(&self, field: &str) -> Result<&'a str> {
        self.get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| self.mismatch(field, "a string"))
    }

    pub fn opt_str(&self, field: &str) -> Result<Option<&'a str>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.mismatch(field, "a string or null")),
        }
    }

    /// Boolean SWC always writes; absence is a shape fault
    pub fn flag(&self, field: &str) -> Result<bool> {
        match self.get(field) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(self.mismatch(field, "a boolean")),
        }
    }

    /// Absent reads as `false`
    pub fn bool(&self, field: &str) -> Result<bool> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.mismatch(field, "a boolean")),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.span_of("span")
    }

    pub fn span_of(&self, field: &str) -> Result<Span> {
        self.get(field)
            .and_then(Span::from_value)
            .ok_or_else(|| self.mismatch(field, "a span"))
    }

    pub fn opt_span_of(&self, field: &str) -> Result<Option<Span>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => Span::from_value(value)
                .map(Some)
                .ok_or_else(|| self.mismatch(field, "a span or null")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_non_nodes() {
        let err = SourceNode::new(&json!([1, 2])).unwrap_err();
        assert_eq!(err, TranslateError::NotANode { found: "an array" });

        let err = SourceNode::new(&json!({"span": {"start": 1, "end": 2}})).unwrap_err();
        assert!(matches!(err, TranslateError::NotANode { .. }));
    }

    #[test]
    fn test_accessors() {
        let value = json!({
            "type": "Identifier",
            "span": {"start": 1, "end": 4, "ctxt": 0},
            "value": "foo",
            "optional": false,
            "typeAnnotation": null
        });
        let node = SourceNode::new(&value).unwrap();
        assert_eq!(node.kind(), "Identifier");
        assert_eq!(node.source_kind().unwrap(), SourceKind::Identifier);
        assert_eq!(node.str("value").unwrap(), "foo");
        assert!(!node.bool("optional").unwrap());
        assert!(!node.bool("missing").unwrap());
        assert!(node.opt_node("typeAnnotation").unwrap().is_none());
        assert_eq!(node.span().unwrap(), Span::new(1, 4));
        assert!(node.opt_array("decorators").unwrap().is_empty());
    }

    #[test]
    fn test_shape_mismatch_names_kind_and_field() {
        let value = json!({"type": "CallExpression", "arguments": {}});
        let node = SourceNode::new(&value).unwrap();
        let err = node.array("arguments").unwrap_err();
        assert_eq!(
            err,
            TranslateError::ShapeMismatch {
                kind: "CallExpression".to_string(),
                field: "arguments".to_string(),
                expected: "an array",
            }
        );
        assert!(node.node("callee").is_err());
    }

    #[test]
    fn test_flag_is_required() {
        let value = json!({"type": "TemplateElement", "tail": true, "raw": "x"});
        let node = SourceNode::new(&value).unwrap();
        assert!(node.flag("tail").unwrap());
        assert!(node.flag("async").is_err());
        assert!(!node.bool("async").unwrap());

        let record = json!({"params": [], "async": false});
        let function = SourceNode::untagged(&record, "Function").unwrap();
        assert_eq!(function.kind(), "Function");
        assert!(!function.flag("async").unwrap());
    }

    #[test]
    fn test_unknown_kind() {
        let value = json!({"type": "FancyExpression"});
        let node = SourceNode::new(&value).unwrap();
        assert_eq!(
            node.source_kind().unwrap_err(),
            TranslateError::UnmappedKind {
                kind: "FancyExpression".to_string()
            }
        );
    }

    #[test]
    fn test_pick_prefers_present_field() {
        let value = json!({"type": "TsMethodSignature", "typeAnn": {"type": "TsTypeAnnotation"}});
        let node = SourceNode::new(&value).unwrap();
        assert_eq!(node.pick(&["typeAnnotation", "typeAnn"]), "typeAnn");
        assert_eq!(node.pick(&["typeParams", "typeParameters"]), "typeParams");
    }

    #[test]
    fn test_parse_tree_beyond_default_recursion_limit() {
        let depth = 1000;
        let text = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse_tree(&text).is_ok());
        assert!(parse_tree("{\"a\": 1} trailing").is_err());
    }
}
