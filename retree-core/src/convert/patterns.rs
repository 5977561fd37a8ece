//! Binding and assignment patterns

use super::Walk;
use crate::error::Result;
use crate::estree::*;
use crate::source::SourceNode;
use crate::span::Range;

impl Walk<'_> {
    /// Own range stretched over the optional type annotation
    fn annotated_range(&self, src: &SourceNode<'_>, annotation: Option<&Child>) -> Result<Range> {
        let range = self.range(src)?;
        Ok(self.offsets.annotated(range, annotation.map(|a| a.range())))
    }

    pub(super) fn array_pattern(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let type_annotation = self.opt_child(src, "typeAnnotation")?;
        Ok(Node::ArrayPattern(ArrayPattern {
            range: self.annotated_range(src, type_annotation.as_ref())?,
            elements: self.holes(src, "elements")?,
            type_annotation,
            optional: src.bool("optional")?,
            decorators: None,
        }))
    }

    pub(super) fn object_pattern(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let type_annotation = self.opt_child(src, "typeAnnotation")?;
        Ok(Node::ObjectPattern(ObjectPattern {
            range: self.annotated_range(src, type_annotation.as_ref())?,
            properties: self.children(src, "properties")?,
            type_annotation,
            optional: src.bool("optional")?,
            decorators: None,
        }))
    }

    pub(super) fn assignment_pattern(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let type_annotation = self.opt_child(src, "typeAnnotation")?;
        Ok(Node::AssignmentPattern(AssignmentPattern {
            range: self.annotated_range(src, type_annotation.as_ref())?,
            left: self.child(src, "left")?,
            right: self.child(src, "right")?,
            type_annotation,
            optional: false,
            decorators: None,
        }))
    }

    pub(super) fn rest_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let type_annotation = self.opt_child(src, "typeAnnotation")?;
        let argument = self.child(src, "argument")?;
        let range = match src.opt_span_of("rest")? {
            Some(marker) => {
                let own = self.range(src)?;
                let start = self.offsets.offset(marker.start).min(own.start());
                Range::new(start, own.end().max(argument.range().end()))
            }
            None => self.range(src)?,
        };
        Ok(Node::RestElement(RestElement {
            range: self
                .offsets
                .annotated(range, type_annotation.as_ref().map(|a| a.range())),
            argument,
            type_annotation,
            optional: false,
            decorators: None,
        }))
    }

    /// `{ key: pattern }`; SWC gives it no span of its own
    pub(super) fn key_value_pattern_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let key_span = src.node("key")?.span()?;
        let value_span = src.node("value")?.span()?;
        let (key, computed) = self.property_key(src, "key")?;
        Ok(Node::Property(Property {
            range: self.offsets.key_value(key_span, value_span),
            key,
            value: self.child(src, "value")?,
            computed,
            method: false,
            shorthand: false,
            kind: "init",
        }))
    }

    /// `{ a }` or `{ a = 1 }` in a pattern
    pub(super) fn assignment_pattern_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let key = self.child(src, "key")?;
        let value = match self.opt_child(src, "value")? {
            Some(right) => Box::new(Node::AssignmentPattern(AssignmentPattern {
                range,
                left: key.clone(),
                right,
                type_annotation: None,
                optional: false,
                decorators: None,
            })),
            None => key.clone(),
        };
        Ok(Node::Property(Property {
            range,
            key,
            value,
            computed: false,
            method: false,
            shorthand: true,
            kind: "init",
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::convert::translate;
    use serde_json::{json, Value};

    fn span(start: u32, end: u32) -> Value {
        json!({"start": start, "end": end, "ctxt": 0})
    }

    fn ident(start: u32, name: &str) -> Value {
        let end = start + name.len() as u32;
        json!({"type": "Identifier", "span": span(start, end), "value": name, "optional": false})
    }

    fn translated(tree: Value) -> Value {
        serde_json::to_value(translate(&tree).unwrap()).unwrap()
    }

    #[test]
    fn test_object_pattern_properties() {
        // { a = 1, b: c, ...d }
        let tree = json!({
            "type": "ObjectPattern",
            "span": span(1, 22),
            "properties": [
                {
                    "type": "AssignmentPatternProperty",
                    "span": span(3, 8),
                    "key": ident(3, "a"),
                    "value": {"type": "NumericLiteral", "span": span(7, 8), "value": 1.0, "raw": "1"}
                },
                {"type": "KeyValuePatternProperty", "key": ident(10, "b"), "value": ident(13, "c")},
                {"type": "RestElement", "span": span(16, 20), "rest": span(16, 19), "argument": ident(19, "d"), "typeAnnotation": null}
            ],
            "optional": false,
            "typeAnnotation": null
        });
        let value = translated(tree);
        let properties = value["properties"].as_array().unwrap();

        assert_eq!(properties[0]["shorthand"], json!(true));
        assert_eq!(properties[0]["value"]["type"], json!("AssignmentPattern"));
        assert_eq!(properties[0]["value"]["range"], json!([2, 7]));

        assert_eq!(properties[1]["shorthand"], json!(false));
        assert_eq!(properties[1]["range"], json!([9, 13]));

        assert_eq!(properties[2]["type"], json!("RestElement"));
        assert_eq!(properties[2]["range"], json!([15, 19]));
        assert!(value.get("typeAnnotation").is_none());
    }

    #[test]
    fn test_annotated_array_pattern() {
        // [a]: T
        let tree = json!({
            "type": "ArrayPattern",
            "span": span(1, 4),
            "elements": [ident(2, "a"), null],
            "optional": false,
            "typeAnnotation": {
                "type": "TsTypeAnnotation",
                "span": span(4, 7),
                "typeAnnotation": {
                    "type": "TsTypeReference",
                    "span": span(6, 7),
                    "typeName": ident(6, "T"),
                    "typeParams": null
                }
            }
        });
        let value = translated(tree);
        assert_eq!(value["range"], json!([0, 6]));
        assert_eq!(value["elements"][1], Value::Null);
        assert_eq!(value["typeAnnotation"]["type"], json!("TSTypeAnnotation"));
    }
}
