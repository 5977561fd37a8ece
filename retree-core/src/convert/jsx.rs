//! JSX elements, attributes and names

use super::Walk;
use crate::error::Result;
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::Range;

impl Walk<'_> {
    /// A tag or attribute name; plain identifiers become `JSXIdentifier`
    fn jsx_name_part(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Child> {
        let name = src.node(field)?;
        if name.is(SourceKind::Identifier) {
            return Ok(Box::new(Node::JSXIdentifier(Named {
                range: self.range(&name)?,
                name: name.str("value")?.to_string(),
            })));
        }
        self.boxed(&name)
    }

    /// `a.b.c` and `ns:name`, ranging from the first part to the last
    pub(super) fn jsx_name(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        if src.is(SourceKind::JSXNamespacedName) {
            let namespace = self.jsx_name_part(src, "namespace")?;
            let name = self.jsx_name_part(src, "name")?;
            return Ok(Node::JSXNamespacedName(JsxNamespacedName {
                range: namespace.range().cover(name.range()),
                namespace,
                name,
            }));
        }
        let object = self.jsx_name_part(src, "object")?;
        let property = self.jsx_name_part(src, src.pick(&["property", "prop"]))?;
        Ok(Node::JSXMemberExpression(JsxMemberExpression {
            range: object.range().cover(property.range()),
            object,
            property,
        }))
    }

    pub(super) fn jsx_text(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXText(JsxText {
            range: self.range(src)?,
            value: src.str("value")?.to_string(),
            raw: src.str("raw")?.to_string(),
        }))
    }

    pub(super) fn jsx_empty_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXEmptyExpression(Leaf {
            range: self.range(src)?,
        }))
    }

    /// `{expr}`; an empty `{}` spans the inside of the braces
    pub(super) fn jsx_expression_container(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let inner = src.node("expression")?;
        let expression = if inner.is(SourceKind::JSXEmptyExpression) {
            Box::new(Node::JSXEmptyExpression(Leaf {
                range: self.offsets.jsx_empty_expression(src.span()?),
            }))
        } else {
            self.boxed(&inner)?
        };
        Ok(Node::JSXExpressionContainer(ExpressionWrapper {
            range: self.range(src)?,
            expression,
        }))
    }

    pub(super) fn jsx_spread_child(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXSpreadChild(ExpressionWrapper {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
        }))
    }

    pub(super) fn jsx_opening_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let mut attributes = Vec::new();
        for value in src.array("attributes")? {
            let attribute = SourceNode::new(value)?;
            if attribute.is(SourceKind::SpreadElement) {
                let marker = attribute.span_of("spread")?;
                let argument = self.child(&attribute, attribute.pick(&["arguments", "argument"]))?;
                attributes.push(Node::JSXSpreadAttribute(Argument {
                    range: self.offsets.jsx_spread_attribute(marker, argument.range()),
                    argument,
                }));
            } else {
                attributes.push(self.visit(&attribute)?);
            }
        }
        Ok(Node::JSXOpeningElement(JsxOpeningElement {
            range: self.range(src)?,
            type_parameters: self.opt_child(src, src.pick(&["typeArguments", "typeParameters"]))?,
            self_closing: src.bool("selfClosing")?,
            name: self.jsx_name_part(src, "name")?,
            attributes,
        }))
    }

    pub(super) fn jsx_closing_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXClosingElement(JsxClosingElement {
            range: self.range(src)?,
            name: self.jsx_name_part(src, "name")?,
        }))
    }

    pub(super) fn jsx_attribute(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXAttribute(JsxAttribute {
            range: self.range(src)?,
            name: self.jsx_name_part(src, "name")?,
            value: self.opt_child(src, "value")?,
        }))
    }

    pub(super) fn jsx_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXElement(JsxElement {
            range: self.range(src)?,
            opening_element: self.child(src, "opening")?,
            closing_element: self.opt_child(src, "closing")?,
            children: self.children(src, "children")?,
        }))
    }

    pub(super) fn jsx_fragment(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXFragment(JsxFragment {
            range: self.range(src)?,
            opening_fragment: self.child(src, "opening")?,
            closing_fragment: self.child(src, "closing")?,
            children: self.children(src, "children")?,
        }))
    }

    pub(super) fn jsx_opening_fragment(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXOpeningFragment(Leaf {
            range: self.range(src)?,
        }))
    }

    pub(super) fn jsx_closing_fragment(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::JSXClosingFragment(Leaf {
            range: self.range(src)?,
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
    fn test_self_closing_element_with_attributes() {
        // <a.b x="1" {...p} />
        let tree = json!({
            "type": "JSXElement",
            "span": span(1, 22),
            "opening": {
                "type": "JSXOpeningElement",
                "span": span(1, 22),
                "name": {
                    "type": "JSXMemberExpression",
                    "span": span(2, 5),
                    "object": ident(2, "a"),
                    "property": ident(4, "b")
                },
                "attributes": [
                    {
                        "type": "JSXAttribute",
                        "span": span(6, 11),
                        "name": ident(6, "x"),
                        "value": {"type": "StringLiteral", "span": span(8, 11), "value": "1", "raw": "\"1\""}
                    },
                    {"type": "SpreadElement", "spread": span(13, 16), "arguments": ident(16, "p")}
                ],
                "selfClosing": true,
                "typeArguments": null
            },
            "children": [],
            "closing": null
        });
        let value = translated(tree);
        assert_eq!(value["closingElement"], Value::Null);

        let opening = &value["openingElement"];
        assert_eq!(opening["selfClosing"], json!(true));
        assert_eq!(opening["name"]["type"], json!("JSXMemberExpression"));
        assert_eq!(opening["name"]["range"], json!([1, 4]));
        assert_eq!(opening["name"]["object"]["type"], json!("JSXIdentifier"));

        let attribute = &opening["attributes"][0];
        assert_eq!(attribute["name"]["type"], json!("JSXIdentifier"));
        assert_eq!(attribute["value"]["type"], json!("Literal"));

        let spread = &opening["attributes"][1];
        assert_eq!(spread["type"], json!("JSXSpreadAttribute"));
        assert_eq!(spread["range"], json!([11, 17]));
    }

    #[test]
    fn test_empty_expression_container() {
        // {}
        let tree = json!({
            "type": "JSXExpressionContainer",
            "span": span(4, 6),
            "expression": {"type": "JSXEmptyExpression", "span": span(5, 5)}
        });
        let value = translated(tree);
        assert_eq!(value["range"], json!([3, 5]));
        assert_eq!(value["expression"]["range"], json!([4, 4]));
    }

    #[test]
    fn test_fragment() {
        // <>t</>
        let tree = json!({
            "type": "JSXFragment",
            "span": span(1, 7),
            "opening": {"type": "JSXOpeningFragment", "span": span(1, 3)},
            "children": [{"type": "JSXText", "span": span(3, 4), "value": "t", "raw": "t"}],
            "closing": {"type": "JSXClosingFragment", "span": span(4, 7)}
        });
        let value = translated(tree);
        assert_eq!(value["openingFragment"]["range"], json!([0, 2]));
        assert_eq!(value["children"][0]["value"], json!("t"));
        assert_eq!(value["closingFragment"]["range"], json!([3, 6]));
    }
}
