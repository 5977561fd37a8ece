//! Expressions, literals, object members and optional chains

use serde_json::{Number, Value};

use super::Walk;
use crate::error::{Result, TranslateError};
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::Range;

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Walk<'_> {
    // ========================================================================
    // Primary expressions
    // ========================================================================

    pub(super) fn this_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ThisExpression(Leaf {
            range: self.range(src)?,
        }))
    }

    pub(super) fn super_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::Super(Leaf {
            range: self.range(src)?,
        }))
    }

    /// Identifiers and binding identifiers; the range covers `?` and the
    /// type annotation
    pub(super) fn identifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let optional = src.bool("optional")?;
        let type_annotation = self.opt_child(src, "typeAnnotation")?;
        let mut range = self.range(src)?;
        if optional {
            range = Range::new(range.start(), range.end().saturating_add(1));
        }
        let range = self
            .offsets
            .annotated(range, type_annotation.as_ref().map(|t| t.range()));
        Ok(Node::Identifier(Identifier {
            range,
            name: src.str("value")?.to_string(),
            type_annotation,
            optional,
            decorators: None,
        }))
    }

    /// `#name`; newer SWC releases store the name directly
    pub(super) fn private_name(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let name = match src.opt_node("id")? {
            Some(id) => id.str("value")?,
            None => src.str("name")?,
        };
        Ok(Node::PrivateIdentifier(Named {
            range: self.range(src)?,
            name: name.trim_start_matches('#').to_string(),
        }))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub(super) fn string_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let value = src.str("value")?;
        let raw = match src.opt_str("raw")? {
            Some(raw) => raw.to_string(),
            None => Value::from(value).to_string(),
        };
        Ok(Node::Literal(Literal::new(self.range(src)?, Value::from(value), raw)))
    }

    pub(super) fn boolean_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let value = src.bool("value")?;
        Ok(Node::Literal(Literal::new(
            self.range(src)?,
            Value::Bool(value),
            value.to_string(),
        )))
    }

    pub(super) fn null_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::Literal(Literal::new(self.range(src)?, Value::Null, "null")))
    }

    pub(super) fn numeric_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let number = src
            .value("value")?
            .as_f64()
            .ok_or_else(|| TranslateError::shape(src.kind(), "value", "a number"))?;
        let raw = match src.opt_str("raw")? {
            Some(raw) => raw.to_string(),
            None => number.to_string(),
        };
        Ok(Node::Literal(Literal::new(
            self.range(src)?,
            number_value(number),
            raw,
        )))
    }

    /// `123n`: no JSON value; `bigint` holds the decimal digits
    pub(super) fn bigint_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let raw = src.str("raw")?;
        let mut literal = Literal::new(self.range(src)?, Value::Null, raw);
        literal.bigint = Some(bigint_digits(raw));
        Ok(Node::Literal(literal))
    }

    pub(super) fn regexp_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let pattern = src.str("pattern")?;
        let flags = src.opt_str("flags")?.unwrap_or_default();
        let mut literal = Literal::new(
            self.range(src)?,
            Value::Object(Default::default()),
            format!("/{pattern}/{flags}"),
        );
        literal.regex = Some(Regex {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
        });
        Ok(Node::Literal(literal))
    }

    pub(super) fn template_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TemplateLiteral(TemplateLiteral {
            range: self.range(src)?,
            quasis: self.children(src, "quasis")?,
            expressions: self.children(src, "expressions")?,
        }))
    }

    /// A template chunk, widened over its delimiters
    pub(super) fn template_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let tail = src.flag("tail")?;
        Ok(Node::TemplateElement(TemplateElement {
            range: self.offsets.template_chunk(src.span()?, tail),
            value: TemplateValue {
                raw: src.str("raw")?.to_string(),
                cooked: src.opt_str("cooked")?.map(str::to_string),
            },
            tail,
        }))
    }

    pub(super) fn tagged_template(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TaggedTemplateExpression(TaggedTemplate {
            range: self.range(src)?,
            tag: self.child(src, "tag")?,
            quasi: self.child(src, src.pick(&["template", "quasi"]))?,
            type_parameters: self.opt_child(src, src.pick(&["typeParameters", "typeArguments"]))?,
        }))
    }

    // ========================================================================
    // Arrays, objects and spreads
    // ========================================================================

    /// `ExprOrSpread` entries: spreads become `SpreadElement`, anything else
    /// is the bare expression
    pub(super) fn arguments(&mut self, values: &[Value]) -> Result<Vec<Node>> {
        values.iter().map(|value| self.argument(value)).collect()
    }

    fn argument(&mut self, value: &Value) -> Result<Node> {
        let entry = SourceNode::untagged(value, "ExprOrSpread")?;
        let expression = entry.node("expression")?;
        let argument = self.boxed(&expression)?;
        match entry.opt_span_of("spread")? {
            Some(marker) => Ok(Node::SpreadElement(Argument {
                range: self.offsets.spread_element(marker, argument.range()),
                argument,
            })),
            None => Ok(*argument),
        }
    }

    pub(super) fn array_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let elements = src
            .array("elements")?
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                value => self.argument(value).map(Some),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Node::ArrayExpression(ArrayExpression {
            range: self.range(src)?,
            elements,
        }))
    }

    pub(super) fn object_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let mut properties = Vec::new();
        for value in src.array("properties")? {
            let member = SourceNode::new(value)?;
            if member.is(SourceKind::Identifier) {
                properties.push(self.shorthand_property(&member)?);
            } else {
                properties.push(self.visit(&member)?);
            }
        }
        Ok(Node::ObjectExpression(ObjectExpression {
            range: self.range(src)?,
            properties,
        }))
    }

    /// `{ a }`: key and value are separate copies of the identifier
    fn shorthand_property(&mut self, ident: &SourceNode<'_>) -> Result<Node> {
        let key = self.boxed(ident)?;
        let value = key.clone();
        Ok(Node::Property(Property {
            range: key.range(),
            key,
            value,
            computed: false,
            method: false,
            shorthand: true,
            kind: "init",
        }))
    }

    /// Object-literal and JSX-attribute spreads
    pub(super) fn spread_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let marker = src.span_of("spread")?;
        let argument = self.child(src, src.pick(&["arguments", "argument", "expression"]))?;
        Ok(Node::SpreadElement(Argument {
            range: self.offsets.spread_element(marker, argument.range()),
            argument,
        }))
    }

    // ========================================================================
    // Object members
    // ========================================================================

    /// A property key; `[expr]` keys translate to the inner expression
    pub(super) fn property_key(&mut self, src: &SourceNode<'_>, field: &str) -> Result<(Child, bool)> {
        let key = src.node(field)?;
        if key.is(SourceKind::Computed) {
            let inner = key.node("expression")?;
            return Ok((self.boxed(&inner)?, true));
        }
        Ok((self.boxed(&key)?, false))
    }

    /// 0-based end of a key as written, brackets of computed keys included
    pub(super) fn key_end(&self, src: &SourceNode<'_>, field: &str) -> Result<u32> {
        let key = src.node(field)?;
        Ok(self.offsets.offset(key.span()?.end))
    }

    pub(super) fn key_value_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
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

    /// `{ a = 1 }` in an object literal later reinterpreted as a pattern
    pub(super) fn assignment_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let key = self.child(src, "key")?;
        let right = self.child(src, "value")?;
        let value = Node::AssignmentPattern(AssignmentPattern {
            range,
            left: key.clone(),
            right,
            type_annotation: None,
            optional: false,
            decorators: None,
        });
        Ok(Node::Property(Property {
            range,
            key,
            value: Box::new(value),
            computed: false,
            method: false,
            shorthand: true,
            kind: "init",
        }))
    }

    pub(super) fn getter_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        self.accessor_property(src, "get")
    }

    pub(super) fn setter_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        self.accessor_property(src, "set")
    }

    /// `get a() {}` / `set a(v) {}`; the value function starts at `(`
    fn accessor_property(&mut self, src: &SourceNode<'_>, kind: &'static str) -> Result<Node> {
        let span = src.span()?;
        let open = self.key_end(src, "key")?;
        let (key, computed) = self.property_key(src, "key")?;
        let params = match src.opt_node("param")? {
            Some(param) => vec![self.visit(&param)?],
            None => Vec::new(),
        };
        let value = Node::FunctionExpression(Function {
            range: self.offsets.method_value_from(span, open),
            id: None,
            generator: false,
            expression: false,
            is_async: false,
            params,
            body: self.function_body(src, "body")?,
            return_type: self.opt_child(src, "typeAnnotation")?,
            type_parameters: None,
            declare: false,
        });
        Ok(Node::Property(Property {
            range: self.range(src)?,
            key,
            value: Box::new(value),
            computed,
            method: false,
            shorthand: false,
            kind,
        }))
    }

    /// `{ m() {} }`; the function fields sit on the property itself
    pub(super) fn method_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let mut open = self.key_end(src, "key")?;
        if let Some(type_params) = src.opt_node("typeParameters")? {
            open = self.offsets.offset(type_params.span()?.start);
        }
        // the flattened function span may start after the key
        let function = self.range(src)?;
        let key_start = self.offsets.offset(src.node("key")?.span()?.start);
        let (key, computed) = self.property_key(src, "key")?;
        let value = self.method_function(src, open)?;
        Ok(Node::Property(Property {
            range: Range::new(function.start().min(key_start), function.end()),
            key,
            value: Box::new(value),
            computed,
            method: true,
            shorthand: false,
            kind: "init",
        }))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    pub(super) fn unary_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::UnaryExpression(Unary {
            range: self.range(src)?,
            operator: src.str("operator")?.to_string(),
            prefix: true,
            argument: self.child(src, "argument")?,
        }))
    }

    pub(super) fn update_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::UpdateExpression(Unary {
            range: self.range(src)?,
            operator: src.str("operator")?.to_string(),
            prefix: src.bool("prefix")?,
            argument: self.child(src, "argument")?,
        }))
    }

    /// `&&`, `||` and `??` refine to `LogicalExpression`
    pub(super) fn binary_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let operator = src.str("operator")?;
        let binary = Binary {
            range: self.range(src)?,
            operator: operator.to_string(),
            left: self.child(src, "left")?,
            right: self.child(src, "right")?,
        };
        Ok(match operator {
            "&&" | "||" | "??" => Node::LogicalExpression(binary),
            _ => Node::BinaryExpression(binary),
        })
    }

    pub(super) fn assignment_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::AssignmentExpression(Binary {
            range: self.range(src)?,
            operator: src.str("operator")?.to_string(),
            left: self.child(src, "left")?,
            right: self.child(src, "right")?,
        }))
    }

    pub(super) fn conditional_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ConditionalExpression(Conditional {
            range: self.range(src)?,
            test: self.child(src, "test")?,
            consequent: self.child(src, "consequent")?,
            alternate: self.child(src, "alternate")?,
        }))
    }

    pub(super) fn sequence_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::SequenceExpression(Sequence {
            range: self.range(src)?,
            expressions: self.children(src, "expressions")?,
        }))
    }

    pub(super) fn yield_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::YieldExpression(Yield {
            range: self.range(src)?,
            delegate: src.bool("delegate")?,
            argument: self.opt_child(src, "argument")?,
        }))
    }

    pub(super) fn await_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::AwaitExpression(Argument {
            range: self.range(src)?,
            argument: self.child(src, "argument")?,
        }))
    }

    /// `new.target` / `import.meta`, split into two identifiers
    pub(super) fn meta_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let span = src.span()?;
        let (meta, property) = match src.str("kind")? {
            "new.target" | "NewTarget" => (("new", 3), ("target", 6)),
            "import.meta" | "ImportMeta" => (("import", 6), ("meta", 4)),
            _ => return Err(TranslateError::shape(src.kind(), "kind", "new.target or import.meta")),
        };
        Ok(Node::MetaProperty(MetaProperty {
            range: self.offsets.range(span),
            meta: Box::new(Node::Identifier(Identifier::new(
                self.offsets.leading(span, meta.1),
                meta.0,
            ))),
            property: Box::new(Node::Identifier(Identifier::new(
                self.offsets.trailing(span, property.1),
                property.0,
            ))),
        }))
    }

    // ========================================================================
    // Members, calls and optional chains
    // ========================================================================

    /// Translate a link of a member/call chain. A nested optional chain
    /// is folded into the enclosing one unless parenthesized.
    pub(super) fn chain_link(&mut self, src: &SourceNode<'_>, field: &str) -> Result<(Child, bool)> {
        let child = src.node(field)?;
        let node = self.visit(&child)?;
        match node {
            Node::ChainExpression(chain) if !child.is(SourceKind::ParenthesisExpression) => {
                Ok((chain.expression, true))
            }
            node => Ok((Box::new(node), false)),
        }
    }

    /// Wrap the outermost node of a folded chain
    fn close_chain(node: Node, chained: bool) -> Node {
        if !chained {
            return node;
        }
        Node::ChainExpression(ExpressionWrapper {
            range: node.range(),
            expression: Box::new(node),
        })
    }

    pub(super) fn member_expression(&mut self, src: &SourceNode<'_>, optional: bool) -> Result<(Node, bool)> {
        let (object, chained) = self.chain_link(src, "object")?;
        let (property, computed) = self.property_key(src, "property")?;
        let member = Node::MemberExpression(Member {
            range: self.range(src)?,
            object,
            property,
            computed,
            optional,
        });
        Ok((member, chained))
    }

    pub(super) fn member(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let (member, chained) = self.member_expression(src, false)?;
        Ok(Self::close_chain(member, chained))
    }

    /// `super.x` / `super[x]`
    pub(super) fn super_member(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let (property, computed) = self.property_key(src, src.pick(&["property", "prop"]))?;
        Ok(Node::MemberExpression(Member {
            range: self.range(src)?,
            object: self.child(src, "obj")?,
            property,
            computed,
            optional: false,
        }))
    }

    pub(super) fn call_expression(&mut self, src: &SourceNode<'_>, optional: bool) -> Result<(Node, bool)> {
        let (callee, chained) = self.chain_link(src, "callee")?;
        let call = Node::CallExpression(Call {
            range: self.range(src)?,
            callee,
            arguments: self.arguments(src.array("arguments")?)?,
            optional,
            type_parameters: self.opt_child(src, src.pick(&["typeArguments", "typeParameters"]))?,
        });
        Ok((call, chained))
    }

    /// Calls; `import(...)` becomes an `ImportExpression`
    pub(super) fn call(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        if src.child_kind("callee") == Some(SourceKind::Import.name()) {
            let source = match src.array("arguments")?.first() {
                Some(first) => self.argument(first)?,
                None => return Err(TranslateError::shape(src.kind(), "arguments", "a module specifier")),
            };
            return Ok(Node::ImportExpression(ImportExpression {
                range: self.range(src)?,
                source: Box::new(source),
            }));
        }
        let (call, chained) = self.call_expression(src, false)?;
        Ok(Self::close_chain(call, chained))
    }

    pub(super) fn new_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::NewExpression(New {
            range: self.range(src)?,
            callee: self.child(src, "callee")?,
            arguments: self.arguments(src.opt_array("arguments")?)?,
            type_parameters: self.opt_child(src, src.pick(&["typeArguments", "typeParameters"]))?,
        }))
    }

    /// `a?.b`, `a?.()`: the base is flagged optional and the whole chain is
    /// wrapped once; nested links fold into it through `chain_link`
    pub(super) fn optional_chain(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let optional = match src.get("optional") {
            Some(Value::Bool(flag)) => *flag,
            _ => match src.opt_span_of("questionDotToken")? {
                Some(token) => !token.is_dummy(),
                None => false,
            },
        };
        let base = src.node("base")?;
        let (inner, _) = if base.is(SourceKind::MemberExpression) {
            self.member_expression(&base, optional)?
        } else if base.is(SourceKind::CallExpression) {
            self.call_expression(&base, optional)?
        } else {
            return Err(TranslateError::shape(src.kind(), "base", "a member or call expression"));
        };
        Ok(Node::ChainExpression(ExpressionWrapper {
            range: inner.range(),
            expression: Box::new(inner),
        }))
    }

    /// `a!`, folded into an enclosing optional chain
    pub(super) fn non_null(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let (expression, chained) = self.chain_link(src, "expr")?;
        let node = Node::TSNonNullExpression(ExpressionWrapper {
            range: self.range(src)?,
            expression,
        });
        Ok(Self::close_chain(node, chained))
    }
}

/// Integral values serialize as JSON integers, like `JSON.stringify`
fn number_value(number: f64) -> Value {
    if number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Value::from(number as i64);
    }
    Number::from_f64(number).map_or(Value::Null, Value::Number)
}

/// Decimal digits of a bigint literal: separators and the `n` suffix
/// dropped, hex/octal/binary converted when they fit in 128 bits
fn bigint_digits(raw: &str) -> String {
    let digits: String = raw
        .trim_end_matches('n')
        .chars()
        .filter(|c| *c != '_')
        .collect();
    let lower = digits.to_ascii_lowercase();
    let radix = if lower.starts_with("0x") {
        16
    } else if lower.starts_with("0o") {
        8
    } else if lower.starts_with("0b") {
        2
    } else {
        return digits;
    };
    match u128::from_str_radix(&lower[2..], radix) {
        Ok(value) => value.to_string(),
        Err(_) => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::translate;
    use serde_json::json;

    fn span(start: u32, end: u32) -> Value {
        json!({"start": start, "end": end, "ctxt": 0})
    }

    fn ident(start: u32, name: &str) -> Value {
        let end = start + name.len() as u32;
        json!({"type": "Identifier", "span": span(start, end), "value": name, "optional": false})
    }

    fn number(start: u32, value: f64, raw: &str) -> Value {
        let end = start + raw.len() as u32;
        json!({"type": "NumericLiteral", "span": span(start, end), "value": value, "raw": raw})
    }

    fn translated(tree: Value) -> Value {
        serde_json::to_value(translate(&tree).unwrap()).unwrap()
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(1.0), json!(1));
        assert_eq!(number_value(-3.0), json!(-3));
        assert_eq!(number_value(1.5), json!(1.5));
        assert_eq!(number_value(1e300), json!(1e300));
        assert_eq!(number_value(f64::INFINITY), Value::Null);
    }

    #[test]
    fn test_bigint_digits() {
        assert_eq!(bigint_digits("123n"), "123");
        assert_eq!(bigint_digits("1_000n"), "1000");
        assert_eq!(bigint_digits("0x10n"), "16");
        assert_eq!(bigint_digits("0b101n"), "5");
    }

    #[test]
    fn test_binary_and_logical() {
        // 1 + 2
        let tree = json!({
            "type": "BinaryExpression",
            "span": span(1, 6),
            "operator": "+",
            "left": number(1, 1.0, "1"),
            "right": number(5, 2.0, "2")
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("BinaryExpression"));
        assert_eq!(value["range"], json!([0, 5]));
        assert_eq!(value["left"]["value"], json!(1));
        assert_eq!(value["right"]["raw"], json!("2"));

        // a ?? b
        let tree = json!({
            "type": "BinaryExpression",
            "span": span(1, 7),
            "operator": "??",
            "left": ident(1, "a"),
            "right": ident(6, "b")
        });
        assert_eq!(translated(tree)["type"], json!("LogicalExpression"));
    }

    #[test]
    fn test_shorthand_property() {
        // ({ a })
        let tree = json!({
            "type": "ParenthesisExpression",
            "span": span(1, 8),
            "expression": {
                "type": "ObjectExpression",
                "span": span(2, 7),
                "properties": [ident(4, "a")]
            }
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("ObjectExpression"));
        let property = &value["properties"][0];
        assert_eq!(property["type"], json!("Property"));
        assert_eq!(property["shorthand"], json!(true));
        assert_eq!(property["kind"], json!("init"));
        assert_eq!(property["key"], property["value"]);
        assert_eq!(property["range"], json!([3, 4]));
    }

    #[test]
    fn test_key_value_property_range() {
        // ({ [k]: 1 })
        let tree = json!({
            "type": "ObjectExpression",
            "span": span(2, 12),
            "properties": [{
                "type": "KeyValueProperty",
                "key": {"type": "Computed", "span": span(4, 7), "expression": ident(5, "k")},
                "value": number(9, 1.0, "1")
            }]
        });
        let property = translated(tree)["properties"][0].clone();
        assert_eq!(property["computed"], json!(true));
        assert_eq!(property["key"]["name"], json!("k"));
        assert_eq!(property["range"], json!([3, 9]));
    }

    #[test]
    fn test_spread_argument() {
        // f(...xs)
        let tree = json!({
            "type": "CallExpression",
            "span": span(1, 9),
            "callee": ident(1, "f"),
            "arguments": [{"spread": span(3, 6), "expression": ident(6, "xs")}],
            "typeArguments": null
        });
        let value = translated(tree);
        let spread = &value["arguments"][0];
        assert_eq!(spread["type"], json!("SpreadElement"));
        assert_eq!(spread["range"], json!([2, 7]));
        assert_eq!(value["optional"], json!(false));
        assert!(value.get("typeParameters").is_none());
    }

    #[test]
    fn test_array_holes_kept() {
        // [, a]
        let tree = json!({
            "type": "ArrayExpression",
            "span": span(1, 6),
            "elements": [null, {"spread": null, "expression": ident(4, "a")}]
        });
        let value = translated(tree);
        assert_eq!(value["elements"][0], Value::Null);
        assert_eq!(value["elements"][1]["name"], json!("a"));
    }

    #[test]
    fn test_template_literal_chunks() {
        // `x${y}z`
        let tree = json!({
            "type": "TemplateLiteral",
            "span": span(1, 9),
            "expressions": [ident(5, "y")],
            "quasis": [
                {"type": "TemplateElement", "span": span(2, 3), "tail": false, "cooked": "x", "raw": "x"},
                {"type": "TemplateElement", "span": span(7, 8), "tail": true, "cooked": "z", "raw": "z"}
            ]
        });
        let value = translated(tree);
        assert_eq!(value["range"], json!([0, 8]));
        assert_eq!(value["quasis"][0]["range"], json!([0, 4]));
        assert_eq!(value["quasis"][1]["range"], json!([5, 8]));
        assert_eq!(value["quasis"][1]["value"], json!({"raw": "z", "cooked": "z"}));
    }

    #[test]
    fn test_optional_chain_folds_links() {
        // a?.b.c
        let inner = json!({
            "type": "OptionalChainingExpression",
            "span": span(1, 5),
            "optional": true,
            "base": {
                "type": "MemberExpression",
                "span": span(1, 5),
                "object": ident(1, "a"),
                "property": ident(4, "b")
            }
        });
        let tree = json!({
            "type": "MemberExpression",
            "span": span(1, 7),
            "object": inner,
            "property": ident(6, "c")
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("ChainExpression"));
        assert_eq!(value["range"], json!([0, 6]));
        let outer = &value["expression"];
        assert_eq!(outer["type"], json!("MemberExpression"));
        assert_eq!(outer["optional"], json!(false));
        assert_eq!(outer["object"]["type"], json!("MemberExpression"));
        assert_eq!(outer["object"]["optional"], json!(true));
    }

    #[test]
    fn test_call_requires_arguments() {
        let tree = json!({"type": "CallExpression", "span": span(1, 4), "callee": ident(1, "f")});
        assert_eq!(
            translate(&tree).unwrap_err(),
            TranslateError::ShapeMismatch {
                kind: "CallExpression".to_string(),
                field: "arguments".to_string(),
                expected: "an array",
            }
        );
    }

    #[test]
    fn test_template_element_requires_tail() {
        let tree = json!({"type": "TemplateElement", "span": span(2, 3), "cooked": "x", "raw": "x"});
        let err = translate(&tree).unwrap_err();
        assert!(matches!(err, TranslateError::ShapeMismatch { ref field, .. } if field == "tail"));
    }

    #[test]
    fn test_import_call() {
        // import("m")
        let tree = json!({
            "type": "CallExpression",
            "span": span(1, 12),
            "callee": {"type": "Import", "span": span(1, 7), "phase": "evaluation"},
            "arguments": [{"expression": {"type": "StringLiteral", "span": span(8, 11), "value": "m", "raw": "\"m\""}}]
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("ImportExpression"));
        assert_eq!(value["source"]["value"], json!("m"));
    }

    #[test]
    fn test_meta_property() {
        let tree = json!({"type": "MetaProperty", "span": span(1, 11), "kind": "new.target"});
        let value = translated(tree);
        assert_eq!(value["meta"]["range"], json!([0, 3]));
        assert_eq!(value["property"]["range"], json!([4, 10]));
        assert_eq!(value["property"]["name"], json!("target"));
    }

    #[test]
    fn test_regexp_literal() {
        let tree = json!({"type": "RegExpLiteral", "span": span(1, 7), "pattern": "ab", "flags": "gi"});
        let value = translated(tree);
        assert_eq!(value["raw"], json!("/ab/gi"));
        assert_eq!(value["value"], json!({}));
        assert_eq!(value["regex"], json!({"pattern": "ab", "flags": "gi"}));
    }
}
