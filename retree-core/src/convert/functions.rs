//! Functions, classes and class members

use super::Walk;
use crate::error::{Result, TranslateError};
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::Range;

/// Length of the `class` keyword
const CLASS_KEYWORD: u32 = 5;

fn method_kind(kind: &str) -> Option<&'static str> {
    match kind {
        "method" => Some("method"),
        "getter" => Some("get"),
        "setter" => Some("set"),
        _ => None,
    }
}

impl Walk<'_> {
    // ========================================================================
    // Functions
    // ========================================================================

    /// Fields shared by every function form, read from an SWC `Function`
    fn function_parts(&mut self, src: &SourceNode<'_>, range: Range) -> Result<Function> {
        Ok(Function {
            range,
            id: None,
            generator: src.flag("generator")?,
            expression: false,
            is_async: src.flag("async")?,
            params: self.children(src, "params")?,
            body: self.function_body(src, "body")?,
            return_type: self.opt_child(src, "returnType")?,
            type_parameters: self.opt_child(src, "typeParameters")?,
            declare: false,
        })
    }

    /// `function f() {}`; overloads and `declare function` have no body
    pub(super) fn function_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let mut function = self.function_parts(src, range)?;
        function.id = Some(self.child(src, "identifier")?);
        function.declare = src.bool("declare")?;
        if function.declare || function.body.is_none() {
            return Ok(Node::TSDeclareFunction(function.into()));
        }
        Ok(Node::FunctionDeclaration(function))
    }

    pub(super) fn function_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let mut function = self.function_parts(src, range)?;
        function.id = self.opt_child(src, "identifier")?;
        Ok(Node::FunctionExpression(function))
    }

    pub(super) fn arrow_function(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let body = self
            .function_body(src, "body")?
            .ok_or_else(|| TranslateError::shape(src.kind(), "body", "a node"))?;
        Ok(Node::ArrowFunctionExpression(Function {
            range: self.range(src)?,
            id: None,
            generator: false,
            expression: !body.is_block(),
            is_async: src.flag("async")?,
            params: self.children(src, "params")?,
            body: Some(body),
            return_type: self.opt_child(src, "returnType")?,
            type_parameters: self.opt_child(src, "typeParameters")?,
            declare: false,
        }))
    }

    /// The function value of a method; `open` is where its parameter list
    /// (or type parameter list) starts
    pub(super) fn method_function(&mut self, src: &SourceNode<'_>, open: u32) -> Result<Node> {
        let range = self.offsets.method_value_from(src.span()?, open);
        let function = self.function_parts(src, range)?;
        if function.body.is_none() {
            return Ok(Node::TSEmptyBodyFunctionExpression(function));
        }
        Ok(Node::FunctionExpression(function))
    }

    /// `Param` has no node of its own: the pattern, carrying the decorators
    pub(super) fn param(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let mut pattern = self.visit(&src.node("pat")?)?;
        let decorators = self.opt_children(src, "decorators")?;
        if !decorators.is_empty() && !pattern.set_decorators(decorators) {
            return Err(TranslateError::shape(src.kind(), "decorators", "a decoratable binding"));
        }
        Ok(pattern)
    }

    pub(super) fn decorator(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::Decorator(ExpressionWrapper {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
        }))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(super) fn class(&mut self, src: &SourceNode<'_>, declaration: bool) -> Result<Node> {
        let range = self.range(src)?;
        let type_params_field = src.pick(&["typeParams", "typeParameters"]);
        let super_params_field = src.pick(&["superTypeParams", "superTypeParameters"]);
        let header_end = self.class_header_end(src, range, &[
            "identifier",
            type_params_field,
            "superClass",
            super_params_field,
        ])?;

        let members = src.array("body")?;
        let first_member = match members.first() {
            Some(first) => Some(self.offsets.offset(SourceNode::new(first)?.span()?.start)),
            None => None,
        };
        let mut body = Vec::with_capacity(members.len());
        for value in members {
            let member = SourceNode::new(value)?;
            if !member.is(SourceKind::EmptyStatement) {
                body.push(self.visit(&member)?);
            }
        }

        let mut implements = Vec::new();
        for value in src.opt_array("implements")? {
            let clause = SourceNode::new(value)?;
            implements.push(self.heritage(&clause, true)?);
        }

        let class = Class {
            range,
            id: self.opt_child(src, "identifier")?,
            body: Box::new(Node::ClassBody(Block {
                range: self.offsets.class_body(header_end, first_member, range),
                body,
            })),
            super_class: self.opt_child(src, "superClass")?,
            type_parameters: self.opt_child(src, type_params_field)?,
            super_type_parameters: self.opt_child(src, super_params_field)?,
            implements: if implements.is_empty() { None } else { Some(implements) },
            is_abstract: src.bool("isAbstract")?,
            declare: src.bool("declare")?,
            decorators: self.opt_list(src, "decorators")?,
        };
        Ok(if declaration {
            Node::ClassDeclaration(class)
        } else {
            Node::ClassExpression(class)
        })
    }

    /// 0-based end of the last piece before the class body's `{`
    fn class_header_end(&self, src: &SourceNode<'_>, range: Range, fields: &[&str]) -> Result<u32> {
        let keyword_end = match src.opt_array("decorators")?.last() {
            Some(last) => {
                let end = self.offsets.offset(SourceNode::new(last)?.span()?.end);
                end.max(range.start()).saturating_add(CLASS_KEYWORD + 1)
            }
            None => range.start().saturating_add(CLASS_KEYWORD),
        };
        let mut end = keyword_end;
        for field in fields {
            if let Some(piece) = src.opt_node(field)? {
                end = end.max(self.offsets.offset(piece.span()?.end));
            }
        }
        if let Some(last) = src.opt_array("implements")?.last() {
            end = end.max(self.offsets.offset(SourceNode::new(last)?.span()?.end));
        }
        Ok(end)
    }

    pub(super) fn constructor(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let span = src.span()?;
        let open = self.key_end(src, "key")?;
        let (key, computed) = self.property_key(src, "key")?;
        let function = Function {
            range: self.offsets.method_value_from(span, open),
            id: None,
            generator: false,
            expression: false,
            is_async: false,
            params: self.children(src, "params")?,
            body: self.function_body(src, "body")?,
            return_type: None,
            type_parameters: None,
            declare: false,
        };
        let value = if function.body.is_none() {
            Node::TSEmptyBodyFunctionExpression(function)
        } else {
            Node::FunctionExpression(function)
        };
        Ok(Node::MethodDefinition(MethodDefinition {
            range: self.range(src)?,
            key,
            value: Box::new(value),
            computed,
            is_static: false,
            kind: "constructor",
            is_override: false,
            accessibility: src.opt_str("accessibility")?.map(str::to_string),
            optional: src.bool("isOptional")?,
            decorators: None,
        }))
    }

    /// Methods, getters and setters, public or `#private`
    pub(super) fn class_method(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let function = SourceNode::untagged(src.value("function")?, "Function")?;
        let optional = src.bool("isOptional")?;
        let open = match function.opt_node("typeParameters")? {
            Some(type_params) => self.offsets.offset(type_params.span()?.start),
            None => self.key_end(src, "key")? + u32::from(optional),
        };
        let kind = method_kind(src.str("kind")?)
            .ok_or_else(|| TranslateError::shape(src.kind(), "kind", "method, getter or setter"))?;
        let (key, computed) = self.property_key(src, "key")?;
        let method = MethodDefinition {
            range: self.range(src)?,
            key,
            value: Box::new(self.method_function(&function, open)?),
            computed,
            is_static: src.bool("isStatic")?,
            kind,
            is_override: src.bool("isOverride")?,
            accessibility: src.opt_str("accessibility")?.map(str::to_string),
            optional,
            decorators: self.opt_list(&function, "decorators")?,
        };
        Ok(if src.bool("isAbstract")? {
            Node::TSAbstractMethodDefinition(method)
        } else {
            Node::MethodDefinition(method)
        })
    }

    pub(super) fn class_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let is_abstract = src.bool("isAbstract")?;
        let (key, computed) = self.property_key(src, "key")?;
        let value = if is_abstract {
            None
        } else {
            self.opt_child(src, "value")?
        };
        let property = PropertyDefinition {
            range: self.range(src)?,
            key,
            value,
            computed,
            is_static: src.bool("isStatic")?,
            declare: src.bool("declare")?,
            is_override: src.bool("isOverride")?,
            readonly: src.bool("readonly")?,
            optional: src.bool("isOptional")?,
            definite: src.bool("definite")?,
            type_annotation: self.opt_child(src, "typeAnnotation")?,
            accessibility: src.opt_str("accessibility")?.map(str::to_string),
            decorators: self.opt_list(src, "decorators")?,
        };
        Ok(if is_abstract {
            Node::TSAbstractPropertyDefinition(property)
        } else {
            Node::PropertyDefinition(property)
        })
    }

    pub(super) fn static_block(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let block = src.node("body")?;
        Ok(Node::StaticBlock(Block {
            range: self.range(src)?,
            body: self.children(&block, "stmts")?,
        }))
    }

    /// `constructor(private readonly x: T)`
    pub(super) fn parameter_property(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSParameterProperty(ParameterProperty {
            range: self.range(src)?,
            accessibility: src.opt_str("accessibility")?.map(str::to_string),
            readonly: src.bool("readonly")?,
            is_static: false,
            export: false,
            is_override: src.bool("isOverride")?,
            parameter: self.child(src, "param")?,
            decorators: self.opt_list(src, "decorators")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn empty_block(start: u32, end: u32) -> Value {
        json!({"type": "BlockStatement", "span": span(start, end), "stmts": []})
    }

    /// class C { m() {} }
    fn class_with_method() -> Value {
        json!({
            "type": "ClassDeclaration",
            "identifier": ident(7, "C"),
            "declare": false,
            "span": span(1, 19),
            "decorators": [],
            "body": [{
                "type": "ClassMethod",
                "span": span(11, 17),
                "key": ident(11, "m"),
                "function": {
                    "params": [],
                    "decorators": [],
                    "span": span(11, 17),
                    "body": empty_block(15, 17),
                    "generator": false,
                    "async": false,
                    "typeParameters": null,
                    "returnType": null
                },
                "kind": "method",
                "isStatic": false,
                "accessibility": null,
                "isAbstract": false,
                "isOptional": false,
                "isOverride": false
            }],
            "superClass": null,
            "isAbstract": false,
            "typeParams": null,
            "superTypeParams": null,
            "implements": []
        })
    }

    #[test]
    fn test_method_kind() {
        assert_eq!(method_kind("getter"), Some("get"));
        assert_eq!(method_kind("constructor"), None);
    }

    #[test]
    fn test_class_method_definition() {
        let value = translated(class_with_method());
        assert_eq!(value["type"], json!("ClassDeclaration"));
        assert_eq!(value["superClass"], Value::Null);
        assert!(value.get("implements").is_none());
        assert!(value.get("decorators").is_none());

        let body = &value["body"];
        assert_eq!(body["type"], json!("ClassBody"));
        assert_eq!(body["range"], json!([8, 18]));

        let method = &body["body"][0];
        assert_eq!(method["type"], json!("MethodDefinition"));
        assert_eq!(method["kind"], json!("method"));
        assert_eq!(method["static"], json!(false));
        assert_eq!(method["range"], json!([10, 16]));

        let function = &method["value"];
        assert_eq!(function["type"], json!("FunctionExpression"));
        assert_eq!(function["range"], json!([11, 16]));
        assert_eq!(function["id"], Value::Null);
        assert_eq!(function["body"]["body"], json!([]));
    }

    #[test]
    fn test_private_method_reads_function_record() {
        // (class { #m() {} })
        let tree = json!({
            "type": "ClassExpression",
            "identifier": null,
            "span": span(1, 18),
            "decorators": [],
            "body": [{
                "type": "PrivateMethod",
                "span": span(9, 16),
                "key": {"type": "PrivateName", "span": span(9, 11), "name": "m"},
                "function": {
                    "params": [],
                    "decorators": [],
                    "span": span(9, 16),
                    "body": empty_block(14, 16),
                    "generator": false,
                    "async": true
                },
                "kind": "method",
                "isStatic": false,
                "accessibility": null,
                "isAbstract": false,
                "isOptional": false,
                "isOverride": false
            }],
            "superClass": null,
            "isAbstract": false,
            "implements": []
        });
        let value = translated(tree);
        assert_eq!(value["body"]["range"], json!([6, 17]));
        let method = &value["body"]["body"][0];
        assert_eq!(method["range"], json!([8, 15]));
        assert_eq!(method["key"]["type"], json!("PrivateIdentifier"));
        assert_eq!(method["key"]["name"], json!("m"));
        assert_eq!(method["value"]["range"], json!([10, 15]));
        assert_eq!(method["value"]["async"], json!(true));
    }

    #[test]
    fn test_method_function_without_async_is_a_shape_fault() {
        let mut tree = class_with_method();
        tree["body"][0]["function"]
            .as_object_mut()
            .unwrap()
            .remove("async");
        let err = translate(&tree).unwrap_err();
        assert_eq!(err, TranslateError::shape("Function", "async", "a boolean"));
    }

    #[test]
    fn test_class_semicolons_dropped() {
        let mut tree = class_with_method();
        tree["body"]
            .as_array_mut()
            .unwrap()
            .push(json!({"type": "EmptyStatement", "span": span(17, 18)}));
        let value = translated(tree);
        assert_eq!(value["body"]["body"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_abstract_method_without_body() {
        let mut tree = class_with_method();
        tree["isAbstract"] = json!(true);
        tree["body"][0]["isAbstract"] = json!(true);
        tree["body"][0]["function"]["body"] = Value::Null;
        let value = translated(tree);
        assert_eq!(value["abstract"], json!(true));
        let method = &value["body"]["body"][0];
        assert_eq!(method["type"], json!("TSAbstractMethodDefinition"));
        assert_eq!(method["value"]["type"], json!("TSEmptyBodyFunctionExpression"));
        assert_eq!(method["value"]["body"], Value::Null);
    }

    #[test]
    fn test_declare_function() {
        // declare function f(): void;
        let tree = json!({
            "type": "FunctionDeclaration",
            "identifier": ident(18, "f"),
            "declare": true,
            "span": span(9, 28),
            "params": [],
            "decorators": [],
            "body": null,
            "generator": false,
            "async": false,
            "typeParameters": null,
            "returnType": null
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("TSDeclareFunction"));
        assert_eq!(value["declare"], json!(true));
        assert!(value.get("body").is_none());
    }

    #[test]
    fn test_arrow_expression_body() {
        // (a) => a
        let tree = json!({
            "type": "ArrowFunctionExpression",
            "span": span(1, 9),
            "params": [ident(2, "a")],
            "body": ident(8, "a"),
            "async": false,
            "generator": false,
            "typeParameters": null,
            "returnType": null
        });
        let value = translated(tree);
        assert_eq!(value["expression"], json!(true));
        assert_eq!(value["generator"], json!(false));
        assert_eq!(value["params"][0]["name"], json!("a"));
    }

    #[test]
    fn test_param_decorators() {
        let tree = json!({
            "type": "Param",
            "span": span(1, 6),
            "decorators": [{"type": "Decorator", "span": span(1, 3), "expression": ident(2, "d")}],
            "pat": ident(4, "x")
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("Identifier"));
        assert_eq!(value["decorators"][0]["type"], json!("Decorator"));
    }
}
