//! TypeScript expressions, types and declarations

use serde_json::Value;
use tracing::warn;

use super::Walk;
use crate::error::{Result, TranslateError};
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::Range;

/// Keyword types with a dedicated node, by SWC keyword name
fn keyword_node(kind: &str, leaf: Leaf) -> Option<Node> {
    let node = match kind {
        "any" => Node::TSAnyKeyword(leaf),
        "unknown" => Node::TSUnknownKeyword(leaf),
        "number" => Node::TSNumberKeyword(leaf),
        "object" => Node::TSObjectKeyword(leaf),
        "boolean" => Node::TSBooleanKeyword(leaf),
        "bigint" => Node::TSBigIntKeyword(leaf),
        "string" => Node::TSStringKeyword(leaf),
        "symbol" => Node::TSSymbolKeyword(leaf),
        "void" => Node::TSVoidKeyword(leaf),
        "undefined" => Node::TSUndefinedKeyword(leaf),
        "null" => Node::TSNullKeyword(leaf),
        "never" => Node::TSNeverKeyword(leaf),
        "intrinsic" => Node::TSIntrinsicKeyword(leaf),
        _ => return None,
    };
    Some(node)
}

impl Walk<'_> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// `<T>x`
    pub(super) fn type_assertion(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeAssertion(TypeAssertion {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn as_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSAsExpression(TypeAssertion {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn satisfies_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSSatisfiesExpression(TypeAssertion {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    /// `x as const` or `<const>x`, with a synthesized `const` type reference
    pub(super) fn const_assertion(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let span = src.span()?;
        let inner = src.node("expression")?;
        let prefixed = inner.span()?.start > span.start;
        let keyword = if prefixed {
            let start = self.offsets.offset(span.start).saturating_add(1);
            Range::new(start, start.saturating_add(5))
        } else {
            self.offsets.trailing(span, 5)
        };
        let type_annotation = Box::new(Node::TSTypeReference(TypeReference {
            range: keyword,
            type_name: Box::new(Node::Identifier(Identifier::new(keyword, "const"))),
            type_parameters: None,
        }));
        let assertion = TypeAssertion {
            range: self.offsets.range(span),
            expression: self.boxed(&inner)?,
            type_annotation,
        };
        Ok(if prefixed {
            Node::TSTypeAssertion(assertion)
        } else {
            Node::TSAsExpression(assertion)
        })
    }

    /// `f<T>` without a call
    pub(super) fn instantiation(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSInstantiationExpression(Instantiation {
            range: self.range(src)?,
            expression: self.child(src, src.pick(&["expression", "expr"]))?,
            type_parameters: self.child(src, src.pick(&["typeArguments", "typeParameters"]))?,
        }))
    }

    // ========================================================================
    // Annotations and type parameters
    // ========================================================================

    pub(super) fn type_annotation(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeAnnotation(TypeWrapper {
            range: self.range(src)?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn type_parameter_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeParameterDeclaration(TypeList {
            range: self.range(src)?,
            params: self.children(src, "parameters")?,
        }))
    }

    pub(super) fn type_parameter_instantiation(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeParameterInstantiation(TypeList {
            range: self.range(src)?,
            params: self.children(src, "params")?,
        }))
    }

    pub(super) fn type_parameter(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeParameter(TypeParameter {
            range: self.range(src)?,
            name: self.child(src, "name")?,
            constraint: self.opt_child(src, "constraint")?,
            default: self.opt_child(src, "default")?,
            is_in: src.bool("in")?,
            out: src.bool("out")?,
        }))
    }

    /// `A.B`, ranging over both sides
    pub(super) fn qualified_name(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let left = self.child(src, "left")?;
        let right = self.child(src, "right")?;
        Ok(Node::TSQualifiedName(QualifiedName {
            range: left.range().cover(right.range()),
            left,
            right,
        }))
    }

    // ========================================================================
    // Type members
    // ========================================================================

    /// `(a): T` / `new (a): T` in a type literal or interface
    pub(super) fn call_signature(&mut self, src: &SourceNode<'_>, construct: bool) -> Result<Node> {
        let signature = Signature {
            range: self.range(src)?,
            params: self.children(src, "params")?,
            return_type: self.opt_child(src, "typeAnnotation")?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
        };
        Ok(if construct {
            Node::TSConstructSignatureDeclaration(signature)
        } else {
            Node::TSCallSignatureDeclaration(signature)
        })
    }

    pub(super) fn property_signature(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSPropertySignature(PropertySignature {
            range: self.range(src)?,
            computed: src.bool("computed")?,
            key: self.child(src, "key")?,
            type_annotation: self.opt_child(src, "typeAnnotation")?,
            initializer: self.opt_child(src, "init")?,
            optional: src.bool("optional")?,
            readonly: src.bool("readonly")?,
            is_static: false,
            export: false,
            accessibility: None,
        }))
    }

    /// `get a(): T` / `set a(v)` signatures
    pub(super) fn accessor_signature(&mut self, src: &SourceNode<'_>, kind: &'static str) -> Result<Node> {
        let params = match src.opt_node("param")? {
            Some(param) => vec![self.visit(&param)?],
            None => Vec::new(),
        };
        Ok(Node::TSMethodSignature(MethodSignature {
            range: self.range(src)?,
            computed: src.bool("computed")?,
            key: self.child(src, "key")?,
            kind,
            params,
            optional: src.bool("optional")?,
            return_type: self.opt_child(src, "typeAnnotation")?,
            type_parameters: None,
            readonly: false,
            is_static: false,
            export: false,
            accessibility: None,
        }))
    }

    pub(super) fn method_signature(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSMethodSignature(MethodSignature {
            range: self.range(src)?,
            computed: src.bool("computed")?,
            key: self.child(src, "key")?,
            kind: "method",
            params: self.children(src, "params")?,
            optional: src.bool("optional")?,
            return_type: self.opt_child(src, src.pick(&["typeAnn", "typeAnnotation"]))?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
            readonly: src.bool("readonly")?,
            is_static: false,
            export: false,
            accessibility: None,
        }))
    }

    /// `[key: string]: T`, in types and class bodies alike
    pub(super) fn index_signature(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSIndexSignature(IndexSignature {
            range: self.range(src)?,
            parameters: self.children(src, "params")?,
            type_annotation: self.opt_child(src, "typeAnnotation")?,
            readonly: src.bool("readonly")?,
            is_static: src.bool("isStatic")?,
            export: false,
            accessibility: None,
        }))
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(super) fn keyword_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let kind = src.str("kind")?;
        match keyword_node(kind, Leaf { range }) {
            Some(node) => Ok(node),
            None => {
                warn!(kind, "keyword type without a dedicated node, passed through");
                Ok(Node::TsKeywordType(KeywordType {
                    range,
                    kind: kind.to_string(),
                }))
            }
        }
    }

    pub(super) fn this_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSThisType(Leaf {
            range: self.range(src)?,
        }))
    }

    pub(super) fn function_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSFunctionType(Signature {
            range: self.range(src)?,
            params: self.children(src, "params")?,
            return_type: self.opt_child(src, "typeAnnotation")?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
        }))
    }

    pub(super) fn constructor_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSConstructorType(ConstructorType {
            range: self.range(src)?,
            params: self.children(src, "params")?,
            return_type: self.opt_child(src, "typeAnnotation")?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
            is_abstract: src.bool("isAbstract")?,
        }))
    }

    pub(super) fn type_reference(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeReference(TypeReference {
            range: self.range(src)?,
            type_name: self.child(src, "typeName")?,
            type_parameters: self.opt_child(
                src,
                src.pick(&["typeParams", "typeParameters", "typeArguments"]),
            )?,
        }))
    }

    /// `x is T`, `asserts x`; the annotation wrapper spans just the type
    pub(super) fn type_predicate(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let type_annotation = match src.opt_node("typeAnnotation")? {
            Some(annotation) => {
                let inner = self.child(&annotation, "typeAnnotation")?;
                Some(Box::new(Node::TSTypeAnnotation(TypeWrapper {
                    range: inner.range(),
                    type_annotation: inner,
                })))
            }
            None => None,
        };
        Ok(Node::TSTypePredicate(TypePredicate {
            range: self.range(src)?,
            asserts: src.bool("asserts")?,
            parameter_name: self.child(src, "paramName")?,
            type_annotation,
        }))
    }

    /// `typeof x`; `typeof import("m")` folds into a single `TSImportType`
    pub(super) fn type_query(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let name = src.node("exprName")?;
        if name.is(SourceKind::TsImportType) {
            return self.import_type(&name, true, Some(range));
        }
        Ok(Node::TSTypeQuery(TypeQuery {
            range,
            expr_name: self.boxed(&name)?,
            type_parameters: self.opt_child(src, src.pick(&["typeArguments", "typeParams"]))?,
        }))
    }

    /// `import("m").A<T>`
    pub(super) fn import_type(
        &mut self,
        src: &SourceNode<'_>,
        is_type_of: bool,
        range_override: Option<Range>,
    ) -> Result<Node> {
        let literal = self.child(src, src.pick(&["argument", "arg"]))?;
        let parameter = Box::new(Node::TSLiteralType(LiteralType {
            range: literal.range(),
            literal,
        }));
        let range = match range_override {
            Some(range) => range,
            None => self.range(src)?,
        };
        Ok(Node::TSImportType(ImportType {
            range,
            is_type_of,
            parameter,
            qualifier: self.opt_child(src, "qualifier")?,
            type_parameters: self.opt_child(src, src.pick(&["typeArguments", "typeParams"]))?,
        }))
    }

    pub(super) fn type_literal(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeLiteral(TypeLiteral {
            range: self.range(src)?,
            members: self.children(src, "members")?,
        }))
    }

    pub(super) fn array_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSArrayType(ArrayType {
            range: self.range(src)?,
            element_type: self.child(src, "elemType")?,
        }))
    }

    pub(super) fn tuple_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTupleType(TupleType {
            range: self.range(src)?,
            element_types: self.children(src, "elemTypes")?,
        }))
    }

    /// A tuple slot: the bare type, or a labelled `TSNamedTupleMember`
    pub(super) fn tuple_element(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let ty = src.node("ty")?;
        let Some(label) = src.opt_node("label")? else {
            return self.visit(&ty);
        };

        let optional = ty.is(SourceKind::TsOptionalType);
        let element_type = if optional {
            self.child(&ty, "typeAnnotation")?
        } else {
            self.boxed(&ty)?
        };
        let range = self.range(src)?;

        if label.is(SourceKind::RestElement) {
            // `...rest: T[]`
            let label = self.child(&label, "argument")?;
            let member = Node::TSNamedTupleMember(NamedTupleMember {
                range: Range::new(label.range().start(), range.end()),
                element_type,
                label,
                optional,
            });
            return Ok(Node::TSRestType(TypeWrapper {
                range,
                type_annotation: Box::new(member),
            }));
        }

        Ok(Node::TSNamedTupleMember(NamedTupleMember {
            range,
            element_type,
            label: self.boxed(&label)?,
            optional,
        }))
    }

    pub(super) fn optional_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSOptionalType(TypeWrapper {
            range: self.range(src)?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn rest_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSRestType(TypeWrapper {
            range: self.range(src)?,
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn union_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSUnionType(Types {
            range: self.range(src)?,
            types: self.children(src, "types")?,
        }))
    }

    pub(super) fn intersection_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSIntersectionType(Types {
            range: self.range(src)?,
            types: self.children(src, "types")?,
        }))
    }

    pub(super) fn conditional_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSConditionalType(ConditionalType {
            range: self.range(src)?,
            check_type: self.child(src, "checkType")?,
            extends_type: self.child(src, "extendsType")?,
            true_type: self.child(src, "trueType")?,
            false_type: self.child(src, "falseType")?,
        }))
    }

    pub(super) fn infer_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSInferType(InferType {
            range: self.range(src)?,
            type_parameter: self.child(src, "typeParam")?,
        }))
    }

    /// `keyof T`, `unique symbol`, `readonly T[]`
    pub(super) fn type_operator(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeOperator(TypeOperator {
            range: self.range(src)?,
            operator: src.str("op")?.to_string(),
            type_annotation: self.child(src, "typeAnnotation")?,
        }))
    }

    pub(super) fn indexed_access_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSIndexedAccessType(IndexedAccess {
            range: self.range(src)?,
            object_type: self.child(src, "objectType")?,
            index_type: self.child(src, "indexType")?,
        }))
    }

    /// `{ readonly [K in T]?: U }`; the modifiers keep SWC's `true`/`"+"`/`"-"`
    pub(super) fn mapped_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSMappedType(MappedType {
            range: self.range(src)?,
            type_parameter: self.child(src, "typeParam")?,
            name_type: self.opt_child(src, "nameType")?,
            type_annotation: self.opt_child(src, "typeAnnotation")?,
            optional: src.get("optional").filter(|v| modifier_present(v)).cloned(),
            readonly: src.get("readonly").filter(|v| modifier_present(v)).cloned(),
        }))
    }

    /// Literal types; template literals and negative numbers reshape
    pub(super) fn literal_type(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let literal = src.node("literal")?;

        if literal.is(SourceKind::TemplateLiteral) && literal.has("types") {
            return Ok(Node::TSTemplateLiteralType(TemplateLiteralType {
                range,
                quasis: self.children(&literal, "quasis")?,
                types: self.children(&literal, "types")?,
            }));
        }

        let node = self.boxed(&literal)?;
        let negative = match node.as_ref() {
            Node::Literal(lit) => lit.raw.starts_with('-'),
            _ => false,
        };
        if !negative {
            return Ok(Node::TSLiteralType(LiteralType {
                range,
                literal: node,
            }));
        }

        let Node::Literal(mut lit) = *node else {
            return Err(TranslateError::shape(literal.kind(), "raw", "a literal"));
        };
        let literal_range = lit.range;
        lit.range = Range::new(literal_range.start().saturating_add(1), literal_range.end());
        lit.raw = lit.raw.trim_start_matches('-').trim_start().to_string();
        lit.value = match lit.value.as_f64() {
            Some(number) if number < 0.0 => negate(&lit.value),
            _ => lit.value,
        };
        if let Some(digits) = lit.bigint.as_mut() {
            *digits = digits.trim_start_matches('-').to_string();
        }
        Ok(Node::TSLiteralType(LiteralType {
            range,
            literal: Box::new(Node::UnaryExpression(Unary {
                range: literal_range,
                operator: "-".to_string(),
                prefix: true,
                argument: Box::new(Node::Literal(lit)),
            })),
        }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub(super) fn interface_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let extends = self.opt_list(src, "extends")?;
        Ok(Node::TSInterfaceDeclaration(Interface {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            body: self.child(src, "body")?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
            extends,
            declare: src.bool("declare")?,
        }))
    }

    pub(super) fn interface_body(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSInterfaceBody(Block {
            range: self.range(src)?,
            body: self.children(src, "body")?,
        }))
    }

    /// `extends A.B<T>` in an interface or `implements` in a class
    pub(super) fn heritage(&mut self, src: &SourceNode<'_>, implements: bool) -> Result<Node> {
        let expression = src.node(src.pick(&["expression", "expr"]))?;
        let heritage = Heritage {
            range: self.range(src)?,
            expression: self.heritage_expression(&expression)?,
            type_parameters: self.opt_child(
                src,
                src.pick(&["typeArguments", "typeParams", "typeParameters"]),
            )?,
        };
        Ok(if implements {
            Node::TSClassImplements(heritage)
        } else {
            Node::TSInterfaceHeritage(heritage)
        })
    }

    /// Entity names in heritage clauses read as member expressions
    fn heritage_expression(&mut self, src: &SourceNode<'_>) -> Result<Child> {
        if !src.is(SourceKind::TsQualifiedName) {
            return self.boxed(src);
        }
        let object = self.heritage_expression(&src.node("left")?)?;
        let property = self.child(src, "right")?;
        Ok(Box::new(Node::MemberExpression(Member {
            range: object.range().cover(property.range()),
            object,
            property,
            computed: false,
            optional: false,
        })))
    }

    pub(super) fn type_alias(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSTypeAliasDeclaration(TypeAlias {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            type_annotation: self.child(src, "typeAnnotation")?,
            type_parameters: self.opt_child(src, src.pick(&["typeParams", "typeParameters"]))?,
            declare: src.bool("declare")?,
        }))
    }

    pub(super) fn enum_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSEnumDeclaration(Enum {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            members: self.children(src, "members")?,
            is_const: src.bool("isConst")?,
            declare: src.bool("declare")?,
        }))
    }

    pub(super) fn enum_member(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSEnumMember(EnumMember {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            initializer: self.opt_child(src, "init")?,
            computed: false,
        }))
    }

    /// `module "m" {}`, `namespace A.B {}`, `declare global {}`
    pub(super) fn module_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSModuleDeclaration(ModuleDeclaration {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            body: self.opt_child(src, "body")?,
            global: src.bool("global")?,
            declare: src.bool("declare")?,
        }))
    }

    pub(super) fn module_block(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSModuleBlock(Block {
            range: self.range(src)?,
            body: self.statement_list(src.array("body")?)?,
        }))
    }
}

/// Mapped type modifiers: `false` means no modifier
fn modifier_present(value: &Value) -> bool {
    !matches!(value, Value::Bool(false))
}

/// Absolute value of a negative JSON number, preserving integer form
fn negate(value: &Value) -> Value {
    if let Some(int) = value.as_i64() {
        return Value::from(int.unsigned_abs());
    }
    match value.as_f64() {
        Some(number) => serde_json::Number::from_f64(-number).map_or(Value::Null, Value::Number),
        None => value.clone(),
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

    fn keyword(start: u32, kind: &str) -> Value {
        let end = start + kind.len() as u32;
        json!({"type": "TsKeywordType", "span": span(start, end), "kind": kind})
    }

    fn translated(tree: Value) -> Value {
        serde_json::to_value(translate(&tree).unwrap()).unwrap()
    }

    #[test]
    fn test_keyword_types() {
        assert_eq!(translated(keyword(1, "string"))["type"], json!("TSStringKeyword"));
        assert_eq!(translated(keyword(1, "intrinsic"))["type"], json!("TSIntrinsicKeyword"));
        let passthrough = translated(keyword(1, "hologram"));
        assert_eq!(passthrough["type"], json!("TsKeywordType"));
        assert_eq!(passthrough["kind"], json!("hologram"));
    }

    #[test]
    fn test_parenthesized_type_eliminated() {
        // (string)[]
        let tree = json!({
            "type": "TsArrayType",
            "span": span(1, 11),
            "elemType": {
                "type": "TsParenthesizedType",
                "span": span(1, 9),
                "typeAnnotation": keyword(2, "string")
            }
        });
        let value = translated(tree);
        assert_eq!(value["elementType"]["type"], json!("TSStringKeyword"));
        assert_eq!(value["elementType"]["range"], json!([1, 7]));
    }

    #[test]
    fn test_negative_literal_type() {
        // -1
        let tree = json!({
            "type": "TsLiteralType",
            "span": span(1, 3),
            "literal": {"type": "NumericLiteral", "span": span(1, 3), "value": -1.0, "raw": "-1"}
        });
        let value = translated(tree);
        let unary = &value["literal"];
        assert_eq!(unary["type"], json!("UnaryExpression"));
        assert_eq!(unary["operator"], json!("-"));
        assert_eq!(unary["range"], json!([0, 2]));
        assert_eq!(unary["argument"]["value"], json!(1));
        assert_eq!(unary["argument"]["raw"], json!("1"));
        assert_eq!(unary["argument"]["range"], json!([1, 2]));
    }

    #[test]
    fn test_template_literal_type() {
        // `a${B}`
        let tree = json!({
            "type": "TsLiteralType",
            "span": span(1, 8),
            "literal": {
                "type": "TemplateLiteral",
                "span": span(1, 8),
                "types": [{"type": "TsTypeReference", "span": span(5, 6), "typeName": ident(5, "B"), "typeParams": null}],
                "quasis": [
                    {"type": "TemplateElement", "span": span(2, 3), "tail": false, "cooked": "a", "raw": "a"},
                    {"type": "TemplateElement", "span": span(7, 7), "tail": true, "cooked": "", "raw": ""}
                ]
            }
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("TSTemplateLiteralType"));
        assert_eq!(value["types"][0]["type"], json!("TSTypeReference"));
        assert_eq!(value["quasis"][1]["range"], json!([5, 7]));
    }

    #[test]
    fn test_typeof_import_folds() {
        // typeof import("m")
        let tree = json!({
            "type": "TsTypeQuery",
            "span": span(1, 19),
            "exprName": {
                "type": "TsImportType",
                "span": span(8, 19),
                "argument": {"type": "StringLiteral", "span": span(15, 18), "value": "m", "raw": "\"m\""},
                "qualifier": null,
                "typeArguments": null
            },
            "typeArguments": null
        });
        let value = translated(tree);
        assert_eq!(value["type"], json!("TSImportType"));
        assert_eq!(value["isTypeOf"], json!(true));
        assert_eq!(value["range"], json!([0, 18]));
        assert_eq!(value["parameter"]["type"], json!("TSLiteralType"));
        assert_eq!(value["qualifier"], Value::Null);
        assert_eq!(value["typeParameters"], Value::Null);
    }

    #[test]
    fn test_as_const() {
        // x as const
        let tree = json!({"type": "TsConstAssertion", "span": span(1, 11), "expression": ident(1, "x")});
        let value = translated(tree);
        assert_eq!(value["type"], json!("TSAsExpression"));
        assert_eq!(value["typeAnnotation"]["range"], json!([5, 10]));
        assert_eq!(value["typeAnnotation"]["typeName"]["name"], json!("const"));

        // <const>x
        let tree = json!({"type": "TsConstAssertion", "span": span(1, 9), "expression": ident(8, "x")});
        let value = translated(tree);
        assert_eq!(value["type"], json!("TSTypeAssertion"));
        assert_eq!(value["typeAnnotation"]["range"], json!([1, 6]));
    }

    #[test]
    fn test_named_tuple_members() {
        // [a?: string, ...rest: number[]]
        let tree = json!({
            "type": "TsTupleType",
            "span": span(1, 32),
            "elemTypes": [
                {
                    "type": "TsTupleElement",
                    "span": span(2, 12),
                    "label": ident(2, "a"),
                    "ty": {"type": "TsOptionalType", "span": span(6, 12), "typeAnnotation": keyword(6, "string")}
                },
                {
                    "type": "TsTupleElement",
                    "span": span(14, 31),
                    "label": {"type": "RestElement", "span": span(14, 21), "rest": span(14, 17), "argument": ident(17, "rest"), "typeAnnotation": null},
                    "ty": {"type": "TsArrayType", "span": span(23, 31), "elemType": keyword(23, "number")}
                }
            ]
        });
        let value = translated(tree);
        let first = &value["elementTypes"][0];
        assert_eq!(first["type"], json!("TSNamedTupleMember"));
        assert_eq!(first["optional"], json!(true));
        assert_eq!(first["elementType"]["type"], json!("TSStringKeyword"));

        let second = &value["elementTypes"][1];
        assert_eq!(second["type"], json!("TSRestType"));
        assert_eq!(second["range"], json!([13, 30]));
        assert_eq!(second["typeAnnotation"]["range"], json!([16, 30]));
        assert_eq!(second["typeAnnotation"]["label"]["name"], json!("rest"));
    }

    #[test]
    fn test_heritage_qualified_name() {
        // interface I extends A.B {}
        let tree = json!({
            "type": "TsInterfaceDeclaration",
            "span": span(1, 27),
            "id": ident(11, "I"),
            "declare": false,
            "typeParams": null,
            "extends": [{
                "type": "TsExpressionWithTypeArguments",
                "span": span(21, 24),
                "expression": {"type": "TsQualifiedName", "left": ident(21, "A"), "right": ident(23, "B")},
                "typeArguments": null
            }],
            "body": {"type": "TsInterfaceBody", "span": span(25, 27), "body": []}
        });
        let value = translated(tree);
        let heritage = &value["extends"][0];
        assert_eq!(heritage["type"], json!("TSInterfaceHeritage"));
        assert_eq!(heritage["expression"]["type"], json!("MemberExpression"));
        assert_eq!(heritage["expression"]["range"], json!([20, 23]));
        assert!(value.get("typeParameters").is_none());
    }

    #[test]
    fn test_mapped_type_modifiers() {
        let tree = json!({
            "type": "TsMappedType",
            "span": span(1, 30),
            "readonly": "+",
            "optional": false,
            "typeParam": {
                "type": "TsTypeParameter",
                "span": span(4, 15),
                "name": ident(4, "K"),
                "in": false,
                "out": false,
                "const": false,
                "constraint": keyword(9, "string"),
                "default": null
            },
            "nameType": null,
            "typeAnnotation": keyword(18, "number")
        });
        let value = translated(tree);
        assert_eq!(value["readonly"], json!("+"));
        assert!(value.get("optional").is_none());
        assert_eq!(value["nameType"], Value::Null);
        assert_eq!(value["typeParameter"]["in"], json!(false));
    }
}
