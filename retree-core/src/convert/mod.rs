//! SWC to typescript-estree translation
//!
//! A single top-down pass: [`Walk::visit`] resolves each node's tag against
//! [`SourceKind`] and hands it to the rule for that kind. Rules request their
//! children through the helpers below, compute the node's range with the
//! [`Reconciler`], and return a freshly built [`Node`]. Eliminated wrappers
//! (parentheses, parenthesized types) return their inner translation.
//!
//! Rules live in one file per family:
//! - `statements`: programs, statements, variable declarations
//! - `modules`: imports and exports
//! - `expressions`: expressions, literals, object members, optional chains
//! - `functions`: functions, classes and class members
//! - `patterns`: binding and assignment patterns
//! - `jsx`: JSX elements, attributes and names
//! - `typescript`: type annotations, type-level nodes, TS declarations

mod expressions;
mod functions;
mod jsx;
mod modules;
mod patterns;
mod statements;
mod typescript;

use serde_json::Value;
use tracing::trace;

use crate::config::TranslateConfig;
use crate::error::{Result, TranslateError};
use crate::estree::{Child, Node};
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::{Range, Reconciler};

/// Remaining stack below which a new segment is allocated
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each additional stack segment
const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Translates SWC trees with a fixed configuration.
///
/// Holds no per-tree state; one translator may serve any number of trees,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslateConfig,
}

impl Translator {
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Translate a tree rooted at any node kind (usually `Module`)
    pub fn translate(&self, root: &Value) -> Result<Node> {
        let mut walk = Walk::new(&self.config);
        walk.node(root)
    }
}

/// Translate with the default configuration
pub fn translate(root: &Value) -> Result<Node> {
    Translator::default().translate(root)
}

/// Stack for serializing a whole tree, which recurses without a guard
const SERIALIZE_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Serialize a translated tree on its own stack segment
pub fn to_json(node: &Node) -> serde_json::Result<Value> {
    stacker::grow(SERIALIZE_STACK_SIZE, || serde_json::to_value(node))
}

/// Per-tree traversal state
pub(crate) struct Walk<'c> {
    config: &'c TranslateConfig,
    offsets: Reconciler,
    depth: usize,
}

impl<'c> Walk<'c> {
    fn new(config: &'c TranslateConfig) -> Self {
        Self {
            config,
            offsets: config.reconciler(),
            depth: 0,
        }
    }

    // ========================================================================
    // Traversal helpers
    // ========================================================================

    fn node(&mut self, value: &Value) -> Result<Node> {
        let src = SourceNode::new(value)?;
        self.visit(&src)
    }

    /// Translate one source node, guarding depth and stack
    fn visit(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        if self.depth >= self.config.max_depth {
            return Err(TranslateError::TooDeep {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.dispatch(src)
        });
        self.depth -= 1;
        result
    }

    fn boxed(&mut self, src: &SourceNode<'_>) -> Result<Child> {
        self.visit(src).map(Box::new)
    }

    /// Required child node
    fn child(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Child> {
        let child = src.node(field)?;
        self.boxed(&child)
    }

    /// Optional child node; absent and `null` both give `None`
    fn opt_child(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Option<Child>> {
        match src.opt_node(field)? {
            Some(child) => self.boxed(&child).map(Some),
            None => Ok(None),
        }
    }

    fn nodes(&mut self, values: &[Value]) -> Result<Vec<Node>> {
        values.iter().map(|value| self.node(value)).collect()
    }

    /// Required array of nodes
    fn children(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Vec<Node>> {
        let values = src.array(field)?;
        self.nodes(values)
    }

    /// Array of nodes; absent reads as empty
    fn opt_children(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Vec<Node>> {
        let values = src.opt_array(field)?;
        self.nodes(values)
    }

    /// Array of nodes that is omitted from the output when empty
    fn opt_list(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Option<Vec<Node>>> {
        let nodes = self.opt_children(src, field)?;
        Ok(if nodes.is_empty() { None } else { Some(nodes) })
    }

    /// Array with `null` holes kept in place
    fn holes(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Vec<Option<Node>>> {
        src.array(field)?
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                value => self.node(value).map(Some),
            })
            .collect()
    }

    /// Default range of a node
    fn range(&self, src: &SourceNode<'_>) -> Result<Range> {
        Ok(self.offsets.range(src.span()?))
    }

    // ========================================================================
    // Dispatch table
    // ========================================================================

    fn dispatch(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let kind = src.source_kind()?;
        trace!(kind = kind.name(), depth = self.depth, "translate");
        match kind {
            // Programs and module items
            SourceKind::Module => self.program(src, "module"),
            SourceKind::Script => self.program(src, "script"),
            SourceKind::ImportDeclaration => self.import_declaration(src),
            SourceKind::ImportDefaultSpecifier => self.import_default_specifier(src),
            SourceKind::ImportNamespaceSpecifier => self.import_namespace_specifier(src),
            SourceKind::ImportSpecifier => self.import_specifier(src),
            SourceKind::ExportDeclaration => self.export_declaration(src),
            SourceKind::ExportNamedDeclaration => self.export_named_declaration(src),
            SourceKind::ExportDefaultDeclaration => self.export_default_declaration(src),
            SourceKind::ExportDefaultExpression => self.export_default_expression(src),
            SourceKind::ExportAllDeclaration => self.export_all_declaration(src),
            SourceKind::ExportSpecifier => self.export_specifier(src),
            SourceKind::ExportNamespaceSpecifier => self.export_namespace_specifier(src),
            SourceKind::ExportDefaultSpecifier => {
                Err(TranslateError::unrepresentable(src.kind()))
            }
            SourceKind::TsImportEqualsDeclaration => self.import_equals(src),
            SourceKind::TsExternalModuleReference => self.external_module_reference(src),
            SourceKind::TsExportAssignment => self.export_assignment(src),
            SourceKind::TsNamespaceExportDeclaration => self.namespace_export(src),

            // Statements
            SourceKind::BlockStatement => self.block_statement(src),
            SourceKind::EmptyStatement => self.empty_statement(src),
            SourceKind::DebuggerStatement => self.debugger_statement(src),
            SourceKind::WithStatement => self.with_statement(src),
            SourceKind::ReturnStatement => self.return_statement(src),
            SourceKind::LabeledStatement => self.labeled_statement(src),
            SourceKind::BreakStatement => self.jump_statement(src, false),
            SourceKind::ContinueStatement => self.jump_statement(src, true),
            SourceKind::IfStatement => self.if_statement(src),
            SourceKind::SwitchStatement => self.switch_statement(src),
            SourceKind::SwitchCase => self.switch_case(src),
            SourceKind::ThrowStatement => self.throw_statement(src),
            SourceKind::TryStatement => self.try_statement(src),
            SourceKind::CatchClause => self.catch_clause(src),
            SourceKind::WhileStatement => self.while_statement(src),
            SourceKind::DoWhileStatement => self.do_while_statement(src),
            SourceKind::ForStatement => self.for_statement(src),
            SourceKind::ForInStatement => self.for_in_statement(src),
            SourceKind::ForOfStatement => self.for_of_statement(src),
            SourceKind::ExpressionStatement => self.expression_statement(src),
            SourceKind::VariableDeclaration => self.variable_declaration(src),
            SourceKind::VariableDeclarator => self.variable_declarator(src),
            SourceKind::UsingDeclaration => Err(TranslateError::unrepresentable(src.kind())),

            // Functions and classes
            SourceKind::FunctionDeclaration => self.function_declaration(src),
            SourceKind::FunctionExpression => self.function_expression(src),
            SourceKind::ArrowFunctionExpression => self.arrow_function(src),
            SourceKind::ClassDeclaration => self.class(src, true),
            SourceKind::ClassExpression => self.class(src, false),
            SourceKind::Constructor => self.constructor(src),
            SourceKind::ClassMethod | SourceKind::PrivateMethod => self.class_method(src),
            SourceKind::ClassProperty | SourceKind::PrivateProperty => self.class_property(src),
            SourceKind::StaticBlock => self.static_block(src),
            SourceKind::AutoAccessor => Err(TranslateError::unrepresentable(src.kind())),
            SourceKind::TsParameterProperty => self.parameter_property(src),
            SourceKind::Param => self.param(src),
            SourceKind::Decorator => self.decorator(src),

            // Expressions
            SourceKind::ThisExpression => self.this_expression(src),
            SourceKind::Super => self.super_expression(src),
            SourceKind::Import => Err(TranslateError::unrepresentable(src.kind())),
            SourceKind::ArrayExpression => self.array_expression(src),
            SourceKind::ObjectExpression => self.object_expression(src),
            SourceKind::SpreadElement => self.spread_element(src),
            SourceKind::UnaryExpression => self.unary_expression(src),
            SourceKind::UpdateExpression => self.update_expression(src),
            SourceKind::BinaryExpression => self.binary_expression(src),
            SourceKind::AssignmentExpression => self.assignment_expression(src),
            SourceKind::MemberExpression => self.member(src),
            SourceKind::SuperPropExpression => self.super_member(src),
            SourceKind::ConditionalExpression => self.conditional_expression(src),
            SourceKind::CallExpression => self.call(src),
            SourceKind::NewExpression => self.new_expression(src),
            SourceKind::SequenceExpression => self.sequence_expression(src),
            SourceKind::Identifier => self.identifier(src),
            SourceKind::PrivateName => self.private_name(src),
            SourceKind::StringLiteral => self.string_literal(src),
            SourceKind::BooleanLiteral => self.boolean_literal(src),
            SourceKind::NullLiteral => self.null_literal(src),
            SourceKind::NumericLiteral => self.numeric_literal(src),
            SourceKind::BigIntLiteral => self.bigint_literal(src),
            SourceKind::RegExpLiteral => self.regexp_literal(src),
            SourceKind::TemplateLiteral => self.template_literal(src),
            SourceKind::TemplateElement => self.template_element(src),
            SourceKind::TaggedTemplateExpression => self.tagged_template(src),
            SourceKind::YieldExpression => self.yield_expression(src),
            SourceKind::AwaitExpression => self.await_expression(src),
            SourceKind::MetaProperty => self.meta_property(src),
            SourceKind::ParenthesisExpression => {
                let inner = src.node("expression")?;
                self.visit(&inner)
            }
            SourceKind::OptionalChainingExpression => self.optional_chain(src),
            SourceKind::Computed => {
                let inner = src.node("expression")?;
                self.visit(&inner)
            }
            SourceKind::Invalid => {
                let span = src.span()?;
                Err(TranslateError::InvalidNode {
                    start: span.start,
                    end: span.end,
                })
            }
            SourceKind::KeyValueProperty => self.key_value_property(src),
            SourceKind::AssignmentProperty => self.assignment_property(src),
            SourceKind::GetterProperty => self.getter_property(src),
            SourceKind::SetterProperty => self.setter_property(src),
            SourceKind::MethodProperty => self.method_property(src),

            // Patterns
            SourceKind::ArrayPattern => self.array_pattern(src),
            SourceKind::ObjectPattern => self.object_pattern(src),
            SourceKind::AssignmentPattern => self.assignment_pattern(src),
            SourceKind::RestElement => self.rest_element(src),
            SourceKind::KeyValuePatternProperty => self.key_value_pattern_property(src),
            SourceKind::AssignmentPatternProperty => self.assignment_pattern_property(src),

            // JSX
            SourceKind::JSXText => self.jsx_text(src),
            SourceKind::JSXMemberExpression | SourceKind::JSXNamespacedName => {
                self.jsx_name(src)
            }
            SourceKind::JSXEmptyExpression => self.jsx_empty_expression(src),
            SourceKind::JSXExpressionContainer => self.jsx_expression_container(src),
            SourceKind::JSXSpreadChild => self.jsx_spread_child(src),
            SourceKind::JSXOpeningElement => self.jsx_opening_element(src),
            SourceKind::JSXClosingElement => self.jsx_closing_element(src),
            SourceKind::JSXAttribute => self.jsx_attribute(src),
            SourceKind::JSXElement => self.jsx_element(src),
            SourceKind::JSXFragment => self.jsx_fragment(src),
            SourceKind::JSXOpeningFragment => self.jsx_opening_fragment(src),
            SourceKind::JSXClosingFragment => self.jsx_closing_fragment(src),

            // TypeScript expressions
            SourceKind::TsTypeAssertion => self.type_assertion(src),
            SourceKind::TsConstAssertion => self.const_assertion(src),
            SourceKind::TsNonNullExpression => self.non_null(src),
            SourceKind::TsAsExpression => self.as_expression(src),
            SourceKind::TsSatisfiesExpression => self.satisfies_expression(src),
            SourceKind::TsInstantiation => self.instantiation(src),

            // TypeScript types
            SourceKind::TsTypeAnnotation => self.type_annotation(src),
            SourceKind::TsTypeParameterDeclaration => self.type_parameter_declaration(src),
            SourceKind::TsTypeParameter => self.type_parameter(src),
            SourceKind::TsTypeParameterInstantiation => self.type_parameter_instantiation(src),
            SourceKind::TsQualifiedName => self.qualified_name(src),
            SourceKind::TsCallSignatureDeclaration => self.call_signature(src, false),
            SourceKind::TsConstructSignatureDeclaration => self.call_signature(src, true),
            SourceKind::TsPropertySignature => self.property_signature(src),
            SourceKind::TsGetterSignature => self.accessor_signature(src, "get"),
            SourceKind::TsSetterSignature => self.accessor_signature(src, "set"),
            SourceKind::TsMethodSignature => self.method_signature(src),
            SourceKind::TsIndexSignature => self.index_signature(src),
            SourceKind::TsKeywordType => self.keyword_type(src),
            SourceKind::TsThisType => self.this_type(src),
            SourceKind::TsFunctionType => self.function_type(src),
            SourceKind::TsConstructorType => self.constructor_type(src),
            SourceKind::TsTypeReference => self.type_reference(src),
            SourceKind::TsTypePredicate => self.type_predicate(src),
            SourceKind::TsTypeQuery => self.type_query(src),
            SourceKind::TsImportType => self.import_type(src, false, None),
            SourceKind::TsTypeLiteral => self.type_literal(src),
            SourceKind::TsArrayType => self.array_type(src),
            SourceKind::TsTupleType => self.tuple_type(src),
            SourceKind::TsTupleElement => self.tuple_element(src),
            SourceKind::TsOptionalType => self.optional_type(src),
            SourceKind::TsRestType => self.rest_type(src),
            SourceKind::TsUnionType => self.union_type(src),
            SourceKind::TsIntersectionType => self.intersection_type(src),
            SourceKind::TsConditionalType => self.conditional_type(src),
            SourceKind::TsInferType => self.infer_type(src),
            SourceKind::TsParenthesizedType => {
                let inner = src.node("typeAnnotation")?;
                self.visit(&inner)
            }
            SourceKind::TsTypeOperator => self.type_operator(src),
            SourceKind::TsIndexedAccessType => self.indexed_access_type(src),
            SourceKind::TsMappedType => self.mapped_type(src),
            SourceKind::TsLiteralType => self.literal_type(src),

            // TypeScript declarations
            SourceKind::TsInterfaceDeclaration => self.interface_declaration(src),
            SourceKind::TsInterfaceBody => self.interface_body(src),
            SourceKind::TsExpressionWithTypeArguments => self.heritage(src, false),
            SourceKind::TsTypeAliasDeclaration => self.type_alias(src),
            SourceKind::TsEnumDeclaration => self.enum_declaration(src),
            SourceKind::TsEnumMember => self.enum_member(src),
            SourceKind::TsModuleDeclaration | SourceKind::TsNamespaceDeclaration => {
                self.module_declaration(src)
            }
            SourceKind::TsModuleBlock => self.module_block(src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span(start: u32, end: u32) -> Value {
        json!({"start": start, "end": end, "ctxt": 0})
    }

    #[test]
    fn test_unmapped_kind_is_an_error() {
        let tree = json!({
            "type": "Module",
            "span": span(1, 4),
            "body": [{"type": "HologramStatement", "span": span(1, 4)}],
            "interpreter": null
        });
        let err = translate(&tree).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnmappedKind {
                kind: "HologramStatement".to_string()
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut expr = json!({"type": "Identifier", "span": span(5, 6), "value": "a", "optional": false});
        for _ in 0..20 {
            expr = json!({"type": "ParenthesisExpression", "span": span(1, 8), "expression": expr});
        }
        let translator = Translator::new(TranslateConfig::default().with_max_depth(10));
        assert_eq!(
            translator.translate(&expr).unwrap_err(),
            TranslateError::TooDeep { limit: 10 }
        );
        assert!(translate(&expr).is_ok());
    }

    #[test]
    fn test_invalid_node() {
        let tree = json!({"type": "Invalid", "span": span(3, 7)});
        assert_eq!(
            translate(&tree).unwrap_err(),
            TranslateError::InvalidNode { start: 3, end: 7 }
        );
    }

    #[test]
    fn test_unrepresentable_kind() {
        let tree = json!({"type": "UsingDeclaration", "span": span(1, 20)});
        assert!(matches!(
            translate(&tree).unwrap_err(),
            TranslateError::Unrepresentable { .. }
        ));
    }

    #[test]
    fn test_deep_chain_within_default_limit() {
        let mut expr = json!({"type": "NumericLiteral", "span": span(1, 2), "value": 1.0, "raw": "1"});
        for _ in 0..2000 {
            expr = json!({
                "type": "UnaryExpression",
                "span": span(1, 2),
                "operator": "-",
                "argument": expr
            });
        }
        let node = translate(&expr).unwrap();
        assert_eq!(node.type_name(), "UnaryExpression");
        assert!(to_json(&node).is_ok());
    }
}
