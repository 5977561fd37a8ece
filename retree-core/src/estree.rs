//! typescript-estree node model
//!
//! One [`Node`] variant per produced `type`. The struct behind each variant
//! fixes the presence policy of every field:
//!
//! - plain field: always emitted, with its default when the source had none
//! - `Option<_>` without a skip attribute: emitted as `null` when absent
//! - `Option<_>` with `skip_serializing_if`: omitted when absent
//! - `bool` with `skip_serializing_if = "is_false"`: emitted only when `true`
//!
//! Serialization order is `type`, `range`, then declaration order.

use serde::Serialize;
use serde_json::Value;
use strum_macros::IntoStaticStr;

use crate::span::Range;

pub type Child = Box<Node>;

/// Skip predicate for flags that typescript-estree only sets when true
pub fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// Programs, statements and module items
// ============================================================================

/// Nodes with nothing but a position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf {
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub range: Range,
    pub body: Vec<Node>,
    pub source_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub range: Range,
    pub expression: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

/// `body: [...]` containers: blocks, class and interface bodies, static blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub range: Range,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct With {
    pub range: Range,
    pub object: Child,
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptArgument {
    pub range: Range,
    pub argument: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub range: Range,
    pub argument: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labeled {
    pub range: Range,
    pub label: Child,
    pub body: Child,
}

/// `break` / `continue`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Jump {
    pub range: Range,
    pub label: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct If {
    pub range: Range,
    pub test: Child,
    pub consequent: Child,
    pub alternate: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Switch {
    pub range: Range,
    pub discriminant: Child,
    pub cases: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    pub range: Range,
    pub test: Option<Child>,
    pub consequent: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Try {
    pub range: Range,
    pub block: Child,
    pub handler: Option<Child>,
    pub finalizer: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    pub range: Range,
    pub param: Option<Child>,
    pub body: Child,
}

/// `while` / `do ... while`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loop {
    pub range: Range,
    pub test: Child,
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct For {
    pub range: Range,
    pub init: Option<Child>,
    pub test: Option<Child>,
    pub update: Option<Child>,
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForIn {
    pub range: Range,
    pub left: Child,
    pub right: Child,
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForOf {
    pub range: Range,
    pub left: Child,
    pub right: Child,
    pub body: Child,
    #[serde(rename = "await")]
    pub is_await: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub range: Range,
    pub declarations: Vec<Node>,
    pub kind: String,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    pub range: Range,
    pub id: Child,
    pub init: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub definite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDeclaration {
    pub range: Range,
    pub source: Child,
    pub specifiers: Vec<Node>,
    pub import_kind: &'static str,
    pub assertions: Vec<Node>,
}

/// `key: value` entry of an import assertion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportAttribute {
    pub range: Range,
    pub key: Child,
    pub value: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub range: Range,
    pub local: Child,
    pub imported: Child,
    pub import_kind: &'static str,
}

/// Default and namespace import specifiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalSpecifier {
    pub range: Range,
    pub local: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNamed {
    pub range: Range,
    pub declaration: Option<Child>,
    pub specifiers: Vec<Node>,
    pub source: Option<Child>,
    pub export_kind: &'static str,
    pub assertions: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSpecifier {
    pub range: Range,
    pub local: Child,
    pub exported: Child,
    pub export_kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDefault {
    pub range: Range,
    pub declaration: Child,
    pub export_kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAll {
    pub range: Range,
    pub source: Child,
    pub exported: Option<Child>,
    pub export_kind: &'static str,
    pub assertions: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEquals {
    pub range: Range,
    pub id: Child,
    pub module_reference: Child,
    pub import_kind: &'static str,
    pub is_export: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceExport {
    pub range: Range,
    pub id: Child,
}

// ============================================================================
// Functions and classes
// ============================================================================

/// Function declarations and expressions, arrows, method values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub range: Range,
    pub id: Option<Child>,
    pub generator: bool,
    pub expression: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: Vec<Node>,
    pub body: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

/// Body-less function declaration (`declare function`, overloads)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclareFunction {
    pub range: Range,
    pub id: Option<Child>,
    pub generator: bool,
    pub expression: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

impl From<Function> for DeclareFunction {
    fn from(function: Function) -> Self {
        DeclareFunction {
            range: function.range,
            id: function.id,
            generator: function.generator,
            expression: function.expression,
            is_async: function.is_async,
            params: function.params,
            body: function.body,
            return_type: function.return_type,
            type_parameters: function.type_parameters,
            declare: function.declare,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub range: Range,
    pub id: Option<Child>,
    pub body: Child,
    pub super_class: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implements: Option<Vec<Node>>,
    #[serde(rename = "abstract", skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition {
    pub range: Range,
    pub key: Child,
    pub value: Child,
    pub computed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub kind: &'static str,
    #[serde(rename = "override")]
    pub is_override: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub range: Range,
    pub key: Child,
    pub value: Option<Child>,
    pub computed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub declare: bool,
    #[serde(rename = "override")]
    pub is_override: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub definite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterProperty {
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(rename = "static", skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub export: bool,
    #[serde(rename = "override", skip_serializing_if = "is_false")]
    pub is_override: bool,
    pub parameter: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSignature {
    pub range: Range,
    pub parameters: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(rename = "static", skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

// ============================================================================
// Expressions and patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub range: Range,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

impl Identifier {
    pub fn new(range: Range, name: impl Into<String>) -> Self {
        Identifier {
            range,
            name: name.into(),
            type_annotation: None,
            optional: false,
            decorators: None,
        }
    }
}

/// `PrivateIdentifier` and `JSXIdentifier`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Named {
    pub range: Range,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub range: Range,
    pub value: Value,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<Regex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<String>,
}

impl Literal {
    pub fn new(range: Range, value: Value, raw: impl Into<String>) -> Self {
        Literal {
            range,
            value,
            raw: raw.into(),
            regex: None,
            bigint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regex {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    pub range: Range,
    pub value: TemplateValue,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateValue {
    pub raw: String,
    pub cooked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral {
    pub range: Range,
    pub quasis: Vec<Node>,
    pub expressions: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpression {
    pub range: Range,
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpression {
    pub range: Range,
    pub properties: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayPattern {
    pub range: Range,
    pub elements: Vec<Option<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPattern {
    pub range: Range,
    pub properties: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

/// Object literal and object pattern members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub range: Range,
    pub key: Child,
    pub value: Child,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestElement {
    pub range: Range,
    pub argument: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPattern {
    pub range: Range,
    pub left: Child,
    pub right: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Yield {
    pub range: Range,
    pub delegate: bool,
    pub argument: Option<Child>,
}

/// `UnaryExpression` / `UpdateExpression`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    pub range: Range,
    pub operator: String,
    pub prefix: bool,
    pub argument: Child,
}

/// Binary, logical and assignment expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    pub range: Range,
    pub operator: String,
    pub left: Child,
    pub right: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub range: Range,
    pub test: Child,
    pub consequent: Child,
    pub alternate: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub range: Range,
    pub callee: Child,
    pub arguments: Vec<Node>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    pub range: Range,
    pub callee: Child,
    pub arguments: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub range: Range,
    pub object: Child,
    pub property: Child,
    pub computed: bool,
    pub optional: bool,
}

/// Single-`expression` wrappers: chains, non-null assertions, decorators,
/// JSX containers, external module references, export assignments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionWrapper {
    pub range: Range,
    pub expression: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    pub range: Range,
    pub expressions: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedTemplate {
    pub range: Range,
    pub tag: Child,
    pub quasi: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaProperty {
    pub range: Range,
    pub meta: Child,
    pub property: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportExpression {
    pub range: Range,
    pub source: Child,
}

// ============================================================================
// JSX
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxElement {
    pub range: Range,
    pub opening_element: Child,
    pub closing_element: Option<Child>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxFragment {
    pub range: Range,
    pub opening_fragment: Child,
    pub closing_fragment: Child,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxOpeningElement {
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    pub self_closing: bool,
    pub name: Child,
    pub attributes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxClosingElement {
    pub range: Range,
    pub name: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxAttribute {
    pub range: Range,
    pub name: Child,
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxNamespacedName {
    pub range: Range,
    pub namespace: Child,
    pub name: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxMemberExpression {
    pub range: Range,
    pub object: Child,
    pub property: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxText {
    pub range: Range,
    pub value: String,
    pub raw: String,
}

// ============================================================================
// TypeScript
// ============================================================================

/// `typeAnnotation` wrappers: annotations, optional and rest tuple members
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeWrapper {
    pub range: Range,
    pub type_annotation: Child,
}

/// `expression` + `typeAnnotation`: `as`, `satisfies`, `<T>x`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAssertion {
    pub range: Range,
    pub expression: Child,
    pub type_annotation: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instantiation {
    pub range: Range,
    pub expression: Child,
    pub type_parameters: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    pub range: Range,
    pub type_name: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedName {
    pub range: Range,
    pub left: Child,
    pub right: Child,
}

/// Type parameter declarations and instantiations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeList {
    pub range: Range,
    pub params: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParameter {
    pub range: Range,
    pub name: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Child>,
    #[serde(rename = "in")]
    pub is_in: bool,
    pub out: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub range: Range,
    pub element_type: Child,
}

/// Union and intersection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Types {
    pub range: Range,
    pub types: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleType {
    pub range: Range,
    pub element_types: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTupleMember {
    pub range: Range,
    pub element_type: Child,
    pub label: Child,
    pub optional: bool,
}

/// Function types and call/construct signatures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub range: Range,
    pub params: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorType {
    pub range: Range,
    pub params: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub range: Range,
    pub computed: bool,
    pub key: Child,
    pub kind: &'static str,
    pub params: Vec<Node>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(rename = "static", skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySignature {
    pub range: Range,
    pub computed: bool,
    pub key: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(rename = "static", skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeLiteral {
    pub range: Range,
    pub members: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub range: Range,
    pub id: Child,
    pub body: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<Node>>,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

/// `TSInterfaceHeritage` / `TSClassImplements`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heritage {
    pub range: Range,
    pub expression: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    pub range: Range,
    pub id: Child,
    pub type_annotation: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub range: Range,
    pub id: Child,
    pub members: Vec<Node>,
    #[serde(rename = "const", skip_serializing_if = "is_false")]
    pub is_const: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    pub range: Range,
    pub id: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDeclaration {
    pub range: Range,
    pub id: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Child>,
    #[serde(skip_serializing_if = "is_false")]
    pub global: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeQuery {
    pub range: Range,
    pub expr_name: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportType {
    pub range: Range,
    pub is_type_of: bool,
    pub parameter: Child,
    pub qualifier: Option<Child>,
    pub type_parameters: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOperator {
    pub range: Range,
    pub operator: String,
    pub type_annotation: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedAccess {
    pub range: Range,
    pub object_type: Child,
    pub index_type: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalType {
    pub range: Range,
    pub check_type: Child,
    pub extends_type: Child,
    pub true_type: Child,
    pub false_type: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferType {
    pub range: Range,
    pub type_parameter: Child,
}

/// `readonly` / `optional` carry `true`, `"+"` or `"-"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedType {
    pub range: Range,
    pub type_parameter: Child,
    pub name_type: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<Child>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralType {
    pub range: Range,
    pub literal: Child,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteralType {
    pub range: Range,
    pub quasis: Vec<Node>,
    pub types: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePredicate {
    pub range: Range,
    pub asserts: bool,
    pub parameter_name: Child,
    pub type_annotation: Option<Child>,
}

/// Keyword type the table does not refine, kept under its source tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordType {
    pub range: Range,
    pub kind: String,
}

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, IntoStaticStr)]
#[serde(tag = "type")]
pub enum Node {
    // Programs and statements
    Program(Program),
    ExpressionStatement(ExpressionStatement),
    BlockStatement(Block),
    StaticBlock(Block),
    EmptyStatement(Leaf),
    DebuggerStatement(Leaf),
    WithStatement(With),
    ReturnStatement(OptArgument),
    LabeledStatement(Labeled),
    BreakStatement(Jump),
    ContinueStatement(Jump),
    IfStatement(If),
    SwitchStatement(Switch),
    SwitchCase(SwitchCase),
    ThrowStatement(Argument),
    TryStatement(Try),
    CatchClause(CatchClause),
    WhileStatement(Loop),
    DoWhileStatement(Loop),
    ForStatement(For),
    ForInStatement(ForIn),
    ForOfStatement(ForOf),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),

    // Module items
    ImportDeclaration(ImportDeclaration),
    ImportAttribute(ImportAttribute),
    ImportSpecifier(ImportSpecifier),
    ImportDefaultSpecifier(LocalSpecifier),
    ImportNamespaceSpecifier(LocalSpecifier),
    ExportNamedDeclaration(ExportNamed),
    ExportSpecifier(ExportSpecifier),
    ExportDefaultDeclaration(ExportDefault),
    ExportAllDeclaration(ExportAll),
    TSImportEqualsDeclaration(ImportEquals),
    TSExternalModuleReference(ExpressionWrapper),
    TSExportAssignment(ExpressionWrapper),
    TSNamespaceExportDeclaration(NamespaceExport),

    // Functions and classes
    FunctionDeclaration(Function),
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    TSEmptyBodyFunctionExpression(Function),
    TSDeclareFunction(DeclareFunction),
    ClassDeclaration(Class),
    ClassExpression(Class),
    ClassBody(Block),
    MethodDefinition(MethodDefinition),
    TSAbstractMethodDefinition(MethodDefinition),
    PropertyDefinition(PropertyDefinition),
    TSAbstractPropertyDefinition(PropertyDefinition),
    TSParameterProperty(ParameterProperty),
    TSIndexSignature(IndexSignature),
    Decorator(ExpressionWrapper),

    // Expressions
    Identifier(Identifier),
    PrivateIdentifier(Named),
    Literal(Literal),
    ThisExpression(Leaf),
    Super(Leaf),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    SpreadElement(Argument),
    YieldExpression(Yield),
    AwaitExpression(Argument),
    UnaryExpression(Unary),
    UpdateExpression(Unary),
    BinaryExpression(Binary),
    LogicalExpression(Binary),
    AssignmentExpression(Binary),
    ConditionalExpression(Conditional),
    CallExpression(Call),
    NewExpression(New),
    MemberExpression(Member),
    ChainExpression(ExpressionWrapper),
    SequenceExpression(Sequence),
    TemplateLiteral(TemplateLiteral),
    TemplateElement(TemplateElement),
    TaggedTemplateExpression(TaggedTemplate),
    MetaProperty(MetaProperty),
    ImportExpression(ImportExpression),

    // Patterns
    ArrayPattern(ArrayPattern),
    ObjectPattern(ObjectPattern),
    RestElement(RestElement),
    AssignmentPattern(AssignmentPattern),

    // JSX
    JSXElement(JsxElement),
    JSXFragment(JsxFragment),
    JSXOpeningElement(JsxOpeningElement),
    JSXClosingElement(JsxClosingElement),
    JSXOpeningFragment(Leaf),
    JSXClosingFragment(Leaf),
    JSXAttribute(JsxAttribute),
    JSXSpreadAttribute(Argument),
    JSXIdentifier(Named),
    JSXNamespacedName(JsxNamespacedName),
    JSXMemberExpression(JsxMemberExpression),
    JSXExpressionContainer(ExpressionWrapper),
    JSXEmptyExpression(Leaf),
    JSXSpreadChild(ExpressionWrapper),
    JSXText(JsxText),

    // TypeScript expressions
    TSAsExpression(TypeAssertion),
    TSSatisfiesExpression(TypeAssertion),
    TSTypeAssertion(TypeAssertion),
    TSNonNullExpression(ExpressionWrapper),
    TSInstantiationExpression(Instantiation),

    // TypeScript types
    TSTypeAnnotation(TypeWrapper),
    TSTypeReference(TypeReference),
    TSQualifiedName(QualifiedName),
    TSTypeParameterDeclaration(TypeList),
    TSTypeParameterInstantiation(TypeList),
    TSTypeParameter(TypeParameter),
    TSAnyKeyword(Leaf),
    TSBigIntKeyword(Leaf),
    TSBooleanKeyword(Leaf),
    TSIntrinsicKeyword(Leaf),
    TSNeverKeyword(Leaf),
    TSNullKeyword(Leaf),
    TSNumberKeyword(Leaf),
    TSObjectKeyword(Leaf),
    TSStringKeyword(Leaf),
    TSSymbolKeyword(Leaf),
    TSUndefinedKeyword(Leaf),
    TSUnknownKeyword(Leaf),
    TSVoidKeyword(Leaf),
    TsKeywordType(KeywordType),
    TSThisType(Leaf),
    TSArrayType(ArrayType),
    TSUnionType(Types),
    TSIntersectionType(Types),
    TSTupleType(TupleType),
    TSNamedTupleMember(NamedTupleMember),
    TSOptionalType(TypeWrapper),
    TSRestType(TypeWrapper),
    TSFunctionType(Signature),
    TSConstructorType(ConstructorType),
    TSCallSignatureDeclaration(Signature),
    TSConstructSignatureDeclaration(Signature),
    TSMethodSignature(MethodSignature),
    TSPropertySignature(PropertySignature),
    TSTypeLiteral(TypeLiteral),
    TSTypeQuery(TypeQuery),
    TSImportType(ImportType),
    TSTypeOperator(TypeOperator),
    TSIndexedAccessType(IndexedAccess),
    TSConditionalType(ConditionalType),
    TSInferType(InferType),
    TSMappedType(MappedType),
    TSLiteralType(LiteralType),
    TSTemplateLiteralType(TemplateLiteralType),
    TSTypePredicate(TypePredicate),

    // TypeScript declarations
    TSInterfaceDeclaration(Interface),
    TSInterfaceBody(Block),
    TSInterfaceHeritage(Heritage),
    TSClassImplements(Heritage),
    TSTypeAliasDeclaration(TypeAlias),
    TSEnumDeclaration(Enum),
    TSEnumMember(EnumMember),
    TSModuleDeclaration(ModuleDeclaration),
    TSModuleBlock(Block),
}

impl Node {
    /// The `type` this node serializes under
    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    pub fn range(&self) -> Range {
        match self {
            Node::Program(n) => n.range,
            Node::ExpressionStatement(n) => n.range,
            Node::BlockStatement(n)
            | Node::StaticBlock(n)
            | Node::ClassBody(n)
            | Node::TSInterfaceBody(n)
            | Node::TSModuleBlock(n) => n.range,
            Node::EmptyStatement(n)
            | Node::DebuggerStatement(n)
            | Node::ThisExpression(n)
            | Node::Super(n)
            | Node::JSXOpeningFragment(n)
            | Node::JSXClosingFragment(n)
            | Node::JSXEmptyExpression(n)
            | Node::TSAnyKeyword(n)
            | Node::TSBigIntKeyword(n)
            | Node::TSBooleanKeyword(n)
            | Node::TSIntrinsicKeyword(n)
            | Node::TSNeverKeyword(n)
            | Node::TSNullKeyword(n)
            | Node::TSNumberKeyword(n)
            | Node::TSObjectKeyword(n)
            | Node::TSStringKeyword(n)
            | Node::TSSymbolKeyword(n)
            | Node::TSUndefinedKeyword(n)
            | Node::TSUnknownKeyword(n)
            | Node::TSVoidKeyword(n)
            | Node::TSThisType(n) => n.range,
            Node::WithStatement(n) => n.range,
            Node::ReturnStatement(n) => n.range,
            Node::LabeledStatement(n) => n.range,
            Node::BreakStatement(n) | Node::ContinueStatement(n) => n.range,
            Node::IfStatement(n) => n.range,
            Node::SwitchStatement(n) => n.range,
            Node::SwitchCase(n) => n.range,
            Node::ThrowStatement(n)
            | Node::SpreadElement(n)
            | Node::AwaitExpression(n)
            | Node::JSXSpreadAttribute(n) => n.range,
            Node::TryStatement(n) => n.range,
            Node::CatchClause(n) => n.range,
            Node::WhileStatement(n) | Node::DoWhileStatement(n) => n.range,
            Node::ForStatement(n) => n.range,
            Node::ForInStatement(n) => n.range,
            Node::ForOfStatement(n) => n.range,
            Node::VariableDeclaration(n) => n.range,
            Node::VariableDeclarator(n) => n.range,
            Node::ImportDeclaration(n) => n.range,
            Node::ImportAttribute(n) => n.range,
            Node::ImportSpecifier(n) => n.range,
            Node::ImportDefaultSpecifier(n) | Node::ImportNamespaceSpecifier(n) => n.range,
            Node::ExportNamedDeclaration(n) => n.range,
            Node::ExportSpecifier(n) => n.range,
            Node::ExportDefaultDeclaration(n) => n.range,
            Node::ExportAllDeclaration(n) => n.range,
            Node::TSImportEqualsDeclaration(n) => n.range,
            Node::TSExternalModuleReference(n)
            | Node::TSExportAssignment(n)
            | Node::Decorator(n)
            | Node::ChainExpression(n)
            | Node::JSXExpressionContainer(n)
            | Node::JSXSpreadChild(n)
            | Node::TSNonNullExpression(n) => n.range,
            Node::TSNamespaceExportDeclaration(n) => n.range,
            Node::FunctionDeclaration(n)
            | Node::FunctionExpression(n)
            | Node::ArrowFunctionExpression(n)
            | Node::TSEmptyBodyFunctionExpression(n) => n.range,
            Node::TSDeclareFunction(n) => n.range,
            Node::ClassDeclaration(n) | Node::ClassExpression(n) => n.range,
            Node::MethodDefinition(n) | Node::TSAbstractMethodDefinition(n) => n.range,
            Node::PropertyDefinition(n) | Node::TSAbstractPropertyDefinition(n) => n.range,
            Node::TSParameterProperty(n) => n.range,
            Node::TSIndexSignature(n) => n.range,
            Node::Identifier(n) => n.range,
            Node::PrivateIdentifier(n) | Node::JSXIdentifier(n) => n.range,
            Node::Literal(n) => n.range,
            Node::ArrayExpression(n) => n.range,
            Node::ObjectExpression(n) => n.range,
            Node::Property(n) => n.range,
            Node::YieldExpression(n) => n.range,
            Node::UnaryExpression(n) | Node::UpdateExpression(n) => n.range,
            Node::BinaryExpression(n)
            | Node::LogicalExpression(n)
            | Node::AssignmentExpression(n) => n.range,
            Node::ConditionalExpression(n) => n.range,
            Node::CallExpression(n) => n.range,
            Node::NewExpression(n) => n.range,
            Node::MemberExpression(n) => n.range,
            Node::SequenceExpression(n) => n.range,
            Node::TemplateLiteral(n) => n.range,
            Node::TemplateElement(n) => n.range,
            Node::TaggedTemplateExpression(n) => n.range,
            Node::MetaProperty(n) => n.range,
            Node::ImportExpression(n) => n.range,
            Node::ArrayPattern(n) => n.range,
            Node::ObjectPattern(n) => n.range,
            Node::RestElement(n) => n.range,
            Node::AssignmentPattern(n) => n.range,
            Node::JSXElement(n) => n.range,
            Node::JSXFragment(n) => n.range,
            Node::JSXOpeningElement(n) => n.range,
            Node::JSXClosingElement(n) => n.range,
            Node::JSXAttribute(n) => n.range,
            Node::JSXNamespacedName(n) => n.range,
            Node::JSXMemberExpression(n) => n.range,
            Node::JSXText(n) => n.range,
            Node::TSAsExpression(n) | Node::TSSatisfiesExpression(n) | Node::TSTypeAssertion(n) => {
                n.range
            }
            Node::TSInstantiationExpression(n) => n.range,
            Node::TSTypeAnnotation(n) | Node::TSOptionalType(n) | Node::TSRestType(n) => n.range,
            Node::TSTypeReference(n) => n.range,
            Node::TSQualifiedName(n) => n.range,
            Node::TSTypeParameterDeclaration(n) | Node::TSTypeParameterInstantiation(n) => n.range,
            Node::TSTypeParameter(n) => n.range,
            Node::TsKeywordType(n) => n.range,
            Node::TSArrayType(n) => n.range,
            Node::TSUnionType(n) | Node::TSIntersectionType(n) => n.range,
            Node::TSTupleType(n) => n.range,
            Node::TSNamedTupleMember(n) => n.range,
            Node::TSFunctionType(n)
            | Node::TSCallSignatureDeclaration(n)
            | Node::TSConstructSignatureDeclaration(n) => n.range,
            Node::TSConstructorType(n) => n.range,
            Node::TSMethodSignature(n) => n.range,
            Node::TSPropertySignature(n) => n.range,
            Node::TSTypeLiteral(n) => n.range,
            Node::TSTypeQuery(n) => n.range,
            Node::TSImportType(n) => n.range,
            Node::TSTypeOperator(n) => n.range,
            Node::TSIndexedAccessType(n) => n.range,
            Node::TSConditionalType(n) => n.range,
            Node::TSInferType(n) => n.range,
            Node::TSMappedType(n) => n.range,
            Node::TSLiteralType(n) => n.range,
            Node::TSTemplateLiteralType(n) => n.range,
            Node::TSTypePredicate(n) => n.range,
            Node::TSInterfaceDeclaration(n) => n.range,
            Node::TSInterfaceHeritage(n) | Node::TSClassImplements(n) => n.range,
            Node::TSTypeAliasDeclaration(n) => n.range,
            Node::TSEnumDeclaration(n) => n.range,
            Node::TSEnumMember(n) => n.range,
            Node::TSModuleDeclaration(n) => n.range,
        }
    }

    /// Attach parameter decorators; only binding patterns carry them
    pub fn set_decorators(&mut self, decorators: Vec<Node>) -> bool {
        let slot = match self {
            Node::Identifier(n) => &mut n.decorators,
            Node::ArrayPattern(n) => &mut n.decorators,
            Node::ObjectPattern(n) => &mut n.decorators,
            Node::RestElement(n) => &mut n.decorators,
            Node::AssignmentPattern(n) => &mut n.decorators,
            Node::TSParameterProperty(n) => &mut n.decorators,
            _ => return false,
        };
        *slot = Some(decorators);
        true
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Node::BlockStatement(_))
    }
}
