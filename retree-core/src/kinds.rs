//! The closed set of node kinds the SWC parser emits
//!
//! Every tag an SWC TypeScript/TSX parse can produce has one variant here.
//! The translator matches on this enum without a wildcard arm, so a variant
//! without a translation rule fails to compile.

use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, EnumIter, IntoStaticStr)]
pub enum SourceKind {
    // ========================================================================
    // Programs and module items
    // ========================================================================
    Module,
    Script,
    ImportDeclaration,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ImportSpecifier,
    ExportDeclaration,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportDefaultExpression,
    ExportAllDeclaration,
    ExportSpecifier,
    ExportNamespaceSpecifier,
    ExportDefaultSpecifier,
    TsImportEqualsDeclaration,
    TsExternalModuleReference,
    TsExportAssignment,
    TsNamespaceExportDeclaration,

    // ========================================================================
    // Statements and declarations
    // ========================================================================
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ExpressionStatement,
    VariableDeclaration,
    VariableDeclarator,
    UsingDeclaration,

    // ========================================================================
    // Functions and classes
    // ========================================================================
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassDeclaration,
    ClassExpression,
    Constructor,
    ClassMethod,
    PrivateMethod,
    ClassProperty,
    PrivateProperty,
    StaticBlock,
    AutoAccessor,
    TsParameterProperty,
    Param,
    Decorator,

    // ========================================================================
    // Expressions
    // ========================================================================
    ThisExpression,
    Super,
    Import,
    ArrayExpression,
    ObjectExpression,
    SpreadElement,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    AssignmentExpression,
    MemberExpression,
    SuperPropExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    SequenceExpression,
    Identifier,
    PrivateName,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    NumericLiteral,
    BigIntLiteral,
    RegExpLiteral,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    YieldExpression,
    AwaitExpression,
    MetaProperty,
    ParenthesisExpression,
    OptionalChainingExpression,
    Computed,
    Invalid,
    KeyValueProperty,
    AssignmentProperty,
    GetterProperty,
    SetterProperty,
    MethodProperty,

    // ========================================================================
    // Patterns
    // ========================================================================
    ArrayPattern,
    ObjectPattern,
    AssignmentPattern,
    RestElement,
    KeyValuePatternProperty,
    AssignmentPatternProperty,

    // ========================================================================
    // JSX
    // ========================================================================
    JSXText,
    JSXMemberExpression,
    JSXNamespacedName,
    JSXEmptyExpression,
    JSXExpressionContainer,
    JSXSpreadChild,
    JSXOpeningElement,
    JSXClosingElement,
    JSXAttribute,
    JSXElement,
    JSXFragment,
    JSXOpeningFragment,
    JSXClosingFragment,

    // ========================================================================
    // TypeScript expressions
    // ========================================================================
    TsTypeAssertion,
    TsConstAssertion,
    TsNonNullExpression,
    TsAsExpression,
    TsSatisfiesExpression,
    TsInstantiation,

    // ========================================================================
    // TypeScript types
    // ========================================================================
    TsTypeAnnotation,
    TsTypeParameterDeclaration,
    TsTypeParameter,
    TsTypeParameterInstantiation,
    TsQualifiedName,
    TsCallSignatureDeclaration,
    TsConstructSignatureDeclaration,
    TsPropertySignature,
    TsGetterSignature,
    TsSetterSignature,
    TsMethodSignature,
    TsIndexSignature,
    TsKeywordType,
    TsThisType,
    TsFunctionType,
    TsConstructorType,
    TsTypeReference,
    TsTypePredicate,
    TsTypeQuery,
    TsImportType,
    TsTypeLiteral,
    TsArrayType,
    TsTupleType,
    TsTupleElement,
    TsOptionalType,
    TsRestType,
    TsUnionType,
    TsIntersectionType,
    TsConditionalType,
    TsInferType,
    TsParenthesizedType,
    TsTypeOperator,
    TsIndexedAccessType,
    TsMappedType,
    TsLiteralType,

    // ========================================================================
    // TypeScript declarations
    // ========================================================================
    TsInterfaceDeclaration,
    TsInterfaceBody,
    TsExpressionWithTypeArguments,
    TsTypeAliasDeclaration,
    TsEnumDeclaration,
    TsEnumMember,
    TsModuleDeclaration,
    TsNamespaceDeclaration,
    TsModuleBlock,
}

impl SourceKind {
    /// Look up a tag; `None` when SWC emitted something outside the table
    pub fn parse(tag: &str) -> Option<Self> {
        SourceKind::from_str(tag).ok()
    }

    /// The tag as it appears in the `type` field
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = SourceKind> {
        SourceKind::iter()
    }

    /// Kinds with no node of their own in the output
    pub fn is_eliminated(self) -> bool {
        matches!(
            self,
            SourceKind::ParenthesisExpression
                | SourceKind::TsParenthesizedType
                | SourceKind::Computed
                | SourceKind::Param
        )
    }
}
