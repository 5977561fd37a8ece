//! Invariant checks over translated trees
//!
//! Both checks work on the serialized JSON so they apply equally to trees
//! produced here and to reference trees loaded from disk.

use serde_json::{Map, Value};
use strum_macros::Display;

const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Kinds whose ranges come from synthesized formulas rather than source
/// extents; they are exempt from containment in either direction.
const SYNTHESIZED_RANGES: &[&str] = &[
    "SpreadElement",
    "Property",
    "TemplateElement",
    "ImportAttribute",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ViolationKind {
    /// `range[0] > range[1]`, or a range that is not two offsets
    BadRange,
    /// Child range outside its parent's
    Escapes,
    /// Omit-when-absent field present as `null`
    NullNotOmitted,
    /// Always-present field missing
    Missing,
    /// True-only flag present as `false`
    FalseNotOmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.path, self.kind, self.message)
    }
}

fn node_type(map: &Map<String, Value>) -> Option<&str> {
    map.get("type").and_then(Value::as_str)
}

fn read_range(map: &Map<String, Value>) -> Option<Result<(u64, u64), ()>> {
    let range = map.get("range")?;
    let pair = range.as_array().and_then(|items| match items.as_slice() {
        [start, end] => Some((start.as_u64()?, end.as_u64()?)),
        _ => None,
    });
    Some(pair.ok_or(()))
}

// ============================================================================
// Ranges
// ============================================================================

/// Check well-formed ranges and child containment across a tree
pub fn check_ranges(tree: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = String::from("$");
    ranges_at(tree, None, &mut path, &mut violations);
    violations
}

fn ranges_at(
    value: &Value,
    parent: Option<(u64, u64)>,
    path: &mut String,
    violations: &mut Vec<Violation>,
) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{index}]"));
                ranges_at(item, parent, path, violations);
                path.truncate(len);
            }
        }
        Value::Object(map) => {
            let mut own = parent;
            if let Some(kind) = node_type(map) {
                let exempt = SYNTHESIZED_RANGES.contains(&kind);
                match read_range(map) {
                    Some(Ok((start, end))) => {
                        if start > end {
                            violations.push(Violation {
                                path: path.clone(),
                                kind: ViolationKind::BadRange,
                                message: format!("{kind} range [{start}, {end}] is inverted"),
                            });
                        }
                        if let Some((outer_start, outer_end)) = parent.filter(|_| !exempt) {
                            if start < outer_start || end > outer_end {
                                violations.push(Violation {
                                    path: path.clone(),
                                    kind: ViolationKind::Escapes,
                                    message: format!(
                                        "{kind} range [{start}, {end}] outside parent [{outer_start}, {outer_end}]"
                                    ),
                                });
                            }
                        }
                        own = if exempt { None } else { Some((start, end)) };
                    }
                    Some(Err(())) => violations.push(Violation {
                        path: path.clone(),
                        kind: ViolationKind::BadRange,
                        message: format!("{kind} range is not a pair of offsets"),
                    }),
                    None => {}
                }
            }
            for (key, child) in map {
                if key == "range" || key == "type" {
                    continue;
                }
                let len = path.len();
                path.push('.');
                path.push_str(key);
                ranges_at(child, own, path, violations);
                path.truncate(len);
            }
        }
        _ => {}
    })
}

// ============================================================================
// Field presence
// ============================================================================

/// How a field may appear on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always emitted; may be `null` where the node model allows it
    Always,
    /// Omitted when absent, never `null`
    OmitWhenAbsent,
    /// Flag emitted only when `true`
    TrueOrOmitted,
}

use Presence::{Always, OmitWhenAbsent, TrueOrOmitted};

/// Presence policy per (kind, field), mirroring the node model
static PRESENCE: &[(&str, &str, Presence)] = &[
    ("Program", "sourceType", Always),
    ("ExpressionStatement", "directive", OmitWhenAbsent),
    ("ReturnStatement", "argument", Always),
    ("BreakStatement", "label", Always),
    ("ContinueStatement", "label", Always),
    ("IfStatement", "alternate", Always),
    ("SwitchCase", "test", Always),
    ("TryStatement", "handler", Always),
    ("TryStatement", "finalizer", Always),
    ("CatchClause", "param", Always),
    ("ForStatement", "init", Always),
    ("ForStatement", "test", Always),
    ("ForStatement", "update", Always),
    ("ForOfStatement", "await", Always),
    ("VariableDeclaration", "kind", Always),
    ("VariableDeclaration", "declare", TrueOrOmitted),
    ("VariableDeclarator", "init", Always),
    ("VariableDeclarator", "definite", TrueOrOmitted),
    ("ImportDeclaration", "importKind", Always),
    ("ImportDeclaration", "assertions", Always),
    ("ImportSpecifier", "importKind", Always),
    ("ExportNamedDeclaration", "declaration", Always),
    ("ExportNamedDeclaration", "source", Always),
    ("ExportNamedDeclaration", "exportKind", Always),
    ("ExportDefaultDeclaration", "exportKind", Always),
    ("ExportAllDeclaration", "exported", Always),
    ("ExportAllDeclaration", "exportKind", Always),
    ("FunctionDeclaration", "id", Always),
    ("FunctionDeclaration", "generator", Always),
    ("FunctionDeclaration", "expression", Always),
    ("FunctionDeclaration", "async", Always),
    ("FunctionDeclaration", "returnType", OmitWhenAbsent),
    ("FunctionDeclaration", "typeParameters", OmitWhenAbsent),
    ("FunctionDeclaration", "declare", TrueOrOmitted),
    ("FunctionExpression", "id", Always),
    ("FunctionExpression", "returnType", OmitWhenAbsent),
    ("FunctionExpression", "typeParameters", OmitWhenAbsent),
    ("ArrowFunctionExpression", "id", Always),
    ("ArrowFunctionExpression", "expression", Always),
    ("ArrowFunctionExpression", "returnType", OmitWhenAbsent),
    ("TSDeclareFunction", "body", OmitWhenAbsent),
    ("TSDeclareFunction", "returnType", OmitWhenAbsent),
    ("ClassDeclaration", "id", Always),
    ("ClassDeclaration", "superClass", Always),
    ("ClassDeclaration", "typeParameters", OmitWhenAbsent),
    ("ClassDeclaration", "superTypeParameters", OmitWhenAbsent),
    ("ClassDeclaration", "implements", OmitWhenAbsent),
    ("ClassDeclaration", "abstract", TrueOrOmitted),
    ("ClassDeclaration", "declare", TrueOrOmitted),
    ("ClassDeclaration", "decorators", OmitWhenAbsent),
    ("ClassExpression", "id", Always),
    ("ClassExpression", "superClass", Always),
    ("MethodDefinition", "computed", Always),
    ("MethodDefinition", "static", Always),
    ("MethodDefinition", "kind", Always),
    ("MethodDefinition", "override", Always),
    ("MethodDefinition", "accessibility", OmitWhenAbsent),
    ("MethodDefinition", "optional", TrueOrOmitted),
    ("MethodDefinition", "decorators", OmitWhenAbsent),
    ("PropertyDefinition", "value", Always),
    ("PropertyDefinition", "computed", Always),
    ("PropertyDefinition", "static", Always),
    ("PropertyDefinition", "declare", Always),
    ("PropertyDefinition", "override", Always),
    ("PropertyDefinition", "readonly", TrueOrOmitted),
    ("PropertyDefinition", "optional", TrueOrOmitted),
    ("PropertyDefinition", "typeAnnotation", OmitWhenAbsent),
    ("Identifier", "typeAnnotation", OmitWhenAbsent),
    ("Identifier", "optional", TrueOrOmitted),
    ("Identifier", "decorators", OmitWhenAbsent),
    ("Literal", "raw", Always),
    ("Literal", "regex", OmitWhenAbsent),
    ("Literal", "bigint", OmitWhenAbsent),
    ("Property", "computed", Always),
    ("Property", "method", Always),
    ("Property", "shorthand", Always),
    ("Property", "kind", Always),
    ("ArrayPattern", "typeAnnotation", OmitWhenAbsent),
    ("ObjectPattern", "typeAnnotation", OmitWhenAbsent),
    ("RestElement", "typeAnnotation", OmitWhenAbsent),
    ("AssignmentPattern", "typeAnnotation", OmitWhenAbsent),
    ("YieldExpression", "argument", Always),
    ("YieldExpression", "delegate", Always),
    ("UnaryExpression", "prefix", Always),
    ("UpdateExpression", "prefix", Always),
    ("CallExpression", "optional", Always),
    ("CallExpression", "typeParameters", OmitWhenAbsent),
    ("NewExpression", "typeParameters", OmitWhenAbsent),
    ("MemberExpression", "computed", Always),
    ("MemberExpression", "optional", Always),
    ("TemplateElement", "tail", Always),
    ("TaggedTemplateExpression", "typeParameters", OmitWhenAbsent),
    ("JSXElement", "closingElement", Always),
    ("JSXOpeningElement", "selfClosing", Always),
    ("JSXOpeningElement", "typeParameters", OmitWhenAbsent),
    ("JSXAttribute", "value", Always),
    ("TSTypeReference", "typeParameters", OmitWhenAbsent),
    ("TSTypeParameter", "constraint", OmitWhenAbsent),
    ("TSTypeParameter", "default", OmitWhenAbsent),
    ("TSTypeParameter", "in", Always),
    ("TSTypeParameter", "out", Always),
    ("TSPropertySignature", "computed", Always),
    ("TSPropertySignature", "optional", TrueOrOmitted),
    ("TSPropertySignature", "readonly", TrueOrOmitted),
    ("TSPropertySignature", "typeAnnotation", OmitWhenAbsent),
    ("TSMethodSignature", "computed", Always),
    ("TSMethodSignature", "kind", Always),
    ("TSMethodSignature", "returnType", OmitWhenAbsent),
    ("TSIndexSignature", "typeAnnotation", OmitWhenAbsent),
    ("TSIndexSignature", "static", TrueOrOmitted),
    ("TSFunctionType", "returnType", OmitWhenAbsent),
    ("TSConstructorType", "abstract", Always),
    ("TSNamedTupleMember", "optional", Always),
    ("TSImportType", "isTypeOf", Always),
    ("TSImportType", "qualifier", Always),
    ("TSImportType", "typeParameters", Always),
    ("TSMappedType", "nameType", Always),
    ("TSMappedType", "optional", OmitWhenAbsent),
    ("TSMappedType", "readonly", OmitWhenAbsent),
    ("TSTypePredicate", "asserts", Always),
    ("TSTypePredicate", "typeAnnotation", Always),
    ("TSInterfaceDeclaration", "extends", OmitWhenAbsent),
    ("TSInterfaceDeclaration", "typeParameters", OmitWhenAbsent),
    ("TSInterfaceDeclaration", "declare", TrueOrOmitted),
    ("TSTypeAliasDeclaration", "declare", TrueOrOmitted),
    ("TSEnumDeclaration", "const", TrueOrOmitted),
    ("TSEnumDeclaration", "declare", TrueOrOmitted),
    ("TSEnumMember", "initializer", OmitWhenAbsent),
    ("TSModuleDeclaration", "body", OmitWhenAbsent),
    ("TSModuleDeclaration", "global", TrueOrOmitted),
    ("TSModuleDeclaration", "declare", TrueOrOmitted),
    ("TSImportEqualsDeclaration", "importKind", Always),
    ("TSImportEqualsDeclaration", "isExport", Always),
];

/// The presence policy table, for hosts that report on it
pub fn presence_table() -> &'static [(&'static str, &'static str, Presence)] {
    PRESENCE
}

/// Check every node against the presence table
pub fn check_presence(tree: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = String::from("$");
    presence_at(tree, &mut path, &mut violations);
    violations
}

fn presence_at(value: &Value, path: &mut String, violations: &mut Vec<Violation>) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{index}]"));
                presence_at(item, path, violations);
                path.truncate(len);
            }
        }
        Value::Object(map) => {
            if let Some(kind) = node_type(map) {
                check_node(kind, map, path, violations);
            }
            for (key, child) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                presence_at(child, path, violations);
                path.truncate(len);
            }
        }
        _ => {}
    })
}

fn check_node(kind: &str, map: &Map<String, Value>, path: &str, violations: &mut Vec<Violation>) {
    for &(_, field, presence) in PRESENCE.iter().filter(|(k, _, _)| *k == kind) {
        let found = map.get(field);
        let violation = match (presence, found) {
            (Always, None) => Some((ViolationKind::Missing, "is missing")),
            (OmitWhenAbsent, Some(Value::Null)) => {
                Some((ViolationKind::NullNotOmitted, "is null instead of omitted"))
            }
            (TrueOrOmitted, Some(Value::Bool(false))) => {
                Some((ViolationKind::FalseNotOmitted, "is false instead of omitted"))
            }
            _ => None,
        };
        if let Some((violation, what)) = violation {
            violations.push(Violation {
                path: path.to_string(),
                kind: violation,
                message: format!("{kind}.{field} {what}"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ranges_well_formed() {
        let tree = json!({
            "type": "ExpressionStatement",
            "range": [0, 5],
            "expression": {"type": "Identifier", "range": [0, 5], "name": "a"}
        });
        assert!(check_ranges(&tree).is_empty());
    }

    #[test]
    fn test_inverted_and_escaping_ranges() {
        let tree = json!({
            "type": "ExpressionStatement",
            "range": [0, 5],
            "expression": {"type": "Identifier", "range": [4, 9], "name": "a"}
        });
        let violations = check_ranges(&tree);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Escapes);
        assert_eq!(violations[0].path, "$.expression");

        let tree = json!({"type": "EmptyStatement", "range": [3, 1]});
        assert_eq!(check_ranges(&tree)[0].kind, ViolationKind::BadRange);
    }

    #[test]
    fn test_synthesized_kinds_exempt() {
        let tree = json!({
            "type": "CallExpression",
            "range": [0, 6],
            "arguments": [{
                "type": "SpreadElement",
                "range": [2, 7],
                "argument": {"type": "Identifier", "range": [5, 7], "name": "a"}
            }]
        });
        assert!(check_ranges(&tree).is_empty());
    }

    #[test]
    fn test_presence_violations() {
        let tree = json!({
            "type": "Program",
            "range": [0, 1],
            "sourceType": "module",
            "body": [
                {"type": "Identifier", "range": [0, 1], "name": "a", "typeAnnotation": null, "optional": false},
                {"type": "ReturnStatement", "range": [0, 1]}
            ]
        });
        let violations = check_presence(&tree);
        let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::NullNotOmitted,
                ViolationKind::FalseNotOmitted,
                ViolationKind::Missing
            ]
        );
        assert_eq!(violations[2].path, "$.body[1]");
        assert_eq!(violations[2].to_string(), "$.body[1] [missing] ReturnStatement.argument is missing");
    }

    #[test]
    fn test_presence_table_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for (kind, field, _) in presence_table() {
            assert!(seen.insert((kind, field)), "{kind}.{field} listed twice");
        }
    }
}
