/// Integration tests for retree-core
///
/// These tests verify:
/// 1. Whole-module translation against hand-checked typescript-estree trees
/// 2. Determinism, range and presence invariants over the same corpus
/// 3. Totality of the kind set
/// 4. File processing with sibling reference trees
/// 5. The same invariants over a realistic TSX module (`fixtures/app.tsx`)

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;
use retree_core::{
    canonicalize, check_presence, check_ranges, diff, parse_tree, process_files_parallel,
    process_source, translate, KindCensus, ProcessOptions, ReferenceSource, SourceKind, Stage,
    TranslateConfig, TranslateError, Translator,
};

/// Source text of the realistic fixture and the SWC tree parsed from it
const APP_SOURCE: &str = include_str!("fixtures/app.tsx");
const APP_TREE: &str = include_str!("fixtures/app.swc.json");

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

/// A module holding one expression statement spanning the whole text
fn module_of(len: u32, expression: Value) -> Value {
    json!({
        "type": "Module",
        "span": span(1, len + 1),
        "body": [{
            "type": "ExpressionStatement",
            "span": span(1, len + 1),
            "expression": expression
        }],
        "interpreter": null
    })
}

/// `1 + 2`
fn one_plus_two() -> Value {
    module_of(5, json!({
        "type": "BinaryExpression",
        "span": span(1, 6),
        "operator": "+",
        "left": number(1, 1.0, "1"),
        "right": number(5, 2.0, "2")
    }))
}

/// `a && b`
fn logical_and() -> Value {
    module_of(6, json!({
        "type": "BinaryExpression",
        "span": span(1, 7),
        "operator": "&&",
        "left": ident(1, "a"),
        "right": ident(6, "b")
    }))
}

/// `class C { m() {} }`
fn class_with_method() -> Value {
    json!({
        "type": "Module",
        "span": span(1, 19),
        "body": [{
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
                    "body": {"type": "BlockStatement", "span": span(15, 17), "stmts": []},
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
        }],
        "interpreter": null
    })
}

/// `({ a })`
fn shorthand_object() -> Value {
    module_of(7, json!({
        "type": "ParenthesisExpression",
        "span": span(1, 8),
        "expression": {
            "type": "ObjectExpression",
            "span": span(2, 7),
            "properties": [ident(4, "a")]
        }
    }))
}

/// `` `x${y}z` ``
fn template() -> Value {
    module_of(8, json!({
        "type": "TemplateLiteral",
        "span": span(1, 9),
        "expressions": [ident(5, "y")],
        "quasis": [
            {"type": "TemplateElement", "span": span(2, 3), "tail": false, "cooked": "x", "raw": "x"},
            {"type": "TemplateElement", "span": span(7, 8), "tail": true, "cooked": "z", "raw": "z"}
        ]
    }))
}

fn corpus() -> Vec<(&'static str, Value)> {
    vec![
        ("one_plus_two", one_plus_two()),
        ("logical_and", logical_and()),
        ("class_with_method", class_with_method()),
        ("shorthand_object", shorthand_object()),
        ("template", template()),
    ]
}

fn translated(tree: &Value) -> Value {
    let node = translate(tree).expect("translation should succeed");
    retree_core::convert::to_json(&node).expect("serialization should succeed")
}

fn assert_same(expected: Value, actual: &Value) {
    if let Some(difference) = diff(&expected, actual) {
        panic!("{}\nactual: {}", difference, canonicalize(actual));
    }
}

#[test]
fn test_binary_expression_scenario() {
    let expected = json!({
        "type": "Program",
        "range": [0, 5],
        "body": [{
            "type": "ExpressionStatement",
            "range": [0, 5],
            "expression": {
                "type": "BinaryExpression",
                "range": [0, 5],
                "operator": "+",
                "left": {"type": "Literal", "range": [0, 1], "value": 1, "raw": "1"},
                "right": {"type": "Literal", "range": [4, 5], "value": 2, "raw": "2"}
            }
        }],
        "sourceType": "module"
    });
    assert_same(expected, &translated(&one_plus_two()));
}

#[test]
fn test_logical_refinement_scenario() {
    let value = translated(&logical_and());
    let expression = &value["body"][0]["expression"];
    assert_eq!(expression["type"], json!("LogicalExpression"));
    assert_eq!(expression["operator"], json!("&&"));
    assert_eq!(expression["range"], json!([0, 6]));
}

#[test]
fn test_class_method_scenario() {
    let expected = json!({
        "type": "Program",
        "range": [0, 18],
        "body": [{
            "type": "ClassDeclaration",
            "range": [0, 18],
            "id": {"type": "Identifier", "range": [6, 7], "name": "C"},
            "body": {
                "type": "ClassBody",
                "range": [8, 18],
                "body": [{
                    "type": "MethodDefinition",
                    "range": [10, 16],
                    "key": {"type": "Identifier", "range": [10, 11], "name": "m"},
                    "value": {
                        "type": "FunctionExpression",
                        "range": [11, 16],
                        "id": null,
                        "generator": false,
                        "expression": false,
                        "async": false,
                        "params": [],
                        "body": {"type": "BlockStatement", "range": [14, 16], "body": []}
                    },
                    "computed": false,
                    "static": false,
                    "kind": "method",
                    "override": false
                }]
            },
            "superClass": null
        }],
        "sourceType": "module"
    });
    assert_same(expected, &translated(&class_with_method()));
}

#[test]
fn test_shorthand_scenario() {
    let value = translated(&shorthand_object());
    let object = &value["body"][0]["expression"];
    assert_eq!(object["type"], json!("ObjectExpression"));
    assert_eq!(object["range"], json!([1, 6]));

    let property = &object["properties"][0];
    assert_eq!(property["shorthand"], json!(true));
    assert_eq!(property["key"]["name"], json!("a"));
    assert_eq!(property["key"], property["value"]);
}

#[test]
fn test_template_scenario() {
    let value = translated(&template());
    let quasis = &value["body"][0]["expression"]["quasis"];
    assert_eq!(quasis[0]["range"], json!([0, 4]));
    assert_eq!(quasis[1]["range"], json!([5, 8]));
    assert_eq!(quasis[1]["tail"], json!(true));
}

#[test]
fn test_unmapped_kind_scenario() {
    let tree = module_of(3, json!({"type": "PipelineExpression", "span": span(1, 4)}));
    match translate(&tree) {
        Err(TranslateError::UnmappedKind { kind }) => assert_eq!(kind, "PipelineExpression"),
        other => panic!("expected an unmapped kind, got {other:?}"),
    }
}

#[test]
fn test_output_is_deterministic() {
    for (name, tree) in corpus() {
        let first = serde_json::to_string(&translate(&tree).unwrap()).unwrap();
        let second = serde_json::to_string(&translate(&tree).unwrap()).unwrap();
        assert_eq!(first, second, "{name} differs between runs");
    }
}

#[test]
fn test_corpus_invariants() {
    for (name, tree) in corpus() {
        let value = translated(&tree);
        let ranges = check_ranges(&value);
        assert!(ranges.is_empty(), "{name}: {ranges:?}");
        let presence = check_presence(&value);
        assert!(presence.is_empty(), "{name}: {presence:?}");
    }
}

#[test]
fn test_corpus_is_total() {
    let mut census = KindCensus::new();
    for (_, tree) in corpus() {
        census.record_source(&tree);
        census.record_target(&translated(&tree));
    }
    assert!(census.is_total(), "unmapped: {:?}", census.unmapped());
    assert_eq!(census.target_kinds["Literal"], 2);
}

#[test]
fn test_eliminated_kinds_leave_no_node() {
    let mut census = KindCensus::new();
    census.record_target(&translated(&shorthand_object()));
    for kind in SourceKind::all().filter(|kind| kind.is_eliminated()) {
        assert!(!census.target_kinds.contains_key(kind.name()), "{} survived", kind.name());
    }
}

#[test]
fn test_span_base_shifts_ranges() {
    // Same tree from a parser that had already consumed 100 positions
    let mut tree = one_plus_two();
    shift_spans(&mut tree, 100);
    let translator = Translator::new(TranslateConfig::default().with_span_base(101));
    let node = translator.translate(&tree).unwrap();
    assert_same(translated(&one_plus_two()), &serde_json::to_value(node).unwrap());
}

fn shift_spans(value: &mut Value, by: u64) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "span" {
                    for end in ["start", "end"] {
                        let position = child[end].as_u64().unwrap();
                        child[end] = json!(position + by);
                    }
                } else {
                    shift_spans(child, by);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| shift_spans(item, by)),
        _ => {}
    }
}

#[test]
fn test_process_directory_with_references() {
    let dir = TempDir::new().unwrap();
    let mut files = Vec::new();
    for (name, tree) in corpus() {
        let input = dir.path().join(format!("{name}.swc.json"));
        fs::write(&input, tree.to_string()).unwrap();
        let reference = dir.path().join(format!("{name}.estree.json"));
        fs::write(&reference, translated(&tree).to_string()).unwrap();
        files.push(input);
    }
    fs::write(dir.path().join("broken.swc.json"), "{").unwrap();
    files.push(dir.path().join("broken.swc.json"));

    let options = ProcessOptions {
        reference: Some(ReferenceSource::Sibling),
        check: true,
        ..ProcessOptions::default()
    };
    let reports = process_files_parallel(&files, &options);
    assert_eq!(reports.len(), 6);
    for report in &reports[..5] {
        assert!(report.is_ok(), "{}: {:?}", report.path, report.error);
    }
    let broken = reports[5].error.as_ref().unwrap();
    assert_eq!(broken.stage, Stage::Parse);
    assert!(broken.path.ends_with("broken.swc.json"));
}

// ============================================================================
// Realistic module: imports, exports, TS declarations, patterns, JSX, classes
// ============================================================================

fn app_tree() -> Value {
    parse_tree(APP_TREE).expect("fixture should parse")
}

/// Every node of `kind` in a translated tree, in document order
fn nodes_of<'a>(value: &'a Value, kind: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some(kind) {
                found.push(value);
            }
            map.values().for_each(|child| nodes_of(child, kind, found));
        }
        Value::Array(items) => items.iter().for_each(|item| nodes_of(item, kind, found)),
        _ => {}
    }
}

fn only<'a>(value: &'a Value, kind: &str) -> &'a Value {
    let mut found = Vec::new();
    nodes_of(value, kind, &mut found);
    assert_eq!(found.len(), 1, "expected one {kind}");
    found[0]
}

/// The source text a node's range covers
fn text_of(node: &Value) -> &'static str {
    let start = node["range"][0].as_u64().unwrap() as usize;
    let end = node["range"][1].as_u64().unwrap() as usize;
    &APP_SOURCE[start..end]
}

#[test]
fn test_app_module_invariants() {
    let tree = app_tree();
    let value = translated(&tree);

    let ranges = check_ranges(&value);
    assert!(ranges.is_empty(), "{ranges:?}");
    let presence = check_presence(&value);
    assert!(presence.is_empty(), "{presence:?}");

    let mut census = KindCensus::new();
    census.record_source(&tree);
    census.record_target(&value);
    assert!(census.is_total(), "unmapped: {:?}", census.unmapped());
    for kind in [
        "ImportSpecifier",
        "ImportNamespaceSpecifier",
        "ExportAllDeclaration",
        "TSInterfaceDeclaration",
        "TSTypeAliasDeclaration",
        "TSTupleType",
        "TSEnumDeclaration",
        "ChainExpression",
        "LogicalExpression",
        "ObjectPattern",
        "RestElement",
        "ArrayPattern",
        "AssignmentPattern",
        "JSXElement",
        "JSXSpreadAttribute",
        "ClassDeclaration",
        "PropertyDefinition",
        "MethodDefinition",
        "TSClassImplements",
        "TSQualifiedName",
    ] {
        assert!(census.target_kinds.contains_key(kind), "no {kind} produced");
    }

    let again = translated(&tree);
    assert_eq!(value.to_string(), again.to_string());
}

#[test]
fn test_app_module_ranges_cover_source_text() {
    let value = translated(&app_tree());
    assert_eq!(value["range"], json!([0, APP_SOURCE.len() - 1]));

    assert_eq!(text_of(only(&value, "ExportAllDeclaration")), "export * as ns from \"./ns\";");
    assert_eq!(text_of(only(&value, "ChainExpression")), "user?.profile?.name");
    assert_eq!(text_of(only(&value, "RestElement")), "...rest: number[]");
    assert_eq!(text_of(only(&value, "JSXSpreadAttribute")), "{...props}");
    assert_eq!(text_of(only(&value, "TSQualifiedName")), "JSX.Element");
    assert!(text_of(only(&value, "ClassBody")).starts_with("{\n  private count"));

    let method = only(&value, "MethodDefinition");
    assert_eq!(method["kind"], json!("get"));
    assert_eq!(text_of(method), "get size(): number { return this.count; }");
    assert_eq!(text_of(&method["value"]), "(): number { return this.count; }");

    let declaration = &value["body"][3];
    assert_eq!(declaration["exportKind"], json!("type"));
    assert_eq!(declaration["declaration"]["type"], json!("TSInterfaceDeclaration"));
}

#[cfg(unix)]
#[test]
fn test_app_module_through_parser_command() {
    // the parser command stands in for SWC and prints the stored tree
    let fixture = format!("{}/tests/fixtures/app.swc.json", env!("CARGO_MANIFEST_DIR"));
    let options = ProcessOptions {
        parser: Some(format!("cat '{fixture}'")),
        check: true,
        census: true,
        ..ProcessOptions::default()
    };
    let report = process_source("app.tsx", APP_SOURCE, &options);
    assert!(report.is_ok(), "{:?} {:?}", report.error, report.violations);

    // trailing newline included once the host knows the source text
    let output = report.output.unwrap();
    assert_eq!(output["range"], json!([0, APP_SOURCE.len()]));
    assert!(report.census.unwrap().is_total());
}
