use serde_json::json;
use tsz_ast::SourceFile;

use super::*;
use crate::test_support::*;

fn collect(statements: serde_json::Value) -> (SourceFile, ExternalModuleInfo) {
    let (file, binder) = bind("main.ts", statements, &commonjs());
    let mut ctx = EmitContext::new();
    ctx.begin_file(&file);
    let info = collect_external_module_info(&file, &mut ctx, &*binder);
    (file, info)
}

fn names(info: &ExternalModuleInfo) -> Vec<&str> {
    info.exported_names.iter().map(|name| name.text()).collect()
}

#[test]
fn test_records_external_imports_in_source_order() {
    let (file, info) = collect(json!([
        import_side_effect("./a"),
        import_equals(0, "b", "./b"),
        expression_statement(ident("b")),
        export_star("./c"),
        export_named(&[(None, "d")], Some("./d")),
    ]));

    let expected: Vec<_> = [0, 1, 3, 4].iter().map(|&i| file.statements[i].id()).collect();
    assert_eq!(info.external_imports, expected);
    assert!(info.has_export_stars_to_export_values);
}

#[test]
fn test_internal_import_equals_is_not_an_external_import() {
    let (_, info) = collect(json!([
        {
            "kind": "ImportEquals",
            "name": ident("x"),
            "module_reference": { "entity": ident("N") }
        }
    ]));
    assert!(info.external_imports.is_empty());
}

#[test]
fn test_exported_variables_are_named_but_not_bound() {
    let (_, info) = collect(json!([
        variable(EXPORT, "let", ident("a"), Some(number("1"))),
        variable(EXPORT, "const", ident("b"), None),
    ]));
    assert_eq!(names(&info), ["a", "b"]);
    assert!(info.exported_bindings.is_empty());
}

#[test]
fn test_exported_binding_patterns_contribute_every_name() {
    let pattern = json!({
        "kind": "ObjectBindingPattern",
        "elements": [
            { "name": ident("x") },
            { "property_name": { "kind": "Identifier", "text": "y" }, "name": ident("z") }
        ]
    });
    let array = json!({
        "kind": "ArrayBindingPattern",
        "elements": [
            { "kind": "BindingElement", "name": ident("p") },
            { "kind": "Omitted" },
            { "kind": "BindingElement", "name": ident("q") }
        ]
    });
    let (_, info) = collect(json!([
        variable(EXPORT, "const", pattern, Some(ident("source"))),
        variable(EXPORT, "const", array, Some(ident("list"))),
    ]));
    assert_eq!(names(&info), ["x", "z", "p", "q"]);
}

#[test]
fn test_exported_functions_are_tracked_apart_from_names() {
    let (file, info) = collect(json!([
        function(EXPORT, Some("f"), vec![]),
        class(EXPORT, Some("C")),
    ]));

    let function_id = file.statements[0].id();
    let class_id = file.statements[1].id();
    assert_eq!(names(&info), ["C"]);
    assert!(info.exported_functions.contains(&function_id));
    assert_eq!(
        info.exported_bindings_of(function_id)
            .iter()
            .map(|name| name.text())
            .collect::<Vec<_>>(),
        ["f"]
    );
    assert_eq!(
        info.exported_bindings_of(class_id)
            .iter()
            .map(|name| name.text())
            .collect::<Vec<_>>(),
        ["C"]
    );
}

#[test]
fn test_anonymous_default_class_gets_generated_name() {
    let (file, info) = collect(json!([class(EXPORT_DEFAULT, None)]));

    let bindings = info.exported_bindings_of(file.statements[0].id());
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].text(), "default_1");
    assert!(info.exported_names.is_empty());
}

#[test]
fn test_only_first_default_export_is_recorded() {
    let (file, info) = collect(json!([
        function(EXPORT_DEFAULT, Some("f"), vec![]),
        class(EXPORT_DEFAULT, Some("C")),
    ]));
    assert_eq!(info.exported_bindings_of(file.statements[0].id()).len(), 1);
    assert!(info.exported_bindings_of(file.statements[1].id()).is_empty());
}

#[test]
fn test_local_export_specifiers_are_indexed_by_local_name() {
    let (_, info) = collect(json!([
        variable(0, "let", ident("a"), None),
        export_named(&[(Some("a"), "b"), (None, "a")], None),
    ]));

    assert_eq!(names(&info), ["b", "a"]);
    let specifiers = info.export_specifiers_of("a");
    assert_eq!(specifiers.len(), 2);
    assert_eq!(specifiers[0].name.text(), "b");
    assert!(info.export_specifiers_of("b").is_empty());
}

#[test]
fn test_reexport_specifiers_are_not_indexed() {
    let (_, info) = collect(json!([export_named(&[(Some("a"), "b")], Some("./m"))]));

    assert_eq!(names(&info), ["b"]);
    assert!(info.export_specifiers.is_empty());
}

#[test]
fn test_exported_import_binds_to_its_specifier() {
    let (_, info) = collect(json!([
        import_named(&[(None, "a")], "./m"),
        export_named(&[(None, "a")], None),
    ]));

    assert_eq!(names(&info), ["a"]);
    assert_eq!(info.exported_bindings.len(), 1);
}

#[test]
fn test_function_exported_by_specifier_moves_to_functions() {
    let (file, info) = collect(json!([
        function(0, Some("f"), vec![]),
        export_named(&[(None, "f"), (Some("f"), "g")], None),
    ]));

    let function_id = file.statements[0].id();
    assert!(names(&info).is_empty());
    assert_eq!(info.exported_functions.len(), 1);
    assert_eq!(
        info.exported_bindings_of(function_id)
            .iter()
            .map(|name| name.text())
            .collect::<Vec<_>>(),
        ["f", "g"]
    );
}

#[test]
fn test_duplicate_export_names_are_recorded_once() {
    let (_, info) = collect(json!([
        variable(EXPORT, "let", ident("a"), None),
        export_named(&[(None, "a")], None),
        export_namespace("a", "./m"),
    ]));
    assert_eq!(names(&info), ["a"]);
}

#[test]
fn test_first_export_equals_wins() {
    let (_, info) = collect(json!([
        export_equals(ident("first")),
        export_equals(ident("second")),
    ]));

    let export_equals = info.export_equals.expect("export = should be recorded");
    assert_eq!(
        export_equals.expression.as_identifier().map(|ident| ident.text.as_str()),
        Some("first")
    );
}

#[test]
fn test_namespace_reexport_is_named_and_bound() {
    let (file, info) = collect(json!([export_namespace("ns", "./m")]));

    assert_eq!(names(&info), ["ns"]);
    assert_eq!(info.exported_bindings_of(file.statements[0].id()).len(), 1);
    assert!(!info.has_export_stars_to_export_values);
}
