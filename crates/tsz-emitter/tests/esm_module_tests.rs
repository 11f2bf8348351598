use serde_json::{Value, json};
use tsz_common::{CompilerOptions, ModuleKind};

use super::*;
use crate::test_support::*;

const REQUIRE_SHIM: &str = "import { createRequire as _createRequire } from \"module\";\nconst __require = _createRequire(import.meta.url);\n";

fn emit(options: CompilerOptions, file_name: &str, statements: Value) -> String {
    let factory: TransformerFactory = Box::new(new_es_module_transformer);
    emit_with(&factory, options, file_name, statements)
}

fn esnext() -> CompilerOptions {
    CompilerOptions::with_module(ModuleKind::ESNext)
}

fn rewriting(module: ModuleKind) -> CompilerOptions {
    CompilerOptions {
        rewrite_relative_import_extensions: Some(true),
        ..CompilerOptions::with_module(module)
    }
}

#[test]
fn test_module_syntax_passes_through() {
    let output = emit(
        esnext(),
        "main.ts",
        json!([
            import_named(&[(None, "a"), (Some("b"), "c")], "./m"),
            export_named(&[(None, "a")], None),
            export_star("./n"),
        ]),
    );
    assert_eq!(
        output,
        "import { a, b as c } from \"./m\";\nexport { a };\nexport * from \"./n\";\n"
    );
}

#[test]
fn test_script_is_untouched() {
    let output = emit(
        esnext(),
        "main.ts",
        json!([variable(0, "var", ident("x"), Some(number("1")))]),
    );
    assert_eq!(output, "var x = 1;\n");
}

// =============================================================================
// import = require()
// =============================================================================

#[test]
fn test_import_equals_dropped_before_node16() {
    let output = emit(
        esnext(),
        "main.ts",
        json!([import_equals(0, "x", "./m"), expression_statement(ident("x"))]),
    );
    assert_eq!(output, "x;\nexport {};\n");
}

#[test]
fn test_import_equals_uses_create_require_under_node() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::NodeNext),
        "main.mts",
        json!([import_equals(0, "x", "./m"), expression_statement(ident("x"))]),
    );
    assert_eq!(
        output,
        format!("{REQUIRE_SHIM}const x = __require(\"./m\");\nx;\n")
    );
}

#[test]
fn test_shim_is_created_once() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::Node16),
        "main.mts",
        json!([import_equals(0, "a", "./a"), import_equals(0, "b", "./b")]),
    );
    assert_eq!(output.matches("_createRequire(import.meta.url)").count(), 1);
    assert!(output.ends_with("const a = __require(\"./a\");\nconst b = __require(\"./b\");\n"));
}

#[test]
fn test_exported_import_equals_adds_named_export() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::NodeNext),
        "main.mts",
        json!([import_equals(EXPORT, "x", "./m")]),
    );
    assert_eq!(
        output,
        format!("{REQUIRE_SHIM}const x = __require(\"./m\");\nexport {{ x }};\n")
    );
}

#[test]
fn test_shim_names_avoid_collisions() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::NodeNext),
        "main.mts",
        json!([
            import_equals(0, "x", "./m"),
            expression_statement(ident("__require")),
        ]),
    );
    assert!(output.contains("const __require_1 = _createRequire(import.meta.url);\n"));
    assert!(output.contains("const x = __require_1(\"./m\");\n"));
}

#[test]
fn test_import_equals_is_plain_require_under_preserve() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::Preserve),
        "main.ts",
        json!([import_equals(0, "x", "./m"), expression_statement(ident("x"))]),
    );
    assert_eq!(output, "const x = require(\"./m\");\nx;\n");
}

#[test]
#[should_panic(expected = "import= for internal module references")]
fn test_internal_import_equals_is_rejected() {
    emit(
        CompilerOptions::with_module(ModuleKind::NodeNext),
        "main.mts",
        json!([{
            "kind": "ImportEquals",
            "name": ident("x"),
            "module_reference": { "entity": ident("N") }
        }]),
    );
}

// =============================================================================
// export =
// =============================================================================

#[test]
fn test_export_equals_dropped() {
    let output = emit(esnext(), "main.ts", json!([export_equals(number("1"))]));
    assert_eq!(output, "export {};\n");
}

#[test]
fn test_export_equals_kept_as_module_exports_under_preserve() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::Preserve),
        "main.ts",
        json!([export_equals(number("1"))]),
    );
    assert_eq!(output, "module.exports = 1;\n");
}

#[test]
fn test_export_default_is_kept() {
    let output = emit(esnext(), "main.ts", json!([export_default(ident("value"))]));
    assert_eq!(output, "export default value;\n");
}

// =============================================================================
// export * as ns
// =============================================================================

#[test]
fn test_namespace_reexport_split_for_es2015() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::ES2015),
        "main.ts",
        json!([export_namespace("ns", "./m")]),
    );
    assert_eq!(
        output,
        "import * as ns_1 from \"./m\";\nexport { ns_1 as ns };\n"
    );
}

#[test]
fn test_default_namespace_reexport_split_for_es2015() {
    let output = emit(
        CompilerOptions::with_module(ModuleKind::ES2015),
        "main.ts",
        json!([export_namespace("default", "./m")]),
    );
    assert_eq!(
        output,
        "import * as default_1 from \"./m\";\nexport default default_1;\n"
    );
}

#[test]
fn test_namespace_reexport_kept_for_later_targets() {
    for module in [ModuleKind::ES2020, ModuleKind::ESNext] {
        let output = emit(
            CompilerOptions::with_module(module),
            "main.ts",
            json!([export_namespace("ns", "./m")]),
        );
        assert_eq!(output, "export * as ns from \"./m\";\n");
    }
}

// =============================================================================
// Specifier rewriting
// =============================================================================

#[test]
fn test_static_specifiers_rewritten() {
    let output = emit(
        rewriting(ModuleKind::ESNext),
        "main.ts",
        json!([
            import_side_effect("./a.ts"),
            export_star("./b.mts"),
            import_default("c", "./c.d.ts"),
        ]),
    );
    assert_eq!(
        output,
        "import \"./a.js\";\nexport * from \"./b.mjs\";\nimport c from \"./c.d.ts\";\n"
    );
}

#[test]
fn test_specifiers_untouched_without_option() {
    let output = emit(esnext(), "main.ts", json!([import_side_effect("./a.ts")]));
    assert_eq!(output, "import \"./a.ts\";\n");
}

#[test]
fn test_dynamic_import_literal_rewritten() {
    let output = emit(
        rewriting(ModuleKind::ESNext),
        "main.ts",
        json!([
            expression_statement(import_call(string("./a.ts"))),
            export_named(&[], None),
        ]),
    );
    assert_eq!(output, "import(\"./a.js\");\nexport {};\n");
}

#[test]
fn test_dynamic_import_expression_uses_runtime_helper() {
    let output = emit(
        rewriting(ModuleKind::ESNext),
        "main.ts",
        json!([
            expression_statement(import_call(ident("path"))),
            export_named(&[], None),
        ]),
    );
    assert!(output.starts_with("var __rewriteRelativeImportExtension = "));
    assert!(output.ends_with("import(__rewriteRelativeImportExtension(path));\nexport {};\n"));
}

#[test]
fn test_runtime_helper_imported_from_tslib() {
    let options = CompilerOptions {
        import_helpers: Some(true),
        ..rewriting(ModuleKind::ESNext)
    };
    let output = emit(
        options,
        "main.ts",
        json!([
            expression_statement(import_call(ident("path"))),
            export_named(&[], None),
        ]),
    );
    assert_eq!(
        output,
        "import { __rewriteRelativeImportExtension } from \"tslib\";\nimport(__rewriteRelativeImportExtension(path));\nexport {};\n"
    );
}

#[test]
fn test_require_in_javascript_rewritten() {
    let output = emit(
        rewriting(ModuleKind::ESNext),
        "main.js",
        json!([
            import_side_effect("./x.js"),
            expression_statement(call(ident("require"), vec![string("./a.ts")])),
        ]),
    );
    assert_eq!(output, "import \"./x.js\";\nrequire(\"./a.js\");\n");
}

#[test]
fn test_require_in_typescript_untouched() {
    let output = emit(
        rewriting(ModuleKind::ESNext),
        "main.ts",
        json!([
            import_side_effect("./x.js"),
            expression_statement(call(ident("require"), vec![string("./a.ts")])),
        ]),
    );
    assert_eq!(output, "import \"./x.js\";\nrequire(\"./a.ts\");\n");
}
