use serde_json::{Value, json};
use tsz_common::{CompilerOptions, ModuleKind};

use super::*;
use crate::test_support::*;

const PROLOGUE: &str =
    "\"use strict\";\nObject.defineProperty(exports, \"__esModule\", { value: true });\n";

fn emit(options: CompilerOptions, file_name: &str, statements: Value) -> String {
    let factory: TransformerFactory = Box::new(new_common_js_module_transformer);
    emit_with(&factory, options, file_name, statements)
}

fn emit_main(statements: Value) -> String {
    emit(commonjs(), "main.ts", statements)
}

fn with_interop() -> CompilerOptions {
    CompilerOptions {
        es_module_interop: Some(true),
        ..commonjs()
    }
}

// =============================================================================
// Imports
// =============================================================================

#[test]
fn test_named_import_reads_through_module_object() {
    let output = emit_main(json!([
        import_named(&[(None, "x")], "./m"),
        variable(EXPORT, "let", ident("count"), Some(ident("x"))),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.count = void 0;\nconst m_1 = require(\"./m\");\nexports.count = m_1.x;\n"
        )
    );
}

#[test]
fn test_default_import_reexported_as_default() {
    let output = emit_main(json!([
        import_default("d", "./m"),
        export_default(ident("d")),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}const m_1 = require(\"./m\");\nexports.default = m_1.default;\n")
    );
}

#[test]
fn test_side_effect_import_becomes_bare_require() {
    let output = emit_main(json!([import_side_effect("./polyfill")]));
    assert_eq!(output, format!("{PROLOGUE}require(\"./polyfill\");\n"));
}

#[test]
fn test_namespace_import_binds_directly() {
    let output = emit_main(json!([
        import_namespace("ns", "./m"),
        expression_statement(call(property_access(ident("ns"), "f"), vec![])),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}const ns = require(\"./m\");\nns.f();\n")
    );
}

#[test]
fn test_import_equals_becomes_const_require() {
    let output = emit_main(json!([
        import_equals(0, "x", "./m"),
        expression_statement(ident("x")),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}const x = require(\"./m\");\nx;\n")
    );
}

#[test]
fn test_exported_import_equals_assigns_exports() {
    let output = emit_main(json!([import_equals(EXPORT, "x", "./m")]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.x = require(\"./m\");\n")
    );
}

#[test]
fn test_call_to_named_import_is_indirect() {
    let output = emit_main(json!([
        import_named(&[(None, "f")], "./m"),
        expression_statement(call(ident("f"), vec![number("1")])),
    ]));
    assert!(output.ends_with("const m_1 = require(\"./m\");\n(0, m_1.f)(1);\n"));
}

#[test]
fn test_import_of_non_identifier_name_uses_element_access() {
    let import = json!({
        "kind": "Import",
        "import_clause": {
            "named_bindings": {
                "kind": "NamedImports",
                "elements": [{
                    "property_name": { "kind": "StringLiteral", "text": "a-b" },
                    "name": ident("ab")
                }]
            }
        },
        "module_specifier": string("./m")
    });
    let output = emit_main(json!([import, expression_statement(ident("ab"))]));
    assert!(output.ends_with("m_1[\"a-b\"];\n"));
}

#[test]
fn test_imported_tag_is_called_indirectly() {
    let tagged = json!({
        "kind": "TaggedTemplate",
        "tag": ident("f"),
        "template": { "head": "x", "spans": [{ "expression": ident("y"), "literal": "" }] }
    });
    let output = emit_main(json!([
        import_named(&[(None, "f")], "./m"),
        expression_statement(tagged),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}const m_1 = require(\"./m\");\n(0, m_1.f)`x${{y}}`;\n")
    );
}

// =============================================================================
// Interop helpers
// =============================================================================

#[test]
fn test_default_import_uses_import_default_helper() {
    let output = emit(
        with_interop(),
        "main.ts",
        json!([
            import_default("d", "./m"),
            expression_statement(call(ident("d"), vec![])),
        ]),
    );
    assert!(output.starts_with("\"use strict\";\nvar __importDefault = "));
    assert!(output.contains("const m_1 = __importDefault(require(\"./m\"));\n"));
    assert!(output.ends_with("(0, m_1.default)();\n"));
}

#[test]
fn test_namespace_import_uses_import_star_helper_and_dependencies() {
    let output = emit(
        with_interop(),
        "main.ts",
        json!([import_namespace("ns", "./m"), expression_statement(ident("ns"))]),
    );
    let create_binding = output.find("var __createBinding").expect("__createBinding");
    let set_default = output.find("var __setModuleDefault").expect("__setModuleDefault");
    let import_star = output.find("var __importStar").expect("__importStar");
    assert!(create_binding < import_star && set_default < import_star);
    assert!(output.contains("const ns = __importStar(require(\"./m\"));\n"));
}

#[test]
fn test_import_helpers_come_from_tslib() {
    let options = CompilerOptions {
        import_helpers: Some(true),
        ..with_interop()
    };
    let output = emit(
        options,
        "main.ts",
        json!([import_default("d", "./m"), expression_statement(ident("d"))]),
    );
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}const tslib_1 = require(\"tslib\");\nconst m_1 = tslib_1.__importDefault(require(\"./m\"));\nm_1.default;\n"
        )
    );
}

#[test]
fn test_named_only_import_skips_helpers() {
    let output = emit(
        with_interop(),
        "main.ts",
        json!([import_named(&[(None, "a")], "./m"), expression_statement(ident("a"))]),
    );
    assert_eq!(
        output,
        format!("{PROLOGUE}const m_1 = require(\"./m\");\nm_1.a;\n")
    );
}

// =============================================================================
// Exports
// =============================================================================

#[test]
fn test_exported_function_is_hoisted() {
    let output = emit_main(json!([function(EXPORT, Some("f"), vec![])]));
    assert_eq!(output, format!("{PROLOGUE}exports.f = f;\nfunction f() {{ }}\n"));
}

#[test]
fn test_anonymous_default_function_gets_generated_name() {
    let output = emit_main(json!([function(EXPORT_DEFAULT, None, vec![])]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.default = default_1;\nfunction default_1() {{ }}\n")
    );
}

#[test]
fn test_exported_class_is_assigned_after_declaration() {
    let output = emit_main(json!([class(EXPORT, Some("C"))]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.C = void 0;\nclass C {{\n}}\nexports.C = C;\n")
    );
}

#[test]
fn test_anonymous_default_class_gets_generated_name() {
    let output = emit_main(json!([class(EXPORT_DEFAULT, None)]));
    assert_eq!(
        output,
        format!("{PROLOGUE}class default_1 {{\n}}\nexports.default = default_1;\n")
    );
}

#[test]
fn test_reexport_is_a_live_binding() {
    let output = emit_main(json!([export_named(&[(Some("a"), "b")], Some("./m"))]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.b = void 0;\nconst m_1 = require(\"./m\");\nObject.defineProperty(exports, \"b\", {{ enumerable: true, get: function () {{ return m_1.a; }} }});\n"
        )
    );
}

#[test]
fn test_exported_named_import_is_a_live_binding() {
    let output = emit_main(json!([
        import_named(&[(None, "a")], "./m"),
        export_named(&[(None, "a")], None),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.a = void 0;\nconst m_1 = require(\"./m\");\nObject.defineProperty(exports, \"a\", {{ enumerable: true, get: function () {{ return m_1.a; }} }});\n"
        )
    );
}

#[test]
fn test_export_star_uses_helper() {
    let output = emit_main(json!([export_star("./m")]));
    assert!(output.starts_with("\"use strict\";\nvar __createBinding = "));
    assert!(output.contains("var __exportStar = "));
    assert!(output.ends_with(
        "Object.defineProperty(exports, \"__esModule\", { value: true });\n__exportStar(require(\"./m\"), exports);\n"
    ));
}

#[test]
fn test_namespace_reexport_assigns_module() {
    let output = emit_main(json!([export_namespace("ns", "./m")]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.ns = void 0;\nexports.ns = require(\"./m\");\n")
    );
}

#[test]
fn test_export_equals_replaces_marker() {
    let output = emit_main(json!([
        variable(0, "const", ident("x"), Some(number("1"))),
        export_equals(ident("x")),
    ]));
    assert_eq!(output, "\"use strict\";\nconst x = 1;\nmodule.exports = x;\n");
}

#[test]
fn test_export_equals_suppresses_other_exports() {
    let output = emit_main(json!([
        variable(EXPORT, "let", ident("a"), Some(number("1"))),
        export_equals(ident("a")),
    ]));
    assert_eq!(output, "\"use strict\";\nexports.a = 1;\nmodule.exports = exports.a;\n");
}

#[test]
fn test_multiple_exported_names_share_one_initializer() {
    let output = emit_main(json!([
        variable(EXPORT, "let", ident("a"), None),
        class(EXPORT, Some("B")),
    ]));
    assert!(output.contains("exports.B = exports.a = void 0;\n"));
}

#[test]
fn test_export_initializers_split_every_fifty_names() {
    let statements: Vec<Value> = (0..51)
        .map(|index| variable(EXPORT, "let", ident(&format!("v{index}")), None))
        .collect();
    let output = emit_main(Value::Array(statements));
    let first: String = (0..50).rev().map(|index| format!("exports.v{index} = ")).collect();
    assert_eq!(
        output,
        format!("{PROLOGUE}{first}void 0;\nexports.v50 = void 0;\n")
    );
}

#[test]
fn test_nested_var_declarations_publish_specifier_exports() {
    let body = || json!({ "kind": "Block", "statements": [expression_statement(call(ident("f"), vec![]))] });
    let output = emit_main(json!([
        export_named(&[(None, "i"), (None, "x"), (None, "y"), (None, "k")], None),
        variable(0, "let", ident("k"), None),
        {
            "kind": "For",
            "initializer": { "kind": "var", "declarations": [{ "name": ident("i"), "initializer": number("0") }] },
            "statement": body()
        },
        {
            "kind": "ForInOrOf",
            "loop_kind": "of",
            "initializer": { "kind": "var", "declarations": [{ "name": ident("x") }] },
            "expression": ident("xs"),
            "statement": body()
        },
        {
            "kind": "If",
            "expression": ident("c"),
            "then_statement": {
                "kind": "Block",
                "statements": [variable(0, "var", ident("y"), Some(number("1")))]
            }
        },
        {
            "kind": "For",
            "initializer": { "kind": "let", "declarations": [{ "name": ident("k"), "initializer": number("0") }] },
            "statement": body()
        },
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.k = exports.y = exports.x = exports.i = void 0;\n\
             let k;\n\
             var i = 0;\n\
             exports.i = i;\n\
             for (;;) {{\n    f();\n}}\n\
             for (var x of xs) {{\n    exports.x = x;\n    f();\n}}\n\
             if (c) {{\n    var y = 1;\n    exports.y = y;\n}}\n\
             for (let k = 0;;) {{\n    f();\n}}\n"
        )
    );
}

// =============================================================================
// Writes to exported bindings
// =============================================================================

#[test]
fn test_assignment_to_exported_variable_targets_exports() {
    let output = emit_main(json!([
        variable(EXPORT, "var", ident("x"), None),
        expression_statement(assign(ident("x"), number("2"))),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.x = void 0;\nexports.x = 2;\n")
    );
}

#[test]
fn test_update_of_exported_variable_targets_exports() {
    let output = emit_main(json!([
        variable(EXPORT, "let", ident("n"), Some(number("0"))),
        expression_statement(postfix(ident("n"), "++")),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.n = void 0;\nexports.n = 0;\nexports.n++;\n")
    );
}

#[test]
fn test_update_of_specifier_exported_local_republishes() {
    let output = emit_main(json!([
        variable(0, "let", ident("n"), Some(number("0"))),
        export_named(&[(None, "n")], None),
        expression_statement(postfix(ident("n"), "++")),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.n = void 0;\nlet n = 0;\nexports.n = n;\nexports.n = (n++, n);\n"
        )
    );
}

#[test]
fn test_used_postfix_update_keeps_old_value_in_temp() {
    let output = emit_main(json!([
        variable(0, "let", ident("n"), Some(number("0"))),
        export_named(&[(None, "n")], None),
        variable(0, "const", ident("m"), Some(postfix(ident("n"), "++"))),
    ]));
    assert_eq!(
        output,
        "\"use strict\";\n\
         var _a;\n\
         Object.defineProperty(exports, \"__esModule\", { value: true });\n\
         exports.n = void 0;\n\
         let n = 0;\n\
         exports.n = n;\n\
         const m = (exports.n = (_a = n++, n), _a);\n"
    );
}

#[test]
fn test_assignment_to_specifier_exported_local_republishes() {
    let output = emit_main(json!([
        variable(0, "let", ident("v"), None),
        export_named(&[(None, "v"), (Some("v"), "w")], None),
        expression_statement(assign(ident("v"), number("1"))),
    ]));
    assert!(output.ends_with("exports.w = exports.v = v = 1;\n"));
}

#[test]
fn test_exported_destructuring_declaration_assigns_exports() {
    let pattern = json!({
        "kind": "ObjectBindingPattern",
        "elements": [
            { "name": ident("a") },
            { "property_name": { "kind": "Identifier", "text": "b" }, "name": ident("c") }
        ]
    });
    let output = emit_main(json!([variable(EXPORT, "const", pattern, Some(ident("o")))]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.c = exports.a = void 0;\n({{ a: exports.a, b: exports.c }} = o);\n"
        )
    );
}

#[test]
fn test_exported_variable_read_inside_function() {
    let output = emit_main(json!([
        variable(EXPORT, "let", ident("a"), Some(number("1"))),
        function(0, Some("g"), vec![json!({ "kind": "Return", "expression": ident("a") })]),
    ]));
    assert!(output.ends_with("function g() {\n    return exports.a;\n}\n"));
}

#[test]
fn test_prefix_and_compound_updates_write_every_alias() {
    let output = emit_main(json!([
        variable(0, "let", ident("x"), Some(number("0"))),
        export_named(&[(None, "x"), (Some("x"), "z")], None),
        expression_statement(prefix("++", ident("x"))),
        expression_statement(binary(ident("x"), "+=", number("2"))),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.z = exports.x = void 0;\n\
             let x = 0;\n\
             exports.x = x;\n\
             exports.z = x;\n\
             exports.z = exports.x = ++x;\n\
             exports.z = exports.x = x += 2;\n"
        )
    );
}

#[test]
fn test_destructuring_into_exported_locals_goes_through_setters() {
    let pattern = json!({
        "kind": "ObjectLiteral",
        "properties": [
            { "kind": "ShorthandPropertyAssignment", "name": ident("a") },
            { "kind": "ShorthandPropertyAssignment", "name": ident("b") },
            { "kind": "SpreadAssignment", "expression": ident("c") }
        ]
    });
    let output = emit_main(json!([
        {
            "kind": "Variable",
            "declaration_list": {
                "kind": "let",
                "declarations": [{ "name": ident("a") }, { "name": ident("b") }, { "name": ident("c") }]
            }
        },
        export_named(&[(None, "a"), (None, "b"), (None, "c")], None),
        expression_statement(assign(pattern, ident("o"))),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.c = exports.b = exports.a = void 0;\n\
             let a, b, c;\n\
             ({{ a: {{ set value(value) {{ exports.a = a = value; }} }}.value, \
             b: {{ set value(value_1) {{ exports.b = b = value_1; }} }}.value, \
             ...{{ set value(value_2) {{ exports.c = c = value_2; }} }}.value }} = o);\n"
        )
    );
}

#[test]
fn test_array_rest_into_exported_local_goes_through_setter() {
    let pattern = json!({
        "kind": "ArrayLiteral",
        "elements": [{ "kind": "Spread", "expression": ident("rest") }]
    });
    let output = emit_main(json!([
        variable(0, "let", ident("rest"), None),
        export_named(&[(None, "rest")], None),
        expression_statement(assign(pattern, ident("list"))),
    ]));
    assert_eq!(
        output,
        format!(
            "{PROLOGUE}exports.rest = void 0;\n\
             let rest;\n\
             [...{{ set value(value) {{ exports.rest = rest = value; }} }}.value] = list;\n"
        )
    );
}

#[test]
fn test_shorthand_property_reads_export() {
    let object = json!({
        "kind": "ObjectLiteral",
        "properties": [{ "kind": "ShorthandPropertyAssignment", "name": ident("a") }]
    });
    let output = emit_main(json!([
        variable(EXPORT, "let", ident("a"), Some(number("1"))),
        variable(0, "const", ident("o"), Some(object)),
    ]));
    assert_eq!(
        output,
        format!("{PROLOGUE}exports.a = void 0;\nexports.a = 1;\nconst o = {{ a: exports.a }};\n")
    );
}

#[test]
fn test_used_postfix_in_assignment_of_other_binding() {
    // var a = 0, b; export { a }; b = a++;
    let output = emit_main(json!([
        {
            "kind": "Variable",
            "declaration_list": {
                "kind": "var",
                "declarations": [{ "name": ident("a"), "initializer": number("0") }, { "name": ident("b") }]
            }
        },
        export_named(&[(None, "a")], None),
        expression_statement(assign(ident("b"), postfix(ident("a"), "++"))),
    ]));
    assert_eq!(
        output,
        "\"use strict\";\n\
         var _a;\n\
         Object.defineProperty(exports, \"__esModule\", { value: true });\n\
         exports.a = void 0;\n\
         var a = 0, b;\n\
         exports.a = a;\n\
         b = (exports.a = (_a = a++, a), _a);\n"
    );
}

// =============================================================================
// Dynamic import and file handling
// =============================================================================

#[test]
fn test_dynamic_import_of_literal_requires_lazily() {
    let output = emit_main(json!([expression_statement(import_call(string("./m")))]));
    assert_eq!(output, "Promise.resolve().then(() => require(\"./m\"));\n");
}

#[test]
fn test_dynamic_import_of_expression_stringifies_eagerly() {
    let output = emit_main(json!([expression_statement(import_call(ident("name")))]));
    assert_eq!(
        output,
        "Promise.resolve(`${name}`).then(s => require(s));\n"
    );
}

#[test]
fn test_dynamic_import_with_interop_wraps_require() {
    let output = emit(
        with_interop(),
        "main.ts",
        json!([expression_statement(import_call(string("./m")))]),
    );
    assert!(output.ends_with("Promise.resolve().then(() => __importStar(require(\"./m\")));\n"));
}

#[test]
fn test_rewrites_relative_ts_extensions() {
    let options = CompilerOptions {
        rewrite_relative_import_extensions: Some(true),
        ..commonjs()
    };
    let output = emit(
        options,
        "main.ts",
        json!([import_side_effect("./a.ts"), import_side_effect("pkg/b.ts")]),
    );
    assert!(output.ends_with("require(\"./a.js\");\nrequire(\"pkg/b.ts\");\n"));
}

#[test]
fn test_dynamic_import_of_relative_ts_file_is_rewritten() {
    let options = CompilerOptions {
        rewrite_relative_import_extensions: Some(true),
        ..commonjs()
    };
    let output = emit(
        options,
        "main.ts",
        json!([expression_statement(import_call(string("./other.ts")))]),
    );
    assert_eq!(output, "Promise.resolve().then(() => require(\"./other.js\"));\n");
}

#[test]
fn test_untransformed_import_call_shims_specifier_as_written() {
    let options = CompilerOptions {
        rewrite_relative_import_extensions: Some(true),
        ..CompilerOptions::with_module(ModuleKind::NodeNext)
    };
    let output = emit(
        options,
        "main.cts",
        json!([
            import_named(&[(None, "p")], "./paths"),
            expression_statement(import_call(ident("p"))),
        ]),
    );
    assert!(output.starts_with("\"use strict\";\nvar __rewriteRelativeImportExtension = "));
    assert!(output.ends_with(
        "const paths_1 = require(\"./paths\");\nimport(__rewriteRelativeImportExtension(p));\n"
    ));
}

#[test]
fn test_script_without_module_syntax_is_untouched() {
    let output = emit_main(json!([variable(0, "var", ident("x"), Some(number("1")))]));
    assert_eq!(output, "var x = 1;\n");
}

#[test]
fn test_declaration_file_is_untouched() {
    let output = emit(commonjs(), "types.d.ts", json!([export_named(&[(None, "a")], None)]));
    assert_eq!(output, "export { a };\n");
}

#[test]
fn test_existing_use_strict_is_not_duplicated() {
    let output = emit_main(json!([
        expression_statement(string("use strict")),
        export_default(number("1")),
    ]));
    assert_eq!(output, format!("{PROLOGUE}exports.default = 1;\n"));
}

#[test]
#[should_panic(expected = "import= for internal module references")]
fn test_internal_import_equals_is_rejected() {
    emit_main(json!([
        export_default(number("1")),
        {
            "kind": "ImportEquals",
            "name": ident("x"),
            "module_reference": { "entity": ident("N") }
        }
    ]));
}
