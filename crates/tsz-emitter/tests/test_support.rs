//! Shared fixtures: JSON-encoded syntax trees, binding and printing.

use std::sync::Arc;

use serde_json::{Value, json};
use tsz_ast::{SourceFile, Statement};
use tsz_binder::BinderState;
use tsz_common::{CompilerOptions, ModuleKind};

use crate::emit_context::EmitContext;
use crate::printer::print_source_file;
use crate::transforms::{TransformOptions, TransformerFactory};

pub(crate) const EXPORT: u8 = 1;
pub(crate) const EXPORT_DEFAULT: u8 = 3;

/// Parse `statements` into a file named `file_name` and bind it.
pub(crate) fn bind(
    file_name: &str,
    statements: Value,
    options: &CompilerOptions,
) -> (SourceFile, Arc<BinderState>) {
    let statements: Vec<Statement> =
        serde_json::from_value(statements).expect("statements should deserialize");
    let file = SourceFile::new(file_name, statements, options);
    let mut binder = BinderState::new();
    binder.bind_source_file(&file);
    (file, Arc::new(binder))
}

/// Run the transformer built by `factory` over one file and print it.
pub(crate) fn emit_with(
    factory: &TransformerFactory,
    options: CompilerOptions,
    file_name: &str,
    statements: Value,
) -> String {
    let (file, binder) = bind(file_name, statements, &options);
    let transform_options = TransformOptions::new(options, binder);
    let mut transformer = factory(&transform_options);
    let mut ctx = EmitContext::new();
    let file = transformer.transform_source_file(&mut ctx, file);
    print_source_file(&ctx, &file)
}

#[must_use]
pub(crate) fn commonjs() -> CompilerOptions {
    CompilerOptions::with_module(ModuleKind::CommonJS)
}

// =============================================================================
// Tree builders
// =============================================================================

pub(crate) fn ident(text: &str) -> Value {
    json!({ "kind": "Identifier", "text": text })
}

pub(crate) fn string(text: &str) -> Value {
    json!({ "kind": "StringLiteral", "text": text })
}

pub(crate) fn number(text: &str) -> Value {
    json!({ "kind": "NumericLiteral", "text": text })
}

pub(crate) fn call(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "kind": "Call", "expression": callee, "arguments": arguments })
}

pub(crate) fn import_call(argument: Value) -> Value {
    call(json!({ "kind": "Keyword", "keyword": "import" }), vec![argument])
}

pub(crate) fn property_access(expression: Value, name: &str) -> Value {
    json!({ "kind": "PropertyAccess", "expression": expression, "name": ident(name) })
}

pub(crate) fn binary(left: Value, operator: &str, right: Value) -> Value {
    json!({ "kind": "Binary", "left": left, "operator": operator, "right": right })
}

pub(crate) fn assign(left: Value, right: Value) -> Value {
    binary(left, "=", right)
}

pub(crate) fn prefix(operator: &str, operand: Value) -> Value {
    json!({ "kind": "PrefixUnary", "operator": operator, "operand": operand })
}

pub(crate) fn postfix(operand: Value, operator: &str) -> Value {
    json!({ "kind": "PostfixUnary", "operand": operand, "operator": operator })
}

pub(crate) fn expression_statement(expression: Value) -> Value {
    json!({ "kind": "Expression", "expression": expression })
}

pub(crate) fn variable(modifiers: u8, kind: &str, name: Value, initializer: Option<Value>) -> Value {
    json!({
        "kind": "Variable",
        "modifiers": modifiers,
        "declaration_list": {
            "kind": kind,
            "declarations": [{ "name": name, "initializer": initializer }]
        }
    })
}

pub(crate) fn function(modifiers: u8, name: Option<&str>, body: Vec<Value>) -> Value {
    json!({
        "kind": "Function",
        "modifiers": modifiers,
        "name": name.map(ident),
        "body": { "statements": body }
    })
}

pub(crate) fn class(modifiers: u8, name: Option<&str>) -> Value {
    json!({ "kind": "Class", "modifiers": modifiers, "name": name.map(ident) })
}

// =============================================================================
// Module syntax builders
// =============================================================================

/// `import "m";`
pub(crate) fn import_side_effect(specifier: &str) -> Value {
    json!({ "kind": "Import", "module_specifier": string(specifier) })
}

/// `import d from "m";`
pub(crate) fn import_default(name: &str, specifier: &str) -> Value {
    json!({
        "kind": "Import",
        "import_clause": { "name": ident(name) },
        "module_specifier": string(specifier)
    })
}

/// `import * as ns from "m";`
pub(crate) fn import_namespace(name: &str, specifier: &str) -> Value {
    json!({
        "kind": "Import",
        "import_clause": {
            "named_bindings": { "kind": "NamespaceImport", "name": ident(name) }
        },
        "module_specifier": string(specifier)
    })
}

/// `import { a, b as c } from "m";` from `(imported, local)` pairs.
pub(crate) fn import_named(specifiers: &[(Option<&str>, &str)], specifier: &str) -> Value {
    let elements: Vec<Value> = specifiers
        .iter()
        .map(|(property_name, name)| {
            json!({ "property_name": property_name.map(ident), "name": ident(name) })
        })
        .collect();
    json!({
        "kind": "Import",
        "import_clause": {
            "named_bindings": { "kind": "NamedImports", "elements": elements }
        },
        "module_specifier": string(specifier)
    })
}

/// `import x = require("m");`
pub(crate) fn import_equals(modifiers: u8, name: &str, specifier: &str) -> Value {
    json!({
        "kind": "ImportEquals",
        "modifiers": modifiers,
        "name": ident(name),
        "module_reference": { "external": { "expression": string(specifier) } }
    })
}

/// `export { a, b as c };` or, with a specifier, `export { ... } from "m";`.
pub(crate) fn export_named(specifiers: &[(Option<&str>, &str)], from: Option<&str>) -> Value {
    let elements: Vec<Value> = specifiers
        .iter()
        .map(|(property_name, name)| {
            json!({ "property_name": property_name.map(ident), "name": ident(name) })
        })
        .collect();
    json!({
        "kind": "Export",
        "export_clause": { "kind": "NamedExports", "elements": elements },
        "module_specifier": from.map(string)
    })
}

/// `export * from "m";`
pub(crate) fn export_star(specifier: &str) -> Value {
    json!({ "kind": "Export", "module_specifier": string(specifier) })
}

/// `export * as ns from "m";`
pub(crate) fn export_namespace(name: &str, specifier: &str) -> Value {
    json!({
        "kind": "Export",
        "export_clause": { "kind": "NamespaceExport", "name": ident(name) },
        "module_specifier": string(specifier)
    })
}

/// `export default expression;`
pub(crate) fn export_default(expression: Value) -> Value {
    json!({ "kind": "ExportAssignment", "expression": expression })
}

/// `export = expression;`
pub(crate) fn export_equals(expression: Value) -> Value {
    json!({ "kind": "ExportAssignment", "is_export_equals": true, "expression": expression })
}
