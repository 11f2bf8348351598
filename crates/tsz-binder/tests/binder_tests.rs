use super::*;
use serde_json::json;
use tsz_ast::visit::{self, Visit};
use tsz_ast::{Expression, NodeId, SourceFile, Statement};
use tsz_common::{CompilerOptions, ModuleKind};

fn bind(statements: serde_json::Value) -> (SourceFile, BinderState) {
    let statements: Vec<Statement> =
        serde_json::from_value(statements).expect("statements should deserialize");
    let file = SourceFile::new(
        "main.ts",
        statements,
        &CompilerOptions::with_module(ModuleKind::CommonJS),
    );
    let mut binder = BinderState::new();
    binder.bind_source_file(&file);
    (file, binder)
}

/// Ids of identifier expressions with the given text, in source order.
fn references(file: &SourceFile, text: &str) -> Vec<NodeId> {
    struct Finder<'t> {
        text: &'t str,
        found: Vec<NodeId>,
    }
    impl<'ast> Visit<'ast> for Finder<'_> {
        fn visit_expression(&mut self, node: &'ast Expression) {
            if let Expression::Identifier(ident) = node
                && ident.text == self.text
            {
                self.found.push(ident.id);
            }
            visit::walk_expression(self, node);
        }
    }
    let mut finder = Finder {
        text,
        found: Vec::new(),
    };
    visit::walk_statements(&mut finder, &file.statements);
    finder.found
}

fn ident(text: &str) -> serde_json::Value {
    json!({ "kind": "Identifier", "text": text })
}

fn expression_statement(expression: serde_json::Value) -> serde_json::Value {
    json!({ "kind": "Expression", "expression": expression })
}

fn var_statement(kind: &str, name: &str, exported: bool) -> serde_json::Value {
    json!({
        "kind": "Variable",
        "modifiers": u8::from(exported),
        "declaration_list": {
            "kind": kind,
            "declarations": [{ "name": ident(name), "initializer": { "kind": "NumericLiteral", "text": "0" } }]
        }
    })
}

#[test]
fn exported_variable_has_file_export_container() {
    let (file, binder) = bind(json!([
        var_statement("var", "a", true),
        expression_statement(ident("a")),
    ]));
    let [use_id] = references(&file, "a")[..] else {
        panic!("expected one reference");
    };
    assert_eq!(binder.referenced_export_container(use_id), Some(file.id));
    let declarations = binder.referenced_value_declarations(use_id);
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].kind, DeclarationKind::Variable);
}

#[test]
fn non_exported_variable_has_no_container() {
    let (file, binder) = bind(json!([
        var_statement("let", "a", false),
        expression_statement(ident("a")),
    ]));
    let use_id = references(&file, "a")[0];
    assert_eq!(binder.referenced_export_container(use_id), None);
    assert_eq!(binder.referenced_value_declarations(use_id).len(), 1);
}

#[test]
fn exported_function_is_not_an_export_container_reference() {
    let (file, binder) = bind(json!([
        {
            "kind": "Function",
            "modifiers": 1,
            "name": { "text": "f" },
            "body": { "statements": [] }
        },
        expression_statement(json!({ "kind": "Call", "expression": ident("f") })),
    ]));
    let use_id = references(&file, "f")[0];
    assert_eq!(binder.referenced_export_container(use_id), None);
    let declarations = binder.referenced_value_declarations(use_id);
    assert_eq!(declarations[0].kind, DeclarationKind::Function);
    assert_eq!(declarations[0].id, file.statements[0].id());
}

#[test]
fn named_import_resolves_to_its_specifier() {
    let (file, binder) = bind(json!([
        {
            "kind": "Import",
            "import_clause": {
                "named_bindings": {
                    "kind": "NamedImports",
                    "elements": [{
                        "property_name": { "kind": "Identifier", "text": "b" },
                        "name": { "text": "a" }
                    }]
                }
            },
            "module_specifier": { "kind": "StringLiteral", "text": "other" }
        },
        expression_statement(ident("a")),
    ]));
    let use_id = references(&file, "a")[0];
    let binding = binder
        .referenced_import_declaration(use_id)
        .expect("import should resolve");
    assert_eq!(binding.import_declaration, file.statements[0].id());
    assert_eq!(
        binding.kind,
        ImportBindingKind::Named {
            name: "b".to_string()
        }
    );
    assert!(binder.referenced_value_declarations(use_id).is_empty());
}

#[test]
fn default_and_namespace_imports_resolve() {
    let (file, binder) = bind(json!([
        {
            "kind": "Import",
            "import_clause": {
                "name": { "text": "d" },
                "named_bindings": { "kind": "NamespaceImport", "name": { "text": "ns" } }
            },
            "module_specifier": { "kind": "StringLiteral", "text": "other" }
        },
        expression_statement(ident("d")),
        expression_statement(ident("ns")),
    ]));
    let default_binding = binder
        .referenced_import_declaration(references(&file, "d")[0])
        .expect("default import should resolve");
    assert_eq!(default_binding.kind, ImportBindingKind::Default);
    let namespace_binding = binder
        .referenced_import_declaration(references(&file, "ns")[0])
        .expect("namespace import should resolve");
    assert_eq!(namespace_binding.kind, ImportBindingKind::Namespace);
    assert_ne!(default_binding.declaration, namespace_binding.declaration);
}

#[test]
fn parameter_shadows_exported_variable() {
    let (file, binder) = bind(json!([
        var_statement("var", "a", true),
        {
            "kind": "Function",
            "name": { "text": "f" },
            "parameters": [{ "name": ident("a") }],
            "body": { "statements": [expression_statement(ident("a"))] }
        },
    ]));
    let use_id = references(&file, "a")[0];
    assert_eq!(binder.referenced_export_container(use_id), None);
    assert_eq!(
        binder.referenced_value_declarations(use_id)[0].kind,
        DeclarationKind::Parameter
    );
}

#[test]
fn var_in_nested_block_is_hoisted_to_function_scope() {
    let (file, binder) = bind(json!([
        expression_statement(ident("a")),
        {
            "kind": "If",
            "expression": { "kind": "Keyword", "keyword": "true" },
            "then_statement": { "kind": "Block", "statements": [var_statement("var", "a", false)] }
        },
    ]));
    let use_id = references(&file, "a")[0];
    assert_eq!(binder.referenced_value_declarations(use_id).len(), 1);
}

#[test]
fn let_in_nested_block_is_not_visible_outside() {
    let (file, binder) = bind(json!([
        { "kind": "Block", "statements": [var_statement("let", "a", true)] },
        expression_statement(ident("a")),
    ]));
    let use_id = references(&file, "a")[0];
    assert!(binder.referenced_value_declarations(use_id).is_empty());
    assert_eq!(binder.stats().unresolved, 1);
}

#[test]
fn shorthand_property_and_export_specifier_are_references() {
    let (file, binder) = bind(json!([
        var_statement("var", "a", false),
        expression_statement(json!({
            "kind": "ObjectLiteral",
            "properties": [{ "kind": "ShorthandPropertyAssignment", "name": { "text": "a" } }]
        })),
        {
            "kind": "Export",
            "export_clause": {
                "kind": "NamedExports",
                "elements": [{ "name": ident("a") }]
            }
        },
    ]));
    // Both the shorthand name and the export specifier resolve to the var.
    assert_eq!(binder.stats().resolved, 2);
    assert!(references(&file, "a").is_empty());
}

#[test]
fn destructured_variable_declares_binding_elements() {
    let (file, binder) = bind(json!([
        {
            "kind": "Variable",
            "modifiers": 1,
            "declaration_list": {
                "kind": "const",
                "declarations": [{
                    "name": {
                        "kind": "ObjectBindingPattern",
                        "elements": [{ "name": ident("x") }]
                    },
                    "initializer": ident("o")
                }]
            }
        },
        expression_statement(ident("x")),
    ]));
    let use_id = references(&file, "x")[0];
    assert_eq!(binder.referenced_export_container(use_id), Some(file.id));
    let Statement::Variable(stmt) = &file.statements[0] else {
        panic!("expected a variable statement");
    };
    let tsz_ast::BindingName::ObjectBindingPattern(pattern) = &stmt.declaration_list.declarations[0].name
    else {
        panic!("expected an object pattern");
    };
    assert_eq!(
        binder.referenced_value_declarations(use_id)[0].id,
        pattern.elements[0].id
    );
}

#[test]
fn empty_resolver_resolves_nothing() {
    let id = NodeId::fresh();
    assert!(EmptyResolver.referenced_export_container(id).is_none());
    assert!(EmptyResolver.referenced_import_declaration(id).is_none());
    assert!(EmptyResolver.referenced_value_declaration(id).is_none());
}
