//! Syntactic queries shared by the binder and the module transforms.

use rustc_hash::FxHashSet;
use tsz_common::{CompilerOptions, ModuleKind};

use crate::expression::{Expression, MetaPropertyKeyword};
use crate::node::Identifier;
use crate::source_file::SourceFile;
use crate::statement::{
    ImportDeclaration, ModuleReference, NamedExportBindings, NamedImportBindings, NamedImports,
    Statement,
};
use crate::visit::{self, Visit};

/// The file has ECMAScript module syntax (or was forced to be a module).
#[must_use]
pub fn is_external_module(file: &SourceFile) -> bool {
    file.external_module_indicator
}

/// A module either by its own syntax or, under a module kind that emits
/// CommonJS, by using `require`/`exports`.
#[must_use]
pub fn is_effective_external_module(file: &SourceFile, options: &CompilerOptions) -> bool {
    is_external_module(file)
        || (is_common_js_containing_module_kind(options.emit_module_kind())
            && file.common_js_module_indicator)
}

#[must_use]
pub fn is_common_js_containing_module_kind(kind: ModuleKind) -> bool {
    kind == ModuleKind::CommonJS || kind.is_node_module()
}

/// Statements whose presence alone makes a file an ECMAScript module.
#[must_use]
pub fn is_external_module_indicator(statement: &Statement) -> bool {
    match statement {
        Statement::Import(_) | Statement::Export(_) | Statement::ExportAssignment(_) => true,
        Statement::ImportEquals(decl) => {
            matches!(decl.module_reference, ModuleReference::External(_))
                || statement.has_export_modifier()
        }
        _ => statement.has_export_modifier(),
    }
}

/// Module syntax at the top level, or `import.meta` anywhere.
#[must_use]
pub fn is_file_probably_external_module(file: &SourceFile) -> bool {
    file.statements.iter().any(is_external_module_indicator)
        || contains_import_meta(&file.statements)
}

#[derive(Default)]
struct UsageScanner {
    import_meta: bool,
    dynamic_import: bool,
    common_js: bool,
}

impl<'ast> Visit<'ast> for UsageScanner {
    fn visit_expression(&mut self, node: &'ast Expression) {
        match node {
            Expression::MetaProperty(meta) if meta.keyword == MetaPropertyKeyword::Import => {
                self.import_meta = true;
            }
            Expression::Call(call) if call.is_import_call() => self.dynamic_import = true,
            Expression::Call(call) if call.is_require_call() => self.common_js = true,
            Expression::PropertyAccess(access) => {
                if let Expression::Identifier(object) = &*access.expression
                    && (object.text == "exports"
                        || (object.text == "module" && access.name.text == "exports"))
                {
                    self.common_js = true;
                }
            }
            _ => {}
        }
        visit::walk_expression(self, node);
    }
}

fn scan(statements: &[Statement]) -> UsageScanner {
    let mut scanner = UsageScanner::default();
    visit::walk_statements(&mut scanner, statements);
    scanner
}

#[must_use]
pub fn contains_import_meta(statements: &[Statement]) -> bool {
    scan(statements).import_meta
}

/// Any `import(...)` call, at any depth.
#[must_use]
pub fn contains_dynamic_import(statements: &[Statement]) -> bool {
    scan(statements).dynamic_import
}

/// `require("x")`, `module.exports` or `exports.x`, at any depth.
#[must_use]
pub fn contains_common_js_usage(statements: &[Statement]) -> bool {
    scan(statements).common_js
}

/// `import d from "m"` or `import d, ... from "m"`.
#[must_use]
pub fn is_default_import(decl: &ImportDeclaration) -> bool {
    decl.import_clause
        .as_ref()
        .is_some_and(|clause| clause.name.is_some())
}

/// `import { default as d } from "m"`.
#[must_use]
pub fn contains_default_reference(bindings: Option<&NamedImportBindings>) -> bool {
    match bindings {
        Some(NamedImportBindings::NamedImports(NamedImports { elements, .. })) => elements
            .iter()
            .any(|element| element.imported_name_text() == "default"),
        _ => false,
    }
}

/// The local name a whole module is bound to: `ns` in `import * as ns`,
/// `x` in `import x = require()`, `ns` in `export * as ns from`.
#[must_use]
pub fn get_namespace_declaration_node(statement: &Statement) -> Option<&Identifier> {
    match statement {
        Statement::Import(decl) => match decl.import_clause.as_ref()?.named_bindings.as_ref()? {
            NamedImportBindings::NamespaceImport(ns) => Some(&ns.name),
            NamedImportBindings::NamedImports(_) => None,
        },
        Statement::ImportEquals(decl) => Some(&decl.name),
        Statement::Export(decl) => match decl.export_clause.as_ref()? {
            NamedExportBindings::NamespaceExport(ns) => ns.name.as_identifier(),
            NamedExportBindings::NamedExports(_) => None,
        },
        _ => None,
    }
}

/// The module specifier of an import, re-export or `import x = require()`.
#[must_use]
pub fn get_external_module_name(statement: &Statement) -> Option<&Expression> {
    match statement {
        Statement::Import(decl) => Some(&decl.module_specifier),
        Statement::ImportEquals(decl) => match &decl.module_reference {
            ModuleReference::External(reference) => Some(&reference.expression),
            ModuleReference::Entity(_) => None,
        },
        Statement::Export(decl) => decl.module_specifier.as_ref(),
        _ => None,
    }
}

/// The specifier text when it is a string literal.
#[must_use]
pub fn get_external_module_name_text(statement: &Statement) -> Option<&str> {
    get_external_module_name(statement)
        .and_then(Expression::as_string_literal)
        .map(|lit| lit.text.as_str())
}

#[derive(Default)]
struct IdentifierCollector<'a> {
    texts: FxHashSet<&'a str>,
}

impl<'ast> Visit<'ast> for IdentifierCollector<'ast> {
    fn visit_identifier(&mut self, node: &'ast Identifier) {
        self.texts.insert(node.text.as_str());
    }
}

/// Every identifier text in the file. Generated names avoid these.
#[must_use]
pub fn collect_identifier_texts(file: &SourceFile) -> FxHashSet<String> {
    let mut collector = IdentifierCollector::default();
    visit::walk_statements(&mut collector, &file.statements);
    collector.texts.into_iter().map(str::to_owned).collect()
}
