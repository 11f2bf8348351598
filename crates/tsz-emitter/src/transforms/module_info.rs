//! Per-file inventory of imports and exports.
//!
//! [`collect_external_module_info`] walks the top-level statements once and
//! records what the module transforms need before they rewrite anything:
//! which statements pull in other modules, which local declarations are
//! exported and under which names, and whether `export =` or `export *`
//! are present.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;
use tsz_ast::statement::{
    ArrayBindingElement, ExportAssignment, ExportDeclaration, ExportSpecifier,
    FunctionDeclaration, ModuleReference, NamedExportBindings,
};
use tsz_ast::{
    BindingName, Identifier, ModifierFlags, ModuleExportName, NodeId, SourceFile, Statement,
};
use tsz_binder::{DeclarationKind, ReferenceResolver};

use crate::emit_context::EmitContext;
use crate::emit_flags::EmitFlags;

/// Export aliases of one local declaration. Almost always a single name.
pub type ExportAliases = SmallVec<[ModuleExportName; 1]>;

#[derive(Debug, Default)]
pub struct ExternalModuleInfo {
    /// Imports and re-exports of other modules (`import`, `import = require`,
    /// `export ... from`), in source order.
    pub external_imports: Vec<NodeId>,
    /// Local name -> the specifiers exporting it. Re-exports of other
    /// modules are not included.
    pub export_specifiers: IndexMap<String, Vec<ExportSpecifier>>,
    /// Declaration -> the names it is exported under.
    pub exported_bindings: FxHashMap<NodeId, ExportAliases>,
    /// Every exported name except those of exported function declarations.
    pub exported_names: Vec<ModuleExportName>,
    /// Top-level exported function declarations, in registration order.
    pub exported_functions: IndexSet<NodeId>,
    /// The first `export =`.
    pub export_equals: Option<ExportAssignment>,
    /// Whether the module contains `export * from "m"`.
    pub has_export_stars_to_export_values: bool,
}

impl ExternalModuleInfo {
    /// Export aliases recorded for `declaration`.
    #[must_use]
    pub fn exported_bindings_of(&self, declaration: NodeId) -> &[ModuleExportName] {
        self.exported_bindings
            .get(&declaration)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Specifiers exporting the local binding `name`.
    #[must_use]
    pub fn export_specifiers_of(&self, name: &str) -> &[ExportSpecifier] {
        self.export_specifiers
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Build the [`ExternalModuleInfo`] of `file`.
///
/// Names are registered first-come: an export name seen once is never
/// recorded again, whichever statement repeats it.
pub fn collect_external_module_info(
    file: &SourceFile,
    ctx: &mut EmitContext,
    resolver: &dyn ReferenceResolver,
) -> ExternalModuleInfo {
    let mut collector = Collector {
        ctx,
        resolver,
        unique_exports: FxHashSet::default(),
        has_export_default: false,
        output: ExternalModuleInfo::default(),
    };
    for statement in &file.statements {
        collector.collect_statement(statement);
    }
    let info = collector.output;
    trace!(
        file = %file.file_name,
        imports = info.external_imports.len(),
        exported_names = info.exported_names.len(),
        exported_functions = info.exported_functions.len(),
        export_equals = info.export_equals.is_some(),
        "collected external module info"
    );
    info
}

struct Collector<'a> {
    ctx: &'a mut EmitContext,
    resolver: &'a dyn ReferenceResolver,
    unique_exports: FxHashSet<String>,
    has_export_default: bool,
    output: ExternalModuleInfo,
}

impl Collector<'_> {
    fn collect_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Import(decl) => self.output.external_imports.push(decl.id),
            Statement::ImportEquals(decl) => {
                if matches!(decl.module_reference, ModuleReference::External(_)) {
                    self.output.external_imports.push(decl.id);
                }
            }
            Statement::Export(decl) => self.collect_export_declaration(decl),
            Statement::ExportAssignment(assignment) => {
                if assignment.is_export_equals && self.output.export_equals.is_none() {
                    self.output.export_equals = Some(assignment.clone());
                }
            }
            Statement::Variable(stmt) if stmt.modifiers.contains(ModifierFlags::EXPORT) => {
                for decl in &stmt.declaration_list.declarations {
                    self.collect_exported_variable(decl.id, &decl.name);
                }
            }
            Statement::Function(decl) if decl.modifiers.contains(ModifierFlags::EXPORT) => {
                let is_default = decl.modifiers.contains(ModifierFlags::DEFAULT);
                self.add_exported_function_declaration(decl, None, is_default);
            }
            Statement::Class(decl) if decl.modifiers.contains(ModifierFlags::EXPORT) => {
                if decl.modifiers.contains(ModifierFlags::DEFAULT) {
                    if !self.has_export_default {
                        let name = match &decl.name {
                            Some(name) => name.clone(),
                            None => self.ctx.new_generated_name_for_node(decl.id, "default"),
                        };
                        self.add_exported_binding(decl.id, ModuleExportName::Identifier(name));
                        self.has_export_default = true;
                    }
                } else if let Some(name) = &decl.name
                    && self.add_unique_export(&name.text)
                {
                    let name = ModuleExportName::Identifier(name.clone());
                    self.add_exported_binding(decl.id, name.clone());
                    self.output.exported_names.push(name);
                }
            }
            _ => {}
        }
    }

    fn collect_export_declaration(&mut self, decl: &ExportDeclaration) {
        if decl.module_specifier.is_none() {
            // export { x, y }
            self.add_exported_names_for_export_declaration(decl);
            return;
        }
        self.output.external_imports.push(decl.id);
        match &decl.export_clause {
            // export * from "m"
            None => self.output.has_export_stars_to_export_values = true,
            // export { x, y } from "m"
            Some(NamedExportBindings::NamedExports(_)) => {
                self.add_exported_names_for_export_declaration(decl);
            }
            // export * as ns from "m"
            Some(NamedExportBindings::NamespaceExport(namespace)) => {
                if self.add_unique_export(namespace.name.text()) {
                    self.add_exported_binding(decl.id, namespace.name.clone());
                    self.output.exported_names.push(namespace.name.clone());
                }
            }
        }
    }

    fn add_unique_export(&mut self, name: &str) -> bool {
        self.unique_exports.insert(name.to_string())
    }

    fn add_exported_binding(&mut self, declaration: NodeId, name: ModuleExportName) {
        self.output
            .exported_bindings
            .entry(declaration)
            .or_default()
            .push(name);
    }

    fn add_exported_names_for_export_declaration(&mut self, decl: &ExportDeclaration) {
        let Some(NamedExportBindings::NamedExports(named)) = &decl.export_clause else {
            return;
        };
        for specifier in &named.elements {
            let export_name = specifier.name.text();
            if !self.add_unique_export(export_name) {
                continue;
            }
            if let ModuleExportName::Identifier(local) = specifier.property_name_or_name() {
                if decl.module_specifier.is_none() {
                    self.output
                        .export_specifiers
                        .entry(local.text.clone())
                        .or_default()
                        .push(specifier.clone());
                }

                let declaration = match self.resolver.referenced_import_declaration(local.id) {
                    Some(binding) => Some((binding.declaration, false)),
                    None => self
                        .resolver
                        .referenced_value_declaration(local.id)
                        .map(|decl| (decl.id, decl.kind == DeclarationKind::Function)),
                };
                match declaration {
                    Some((function, true)) => {
                        // Exported next to the declaration instead of through
                        // the `void 0` block.
                        self.unique_exports.remove(export_name);
                        self.add_exported_function(
                            function,
                            None,
                            Some(specifier.name.clone()),
                            specifier.name.is_default(),
                        );
                        continue;
                    }
                    Some((declaration, false)) => {
                        self.add_exported_binding(declaration, specifier.name.clone());
                    }
                    None => {}
                }
            }
            self.output.exported_names.push(specifier.name.clone());
        }
    }

    fn add_exported_function_declaration(
        &mut self,
        decl: &FunctionDeclaration,
        name: Option<ModuleExportName>,
        is_default: bool,
    ) {
        self.add_exported_function(decl.id, decl.name.as_ref(), name, is_default);
    }

    fn add_exported_function(
        &mut self,
        function: NodeId,
        declared_name: Option<&Identifier>,
        name: Option<ModuleExportName>,
        is_default: bool,
    ) {
        self.output.exported_functions.insert(function);
        let name = name.or_else(|| declared_name.cloned().map(ModuleExportName::Identifier));
        if is_default {
            // export default function () {}
            // function f() {} export { f as default };
            if !self.has_export_default {
                let name = match name {
                    Some(name) => name,
                    None => ModuleExportName::Identifier(
                        self.ctx.new_generated_name_for_node(function, "default"),
                    ),
                };
                self.add_exported_binding(function, name);
                self.has_export_default = true;
            }
            return;
        }
        // export function f() {}
        // function f() {} export { f };
        let Some(name) = name else {
            return;
        };
        if self.add_unique_export(name.text()) {
            self.add_exported_binding(function, name);
        }
    }

    fn collect_exported_variable(&mut self, declaration: NodeId, name: &BindingName) {
        match name {
            BindingName::ObjectBindingPattern(pattern) => {
                for element in &pattern.elements {
                    self.collect_exported_variable(element.id, &element.name);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in &pattern.elements {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.collect_exported_variable(element.id, &element.name);
                    }
                }
            }
            BindingName::Identifier(ident) => {
                if ident.is_generated() || !self.add_unique_export(&ident.text) {
                    return;
                }
                let name = ModuleExportName::Identifier(ident.clone());
                self.output.exported_names.push(name.clone());
                if self.ctx.has_emit_flags(ident.id, EmitFlags::LOCAL_NAME) {
                    self.add_exported_binding(declaration, name);
                }
            }
        }
    }
}
