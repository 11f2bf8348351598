//! Import and export declaration binding.
//!
//! Import bindings become alias symbols carrying an [`ImportBinding`] that
//! names the specifier and its enclosing statement. Local names listed in
//! `export { ... }` are resolved like any other reference.

use tsz_ast::statement::{
    ExportDeclaration, ModuleReference, NamedExportBindings, NamedImportBindings,
};
use tsz_ast::{Identifier, ModuleExportName, NodeId, Statement};

use crate::state::BinderState;
use crate::symbols::{ImportBinding, ImportBindingKind, symbol_flags};

impl BinderState {
    /// Declare the aliases introduced by top-level imports.
    pub(crate) fn declare_imports(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::Import(import) => {
                    let Some(clause) = &import.import_clause else {
                        continue;
                    };
                    if clause.is_type_only {
                        continue;
                    }
                    if let Some(name) = &clause.name {
                        self.declare_alias(name, clause.id, import.id, ImportBindingKind::Default);
                    }
                    match &clause.named_bindings {
                        Some(NamedImportBindings::NamespaceImport(ns)) => {
                            self.declare_alias(
                                &ns.name,
                                ns.id,
                                import.id,
                                ImportBindingKind::Namespace,
                            );
                        }
                        Some(NamedImportBindings::NamedImports(named)) => {
                            for specifier in named.elements.iter().filter(|s| !s.is_type_only) {
                                let kind = ImportBindingKind::Named {
                                    name: specifier.imported_name_text().to_string(),
                                };
                                self.declare_alias(&specifier.name, specifier.id, import.id, kind);
                            }
                        }
                        None => {}
                    }
                }
                Statement::ImportEquals(import) if !import.is_type_only => {
                    // `import x = N.y` aliases an entity, not a module.
                    if matches!(import.module_reference, ModuleReference::External(_)) {
                        self.declare_alias(
                            &import.name,
                            import.id,
                            import.id,
                            ImportBindingKind::ImportEquals,
                        );
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_alias(
        &mut self,
        name: &Identifier,
        declaration: NodeId,
        import_declaration: NodeId,
        kind: ImportBindingKind,
    ) {
        let sym_id = self.declare_symbol(name, symbol_flags::ALIAS, None);
        if let Some(sym) = self.symbols.get_mut(sym_id) {
            sym.import = Some(ImportBinding {
                declaration,
                import_declaration,
                kind,
            });
        }
    }

    /// `export { a, b as c }` refers to local bindings; re-exports from
    /// another module do not.
    pub(crate) fn bind_export_declaration(&mut self, export: &ExportDeclaration) {
        if export.module_specifier.is_some() || export.is_type_only {
            return;
        }
        if let Some(NamedExportBindings::NamedExports(named)) = &export.export_clause {
            for specifier in &named.elements {
                if let ModuleExportName::Identifier(local) = specifier.property_name_or_name() {
                    self.bind_reference(local);
                }
            }
        }
    }
}
