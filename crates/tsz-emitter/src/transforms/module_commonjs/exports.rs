//! Statements that publish exported bindings on `exports`.

use rustc_hash::FxHashSet;
use tsz_ast::factory;
use tsz_ast::fold::Statements;
use tsz_ast::statement::{
    ArrayBindingElement, ImportDeclaration, NamedImportBindings, VariableDeclaration,
};
use tsz_ast::{BindingName, Expression, Identifier, ModifierFlags, ModuleExportName, Statement};
use tsz_common::limits::EXPORT_INITIALIZER_CHUNK_SIZE;

use super::ModuleTransform;
use crate::emit_flags::EmitFlags;

fn exports_object() -> Expression {
    factory::create_identifier_expression("exports")
}

fn object_define_property() -> Expression {
    factory::create_property_access(
        factory::create_identifier_expression("Object"),
        factory::create_identifier("defineProperty"),
    )
}

impl ModuleTransform<'_> {
    /// `Object.defineProperty(exports, "__esModule", { value: true });`
    pub(super) fn create_es_module_marker(&mut self) -> Statement {
        let descriptor = factory::create_object_literal(
            vec![factory::create_named_property("value", factory::create_true())],
            false,
        );
        let statement = factory::create_expression_statement(factory::create_call(
            object_define_property(),
            vec![
                exports_object(),
                factory::create_string_literal("__esModule"),
                descriptor,
            ],
        ));
        self.ctx
            .add_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE);
        statement
    }

    /// `exports.b = exports.a = void 0;` for every exported name, so the
    /// names exist on `exports` before any module code runs. Long lists are
    /// split into several statements.
    pub(super) fn append_export_initializers(&mut self, statements: &mut Vec<Statement>) {
        let names = self.info.exported_names.clone();
        for chunk in names.chunks(EXPORT_INITIALIZER_CHUNK_SIZE) {
            let right = chunk.iter().fold(factory::create_void_zero(), |right, name| {
                let left = match name {
                    ModuleExportName::Identifier(ident) => factory::create_property_access(
                        exports_object(),
                        factory::create_identifier(ident.text.clone()),
                    ),
                    ModuleExportName::StringLiteral(lit) => factory::create_element_access(
                        exports_object(),
                        factory::create_string_literal(lit.text.clone()),
                    ),
                };
                factory::create_assignment(left, right)
            });
            let statement = factory::create_expression_statement(right);
            self.ctx
                .add_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE);
            statements.push(statement);
        }
    }

    // =========================================================================
    // Per-declaration exports
    // =========================================================================

    /// `import { a } from "m"; export { a };` re-publishes the import.
    /// Named specifiers are live bindings; default and namespace imports are
    /// plain values.
    pub(super) fn append_exports_of_import_declaration(
        &mut self,
        out: &mut Statements,
        decl: &ImportDeclaration,
    ) {
        if self.info.export_equals.is_some() {
            return;
        }
        let Some(clause) = &decl.import_clause else {
            return;
        };
        let mut seen = FxHashSet::default();
        if let Some(name) = &clause.name {
            self.append_exports_of_declaration(out, name, &mut seen, false);
        }
        match &clause.named_bindings {
            Some(NamedImportBindings::NamespaceImport(namespace)) => {
                self.append_exports_of_declaration(out, &namespace.name, &mut seen, false);
            }
            Some(NamedImportBindings::NamedImports(named)) => {
                for specifier in &named.elements {
                    self.append_exports_of_declaration(out, &specifier.name, &mut seen, true);
                }
            }
            None => {}
        }
    }

    /// Exports of every name bound by `declarations`. Declarations without an
    /// initializer are skipped: their names are already `void 0` on
    /// `exports`. The bindings of a `for...in`/`for...of` head are always
    /// published since the loop assigns them.
    pub(super) fn append_exports_of_variable_list(
        &mut self,
        out: &mut Statements,
        declarations: &[VariableDeclaration],
        for_in_of: bool,
    ) {
        if self.info.export_equals.is_some() {
            return;
        }
        for declaration in declarations {
            let assigned = declaration.initializer.is_some() || for_in_of;
            self.append_exports_of_binding_name(out, &declaration.name, assigned);
        }
    }

    fn append_exports_of_binding_name(
        &mut self,
        out: &mut Statements,
        name: &BindingName,
        assigned: bool,
    ) {
        match name {
            BindingName::Identifier(ident) => {
                if !ident.is_generated() && assigned {
                    self.append_exports_of_declaration(out, ident, &mut FxHashSet::default(), false);
                }
            }
            BindingName::ObjectBindingPattern(pattern) => {
                for element in &pattern.elements {
                    self.append_exports_of_binding_name(out, &element.name, true);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in &pattern.elements {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.append_exports_of_binding_name(out, &element.name, true);
                    }
                }
            }
        }
    }

    /// `exports.C = C;` after a class, or hoisted above the body for a
    /// function. `name` is the declaration's local name, generated for an
    /// anonymous default export.
    pub(super) fn append_exports_of_class_or_function(
        &mut self,
        out: &mut Statements,
        modifiers: ModifierFlags,
        name: &Identifier,
    ) {
        if self.info.export_equals.is_some() {
            return;
        }
        let mut seen = FxHashSet::default();
        if modifiers.contains(ModifierFlags::EXPORT) {
            let export_name = if modifiers.contains(ModifierFlags::DEFAULT) {
                factory::create_identifier("default")
            } else {
                name.clone()
            };
            self.append_export_statement(
                out,
                &mut seen,
                &ModuleExportName::Identifier(export_name),
                Expression::Identifier(name.clone()),
                false,
                false,
            );
        }
        self.append_exports_of_declaration(out, name, &mut seen, false);
    }

    /// One export statement per `export { name as ... }` specifier naming the
    /// local binding `name`.
    pub(super) fn append_exports_of_declaration(
        &mut self,
        out: &mut Statements,
        name: &Identifier,
        seen: &mut FxHashSet<String>,
        live: bool,
    ) {
        if self.info.export_equals.is_some() {
            return;
        }
        let export_names: Vec<ModuleExportName> = self
            .info
            .export_specifiers_of(&name.text)
            .iter()
            .map(|specifier| specifier.name.clone())
            .collect();
        if export_names.is_empty() {
            return;
        }
        let value = self.visit_expression_identifier(name.clone());
        for export_name in &export_names {
            self.append_export_statement(out, seen, export_name, value.clone(), false, live);
        }
    }

    fn append_export_statement(
        &mut self,
        out: &mut Statements,
        seen: &mut FxHashSet<String>,
        name: &ModuleExportName,
        value: Expression,
        allow_comments: bool,
        live: bool,
    ) {
        if let ModuleExportName::Identifier(ident) = name
            && !seen.insert(ident.text.clone())
        {
            return;
        }
        out.push(self.create_export_statement(name, value, allow_comments, live));
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub(super) fn create_export_statement(
        &mut self,
        name: &ModuleExportName,
        value: Expression,
        allow_comments: bool,
        live: bool,
    ) -> Statement {
        let statement =
            factory::create_expression_statement(self.create_export_expression(name, value, live));
        let mut flags = EmitFlags::START_ON_NEW_LINE;
        if !allow_comments {
            flags |= EmitFlags::NO_COMMENTS;
        }
        self.ctx.add_emit_flags(statement.id(), flags);
        statement
    }

    /// `exports.name = value`, or for a live binding
    /// `Object.defineProperty(exports, "name", { enumerable: true, get: function () { return value; } })`.
    pub(super) fn create_export_expression(
        &mut self,
        name: &ModuleExportName,
        value: Expression,
        live: bool,
    ) -> Expression {
        if !live {
            return factory::create_assignment(
                factory::create_member_access_for_export_name(exports_object(), name),
                value,
            );
        }
        let getter = factory::create_function_expression(
            Vec::new(),
            factory::create_block(vec![factory::create_return(Some(value))], false),
        );
        let descriptor = factory::create_object_literal(
            vec![
                factory::create_named_property("enumerable", factory::create_true()),
                factory::create_named_property("get", getter),
            ],
            false,
        );
        factory::create_call(
            object_define_property(),
            vec![
                exports_object(),
                factory::create_string_literal(name.text()),
                descriptor,
            ],
        )
    }
}
