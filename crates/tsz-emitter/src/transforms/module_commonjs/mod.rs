//! ES module syntax to CommonJS.
//!
//! Imports become `require` calls bound to generated module variables,
//! exports become assignments to properties of `exports`, and every reference
//! to an imported or exported binding is rewritten to read through the
//! module object it lives on.
//!
//! ```text
//! import d, { x } from "./m";      const m_1 = require("./m");
//! export let count = x;        ->  exports.count = m_1.x;
//! export default d;                exports.default = m_1.default;
//! ```
//!
//! The transform is split across three files:
//! - this file: per-file driver plus statement rewriting
//! - `exports`: builders for the statements that publish exported names
//! - `expressions`: the [`Fold`] implementation that rewrites references,
//!   assignments and `import()` calls

mod exports;
mod expressions;

use std::mem;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::smallvec;
use tracing::{debug, trace};
use tsz_ast::factory;
use tsz_ast::fold::{
    Fold, Statements, fold_statement_children, fold_variable_declaration_list,
};
use tsz_ast::statement::{
    Block, CaseOrDefaultClause, ClassDeclaration, ExportAssignment, ExportDeclaration,
    ForInOrOfStatement, ForInitializer, ForStatement, FunctionDeclaration, ImportDeclaration,
    ImportEqualsDeclaration, ModuleReference, NamedExportBindings, NamedImportBindings,
    VariableDeclaration, VariableDeclarationList, VariableStatement,
};
use tsz_ast::utilities::{
    contains_dynamic_import, is_default_import, is_effective_external_module, is_external_module,
};
use tsz_ast::{
    BindingName, Expression, Identifier, ModifierFlags, ModuleExportName, NodeId, SourceFile,
    Statement, VariableKind,
};
use tsz_binder::ReferenceResolver;
use tsz_common::path::make_identifier_from_module_name;
use tsz_common::{CompilerOptions, ModuleKind};

use crate::emit_context::EmitContext;
use crate::emit_flags::EmitFlags;
use crate::transforms::module_info::{ExternalModuleInfo, collect_external_module_info};
use crate::transforms::module_utils::{
    convert_binding_name_to_assignment_target, count_prologue_directives,
    create_external_helpers_import_declaration_if_needed, ensure_use_strict,
    export_needs_import_star_helper, import_needs_import_default_helper,
    import_needs_import_star_helper, rewrite_module_specifier, should_transform_import_call,
};
use crate::transforms::transformer::{TransformOptions, Transformer};

/// Rewrites ES module files to CommonJS. Files that are neither modules nor
/// contain `import()` pass through untouched.
pub struct CommonJsModuleTransformer {
    options: TransformOptions,
}

impl CommonJsModuleTransformer {
    #[must_use]
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }
}

#[must_use]
pub fn new_common_js_module_transformer(options: &TransformOptions) -> Box<dyn Transformer> {
    Box::new(CommonJsModuleTransformer::new(options))
}

impl Transformer for CommonJsModuleTransformer {
    fn transform_source_file(&mut self, ctx: &mut EmitContext, mut file: SourceFile) -> SourceFile {
        let options = &*self.options.compiler_options;
        if file.is_declaration_file
            || !(is_effective_external_module(&file, options)
                || contains_dynamic_import(&file.statements))
        {
            trace!(file = %file.file_name, "not a module, skipping CommonJS transform");
            return file;
        }
        debug!(file = %file.file_name, "transforming module to CommonJS");

        ctx.begin_file(&file);
        let resolver: &dyn ReferenceResolver = &*self.options.resolver;
        let info = collect_external_module_info(&file, ctx, resolver);
        let file_format = file
            .implied_node_format
            .unwrap_or_else(|| options.emit_module_kind());
        let statements = mem::take(&mut file.statements);

        let mut transform = ModuleTransform {
            module_names: module_names(&statements),
            functions: top_level_functions(&statements),
            is_js: file.is_js(),
            transform_import_calls: should_transform_import_call(file_format, options),
            file_format,
            ctx,
            options,
            resolver,
            info,
        };
        file.statements = transform.transform_module(&file, statements);
        file
    }
}

/// Base names for the variables holding `require`d modules, keyed by the
/// import or re-export that loads them.
fn module_names(statements: &[Statement]) -> FxHashMap<NodeId, String> {
    statements
        .iter()
        .filter_map(|statement| {
            let (id, specifier) = match statement {
                Statement::Import(decl) => (decl.id, &decl.module_specifier),
                Statement::Export(decl) => (decl.id, decl.module_specifier.as_ref()?),
                _ => return None,
            };
            let text = specifier.as_string_literal()?.text.as_str();
            Some((id, make_identifier_from_module_name(text)))
        })
        .collect()
}

fn top_level_functions(
    statements: &[Statement],
) -> FxHashMap<NodeId, (ModifierFlags, Option<Identifier>)> {
    statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Function(decl) => Some((decl.id, (decl.modifiers, decl.name.clone()))),
            _ => None,
        })
        .collect()
}

/// State for rewriting one file.
struct ModuleTransform<'a> {
    ctx: &'a mut EmitContext,
    options: &'a CompilerOptions,
    resolver: &'a dyn ReferenceResolver,
    info: ExternalModuleInfo,
    is_js: bool,
    file_format: ModuleKind,
    transform_import_calls: bool,
    module_names: FxHashMap<NodeId, String>,
    /// Top-level function declarations by id. Their exports are hoisted
    /// above the body, before the declarations themselves are visited.
    functions: FxHashMap<NodeId, (ModifierFlags, Option<Identifier>)>,
}

impl ModuleTransform<'_> {
    fn transform_module(&mut self, file: &SourceFile, source: Vec<Statement>) -> Vec<Statement> {
        self.ctx.start_variable_environment();

        let mut source = source.into_iter().peekable();
        let mut statements = Vec::new();
        while let Some(directive) = source.next_if(Statement::is_prologue_directive) {
            statements.push(directive);
        }
        if is_external_module(file) || self.options.always_strict() {
            ensure_use_strict(&mut statements);
        }
        while let Some(prologue) =
            source.next_if(|statement| self.ctx.has_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE))
        {
            statements.extend(self.visit_top_level(prologue));
        }

        if self.should_emit_es_module_marker(file) {
            statements.push(self.create_es_module_marker());
        }
        if self.info.export_equals.is_none() {
            self.append_export_initializers(&mut statements);
        }
        let exported_functions: Vec<NodeId> =
            self.info.exported_functions.iter().copied().collect();
        let mut hoisted = Statements::new();
        for function in exported_functions {
            let Some((modifiers, name)) = self.functions.get(&function).cloned() else {
                continue;
            };
            let name = match name {
                Some(name) => name,
                None => self.ctx.new_generated_name_for_node(function, "default"),
            };
            self.append_exports_of_class_or_function(&mut hoisted, modifiers, &name);
        }
        statements.extend(hoisted);

        for statement in source {
            statements.extend(self.visit_top_level(statement));
        }
        self.append_export_equals(&mut statements);

        self.ctx.end_and_merge_variable_environment(&mut statements);
        let helpers = self.ctx.read_emit_helpers();
        self.ctx.add_emit_helpers(file.id, helpers);

        if let Some(helpers_import) = create_external_helpers_import_declaration_if_needed(
            self.ctx,
            file,
            self.options,
            Some(self.file_format),
        ) {
            let directives = count_prologue_directives(&statements);
            let insert_at = directives
                + statements[directives..]
                    .iter()
                    .take_while(|statement| {
                        self.ctx
                            .has_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE)
                    })
                    .count();
            let lowered = self.visit_top_level(helpers_import);
            statements.splice(insert_at..insert_at, lowered);
        }
        statements
    }

    /// JS files that only use `module.exports` keep their shape; everything
    /// else that is a module gets the `__esModule` marker unless it uses
    /// `export =`.
    fn should_emit_es_module_marker(&self, file: &SourceFile) -> bool {
        if self.is_js && file.common_js_module_indicator && !file.external_module_indicator {
            return false;
        }
        self.info.export_equals.is_none() && is_external_module(file)
    }

    /// `module.exports = <expression>;` for `export =`.
    fn append_export_equals(&mut self, statements: &mut Vec<Statement>) {
        let Some(expression) = self
            .info
            .export_equals
            .as_ref()
            .map(|export_equals| export_equals.expression.clone())
        else {
            return;
        };
        let value = self.fold_expression(expression);
        let target = factory::create_property_access(
            factory::create_identifier_expression("module"),
            factory::create_identifier("exports"),
        );
        let statement =
            factory::create_expression_statement(factory::create_assignment(target, value));
        self.ctx.add_emit_flags(statement.id(), EmitFlags::NO_COMMENTS);
        statements.push(statement);
    }

    // =========================================================================
    // Top-level statements
    // =========================================================================

    fn visit_top_level(&mut self, statement: Statement) -> Statements {
        match statement {
            Statement::Import(decl) => self.visit_import_declaration(decl),
            Statement::ImportEquals(decl) => self.visit_import_equals_declaration(decl),
            Statement::Export(decl) => self.visit_export_declaration(decl),
            Statement::ExportAssignment(assignment) => self.visit_export_assignment(assignment),
            statement => self.visit_nested_statement(statement),
        }
    }

    fn visit_import_declaration(&mut self, decl: ImportDeclaration) -> Statements {
        let require = self.create_require_call(&decl.module_specifier);
        let Some(clause) = &decl.import_clause else {
            // import "m";
            return smallvec![factory::create_expression_statement(require)];
        };
        let namespace = match &clause.named_bindings {
            Some(NamedImportBindings::NamespaceImport(namespace)) => Some(namespace.name.clone()),
            _ => None,
        };
        let value = self.apply_import_helper(decl.id, require, |ctx, value| {
            if import_needs_import_star_helper(&decl) {
                ctx.create_import_star_helper(value)
            } else if import_needs_import_default_helper(&decl) {
                ctx.create_import_default_helper(value)
            } else {
                value
            }
        });

        let mut declarations = Vec::new();
        match namespace {
            // import * as ns from "m";
            Some(namespace) if !is_default_import(&decl) => {
                declarations.push(variable(namespace, value));
            }
            namespace => {
                // import d, { x } from "m";
                // import d, * as ns from "m";
                let module_name = self.module_name(decl.id);
                declarations.push(variable(module_name.clone(), value));
                if let Some(namespace) = namespace {
                    declarations.push(variable(namespace, Expression::Identifier(module_name)));
                }
            }
        }
        let mut statements: Statements = smallvec![factory::create_variable_statement(
            ModifierFlags::empty(),
            factory::create_variable_declaration_list(VariableKind::Const, declarations),
        )];
        self.append_exports_of_import_declaration(&mut statements, &decl);
        statements
    }

    fn visit_import_equals_declaration(&mut self, decl: ImportEqualsDeclaration) -> Statements {
        let ModuleReference::External(reference) = &decl.module_reference else {
            panic!("import= for internal module references should be handled in an earlier transformer.");
        };
        let require = self.create_require_call(&reference.expression);
        let mut statements = Statements::new();
        if decl.modifiers.contains(ModifierFlags::EXPORT) {
            // export import x = require("m");
            let name = ModuleExportName::Identifier(decl.name.clone());
            let assignment = self.create_export_expression(&name, require, false);
            statements.push(factory::create_expression_statement(assignment));
        } else {
            statements.push(factory::create_simple_variable_statement(
                VariableKind::Const,
                decl.name.clone(),
                Some(require),
            ));
        }
        self.append_exports_of_declaration(
            &mut statements,
            &decl.name,
            &mut FxHashSet::default(),
            false,
        );
        statements
    }

    fn visit_export_declaration(&mut self, decl: ExportDeclaration) -> Statements {
        let Some(specifier) = &decl.module_specifier else {
            // export { x, y }; the bindings are published where declared.
            return Statements::new();
        };
        let require = self.create_require_call(specifier);
        match &decl.export_clause {
            Some(NamedExportBindings::NamedExports(named)) => {
                // export { x, default as y } from "m";
                let module_name = self.module_name(decl.id);
                let mut statements: Statements = smallvec![
                    factory::create_simple_variable_statement(
                        VariableKind::Const,
                        module_name.clone(),
                        Some(require),
                    )
                ];
                let use_default_helper = self.uses_import_helpers(decl.id);
                for element in &named.elements {
                    let imported = element.property_name_or_name();
                    let module = Expression::Identifier(module_name.clone());
                    let target = if use_default_helper && imported.is_default() {
                        self.ctx.create_import_default_helper(module)
                    } else {
                        module
                    };
                    let value = factory::create_member_access_for_export_name(target, imported);
                    let assignment = self.create_export_expression(&element.name, value, true);
                    statements.push(factory::create_expression_statement(assignment));
                }
                statements
            }
            Some(NamedExportBindings::NamespaceExport(namespace)) => {
                // export * as ns from "m";
                let value = self.apply_import_helper(decl.id, require, |ctx, value| {
                    if export_needs_import_star_helper(&decl) {
                        ctx.create_import_star_helper(value)
                    } else {
                        value
                    }
                });
                let assignment = self.create_export_expression(&namespace.name, value, false);
                smallvec![factory::create_expression_statement(assignment)]
            }
            None => {
                // export * from "m";
                let call = self.ctx.create_export_star_helper(require);
                smallvec![factory::create_expression_statement(call)]
            }
        }
    }

    fn visit_export_assignment(&mut self, assignment: ExportAssignment) -> Statements {
        if assignment.is_export_equals {
            // Emitted after the body by `append_export_equals`.
            return Statements::new();
        }
        let value = self.fold_expression(assignment.expression);
        let name = ModuleExportName::Identifier(factory::create_identifier("default"));
        smallvec![self.create_export_statement(&name, value, true, false)]
    }

    fn visit_function_declaration(&mut self, mut decl: Box<FunctionDeclaration>) -> Statements {
        if !decl.modifiers.contains(ModifierFlags::EXPORT) {
            return smallvec![fold_statement_children(self, Statement::Function(decl))];
        }
        // Exports were hoisted to the top of the module.
        decl.modifiers.remove(ModifierFlags::EXPORT | ModifierFlags::DEFAULT);
        if decl.name.is_none() {
            decl.name = Some(self.ctx.new_generated_name_for_node(decl.id, "default"));
        }
        let parameters = mem::take(&mut decl.parameters);
        let body = decl.body.take();
        (decl.parameters, decl.body) = self.fold_function_parts(parameters, body);
        smallvec![Statement::Function(decl)]
    }

    fn visit_class_declaration(&mut self, mut decl: Box<ClassDeclaration>) -> Statements {
        let modifiers = decl.modifiers;
        if modifiers.contains(ModifierFlags::EXPORT) {
            decl.modifiers.remove(ModifierFlags::EXPORT | ModifierFlags::DEFAULT);
            if decl.name.is_none() {
                decl.name = Some(self.ctx.new_generated_name_for_node(decl.id, "default"));
            }
        }
        let name = decl.name.clone();
        let mut statements: Statements =
            smallvec![fold_statement_children(self, Statement::Class(decl))];
        if let Some(name) = name {
            self.append_exports_of_class_or_function(&mut statements, modifiers, &name);
        }
        statements
    }

    fn visit_variable_statement(&mut self, stmt: VariableStatement) -> Statements {
        if !stmt.modifiers.contains(ModifierFlags::EXPORT) {
            let mut exports = Statements::new();
            self.append_exports_of_variable_list(&mut exports, &stmt.declaration_list.declarations, false);
            let mut statements = smallvec![fold_statement_children(self, Statement::Variable(stmt))];
            statements.extend(exports);
            return statements;
        }

        let mut exports = Statements::new();
        self.append_exports_of_variable_list(&mut exports, &stmt.declaration_list.declarations, false);

        let VariableStatement {
            modifiers,
            declaration_list,
            ..
        } = stmt;
        let mut pending = PendingStatements::new(
            declaration_list.kind,
            modifiers.difference(ModifierFlags::EXPORT | ModifierFlags::DEFAULT),
        );
        for mut declaration in declaration_list.declarations {
            let local_name = declaration
                .name
                .as_identifier()
                .filter(|name| self.ctx.has_emit_flags(name.id, EmitFlags::LOCAL_NAME))
                .cloned();
            if let Some(name) = local_name {
                // The binding stays a local; the export reads it.
                if let Some(initializer) = declaration.initializer.take() {
                    let value = self.fold_expression(initializer);
                    let name = ModuleExportName::Identifier(name);
                    declaration.initializer = Some(self.create_export_expression(&name, value, false));
                }
                pending.push_variable(declaration);
                continue;
            }
            let Some(initializer) = declaration.initializer.take() else {
                continue;
            };
            match declaration.name {
                // export const f = () => {};
                // Kept as a declaration so the function is still named `f`.
                BindingName::Identifier(name) if is_named_evaluation_target(&initializer) => {
                    let value = self.fold_expression(initializer);
                    pending.push_variable(factory::create_variable_declaration(
                        BindingName::Identifier(name.clone()),
                        Some(value),
                    ));
                    let target = factory::create_property_access(
                        factory::create_identifier_expression("exports"),
                        name.clone(),
                    );
                    pending.push_expression(factory::create_assignment(
                        target,
                        Expression::Identifier(name),
                    ));
                }
                name => {
                    let assignment = factory::create_assignment(
                        convert_binding_name_to_assignment_target(name),
                        initializer,
                    );
                    pending.push_expression(self.visit_expression(assignment, false));
                }
            }
        }

        let mut statements = pending.finish();
        for statement in statements.iter().skip(1) {
            self.ctx.add_emit_flags(statement.id(), EmitFlags::NO_COMMENTS);
        }
        statements.extend(exports);
        statements
    }

    // =========================================================================
    // Nested statements
    // =========================================================================

    /// Statements that may declare top-level `var`s: blocks and control flow
    /// directly in the module body.
    fn visit_nested_statement(&mut self, statement: Statement) -> Statements {
        match statement {
            Statement::Variable(stmt) => self.visit_variable_statement(stmt),
            Statement::Function(decl) => self.visit_function_declaration(decl),
            Statement::Class(decl) => self.visit_class_declaration(decl),
            Statement::For(stmt) => self.visit_nested_for_statement(stmt),
            Statement::ForInOrOf(stmt) => {
                smallvec![self.visit_nested_for_in_or_of_statement(stmt)]
            }
            Statement::Do(mut stmt) => {
                stmt.statement = self.visit_nested_embedded(stmt.statement);
                stmt.expression = self.fold_expression(stmt.expression);
                smallvec![Statement::Do(stmt)]
            }
            Statement::While(mut stmt) => {
                stmt.expression = self.fold_expression(stmt.expression);
                stmt.statement = self.visit_nested_embedded(stmt.statement);
                smallvec![Statement::While(stmt)]
            }
            Statement::Labeled(mut stmt) => {
                stmt.statement = self.visit_nested_embedded(stmt.statement);
                smallvec![Statement::Labeled(stmt)]
            }
            Statement::With(mut stmt) => {
                stmt.expression = self.fold_expression(stmt.expression);
                stmt.statement = self.visit_nested_embedded(stmt.statement);
                smallvec![Statement::With(stmt)]
            }
            Statement::If(mut stmt) => {
                stmt.expression = self.fold_expression(stmt.expression);
                stmt.then_statement = self.visit_nested_embedded(stmt.then_statement);
                stmt.else_statement = stmt
                    .else_statement
                    .map(|statement| self.visit_nested_embedded(statement));
                smallvec![Statement::If(stmt)]
            }
            Statement::Switch(mut stmt) => {
                stmt.expression = self.fold_expression(stmt.expression);
                stmt.case_block.clauses = mem::take(&mut stmt.case_block.clauses)
                    .into_iter()
                    .map(|clause| self.visit_nested_case_clause(clause))
                    .collect();
                smallvec![Statement::Switch(stmt)]
            }
            Statement::Try(mut stmt) => {
                stmt.try_block = self.visit_nested_block(stmt.try_block);
                stmt.catch_clause = stmt.catch_clause.map(|mut clause| {
                    clause.block = self.visit_nested_block(clause.block);
                    clause
                });
                stmt.finally_block = stmt.finally_block.map(|block| self.visit_nested_block(block));
                smallvec![Statement::Try(stmt)]
            }
            Statement::Block(block) => smallvec![Statement::Block(self.visit_nested_block(block))],
            statement => self.fold_statement(statement),
        }
    }

    fn visit_nested_block(&mut self, mut block: Block) -> Block {
        block.statements = self.visit_nested_statements(mem::take(&mut block.statements));
        block
    }

    fn visit_nested_statements(&mut self, statements: Vec<Statement>) -> Vec<Statement> {
        statements
            .into_iter()
            .flat_map(|statement| self.visit_nested_statement(statement))
            .collect()
    }

    fn visit_nested_embedded(&mut self, statement: Box<Statement>) -> Box<Statement> {
        let mut visited = self.visit_nested_statement(*statement);
        if visited.len() == 1
            && let Some(single) = visited.pop()
        {
            return Box::new(single);
        }
        Box::new(Statement::Block(factory::create_block(visited.into_vec(), true)))
    }

    fn visit_nested_case_clause(&mut self, mut clause: CaseOrDefaultClause) -> CaseOrDefaultClause {
        clause.expression = clause
            .expression
            .map(|expression| self.fold_expression(expression));
        clause.statements = self.visit_nested_statements(mem::take(&mut clause.statements));
        clause
    }

    fn visit_nested_for_statement(&mut self, mut stmt: ForStatement) -> Statements {
        let mut exports = Statements::new();
        if let Some(ForInitializer::VariableDeclarationList(list)) = &stmt.initializer
            && list.kind == VariableKind::Var
        {
            self.append_exports_of_variable_list(&mut exports, &list.declarations, false);
        }
        let mut statements = Statements::new();
        stmt.initializer = match stmt.initializer.take() {
            // for (var i = 0; ...) with `i` exported: the declaration moves in
            // front of the loop so the exports can follow it.
            Some(ForInitializer::VariableDeclarationList(list)) if !exports.is_empty() => {
                statements.push(self.visit_discarded_variable_list(list));
                statements.extend(exports);
                None
            }
            Some(ForInitializer::VariableDeclarationList(mut list)) => {
                list.declarations = list
                    .declarations
                    .into_iter()
                    .map(|declaration| self.visit_discarded_declaration(declaration))
                    .collect();
                Some(ForInitializer::VariableDeclarationList(list))
            }
            Some(ForInitializer::Expression(expression)) => {
                Some(ForInitializer::Expression(self.visit_expression(expression, true)))
            }
            None => None,
        };
        stmt.condition = stmt.condition.map(|condition| self.fold_expression(condition));
        stmt.incrementor = stmt
            .incrementor
            .map(|incrementor| self.visit_expression(incrementor, true));
        stmt.statement = self.visit_nested_embedded(stmt.statement);
        statements.push(Statement::For(stmt));
        statements
    }

    fn visit_discarded_variable_list(&mut self, mut list: VariableDeclarationList) -> Statement {
        list.declarations = list
            .declarations
            .into_iter()
            .map(|declaration| self.visit_discarded_declaration(declaration))
            .collect();
        factory::create_variable_statement(ModifierFlags::empty(), list)
    }

    fn visit_discarded_declaration(&mut self, mut declaration: VariableDeclaration) -> VariableDeclaration {
        declaration.name = self.fold_binding_name(declaration.name);
        declaration.initializer = declaration
            .initializer
            .map(|initializer| self.visit_expression(initializer, true));
        declaration
    }

    fn visit_nested_for_in_or_of_statement(&mut self, mut stmt: ForInOrOfStatement) -> Statement {
        let mut exports = Statements::new();
        if let ForInitializer::VariableDeclarationList(list) = &stmt.initializer
            && list.kind == VariableKind::Var
        {
            self.append_exports_of_variable_list(&mut exports, &list.declarations, true);
        }
        let initializer = mem::replace(
            &mut stmt.initializer,
            ForInitializer::Expression(factory::create_void_zero()),
        );
        stmt.initializer = match initializer {
            ForInitializer::Expression(expression) => {
                ForInitializer::Expression(self.visit_destructuring_target(expression))
            }
            ForInitializer::VariableDeclarationList(list) => {
                ForInitializer::VariableDeclarationList(fold_variable_declaration_list(self, list))
            }
        };
        stmt.expression = self.fold_expression(stmt.expression);
        let body = self.visit_nested_embedded(stmt.statement);
        stmt.statement = if exports.is_empty() {
            body
        } else {
            // for (var x of xs) with `x` exported: publish it on every pass.
            let mut statements = exports.into_vec();
            match *body {
                Statement::Block(block) => statements.extend(block.statements),
                body => statements.push(body),
            }
            Box::new(Statement::Block(factory::create_block(statements, true)))
        };
        Statement::ForInOrOf(stmt)
    }

    // =========================================================================
    // Shared builders
    // =========================================================================

    /// `require("<specifier>")` with the specifier's TS extension rewritten
    /// when `rewriteRelativeImportExtensions` is on.
    fn create_require_call(&self, specifier: &Expression) -> Expression {
        let specifier = match specifier {
            Expression::StringLiteral(lit) => factory::create_string_literal(lit.text.clone()),
            other => other.clone(),
        };
        factory::create_require_call(rewrite_module_specifier(specifier, self.options))
    }

    /// Whether interop helpers wrap the `require` of declaration `id`.
    fn uses_import_helpers(&self, id: NodeId) -> bool {
        self.options.es_module_interop()
            && !self.ctx.has_emit_flags(id, EmitFlags::NEVER_APPLY_IMPORT_HELPER)
    }

    fn apply_import_helper(
        &mut self,
        id: NodeId,
        value: Expression,
        wrap: impl FnOnce(&mut EmitContext, Expression) -> Expression,
    ) -> Expression {
        if self.uses_import_helpers(id) {
            wrap(&mut *self.ctx, value)
        } else {
            value
        }
    }

    /// The generated variable holding the module loaded by `declaration`.
    fn module_name(&mut self, declaration: NodeId) -> Identifier {
        let base = self
            .module_names
            .get(&declaration)
            .map_or("module", String::as_str)
            .to_string();
        self.ctx.new_generated_name_for_node(declaration, &base)
    }
}

fn variable(name: Identifier, initializer: Expression) -> VariableDeclaration {
    factory::create_variable_declaration(BindingName::Identifier(name), Some(initializer))
}

/// Anonymous functions and classes take their name from the binding they
/// initialize.
fn is_named_evaluation_target(initializer: &Expression) -> bool {
    match initializer {
        Expression::Arrow(_) => true,
        Expression::Function(function) => function.name.is_none(),
        Expression::Class(class) => class.name.is_none(),
        _ => false,
    }
}

/// Output of a rewritten exported variable statement: runs of kept
/// declarations and runs of export assignments, each run becoming one
/// statement.
struct PendingStatements {
    kind: VariableKind,
    modifiers: ModifierFlags,
    statements: Statements,
    variables: Vec<VariableDeclaration>,
    expressions: Vec<Expression>,
}

impl PendingStatements {
    fn new(kind: VariableKind, modifiers: ModifierFlags) -> Self {
        Self {
            kind,
            modifiers,
            statements: Statements::new(),
            variables: Vec::new(),
            expressions: Vec::new(),
        }
    }

    fn push_variable(&mut self, declaration: VariableDeclaration) {
        self.commit_expressions();
        self.variables.push(declaration);
    }

    fn push_expression(&mut self, expression: Expression) {
        self.commit_variables();
        self.expressions.push(expression);
    }

    fn commit_variables(&mut self) {
        if self.variables.is_empty() {
            return;
        }
        let list =
            factory::create_variable_declaration_list(self.kind, mem::take(&mut self.variables));
        self.statements
            .push(factory::create_variable_statement(self.modifiers, list));
    }

    fn commit_expressions(&mut self) {
        if self.expressions.is_empty() {
            return;
        }
        let expression = factory::inline_expressions(mem::take(&mut self.expressions));
        self.statements
            .push(factory::create_expression_statement(expression));
    }

    fn finish(mut self) -> Statements {
        self.commit_variables();
        self.commit_expressions();
        self.statements
    }
}
