//! ES module output.
//!
//! ES module syntax mostly passes through. What remains is what native
//! modules cannot say directly:
//! - `import x = require("m")` becomes a call to a `require` made with
//!   `createRequire(import.meta.url)` (Node16+ only; dropped otherwise)
//! - `export = x` is dropped, or kept as `module.exports = x` under
//!   `module: preserve`
//! - `export * as ns from "m"` is split into an import and an export for
//!   ES2015 output, which lacks the combined form
//! - relative `.ts` specifiers are rewritten under
//!   `rewriteRelativeImportExtensions`

use std::mem;

use smallvec::smallvec;
use tracing::{debug, trace};
use tsz_ast::expression::CallExpression;
use tsz_ast::factory;
use tsz_ast::fold::{Fold, Statements, fold_expression_children, fold_statement_children};
use tsz_ast::statement::{
    ExportAssignment, ExportDeclaration, ImportEqualsDeclaration, ModuleReference,
    NamedExportBindings,
};
use tsz_ast::utilities::{is_external_module, is_external_module_indicator};
use tsz_ast::{
    Expression, Identifier, ModifierFlags, ModuleExportName, NodeId, SourceFile, Statement,
    VariableKind,
};
use tsz_common::path::make_identifier_from_module_name;
use tsz_common::{CompilerOptions, ModuleKind};

use crate::emit_context::EmitContext;
use crate::emit_flags::EmitFlags;
use crate::transforms::module_utils::{
    count_prologue_directives, create_external_helpers_import_declaration_if_needed,
    rewrite_module_specifier, rewrite_or_shim_module_specifier,
};
use crate::transforms::transformer::{TransformOptions, Transformer};

pub struct EsModuleTransformer {
    options: TransformOptions,
}

impl EsModuleTransformer {
    #[must_use]
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }
}

#[must_use]
pub fn new_es_module_transformer(options: &TransformOptions) -> Box<dyn Transformer> {
    Box::new(EsModuleTransformer::new(options))
}

impl Transformer for EsModuleTransformer {
    fn transform_source_file(&mut self, ctx: &mut EmitContext, mut file: SourceFile) -> SourceFile {
        let options = &*self.options.compiler_options;
        if file.is_declaration_file || !(is_external_module(&file) || options.isolated_modules()) {
            trace!(file = %file.file_name, "not a module, skipping ES module transform");
            return file;
        }
        debug!(file = %file.file_name, "transforming module to ES module output");

        ctx.begin_file(&file);
        let mut transform = EsmTransform {
            ctx: &mut *ctx,
            options,
            is_js: file.is_js(),
            require: None,
        };
        let visited: Vec<Statement> = mem::take(&mut file.statements)
            .into_iter()
            .flat_map(|statement| transform.fold_statement(statement))
            .collect();
        let require = transform.require.take();

        let helpers = ctx.read_emit_helpers();
        ctx.add_emit_helpers(file.id, helpers);
        let helpers_import = create_external_helpers_import_declaration_if_needed(
            ctx,
            &file,
            options,
            file.implied_node_format,
        );

        let mut statements = visited;
        if helpers_import.is_some() || require.is_some() {
            let directives = count_prologue_directives(&statements);
            let prologue = helpers_import
                .into_iter()
                .chain(require.into_iter().flat_map(|require| require.statements));
            statements.splice(directives..directives, prologue);
        }

        if is_external_module(&file)
            && options.emit_module_kind() != ModuleKind::Preserve
            && !statements.iter().any(is_external_module_indicator)
        {
            // Keeps the output a module once its last import or export is gone.
            statements.push(factory::create_named_export_declaration(Vec::new()));
        }
        file.statements = statements;
        file
    }
}

/// `import { createRequire as _createRequire } from "module";` and
/// `const __require = _createRequire(import.meta.url);`, created on first use.
struct RequireShim {
    statements: Vec<Statement>,
    name: Identifier,
}

struct EsmTransform<'a> {
    ctx: &'a mut EmitContext,
    options: &'a CompilerOptions,
    is_js: bool,
    require: Option<RequireShim>,
}

impl Fold for EsmTransform<'_> {
    fn fold_statement(&mut self, node: Statement) -> Statements {
        match node {
            Statement::Import(mut decl) => {
                decl.module_specifier =
                    rewrite_module_specifier(decl.module_specifier, self.options);
                smallvec![Statement::Import(decl)]
            }
            Statement::ImportEquals(decl) => self.visit_import_equals_declaration(decl),
            Statement::Export(decl) => self.visit_export_declaration(decl),
            Statement::ExportAssignment(assignment) => self.visit_export_assignment(assignment),
            node => smallvec![fold_statement_children(self, node)],
        }
    }

    fn fold_expression(&mut self, node: Expression) -> Expression {
        match node {
            Expression::Call(call) => self.visit_call_expression(call),
            node => fold_expression_children(self, node),
        }
    }
}

impl EsmTransform<'_> {
    fn visit_import_equals_declaration(&mut self, decl: ImportEqualsDeclaration) -> Statements {
        if self.options.emit_module_kind() < ModuleKind::Node16 {
            return Statements::new();
        }
        let ModuleReference::External(reference) = &decl.module_reference else {
            panic!("import= for internal module references should be handled in an earlier transformer.");
        };
        let require = self.create_require_call(&reference.expression);
        let mut statements: Statements = smallvec![factory::create_simple_variable_statement(
            VariableKind::Const,
            decl.name.clone(),
            Some(require),
        )];
        if decl.modifiers.contains(ModifierFlags::EXPORT) {
            statements.push(factory::create_named_export_declaration(vec![(
                None,
                ModuleExportName::Identifier(decl.name.clone()),
            )]));
        }
        statements
    }

    fn visit_export_assignment(&mut self, mut assignment: ExportAssignment) -> Statements {
        if !assignment.is_export_equals {
            assignment.expression = self.fold_expression(assignment.expression);
            return smallvec![Statement::ExportAssignment(assignment)];
        }
        if self.options.emit_module_kind() != ModuleKind::Preserve {
            return Statements::new();
        }
        let target = factory::create_property_access(
            factory::create_identifier_expression("module"),
            factory::create_identifier("exports"),
        );
        let value = self.fold_expression(assignment.expression);
        smallvec![factory::create_expression_statement(factory::create_assignment(
            target, value
        ))]
    }

    fn visit_export_declaration(&mut self, mut decl: ExportDeclaration) -> Statements {
        let Some(specifier) = decl.module_specifier.take() else {
            return smallvec![Statement::Export(decl)];
        };
        let specifier = rewrite_module_specifier(specifier, self.options);
        let splits_namespace_export = !self
            .options
            .module
            .is_some_and(|module| module > ModuleKind::ES2015);
        let namespace = match decl.export_clause.take() {
            Some(NamedExportBindings::NamespaceExport(namespace)) if splits_namespace_export => {
                namespace
            }
            clause => {
                decl.export_clause = clause;
                decl.module_specifier = Some(specifier);
                return smallvec![Statement::Export(decl)];
            }
        };

        // export * as ns from "m";  ->  import * as ns_1 from "m"; export { ns_1 as ns };
        let base = make_identifier_from_module_name(namespace.name.text());
        let local = self.ctx.new_generated_name_for_node(namespace.id, &base);
        let import = factory::create_namespace_import_declaration(local.clone(), specifier);
        let export = if namespace.name.is_default() {
            Statement::ExportAssignment(ExportAssignment {
                id: NodeId::fresh(),
                is_export_equals: false,
                expression: Expression::Identifier(local),
            })
        } else {
            factory::create_named_export_declaration(vec![(
                Some(ModuleExportName::Identifier(local)),
                namespace.name,
            )])
        };
        smallvec![import, export]
    }

    fn visit_call_expression(&mut self, mut call: CallExpression) -> Expression {
        let rewrites_specifier = self.options.rewrite_relative_import_extensions()
            && ((call.is_import_call() && !call.arguments.is_empty())
                || (self.is_js && call.is_require_call()));
        if !rewrites_specifier {
            return fold_expression_children(self, Expression::Call(call));
        }
        call.expression = Box::new(self.fold_expression(*call.expression));
        let mut arguments = mem::take(&mut call.arguments).into_iter();
        if let Some(first) = arguments.next() {
            let first = rewrite_or_shim_module_specifier(self.ctx, first, self.options);
            call.arguments.push(first);
        }
        for argument in arguments {
            call.arguments.push(self.fold_expression(argument));
        }
        Expression::Call(call)
    }

    /// `require("m")` under `module: preserve`, otherwise `__require("m")`
    /// through the `createRequire` shim.
    fn create_require_call(&mut self, specifier: &Expression) -> Expression {
        let specifier = match specifier {
            Expression::StringLiteral(lit) => factory::create_string_literal(lit.text.clone()),
            other => other.clone(),
        };
        let specifier = rewrite_module_specifier(specifier, self.options);
        if self.options.emit_module_kind() == ModuleKind::Preserve {
            return factory::create_require_call(specifier);
        }
        let name = match &self.require {
            Some(shim) => shim.name.clone(),
            None => {
                let shim = self.create_require_shim();
                let name = shim.name.clone();
                self.require = Some(shim);
                name
            }
        };
        factory::create_call(Expression::Identifier(name), vec![specifier])
    }

    fn create_require_shim(&mut self) -> RequireShim {
        let create_require = self.ctx.new_file_level_unique_name("_createRequire");
        let import = factory::create_named_import_declaration(
            vec![(
                Some(factory::create_identifier("createRequire")),
                create_require.clone(),
            )],
            factory::create_string_literal("module"),
        );
        self.ctx
            .add_emit_flags(import.id(), EmitFlags::CUSTOM_PROLOGUE);

        let name = self.ctx.new_file_level_unique_name("__require");
        let import_meta_url = factory::create_property_access(
            factory::create_import_meta(),
            factory::create_identifier("url"),
        );
        let declaration = factory::create_simple_variable_statement(
            VariableKind::Const,
            name.clone(),
            Some(factory::create_call(
                Expression::Identifier(create_require),
                vec![import_meta_url],
            )),
        );
        self.ctx
            .add_emit_flags(declaration.id(), EmitFlags::CUSTOM_PROLOGUE);
        RequireShim {
            statements: vec![import, declaration],
            name,
        }
    }
}
