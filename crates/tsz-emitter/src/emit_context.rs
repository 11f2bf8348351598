//! Shared state for the transforms of one compilation: emit flags, runtime
//! helper requests, name generation and hoisted-variable environments.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;
use tsz_ast::factory;
use tsz_ast::utilities::collect_identifier_texts;
use tsz_ast::{
    BindingName, Expression, Identifier, ModifierFlags, NodeId, SourceFile, Statement, VariableKind,
};

use crate::emit_flags::EmitFlags;
use crate::emit_helpers::{
    EXPORT_STAR_HELPER, EmitHelper, IMPORT_DEFAULT_HELPER, IMPORT_STAR_HELPER,
    REWRITE_RELATIVE_IMPORT_EXTENSION_HELPER,
};
use crate::name_generator::NameGenerator;

#[derive(Debug, Default)]
pub struct EmitContext {
    emit_flags: FxHashMap<NodeId, EmitFlags>,
    /// Helpers attached to a node (in practice, a source file).
    emit_helpers: FxHashMap<NodeId, Vec<&'static EmitHelper>>,
    /// Helpers requested since the last `read_emit_helpers`, keyed by name.
    pending_helpers: IndexMap<&'static str, &'static EmitHelper>,
    names: NameGenerator,
    variable_environments: Vec<Vec<Identifier>>,
    /// `tslib_1` per source file when helpers come from `require("tslib")`.
    external_helpers_module_names: FxHashMap<NodeId, Identifier>,
    /// Helper import name -> local alias, per source file, when an imported
    /// helper name collides with a name in the file.
    helper_aliases: FxHashMap<NodeId, FxHashMap<&'static str, String>>,
}

impl EmitContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the identifiers of `file` for name generation. Called by
    /// every whole-file transform before it synthesizes names.
    pub fn begin_file(&mut self, file: &SourceFile) {
        self.names.reset(collect_identifier_texts(file));
    }

    // =========================================================================
    // Emit flags
    // =========================================================================

    #[must_use]
    pub fn emit_flags(&self, node: NodeId) -> EmitFlags {
        self.emit_flags.get(&node).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn has_emit_flags(&self, node: NodeId, flags: EmitFlags) -> bool {
        self.emit_flags(node).intersects(flags)
    }

    pub fn set_emit_flags(&mut self, node: NodeId, flags: EmitFlags) {
        self.emit_flags.insert(node, flags);
    }

    pub fn add_emit_flags(&mut self, node: NodeId, flags: EmitFlags) {
        *self.emit_flags.entry(node).or_default() |= flags;
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[must_use]
    pub fn is_unique_name(&self, text: &str) -> bool {
        self.names.is_unique_name(text)
    }

    pub fn new_unique_name(&mut self, base: &str, optimistic: bool) -> Identifier {
        self.names.new_unique_name(base, optimistic)
    }

    pub fn new_file_level_unique_name(&mut self, base: &str) -> Identifier {
        self.names.new_file_level_unique_name(base)
    }

    pub fn new_temp_name(&mut self) -> Identifier {
        self.names.new_temp_name()
    }

    pub fn new_generated_name_for_node(&mut self, node: NodeId, base: &str) -> Identifier {
        self.names.new_generated_name_for_node(node, base)
    }

    // =========================================================================
    // Variable environment
    // =========================================================================

    pub fn start_variable_environment(&mut self) {
        self.variable_environments.push(Vec::new());
    }

    /// Hoist `name` as a `var` of the innermost environment.
    ///
    /// # Panics
    ///
    /// Panics when no environment has been started.
    pub fn add_variable_declaration(&mut self, name: Identifier) {
        let Some(environment) = self.variable_environments.last_mut() else {
            panic!("add_variable_declaration called outside of a variable environment");
        };
        environment.push(name);
    }

    /// Close the innermost environment, returning `var a, b;` for what it
    /// collected.
    ///
    /// # Panics
    ///
    /// Panics when no environment has been started.
    pub fn end_variable_environment(&mut self) -> Option<Statement> {
        let Some(names) = self.variable_environments.pop() else {
            panic!("end_variable_environment called without a matching start_variable_environment");
        };
        if names.is_empty() {
            return None;
        }
        let declarations = names
            .into_iter()
            .map(|name| factory::create_variable_declaration(BindingName::Identifier(name), None))
            .collect();
        let statement = factory::create_variable_statement(
            ModifierFlags::empty(),
            factory::create_variable_declaration_list(VariableKind::Var, declarations),
        );
        self.add_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE);
        Some(statement)
    }

    /// Close the innermost environment and splice its declarations into
    /// `statements` after the prologue directives and hoisted declarations.
    pub fn end_and_merge_variable_environment(&mut self, statements: &mut Vec<Statement>) {
        let Some(declarations) = self.end_variable_environment() else {
            return;
        };
        let directives = statements
            .iter()
            .take_while(|statement| statement.is_prologue_directive())
            .count();
        let hoisted = statements[directives..]
            .iter()
            .take_while(|statement| {
                matches!(statement, Statement::Function(_) | Statement::Variable(_))
                    && self.has_emit_flags(statement.id(), EmitFlags::CUSTOM_PROLOGUE)
            })
            .count();
        statements.insert(directives + hoisted, declarations);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Record that the code being built references `helper`. Dependencies
    /// are recorded first.
    pub fn request_emit_helper(&mut self, helper: &'static EmitHelper) {
        for &dependency in helper.dependencies {
            self.request_emit_helper(dependency);
        }
        if !self.pending_helpers.contains_key(helper.name) {
            trace!(helper = helper.import_name, "requested emit helper");
            self.pending_helpers.insert(helper.name, helper);
        }
    }

    /// Take every helper requested since the last read.
    pub fn read_emit_helpers(&mut self) -> Vec<&'static EmitHelper> {
        self.pending_helpers.drain(..).map(|(_, helper)| helper).collect()
    }

    pub fn add_emit_helpers(&mut self, node: NodeId, helpers: Vec<&'static EmitHelper>) {
        let attached = self.emit_helpers.entry(node).or_default();
        for helper in helpers {
            if !attached.iter().any(|existing| existing.name == helper.name) {
                attached.push(helper);
            }
        }
    }

    #[must_use]
    pub fn emit_helpers(&self, node: NodeId) -> &[&'static EmitHelper] {
        self.emit_helpers
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn set_external_helpers_module_name(&mut self, file: NodeId, name: Identifier) {
        self.external_helpers_module_names.insert(file, name);
    }

    #[must_use]
    pub fn external_helpers_module_name(&self, file: NodeId) -> Option<&Identifier> {
        self.external_helpers_module_names.get(&file)
    }

    /// Helpers of `file` are imported rather than printed inline.
    #[must_use]
    pub fn has_recorded_external_helpers(&self, file: NodeId) -> bool {
        self.external_helpers_module_names.contains_key(&file)
            || self.has_emit_flags(file, EmitFlags::EXTERNAL_HELPERS)
    }

    pub fn set_helper_alias(&mut self, file: NodeId, import_name: &'static str, alias: String) {
        self.helper_aliases
            .entry(file)
            .or_default()
            .insert(import_name, alias);
    }

    #[must_use]
    pub fn helper_alias(&self, file: NodeId, import_name: &str) -> Option<&str> {
        self.helper_aliases
            .get(&file)
            .and_then(|aliases| aliases.get(import_name))
            .map(String::as_str)
    }

    /// An identifier naming a helper, tagged so the printer can redirect it
    /// to `tslib`.
    pub fn create_helper_name(&mut self, helper: &'static EmitHelper) -> Expression {
        let name = factory::create_identifier(helper.import_name);
        self.add_emit_flags(name.id, EmitFlags::HELPER_NAME);
        Expression::Identifier(name)
    }

    fn create_helper_call(
        &mut self,
        helper: &'static EmitHelper,
        arguments: Vec<Expression>,
    ) -> Expression {
        self.request_emit_helper(helper);
        let callee = self.create_helper_name(helper);
        factory::create_call(callee, arguments)
    }

    /// `__importStar(expression)`
    pub fn create_import_star_helper(&mut self, expression: Expression) -> Expression {
        self.create_helper_call(&IMPORT_STAR_HELPER, vec![expression])
    }

    /// `__importDefault(expression)`
    pub fn create_import_default_helper(&mut self, expression: Expression) -> Expression {
        self.create_helper_call(&IMPORT_DEFAULT_HELPER, vec![expression])
    }

    /// `__exportStar(module, exports)`
    pub fn create_export_star_helper(&mut self, module: Expression) -> Expression {
        self.create_helper_call(
            &EXPORT_STAR_HELPER,
            vec![module, factory::create_identifier_expression("exports")],
        )
    }

    /// `__rewriteRelativeImportExtension(expression)`, with a trailing
    /// `true` when JSX is preserved.
    pub fn create_rewrite_relative_import_extension_helper(
        &mut self,
        expression: Expression,
        preserve_jsx: bool,
    ) -> Expression {
        let mut arguments = vec![expression];
        if preserve_jsx {
            arguments.push(factory::create_true());
        }
        self.create_helper_call(&REWRITE_RELATIVE_IMPORT_EXTENSION_HELPER, arguments)
    }
}

#[cfg(test)]
#[path = "../tests/emit_context.rs"]
mod tests;
