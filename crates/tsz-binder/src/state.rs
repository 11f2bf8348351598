//! Binder state: the symbol arena, the scope stack and resolved references.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use tsz_ast::visit::{self, Visit};
use tsz_ast::{Identifier, NodeId, SourceFile};

use crate::symbols::{Declaration, SymbolArena, SymbolId, symbol_flags};

/// The construct a scope belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// The top level of a file. `var` declarations and functions live here.
    SourceFile,
    /// A function body together with its parameters.
    Function,
    /// A block, a `for` head, a `switch` case block or a catch clause.
    Block,
}

#[derive(Debug)]
pub(crate) struct Scope {
    pub(crate) kind: ContainerKind,
    pub(crate) locals: FxHashMap<String, SymbolId>,
}

/// Counters reported after binding, for tracing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: usize,
    pub unresolved: usize,
}

/// Binds files one at a time and answers reference queries for all of them.
///
/// Node ids are process-wide unique, so a single state can hold the
/// resolutions of every file in a compilation.
#[derive(Debug, Default)]
pub struct BinderState {
    pub(crate) symbols: SymbolArena,
    pub(crate) scopes: Vec<Scope>,
    /// Identifier use -> the symbol it refers to.
    pub(crate) references: FxHashMap<NodeId, SymbolId>,
    /// The file currently being bound.
    pub(crate) file_id: Option<NodeId>,
    pub(crate) stats: ResolutionStats,
}

impl BinderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every scope of `file` and record a resolution for each
    /// identifier reference that names a declaration in the file.
    pub fn bind_source_file(&mut self, file: &SourceFile) {
        debug!(file = %file.file_name, "binding source file");
        let before = self.stats;
        self.file_id = Some(file.id);

        self.enter_scope(ContainerKind::SourceFile);
        self.declare_imports(&file.statements);
        self.declare_hoisted(&file.statements);
        self.declare_block_scoped(&file.statements, true);
        visit::walk_statements(self, &file.statements);
        self.exit_scope();

        self.file_id = None;
        debug!(
            file = %file.file_name,
            resolved = self.stats.resolved - before.resolved,
            unresolved = self.stats.unresolved - before.unresolved,
            "bound source file"
        );
    }

    #[must_use]
    pub const fn stats(&self) -> ResolutionStats {
        self.stats
    }

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind) {
        self.scopes.push(Scope {
            kind,
            locals: FxHashMap::default(),
        });
    }

    pub(crate) fn exit_scope(&mut self) {
        if self.scopes.pop().is_none() {
            panic!("exit_scope called without a matching enter_scope");
        }
    }

    pub(crate) fn is_top_level(&self) -> bool {
        matches!(self.scopes.as_slice(), [scope] if scope.kind == ContainerKind::SourceFile)
    }

    /// Declare `name` in the innermost scope, merging with an existing symbol
    /// of the same name there.
    ///
    /// The declaration name itself resolves to the symbol too, so a name that
    /// a transform moves into expression position (`export var a = 0` becoming
    /// `a = 0`) still answers resolver queries.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &Identifier,
        flags: u32,
        declaration: Option<Declaration>,
    ) -> SymbolId {
        let Some(scope) = self.scopes.last_mut() else {
            panic!("declare_symbol called outside of any scope");
        };
        let symbols = &mut self.symbols;
        let sym_id = *scope
            .locals
            .entry(name.text.clone())
            .or_insert_with(|| symbols.alloc(symbol_flags::NONE, name.text.clone()));

        if let Some(sym) = self.symbols.get_mut(sym_id) {
            sym.flags |= flags;
            if let Some(declaration) = declaration
                && !sym.declarations.contains(&declaration)
            {
                sym.declarations.push(declaration);
            }
        }
        self.references.insert(name.id, sym_id);
        trace!(name = %name.text, flags, "declared symbol");
        sym_id
    }

    pub(crate) fn resolve_name(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.locals.get(name).copied())
    }

    /// Record what an identifier in reference position refers to.
    pub(crate) fn bind_reference(&mut self, name: &Identifier) {
        if name.is_generated() {
            return;
        }
        match self.resolve_name(&name.text) {
            Some(sym_id) => {
                self.references.insert(name.id, sym_id);
                self.stats.resolved += 1;
            }
            None => {
                self.stats.unresolved += 1;
            }
        }
    }
}

impl<'ast> Visit<'ast> for BinderState {
    fn visit_statement(&mut self, node: &'ast tsz_ast::Statement) {
        self.bind_statement(node);
    }

    fn visit_expression(&mut self, node: &'ast tsz_ast::Expression) {
        self.bind_expression(node);
    }

    fn visit_block(&mut self, node: &'ast tsz_ast::Block) {
        self.enter_scope(ContainerKind::Block);
        self.declare_block_scoped(&node.statements, false);
        visit::walk_block(self, node);
        self.exit_scope();
    }

    fn visit_object_literal_element(&mut self, node: &'ast tsz_ast::ObjectLiteralElement) {
        self.bind_object_literal_element(node);
    }

    fn visit_class_element(&mut self, node: &'ast tsz_ast::ClassElement) {
        self.bind_class_element(node);
    }
}
