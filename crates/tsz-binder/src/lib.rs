//! Scope-based binder for the tsz module transforms.
//!
//! Binding walks a [`tsz_ast::SourceFile`], builds lexical scopes (module,
//! function with `var` hoisting, block, catch clause) and records, for every
//! identifier in reference position, the symbol it names. The result answers
//! the [`ReferenceResolver`] queries the transforms rely on.

pub mod symbols;
pub use symbols::{
    Declaration, DeclarationKind, ImportBinding, ImportBindingKind, Symbol, SymbolArena, SymbolId,
    symbol_flags,
};

pub mod state;
pub use state::{BinderState, ContainerKind, ResolutionStats};

mod state_binding;
mod state_import_export;
mod state_node_binding;

pub mod resolver;
pub use resolver::{EmptyResolver, ReferenceResolver};

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
