//! The reference-resolution queries the module transforms are gated on.

use tsz_ast::NodeId;

use crate::state::BinderState;
use crate::symbols::{Declaration, ImportBinding, symbol_flags};

/// Answers "what does this identifier refer to" for identifier uses, keyed
/// by the use's [`NodeId`]. Synthesized identifiers have fresh ids and
/// therefore never resolve.
pub trait ReferenceResolver {
    /// The source file whose `exports` object holds the binding, when the
    /// identifier refers to a top-level exported variable.
    fn referenced_export_container(&self, reference: NodeId) -> Option<NodeId>;

    /// The import the identifier refers to, if it is an import alias.
    fn referenced_import_declaration(&self, reference: NodeId) -> Option<ImportBinding>;

    /// The value declarations of the symbol the identifier refers to.
    fn referenced_value_declarations(&self, reference: NodeId) -> Vec<Declaration>;

    /// The first value declaration, if any.
    fn referenced_value_declaration(&self, reference: NodeId) -> Option<Declaration> {
        self.referenced_value_declarations(reference).into_iter().next()
    }
}

impl ReferenceResolver for BinderState {
    fn referenced_export_container(&self, reference: NodeId) -> Option<NodeId> {
        let sym = self.symbols.get(*self.references.get(&reference)?)?;
        if sym.has_flags(symbol_flags::EXPORT_VALUE) {
            sym.export_container
        } else {
            None
        }
    }

    fn referenced_import_declaration(&self, reference: NodeId) -> Option<ImportBinding> {
        let sym = self.symbols.get(*self.references.get(&reference)?)?;
        sym.import.clone()
    }

    fn referenced_value_declarations(&self, reference: NodeId) -> Vec<Declaration> {
        self.references
            .get(&reference)
            .and_then(|&sym_id| self.symbols.get(sym_id))
            .filter(|sym| sym.has_flags(symbol_flags::VALUE))
            .map(|sym| sym.declarations.clone())
            .unwrap_or_default()
    }
}

/// A resolver that knows nothing: every identifier is treated as a global.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyResolver;

impl ReferenceResolver for EmptyResolver {
    fn referenced_export_container(&self, _reference: NodeId) -> Option<NodeId> {
        None
    }

    fn referenced_import_declaration(&self, _reference: NodeId) -> Option<ImportBinding> {
        None
    }

    fn referenced_value_declarations(&self, _reference: NodeId) -> Vec<Declaration> {
        Vec::new()
    }
}
