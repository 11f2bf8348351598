//! Symbols, symbol flags and the declarations they point at.

use tsz_ast::NodeId;

/// Index into [`SymbolArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PARAMETER: u32 = 1 << 2;
    pub const FUNCTION: u32 = 1 << 3;
    pub const CLASS: u32 = 1 << 4;
    pub const ALIAS: u32 = 1 << 5;
    /// Local side of a `var`/`let`/`const` declared with `export`.
    pub const EXPORT_VALUE: u32 = 1 << 6;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const VALUE: u32 = VARIABLE | PARAMETER | FUNCTION | CLASS;
}

/// What kind of node a [`Declaration`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A `VariableDeclaration` or a `BindingElement` inside one.
    Variable,
    Parameter,
    Function,
    Class,
    CatchVariable,
}

/// A value declaration, identified by the id of the declaring node (the
/// variable declaration, binding element, function or class).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub id: NodeId,
    pub kind: DeclarationKind,
}

/// Which import form introduced an alias.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImportBindingKind {
    /// `import d from "m"`
    Default,
    /// `import { name } from "m"` or `import { name as local } from "m"`;
    /// `name` is the imported (remote) name.
    Named { name: String },
    /// `import * as ns from "m"`
    Namespace,
    /// `import x = require("m")`
    ImportEquals,
}

/// The import declaration an identifier refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportBinding {
    /// The alias declaration: the import clause, namespace import, import
    /// specifier or `import =` declaration.
    pub declaration: NodeId,
    /// The enclosing top-level `import` or `import =` statement.
    pub import_declaration: NodeId,
    pub kind: ImportBindingKind,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub flags: u32,
    pub declarations: Vec<Declaration>,
    pub import: Option<ImportBinding>,
    /// Set for top-level exported variables: the id of the source file whose
    /// `exports` object mirrors this binding.
    pub export_container: Option<NodeId>,
}

impl Symbol {
    #[must_use]
    pub const fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(Symbol {
            id,
            name,
            flags,
            declarations: Vec::new(),
            import: None,
            export_container: None,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
