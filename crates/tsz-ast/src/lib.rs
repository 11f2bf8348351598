//! Owned syntax tree for the tsz module transforms.
//!
//! The tree is produced by an upstream parser (or deserialized from JSON),
//! annotated by the binder and rewritten by the transforms in `tsz-emitter`.
//! Node kinds are closed enums so every traversal matches exhaustively.

pub mod node;
pub use node::{
    GeneratedName, GeneratedNameKind, Identifier, ModifierFlags, ModuleExportName, NodeId,
    NumericLiteral, PropertyName, StringLiteral,
};

pub mod expression;
pub use expression::{BinaryOperator, Expression, Keyword, ObjectLiteralElement};

pub mod statement;
pub use statement::{BindingName, Block, ClassElement, Statement, VariableKind};

pub mod source_file;
pub use source_file::SourceFile;

// Construction and traversal
pub mod factory;
pub mod fold;
pub mod visit;

pub mod utilities;

#[cfg(test)]
#[path = "../tests/ast_tests.rs"]
mod ast_tests;
