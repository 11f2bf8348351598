//! Node identity, names and modifiers shared by every syntax kind.
//!
//! Every node carries a [`NodeId`]. Ids come from a process-wide counter, so
//! they stay unique across files and across nodes synthesized by transforms.
//! Cloning a node keeps its id: a clone denotes the same original node, which
//! is what side tables keyed by id (emit flags, resolver answers) expect.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::expression::Expression;

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Stable identity of a syntax node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Allocate an id no other node has.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

bitflags! {
    /// Syntactic modifiers that survive type erasure.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u8 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const DECLARE = 1 << 2;
        const ASYNC = 1 << 3;
        const STATIC = 1 << 4;
    }
}

// Serialized as the raw bits; unknown bits are dropped.
impl Serialize for ModifierFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ModifierFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}

/// How a generated identifier's text was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratedNameKind {
    /// `_a`, `_b`, ... hoisted temporaries.
    Temp,
    /// A base name made unique within the file (`tslib_1`).
    Unique,
    /// A name derived from another node (`other_1` for `import ... from "other"`).
    Node,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedName {
    pub kind: GeneratedNameKind,
    /// Reserved for the whole file rather than the innermost scope.
    pub file_level: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub text: String,
    /// Set for names produced by the name generator; never present in parsed trees.
    #[serde(skip)]
    pub generated: Option<GeneratedName>,
}

impl Identifier {
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.generated.is_some()
    }

    #[must_use]
    pub fn is_file_level_generated(&self) -> bool {
        self.generated.is_some_and(|generated| generated.file_level)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StringLiteral {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    /// Cooked value, without quotes.
    pub text: String,
    #[serde(default)]
    pub single_quote: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NumericLiteral {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    /// Source text, printed verbatim.
    pub text: String,
}

/// The name half of an import/export specifier: `a` or `"a-b"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModuleExportName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
}

impl ModuleExportName {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Identifier(ident) => ident.id,
            Self::StringLiteral(lit) => lit.id,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Identifier(ident) => &ident.text,
            Self::StringLiteral(lit) => &lit.text,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.text() == "default"
    }

    #[must_use]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(ident) => Some(ident),
            Self::StringLiteral(_) => None,
        }
    }
}

/// Property names in object literals, classes and binding patterns.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PropertyName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(NumericLiteral),
    Computed(ComputedPropertyName),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComputedPropertyName {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
}

impl PropertyName {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Identifier(ident) => ident.id,
            Self::StringLiteral(lit) => lit.id,
            Self::NumericLiteral(lit) => lit.id,
            Self::Computed(computed) => computed.id,
        }
    }
}
