//! Per-node emit annotations.
//!
//! Transforms never print; they tag nodes with flags the printer and later
//! passes consult. Flags live in a side table on [`crate::EmitContext`]
//! keyed by [`tsz_ast::NodeId`].

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EmitFlags: u32 {
        /// A synthesized statement that belongs with the prologue
        /// (`Object.defineProperty(exports, "__esModule", ...)`, hoisted `var`s).
        const CUSTOM_PROLOGUE = 1 << 0;
        /// Print a call as `(0, callee)(...)` so `this` is not bound.
        const INDIRECT_CALL = 1 << 1;
        const NO_COMMENTS = 1 << 2;
        const START_ON_NEW_LINE = 1 << 3;
        /// A reference to a runtime helper; may be redirected to `tslib`.
        const HELPER_NAME = 1 << 4;
        const LOCAL_NAME = 1 << 5;
        const EXPORT_NAME = 1 << 6;
        /// Never wrap this import in `__importStar`/`__importDefault`.
        const NEVER_APPLY_IMPORT_HELPER = 1 << 7;
        /// Set on a source file whose helpers are imported from `tslib`.
        const EXTERNAL_HELPERS = 1 << 8;
        const SINGLE_LINE = 1 << 9;
        const MULTI_LINE = 1 << 10;
    }
}

impl EmitFlags {
    #[must_use]
    pub const fn new() -> Self {
        Self::empty()
    }
}
