//! Whole-file module transforms.
//!
//! - `transformer` - the [`Transformer`] trait, factories and [`chain`]
//! - `module_info` - the per-file import/export inventory the module
//!   transforms consult before rewriting anything
//! - `module_commonjs` - rewrites ES module syntax to `require`/`exports`
//! - `module_esm` - keeps ES module syntax, fixing up what ESM output
//!   cannot express directly (`import =`, `export =`, `export * as ns`)
//! - `module_implied` - picks one of the two per file from the file's
//!   implied module format
//! - `module_utils` - predicates and builders shared by the transforms

pub mod transformer;
pub use transformer::{TransformOptions, Transformer, TransformerFactory, chain};

pub mod module_info;
pub use module_info::{ExternalModuleInfo, collect_external_module_info};

mod module_utils;

pub mod module_commonjs;
pub use module_commonjs::{CommonJsModuleTransformer, new_common_js_module_transformer};

pub mod module_esm;
pub use module_esm::{EsModuleTransformer, new_es_module_transformer};

pub mod module_implied;
pub use module_implied::{
    ImpliedModuleTransformer, get_module_transformer, new_implied_module_transformer,
};
