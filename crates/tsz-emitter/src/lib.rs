//! Module emit for the tsz compiler.
//!
//! This crate rewrites bound source files into the module format selected
//! by `compilerOptions.module` and prints the result:
//! - `transforms` - module info collection and the CommonJS, ES module and
//!   format-dispatching transformers
//! - `emit_context` - emit flags, helper requests, name generation and
//!   hoisted-variable environments shared across transforms
//! - `emit_helpers` - runtime helper definitions (`__importStar`, ...)
//! - `printer` - JavaScript printer

pub mod emit_context;
pub mod emit_flags;
pub mod emit_helpers;
pub mod name_generator;
pub mod printer;
pub mod source_writer;
pub mod transforms;

pub use emit_context::EmitContext;
pub use emit_flags::EmitFlags;
pub use emit_helpers::EmitHelper;
pub use printer::print_source_file;
pub use transforms::{
    ExternalModuleInfo, TransformOptions, Transformer, TransformerFactory, chain,
    collect_external_module_info, get_module_transformer, new_common_js_module_transformer,
    new_es_module_transformer, new_implied_module_transformer,
};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/module_info_tests.rs"]
mod module_info_tests;

#[cfg(test)]
#[path = "../tests/commonjs_module_tests.rs"]
mod commonjs_module_tests;

#[cfg(test)]
#[path = "../tests/esm_module_tests.rs"]
mod esm_module_tests;

#[cfg(test)]
#[path = "../tests/implied_module_tests.rs"]
mod implied_module_tests;

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod printer_tests;
