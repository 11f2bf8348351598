//! Per-file choice between CommonJS and ES module output.
//!
//! Under the Node module kinds (and whenever `module` names a single
//! format that files may still override) the output format is a property of
//! each file: `.mts` files and files under `"type": "module"` are ES
//! modules, `.cts` files and `"type": "commonjs"` packages are CommonJS. The
//! dispatcher asks the file, falls back to the configured module kind, and
//! hands the file to the matching transformer.

use tracing::debug;
use tsz_ast::SourceFile;
use tsz_common::{CompilerOptions, ModuleKind};

use crate::emit_context::EmitContext;
use crate::transforms::module_commonjs::new_common_js_module_transformer;
use crate::transforms::module_esm::new_es_module_transformer;
use crate::transforms::transformer::{TransformOptions, Transformer, TransformerFactory};

/// The module transform for `options.module`.
///
/// | emit module kind | transform |
/// |------------------|-----------|
/// | `preserve` | ES module (it keeps `import =`/`export =` as CommonJS) |
/// | `es2015`..`esnext`, `node16`..`nodenext`, `commonjs` | per file |
/// | anything else | CommonJS |
#[must_use]
pub fn get_module_transformer(options: &CompilerOptions) -> TransformerFactory {
    match options.emit_module_kind() {
        ModuleKind::Preserve => Box::new(new_es_module_transformer),
        ModuleKind::ES2015
        | ModuleKind::ES2020
        | ModuleKind::ES2022
        | ModuleKind::ESNext
        | ModuleKind::Node16
        | ModuleKind::Node18
        | ModuleKind::NodeNext
        | ModuleKind::CommonJS => Box::new(new_implied_module_transformer),
        _ => Box::new(new_common_js_module_transformer),
    }
}

/// Routes each file to a CommonJS or ES module transformer. Each of the two
/// is created on first use and then shared by every later file of that
/// format.
pub struct ImpliedModuleTransformer {
    options: TransformOptions,
    common_js: Option<Box<dyn Transformer>>,
    es_module: Option<Box<dyn Transformer>>,
}

impl ImpliedModuleTransformer {
    #[must_use]
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            options: options.clone(),
            common_js: None,
            es_module: None,
        }
    }

    fn emit_module_format_of_file(&self, file: &SourceFile) -> ModuleKind {
        file.implied_node_format
            .unwrap_or_else(|| self.options.compiler_options.emit_module_kind())
    }
}

#[must_use]
pub fn new_implied_module_transformer(options: &TransformOptions) -> Box<dyn Transformer> {
    Box::new(ImpliedModuleTransformer::new(options))
}

impl Transformer for ImpliedModuleTransformer {
    fn transform_source_file(&mut self, ctx: &mut EmitContext, file: SourceFile) -> SourceFile {
        if file.is_declaration_file {
            return file;
        }
        let format = self.emit_module_format_of_file(&file);
        debug!(file = %file.file_name, ?format, "selected module format");

        let options = &self.options;
        let transformer = if format >= ModuleKind::ES2015 {
            self.es_module
                .get_or_insert_with(|| new_es_module_transformer(options))
        } else {
            self.common_js
                .get_or_insert_with(|| new_common_js_module_transformer(options))
        };
        transformer.transform_source_file(ctx, file)
    }
}
