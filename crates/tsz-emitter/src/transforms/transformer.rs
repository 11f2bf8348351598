//! Whole-file transformer plumbing.
//!
//! A [`Transformer`] rewrites one [`SourceFile`] at a time. Transformers are
//! created from a [`TransformerFactory`] once per compilation and reused for
//! every file; [`chain`] composes several factories so each transformer runs
//! over the previous one's output.

use std::sync::Arc;

use tracing::trace;
use tsz_ast::SourceFile;
use tsz_binder::ReferenceResolver;
use tsz_common::CompilerOptions;

use crate::emit_context::EmitContext;

/// A pass over whole source files.
pub trait Transformer {
    fn transform_source_file(&mut self, ctx: &mut EmitContext, file: SourceFile) -> SourceFile;
}

/// Everything a factory needs to build a transformer for one compilation.
#[derive(Clone)]
pub struct TransformOptions {
    pub compiler_options: Arc<CompilerOptions>,
    pub resolver: Arc<dyn ReferenceResolver + Send + Sync>,
}

impl TransformOptions {
    #[must_use]
    pub fn new(
        compiler_options: CompilerOptions,
        resolver: Arc<dyn ReferenceResolver + Send + Sync>,
    ) -> Self {
        Self {
            compiler_options: Arc::new(compiler_options),
            resolver,
        }
    }
}

pub type TransformerFactory =
    Box<dyn Fn(&TransformOptions) -> Box<dyn Transformer> + Send + Sync>;

/// Compose `factories` into one factory whose transformer runs each of them
/// in order, feeding every pass the previous pass's output.
///
/// # Panics
///
/// Panics when `factories` is empty.
#[must_use]
pub fn chain(mut factories: Vec<TransformerFactory>) -> TransformerFactory {
    assert!(!factories.is_empty(), "Expected at least one transformer");
    if factories.len() == 1
        && let Some(only) = factories.pop()
    {
        return only;
    }
    Box::new(move |options: &TransformOptions| -> Box<dyn Transformer> {
        Box::new(ChainedTransformer {
            transformers: factories.iter().map(|factory| factory(options)).collect(),
        })
    })
}

struct ChainedTransformer {
    transformers: Vec<Box<dyn Transformer>>,
}

impl Transformer for ChainedTransformer {
    fn transform_source_file(&mut self, ctx: &mut EmitContext, file: SourceFile) -> SourceFile {
        let mut file = file;
        for (index, transformer) in self.transformers.iter_mut().enumerate() {
            trace!(pass = index, file = %file.file_name, "running chained transformer");
            file = transformer.transform_source_file(ctx, file);
        }
        file
    }
}
