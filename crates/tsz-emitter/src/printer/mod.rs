//! JavaScript printer for transformed source files.
//!
//! The printer is the last stage of module emit: it walks the rewritten
//! tree and writes JavaScript text. It consults the [`EmitContext`] for
//! emit flags (indirect calls, helper names) and for the runtime helpers
//! attached to the file, which are written right after the prologue.
//!
//! The implementation is split across files:
//! - `statements.rs` - statements, declarations and blocks
//! - `expressions.rs` - expressions, literals and precedence

use tsz_ast::{NodeId, SourceFile, Statement};

use crate::emit_context::EmitContext;
use crate::emit_flags::EmitFlags;
use crate::emit_helpers::sort_emit_helpers;
use crate::source_writer::SourceWriter;

mod expressions;
mod statements;

/// Print `file` as JavaScript. The result always ends with a newline
/// unless the file is empty.
#[must_use]
pub fn print_source_file(ctx: &EmitContext, file: &SourceFile) -> String {
    let mut printer = Printer::new(ctx, file.id);
    printer.emit_source_file(file);
    printer.finish()
}

pub struct Printer<'a> {
    ctx: &'a EmitContext,
    writer: SourceWriter,
    /// The file being printed; keys the helper name tables.
    file: NodeId,
}

impl<'a> Printer<'a> {
    #[must_use]
    pub fn new(ctx: &'a EmitContext, file: NodeId) -> Self {
        Self {
            ctx,
            writer: SourceWriter::new(),
            file,
        }
    }

    #[must_use]
    pub fn finish(mut self) -> String {
        self.writer.write_line();
        self.writer.into_string()
    }

    fn emit_source_file(&mut self, file: &SourceFile) {
        let directives = file
            .statements
            .iter()
            .take_while(|statement| statement.is_prologue_directive())
            .count();
        let (prologue, rest) = file.statements.split_at(directives);
        self.emit_statement_list(prologue);
        self.emit_helpers(file);
        self.emit_statement_list(rest);
    }

    /// Unscoped helpers attached to the file, unless they are imported
    /// from the external helpers module.
    fn emit_helpers(&mut self, file: &SourceFile) {
        if self.ctx.has_recorded_external_helpers(file.id) {
            return;
        }
        let mut helpers: Vec<_> = self
            .ctx
            .emit_helpers(file.id)
            .iter()
            .copied()
            .filter(|helper| !helper.scoped)
            .collect();
        sort_emit_helpers(&mut helpers);
        for helper in helpers {
            self.writer.write_lines(helper.text);
        }
    }

    fn emit_statement_list(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.emit_statement(statement);
        }
    }

    fn has_flags(&self, node: NodeId, flags: EmitFlags) -> bool {
        self.ctx.has_emit_flags(node, flags)
    }

    // =========================================================================
    // Writer shorthands
    // =========================================================================

    fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    fn write_space(&mut self) {
        self.writer.write_space();
    }

    fn write_line(&mut self) {
        self.writer.write_line();
    }

    fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }
}
