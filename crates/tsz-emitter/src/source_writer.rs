//! Indentation-aware text buffer the printer writes into.

const INDENT: &str = "    ";

#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    line_start: bool,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            line_start: true,
        }
    }

    /// Write `text`, indenting first when at the start of a line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    /// End the current line. Consecutive calls do not produce blank lines.
    pub fn write_line(&mut self) {
        if !self.line_start {
            self.output.push('\n');
            self.line_start = true;
        }
    }

    /// Write multi-line text one line at a time so each line is indented.
    pub fn write_lines(&mut self, text: &str) {
        for line in text.lines() {
            self.write(line);
            self.write_line();
        }
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    #[must_use]
    pub const fn indent_level(&self) -> u32 {
        self.indent_level
    }

    #[must_use]
    pub fn is_at_line_start(&self) -> bool {
        self.line_start
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.output
    }
}
