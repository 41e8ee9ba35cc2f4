//! Java source emitter - builds generated source text
//!
//! A line buffer with indentation tracking. Generated beans use two-space indentation.

use std::fmt::Write;

/// A buffer for building Java source code with proper indentation
#[derive(Debug)]
pub struct JavaEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for JavaEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "  ",
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a formatted line with current indentation
    pub fn linef(&mut self, args: std::fmt::Arguments<'_>) {
        self.write_indent();
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write a `/** ... */` doc comment, one line per entry
    pub fn doc_comment(&mut self, lines: &[&str]) {
        self.line("/**");
        for text in lines {
            if text.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {}", text.replace("*/", "*&#47;")));
            }
        }
        self.line(" */");
    }

    pub fn package(&mut self, package: &str) {
        if !package.is_empty() {
            self.line(&format!("package {};", package));
            self.blank_line();
        }
    }
}

/// Escape `s` for use between the quotes of a Java string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
