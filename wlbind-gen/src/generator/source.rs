//! Indentation-aware source text buffer shared by the emitters.

use crate::generator::traits::{GeneratorConfig, IndentStyle, LineEnding};

/// Accumulates generated source line by line.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
    indent: IndentStyle,
    line_ending: LineEnding,
}

impl SourceWriter {
    /// Create an empty writer using the config's layout settings.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent: config.indent,
            line_ending: config.line_ending,
        }
    }

    /// Write one line at the current depth. An empty line carries no indent.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf.push_str(&self.indent.indent(self.depth));
            self.buf.push_str(text);
        }
        self.buf.push_str(self.line_ending.as_str());
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.line("");
    }

    /// Write a continuation line, one level deeper than the current depth.
    pub fn continued(&mut self, text: impl AsRef<str>) {
        self.depth += 1;
        self.line(text);
        self.depth -= 1;
    }

    /// Write `header {` and indent.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedent and write `}`.
    pub fn close(&mut self) {
        self.close_with("}");
    }

    /// Dedent and write `closing`, e.g. `};`.
    pub fn close_with(&mut self, closing: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(closing);
    }

    /// Write `///` lines for `text`, if any.
    pub fn doc(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                self.line(format!("/// {}", line));
            }
        }
    }

    /// Raw text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Take the finished text, ending in exactly one line ending.
    pub fn finish(mut self) -> String {
        let nl = self.line_ending.as_str();
        while self.buf.ends_with(nl) && self.buf[..self.buf.len() - nl.len()].ends_with(nl) {
            self.buf.truncate(self.buf.len() - nl.len());
        }
        self.buf
    }
}
