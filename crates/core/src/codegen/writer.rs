//! Line-oriented code writer with scoped blocks.
//!
//! Lines are buffered already indented. A block writes its opening line,
//! runs its body one level deeper and always writes its closing line, so
//! nesting cannot come out unbalanced. Blank lines are requested rather
//! than written: a requested blank is dropped at the start of a block,
//! before a closing line, and when another blank is already pending.

use crate::options::Newline;

const INDENT: &str = "\t";

/// Buffer of generated lines.
#[derive(Debug, Clone, Default)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent: usize,
    pending_blank: bool,
}

impl CodeWriter {
    /// An empty writer at indentation level zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.flush_blank();
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{text}", INDENT.repeat(self.indent)));
        }
    }

    /// Write each line of a multi-line snippet at the current indentation.
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    /// Request a blank line before the next line.
    pub fn blank(&mut self) {
        self.pending_blank = true;
    }

    /// Write `open`, the body one level deeper, then `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) {
        self.line(open);
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.pending_blank = false;
        self.line(close);
    }

    /// Chain a block onto the one just closed, turning its `}` into
    /// `} else {`-style continuations. Falls back to a plain block when the
    /// previous line is not a bare `}` at this level.
    pub fn chain_block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) {
        let closing = format!("{}}}", INDENT.repeat(self.indent));
        if !self.pending_blank && self.lines.last() == Some(&closing) {
            self.lines.pop();
            self.block(format!("}} {open}"), close, body);
        } else {
            self.block(open, close, body);
        }
    }

    /// Append everything written to `other`, indented to the current level.
    pub fn append(&mut self, other: CodeWriter) {
        for line in other.lines {
            self.line(line);
        }
        if other.pending_blank {
            self.blank();
        }
    }

    /// Join the buffered lines, terminating each with `newline`.
    pub fn finish(self, newline: Newline) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(line);
            output.push_str(newline.as_str());
        }
        output
    }

    fn flush_blank(&mut self) {
        if !self.pending_blank {
            return;
        }
        self.pending_blank = false;
        let opens_block = |line: &String| {
            line.is_empty() || line.ends_with('{') || line.ends_with('(') || line.ends_with('[')
        };
        if self.lines.last().is_some_and(|last| !opens_block(last)) {
            self.lines.push(String::new());
        }
    }
}
