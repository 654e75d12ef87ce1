//! Doc comment rendering.

use httpgen_model::Docs;

use super::writer::CodeWriter;

/// A `/** ... */` block built from summary and deprecation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    lines: Vec<String>,
}

impl DocComment {
    /// Comment lines for element docs: the summary, then `@deprecated` if obsolete.
    pub fn from_docs(docs: &Docs) -> Self {
        let mut comment = Self::default();
        if let Some(summary) = &docs.summary {
            comment.push_text(summary);
        }
        if docs.obsolete {
            match docs.obsolete_message.as_deref().map(str::trim) {
                Some(message) if !message.is_empty() => {
                    comment.lines.push(format!("@deprecated {message}"));
                }
                _ => comment.lines.push("@deprecated".to_string()),
            }
        }
        comment
    }

    /// Element docs, falling back to `fallback` when there is no summary.
    pub fn from_docs_or(docs: &Docs, fallback: &str) -> Self {
        let mut comment = Self::from_docs(docs);
        if docs.summary.as_deref().is_none_or(|s| s.trim().is_empty()) {
            comment.lines.insert(0, fallback.to_string());
        }
        comment
    }

    /// A comment consisting of plain text.
    pub fn text(text: &str) -> Self {
        let mut comment = Self::default();
        comment.push_text(text);
        comment
    }

    /// Write the block; writes nothing when empty.
    pub fn write(&self, w: &mut CodeWriter) {
        match self.lines.as_slice() {
            [] => {}
            [line] => w.line(format!("/** {} */", escape(line))),
            lines => {
                w.line("/**");
                for line in lines {
                    w.line(format!(" * {}", escape(line)));
                }
                w.line(" */");
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        self.lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
}

fn escape(line: &str) -> String {
    line.replace("*/", "*\\/")
}
