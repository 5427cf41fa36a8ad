use std::fmt::{Formatter, Write};
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::rules::errors::ErrorKind;
use crate::rules::parser::Span;

/// Source lines longer than this are wrapped when rendered.
pub const DISPLAY_WIDTH: usize = 80;
const WRAP_INDENT: &str = "    ";

///
/// Immutable content of one input file together with the name used in diagnostic
/// headers. Cloning only bumps reference counts.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceBuffer {
    name: Arc<str>,
    content: Arc<str>,
}

impl SourceBuffer {
    pub fn new<N, C>(name: N, content: C) -> Self
    where
        N: Into<Arc<str>>,
        C: Into<Arc<str>>,
    {
        SourceBuffer {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn anonymous<C: Into<Arc<str>>>(content: C) -> Self {
        SourceBuffer::new("", content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn span(&self) -> Span<'_> {
        Span::new_extra(&self.content, &self.name)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum Severity {
    Pass,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Pass => f.write_str("Pass"),
            Severity::Warning => f.write_str("Warning"),
            Severity::Error => f.write_str("Error"),
        }
    }
}

///
/// A renderable description of one parse failure or warning. The half-open byte span
/// `[offset, offset + distance)` may cross several physical lines of `source`.
///
/// Rendering never touches the stored fields, wrapping of long lines is recomputed on
/// every call:
///
/// ```text
/// Error: unterminated quoted option, expected a closing `"` before the end of the line
/// rules.conf: line 1, column 8:
/// SecRule "ARGS
///         ^^^^^
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Diagnostic {
    kind: ErrorKind,
    message: String,
    severity: Severity,
    offset: usize,
    distance: usize,
    context: String,
    buffer: SourceBuffer,
}

impl Diagnostic {
    pub fn new(
        kind: ErrorKind,
        severity: Severity,
        message: impl Into<String>,
        offset: usize,
        distance: usize,
        source: SourceBuffer,
    ) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            severity,
            offset,
            distance,
            context: String::new(),
            buffer: source,
        }
    }

    pub fn error(
        kind: ErrorKind,
        message: impl Into<String>,
        offset: usize,
        distance: usize,
        source: SourceBuffer,
    ) -> Self {
        Diagnostic::new(kind, Severity::Error, message, offset, distance, source)
    }

    pub fn warning(
        kind: ErrorKind,
        message: impl Into<String>,
        offset: usize,
        distance: usize,
        source: SourceBuffer,
    ) -> Self {
        Diagnostic::new(kind, Severity::Warning, message, offset, distance, source)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    /// end of the span, exclusive
    pub fn offset_end(&self) -> usize {
        self.offset + self.distance
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn source_buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    ///
    /// 1-indexed line number and 0-indexed column of `offset`. The line is one more than
    /// the number of `\n` bytes before `offset`, the column is the distance from the byte
    /// after the last of those line breaks.
    ///
    pub fn location(&self) -> (usize, usize) {
        let bytes = self.buffer.content().as_bytes();
        let offset = self.offset.min(bytes.len());
        let before = &bytes[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let column = match before.iter().rposition(|b| *b == b'\n') {
            Some(newline) => offset - (newline + 1),
            None => offset,
        };
        (line, column)
    }

    pub fn render(&self) -> String {
        let mut rendered = String::new();
        // writing into a String cannot fail
        let _ = self.write_rendered(&mut rendered);
        rendered
    }

    fn write_rendered(&self, out: &mut String) -> std::fmt::Result {
        write!(out, "{}: {}", self.severity, self.message)?;
        if !self.context.is_empty() {
            write!(out, ", while parsing {}", self.context)?;
        }
        out.push('\n');

        let (line, column) = self.location();
        if !self.buffer.name().is_empty() {
            write!(out, "{}: ", self.buffer.name())?;
        }
        writeln!(out, "line {}, column {}:", line, column)?;

        out.push_str(&self.underlined());
        Ok(())
    }

    ///
    /// Every physical line touched by the span, each followed by an underline of the same
    /// length with `^` under the non-whitespace bytes inside the span.
    ///
    fn underlined(&self) -> String {
        let content = self.buffer.content();
        let bytes = content.as_bytes();
        let start = self.offset.min(bytes.len());
        let end = self.offset_end().min(bytes.len());

        let mut rendered = String::new();
        let mut line_start = match bytes[..start].iter().rposition(|b| *b == b'\n') {
            Some(newline) => newline + 1,
            None => 0,
        };

        loop {
            let line_end = match bytes[line_start..].iter().position(|b| *b == b'\n') {
                Some(pos) => line_start + pos,
                None => bytes.len(),
            };
            let display_end = if line_end > line_start && bytes[line_end - 1] == b'\r' {
                line_end - 1
            } else {
                line_end
            };

            let line = &content[line_start..display_end];
            let underline = (line_start..display_end)
                .map(|idx| {
                    if idx >= start && idx < end && !bytes[idx].is_ascii_whitespace() {
                        '^'
                    } else {
                        ' '
                    }
                })
                .collect::<String>();

            if line.len() <= DISPLAY_WIDTH {
                push_line(&mut rendered, line);
                push_line(&mut rendered, &underline);
            } else {
                let bounds = chunk_bounds(line);
                for (text, marks) in split_long_line_at(line, &bounds)
                    .into_iter()
                    .zip(split_long_line_at(&underline, &bounds))
                {
                    push_line(&mut rendered, &text);
                    push_line(&mut rendered, &marks);
                }
            }

            // the span ends on this line, or only its line break was left
            if line_end >= bytes.len() || end <= line_end + 1 {
                break;
            }
            line_start = line_end + 1;
        }

        rendered
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

///
/// Byte ranges of at most [`DISPLAY_WIDTH`] bytes covering `line`, each ending on a
/// character boundary.
///
fn chunk_bounds(line: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::with_capacity(line.len() / DISPLAY_WIDTH + 1);
    let mut start = 0;
    while start < line.len() {
        let mut end = (start + DISPLAY_WIDTH).min(line.len());
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        bounds.push((start, end));
        start = end;
    }
    bounds
}

///
/// Display chunks of `line`, continuation chunks are indented so they are not mistaken
/// for a fresh source line.
///
fn split_long_line_at(line: &str, bounds: &[(usize, usize)]) -> Vec<String> {
    bounds
        .iter()
        .enumerate()
        .map(|(idx, (start, end))| {
            let prefix = if idx == 0 { "" } else { WRAP_INDENT };
            format!("{}{}", prefix, &line[*start..*end])
        })
        .collect()
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Diagnostic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (line, column) = self.location();
        let mut state = serializer.serialize_struct("Diagnostic", 9)?;
        state.serialize_field("file", self.buffer.name())?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("context", &self.context)?;
        state.serialize_field("offset", &self.offset)?;
        state.serialize_field("distance", &self.distance)?;
        state.serialize_field("line", &line)?;
        state.serialize_field("column", &column)?;
        state.end()
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod diagnostic_tests;
