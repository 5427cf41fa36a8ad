use serde::Serialize;

use crate::rules::diagnostic::Diagnostic;
use crate::rules::keywords::DirectiveKind;

///
/// One argument of a directive exactly as it appears in the source, quotes and escapes
/// included. `offset` is the byte index of its first byte.
///
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize)]
pub struct DirectiveOption {
    pub lexeme: String,
    pub offset: usize,
}

impl DirectiveOption {
    pub fn new(lexeme: impl Into<String>, offset: usize) -> Self {
        DirectiveOption {
            lexeme: lexeme.into(),
            offset,
        }
    }

    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.len()
    }

    pub fn is_quoted(&self) -> bool {
        self.lexeme.len() >= 2 && self.lexeme.starts_with('"') && self.lexeme.ends_with('"')
    }

    ///
    /// Logical value of the option. Quoted options lose their surrounding quotes, `\"`
    /// becomes `"` and a backslash-escaped line break becomes a single space. `\\` is kept
    /// as is. Bare options are returned unchanged.
    ///
    pub fn content(&self) -> String {
        if !self.is_quoted() {
            return self.lexeme.clone();
        }

        let inner = &self.lexeme[1..self.lexeme.len() - 1];
        let bytes = inner.as_bytes();
        let mut content = String::with_capacity(inner.len());
        let mut copied = 0;
        let mut idx = 0;
        while idx < bytes.len() {
            if bytes[idx] != b'\\' {
                idx += 1;
                continue;
            }
            let (replacement, escaped) = match (bytes.get(idx + 1), bytes.get(idx + 2)) {
                (Some(b'\\'), _) => {
                    idx += 2;
                    continue;
                }
                (Some(b'"'), _) => ("\"", 2),
                (Some(b'\n'), _) => (" ", 2),
                (Some(b'\r'), Some(b'\n')) => (" ", 3),
                _ => {
                    idx += 1;
                    continue;
                }
            };
            content.push_str(&inner[copied..idx]);
            content.push_str(replacement);
            idx += escaped;
            copied = idx;
        }
        content.push_str(&inner[copied..]);
        content
    }
}

///
/// A keyword statement and its options. For the `Empty` and `Comment` sentinels `offset`
/// is the start of the line and there are no options.
///
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize)]
pub struct Directive {
    pub keyword: DirectiveKind,
    pub offset: usize,
    pub options: Vec<DirectiveOption>,
    pub end: usize,
}

impl Directive {
    pub(crate) fn sentinel(keyword: DirectiveKind, offset: usize, end: usize) -> Self {
        Directive {
            keyword,
            offset,
            options: Vec::new(),
            end,
        }
    }

    pub fn keyword_str(&self) -> &'static str {
        self.keyword.as_str()
    }

    pub fn end_offset(&self) -> usize {
        self.end
    }

    pub fn is_sentinel(&self) -> bool {
        self.keyword.is_sentinel()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ParseRoot {
    pub source_name: String,
    pub directives: Vec<Directive>,
    #[serde(skip)]
    pub warnings: Vec<Diagnostic>,
}

impl ParseRoot {
    /// directives that are not `Empty` or `Comment` sentinels
    pub fn statements(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter().filter(|directive| !directive.is_sentinel())
    }
}

#[cfg(test)]
#[path = "exprs_tests.rs"]
mod exprs_tests;
