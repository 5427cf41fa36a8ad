use std::fmt::Formatter;
use std::str::FromStr;

use indexmap::set::IndexSet;
use nom::error::{ContextError, ParseError};
use nom_locate::LocatedSpan;

use crate::rules::diagnostic::{Diagnostic, Severity, SourceBuffer};
use crate::rules::errors::{Error, ErrorKind};
use crate::rules::keywords::DirectiveKind;

pub mod directives;
pub mod options;
pub mod scanner;

///
/// Input of every parser in this module. The fragment is the unconsumed rest of the source
/// and `extra` carries the display name of the file, `location_offset()` is the byte
/// offset of the fragment inside the whole source.
///
pub type Span<'a> = LocatedSpan<&'a str, &'a str>;

#[cfg(test)]
pub(crate) fn from_str2(in_str: &str) -> Span {
    Span::new_extra(in_str, "")
}

#[derive(Clone, PartialEq, Debug)]
pub struct ParserError<'a> {
    pub(crate) context: String,
    pub(crate) span: Span<'a>,
    pub(crate) distance: usize,
    pub(crate) kind: ErrorKind,
    pub(crate) message: String,
}

pub type IResult<'a, I, O> = nom::IResult<I, O, ParserError<'a>>;

impl<'a> ParserError<'a> {
    pub(crate) fn new(
        kind: ErrorKind,
        span: Span<'a>,
        distance: usize,
        message: impl Into<String>,
    ) -> Self {
        ParserError {
            context: String::new(),
            span,
            distance,
            kind,
            message: message.into(),
        }
    }

    /// fatal error, alternatives are not tried once this is returned
    pub(crate) fn failure<O>(
        kind: ErrorKind,
        span: Span<'a>,
        distance: usize,
        message: impl Into<String>,
    ) -> IResult<'a, Span<'a>, O> {
        Err(nom::Err::Failure(ParserError::new(
            kind, span, distance, message,
        )))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.span.location_offset()
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn into_diagnostic(self, source: &SourceBuffer) -> Diagnostic {
        let severity = if self.kind.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        };
        Diagnostic::new(
            self.kind,
            severity,
            self.message,
            self.span.location_offset(),
            self.distance,
            source.clone(),
        )
        .with_context(self.context)
    }
}

impl<'a> ParseError<Span<'a>> for ParserError<'a> {
    fn from_error_kind(input: Span<'a>, _kind: nom::error::ErrorKind) -> Self {
        if input.fragment().is_empty() {
            ParserError::new(
                ErrorKind::EndOfInput,
                input,
                0,
                "unexpected end of input",
            )
        } else {
            ParserError::new(ErrorKind::UnexpectedToken, input, 1, "unexpected token")
        }
    }

    fn append(_input: Span<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> ContextError<Span<'a>> for ParserError<'a> {
    fn add_context(_input: Span<'a>, ctx: &'static str, other: Self) -> Self {
        let context = if other.context.is_empty() {
            ctx.to_string()
        } else {
            format!("{}/{}", ctx, other.context)
        };

        ParserError { context, ..other }
    }
}

impl<'a> std::fmt::Display for ParserError<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {} at column {}",
            self.message,
            self.span.location_line(),
            self.span.get_column()
        )?;
        if !self.context.is_empty() {
            write!(f, ", when handling {}", self.context)?;
        }
        Ok(())
    }
}

///
/// Whether blank and comment lines show up in the parse tree. `Spans` skips them and
/// indexes directives purely by byte offset, `Lines` emits an `Empty` or `Comment`
/// sentinel for each such line so that every source line is accounted for.
///
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Emission {
    Spans,
    Lines,
}

impl Default for Emission {
    fn default() -> Self {
        Emission::Spans
    }
}

impl FromStr for Emission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spans" => Ok(Emission::Spans),
            "lines" => Ok(Emission::Lines),
            _ => Err(Error::UnknownEmission(s.to_string())),
        }
    }
}

///
/// Read-only settings for one parse. Which directives may appear without any option is
/// supplied by the caller, by default every directive needs at least one.
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParserConfig {
    pub emission: Emission,
    pub zero_arity: IndexSet<DirectiveKind>,
}

impl ParserConfig {
    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_zero_arity<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = DirectiveKind>,
    {
        self.zero_arity.extend(keywords);
        self
    }

    pub fn requires_options(&self, keyword: DirectiveKind) -> bool {
        !keyword.is_sentinel() && !self.zero_arity.contains(&keyword)
    }
}
