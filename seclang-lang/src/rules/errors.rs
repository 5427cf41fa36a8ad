use std::fmt::Formatter;

use serde::Serialize;
use thiserror::Error;

///
/// Every way a SecLang file can fail to parse. Each kind maps onto a [`Diagnostic`] with
/// severity `Error`, except [`ErrorKind::DanglingContinuation`] which is a warning.
///
/// [`Diagnostic`]: crate::rules::diagnostic::Diagnostic
///
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum ErrorKind {
    /// alphabetic token at top level that is not a directive keyword
    UnrecognizedDirective,
    /// quoted option reaches a line break or the end of input before its closing quote
    UnterminatedQuote,
    /// missing separator between the keyword and an option or between two options
    MalformedOptionSyntax,
    /// a directive that requires options has none
    MissingOptions,
    /// top level cursor is not whitespace, comment or a keyword
    UnexpectedToken,
    /// content was expected but the input ended
    EndOfInput,
    /// content is not valid UTF-8
    InvalidEncoding,
    /// line continuation followed by nothing but the end of the directive
    DanglingContinuation,
}

impl ErrorKind {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::DanglingContinuation)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::UnrecognizedDirective => "UnrecognizedDirective",
            ErrorKind::UnterminatedQuote => "UnterminatedQuote",
            ErrorKind::MalformedOptionSyntax => "MalformedOptionSyntax",
            ErrorKind::MissingOptions => "MissingOptions",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::EndOfInput => "EndOfInput",
            ErrorKind::InvalidEncoding => "InvalidEncoding",
            ErrorKind::DanglingContinuation => "DanglingContinuation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{0}` is not a SecLang directive keyword")]
    UnknownKeyword(String),
    #[error("`{0}` is not a directive emission mode, expected `spans` or `lines`")]
    UnknownEmission(String),
}
