use log::trace;

use crate::rules::errors::ErrorKind;
use crate::rules::exprs::DirectiveOption;
use crate::rules::parser::scanner::{classify_option, OptionKind};
use crate::rules::parser::{IResult, ParserError, Span};

#[derive(PartialEq, Debug, Clone)]
pub struct OptionSequence<'a> {
    pub options: Vec<DirectiveOption>,
    /// the last continuation, when nothing but blanks followed it
    pub dangling: Option<Span<'a>>,
}

///
/// Options following a directive keyword. Every option must be preceded by a separator
/// run made of spaces, tabs and escaped continuations. Parsing stops, without consuming
/// it, at the first line break that is not escaped, or at the end of input.
///
pub fn option_sequence(input: Span) -> IResult<Span, OptionSequence> {
    let mut options = Vec::new();
    let mut separated = false;
    let mut dangling = None;
    let mut cursor = input;

    loop {
        let (rest, token) = classify_option(cursor)?;
        match token.kind {
            OptionKind::EndOfInput | OptionKind::LineBreak => break,

            OptionKind::Whitespace => separated = true,

            OptionKind::Continuation => {
                separated = true;
                dangling = Some(token.span);
            }

            OptionKind::QuotedOption | OptionKind::BareOption => {
                if !separated {
                    return ParserError::failure(
                        ErrorKind::MalformedOptionSyntax,
                        token.span,
                        token.len(),
                        format!("expected whitespace before option `{}`", token.lexeme()),
                    );
                }
                trace!("option {:?} at {}", token.lexeme(), token.offset());
                options.push(DirectiveOption::new(token.lexeme(), token.offset()));
                separated = false;
                dangling = None;
            }
        }
        cursor = rest;
    }

    Ok((cursor, OptionSequence { options, dangling }))
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
