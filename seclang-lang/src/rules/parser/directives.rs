use log::trace;
use nom::error::context;

use crate::rules::errors::ErrorKind;
use crate::rules::exprs::Directive;
use crate::rules::keywords::DirectiveKind;
use crate::rules::parser::options::option_sequence;
use crate::rules::parser::scanner::{classify_top_level, Token, TopLevelKind};
use crate::rules::parser::{Emission, IResult, ParserConfig, ParserError, Span};

#[derive(PartialEq, Debug, Clone, Default)]
pub struct Directives<'a> {
    pub directives: Vec<Directive>,
    /// non fatal findings, in source order
    pub warnings: Vec<ParserError<'a>>,
}

///
/// Reads the whole input as a sequence of directives, left to right, one token at a time.
/// The first error ends the parse.
///
pub fn directives<'a>(
    input: Span<'a>,
    config: &ParserConfig,
) -> IResult<'a, Span<'a>, Directives<'a>> {
    let mut parsed = Directives::default();
    let mut cursor = input;

    loop {
        let (rest, token) = classify_top_level(cursor)?;
        match token.kind {
            TopLevelKind::EndOfInput => return Ok((rest, parsed)),

            TopLevelKind::Whitespace => {
                if config.emission == Emission::Lines {
                    blank_lines(&token, rest.fragment().is_empty(), &mut parsed.directives);
                }
                cursor = rest;
            }

            TopLevelKind::Comment => {
                if config.emission == Emission::Lines {
                    parsed.directives.push(Directive::sentinel(
                        DirectiveKind::Comment,
                        line_start(&token.span),
                        token.offset() + token.len(),
                    ));
                }
                cursor = rest;
            }

            TopLevelKind::Keyword(keyword) => {
                let (after, (directive, dangling)) =
                    context("directive", |i: Span<'a>| {
                        statement(i, token, keyword, config)
                    })(rest)?;
                if let Some(warning) = dangling {
                    parsed.warnings.push(warning);
                }
                trace!(
                    "{} at {} with {} option(s)",
                    directive.keyword,
                    directive.offset,
                    directive.options.len()
                );
                parsed.directives.push(directive);
                cursor = after;
            }
        }
    }
}

fn statement<'a>(
    input: Span<'a>,
    keyword_token: Token<'a, TopLevelKind>,
    keyword: DirectiveKind,
    config: &ParserConfig,
) -> IResult<'a, Span<'a>, (Directive, Option<ParserError<'a>>)> {
    let (rest, sequence) = context("options", option_sequence)(input)?;

    if sequence.options.is_empty() && config.requires_options(keyword) {
        return ParserError::failure(
            ErrorKind::MissingOptions,
            keyword_token.span,
            keyword_token.len(),
            format!("directive `{}` requires at least one option", keyword),
        );
    }

    let dangling = sequence.dangling.map(|span| {
        ParserError::new(
            ErrorKind::DanglingContinuation,
            span,
            1,
            format!(
                "line continuation after `{}` is not followed by another option",
                keyword
            ),
        )
    });

    let end = sequence
        .options
        .last()
        .map_or(keyword_token.offset() + keyword_token.len(), |option| {
            option.end_offset()
        });

    Ok((
        rest,
        (
            Directive {
                keyword,
                offset: keyword_token.offset(),
                options: sequence.options,
                end,
            },
            dangling,
        ),
    ))
}

/// offset of the first byte of the line `span` starts on
fn line_start(span: &Span) -> usize {
    span.location_offset() - (span.get_column() - 1)
}

///
/// One `Empty` sentinel for every line lying entirely inside the whitespace run, the line
/// break itself excluded from the sentinel. A trailing blank line without a line break is
/// only complete when the run reaches the end of input.
///
fn blank_lines(token: &Token<TopLevelKind>, at_end: bool, out: &mut Vec<Directive>) {
    let start = token.offset();
    let bytes = token.lexeme().as_bytes();
    let mut current = line_start(&token.span);

    for (idx, byte) in bytes.iter().enumerate() {
        if *byte != b'\n' {
            continue;
        }
        let newline = start + idx;
        if current >= start {
            let end = if newline > current && bytes[idx - 1] == b'\r' {
                newline - 1
            } else {
                newline
            };
            out.push(Directive::sentinel(DirectiveKind::Empty, current, end));
        }
        current = newline + 1;
    }

    let run_end = start + bytes.len();
    if at_end && current >= start && current < run_end {
        out.push(Directive::sentinel(DirectiveKind::Empty, current, run_end));
    }
}

#[cfg(test)]
#[path = "directives_tests.rs"]
mod directives_tests;
