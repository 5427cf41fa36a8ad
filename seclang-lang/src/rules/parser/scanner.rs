use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, char, multispace1, space0};
use nom::combinator::{eof, map, peek, recognize};
use nom::sequence::{pair, preceded};
use nom::InputTake;

use crate::rules::errors::ErrorKind;
use crate::rules::keywords::DirectiveKind;
use crate::rules::parser::{IResult, ParserError, Span};

/// Tokens legal between directives.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TopLevelKind {
    Whitespace,
    Comment,
    Keyword(DirectiveKind),
    EndOfInput,
}

/// Tokens legal after a directive keyword, up to the end of its last line.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OptionKind {
    Whitespace,
    Continuation,
    LineBreak,
    QuotedOption,
    BareOption,
    EndOfInput,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Token<'a, K> {
    pub kind: K,
    pub span: Span<'a>,
}

impl<'a, K> Token<'a, K> {
    pub fn new(kind: K, span: Span<'a>) -> Self {
        Token { kind, span }
    }

    pub fn offset(&self) -> usize {
        self.span.location_offset()
    }

    pub fn len(&self) -> usize {
        self.span.fragment().len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.fragment().is_empty()
    }

    pub fn lexeme(&self) -> &'a str {
        self.span.fragment()
    }
}

/// Length of the line break starting at `idx`, 0 when there is none.
pub(crate) fn line_break_len(bytes: &[u8], idx: usize) -> usize {
    match bytes.get(idx) {
        Some(b'\n') => 1,
        Some(b'\r') if bytes.get(idx + 1) == Some(&b'\n') => 2,
        _ => 0,
    }
}

/// bytes that separate options, line breaks included
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\x0b' | b'\x0c' | b'\r' | b'\n')
}

fn is_horizontal_space(bytes: &[u8], idx: usize) -> bool {
    match bytes.get(idx) {
        Some(byte) => is_blank(*byte) && *byte != b'\n' && line_break_len(bytes, idx) == 0,
        None => false,
    }
}

fn no_match<'a, O>(input: Span<'a>, message: &str) -> IResult<'a, Span<'a>, O> {
    Err(nom::Err::Error(ParserError::new(
        ErrorKind::UnexpectedToken,
        input,
        1,
        message,
    )))
}

//
// Top level tokens
//

pub fn whitespace(input: Span) -> IResult<Span, Span> {
    multispace1(input)
}

///
/// `#` after optional blanks, up to but excluding the next line break. A backslash right
/// before a line break keeps the comment going on the next line.
///
pub fn comment(input: Span) -> IResult<Span, Span> {
    peek(preceded(space0, char('#')))(input)?;

    let bytes = input.fragment().as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'\\' {
            let escaped = line_break_len(bytes, idx + 1);
            if escaped > 0 {
                idx += 1 + escaped;
                continue;
            }
        }
        if line_break_len(bytes, idx) > 0 {
            break;
        }
        idx += 1;
    }
    Ok(input.take_split(idx))
}

///
/// Maximal run of ASCII letters, which must be one of the known keywords. Any other run
/// is a fatal `UnrecognizedDirective` covering the whole run.
///
pub fn directive_keyword(input: Span) -> IResult<Span, (DirectiveKind, Span)> {
    let (rest, word) = alpha1(input)?;
    match DirectiveKind::lookup(word.fragment()) {
        Some(kind) => Ok((rest, (kind, word))),
        None => ParserError::failure(
            ErrorKind::UnrecognizedDirective,
            word,
            word.fragment().len(),
            format!("unrecognized directive `{}`", word.fragment()),
        ),
    }
}

pub fn end_of_input(input: Span) -> IResult<Span, Span> {
    eof(input)
}

//
// Tokens inside a directive
//

pub fn line_break(input: Span) -> IResult<Span, Span> {
    alt((tag("\r\n"), tag("\n")))(input)
}

/// `\` immediately followed by a line break
pub fn escaped_continuation(input: Span) -> IResult<Span, Span> {
    recognize(pair(char('\\'), line_break))(input)
}

/// spaces, tabs, vertical tabs, form feeds and any `\r` that does not start a line break
pub fn horizontal_space(input: Span) -> IResult<Span, Span> {
    let bytes = input.fragment().as_bytes();
    let mut idx = 0;
    while is_horizontal_space(bytes, idx) {
        idx += 1;
    }
    if idx == 0 {
        return no_match(input, "expected a separator");
    }
    Ok(input.take_split(idx))
}

///
/// Double quoted option, quotes included. A backslash escapes the byte after it, so `\"`
/// does not close the option and `\` followed by a line break carries it onto the next
/// line. An unescaped line break or the end of input before the closing quote is a fatal
/// `UnterminatedQuote` anchored at the opening quote.
///
pub fn quoted_option(input: Span) -> IResult<Span, Span> {
    let bytes = input.fragment().as_bytes();
    match bytes.first() {
        None => {
            return ParserError::failure(
                ErrorKind::EndOfInput,
                input,
                0,
                "unexpected end of input, expected an option",
            )
        }
        Some(b'"') => {}
        Some(_) => return no_match(input, "expected `\"` to open a quoted option"),
    }

    let mut idx = 1;
    loop {
        match bytes.get(idx) {
            None => return unterminated(input, idx),
            Some(b'"') => return Ok(input.take_split(idx + 1)),
            Some(b'\\') => {
                let escaped = line_break_len(bytes, idx + 1);
                if escaped > 0 {
                    idx += 1 + escaped;
                } else if idx + 1 < bytes.len() {
                    idx += 2;
                } else {
                    idx += 1;
                }
            }
            Some(_) if line_break_len(bytes, idx) > 0 => return unterminated(input, idx),
            Some(_) => idx += 1,
        }
    }
}

fn unterminated<'a, O>(input: Span<'a>, scanned: usize) -> IResult<'a, Span<'a>, O> {
    ParserError::failure(
        ErrorKind::UnterminatedQuote,
        input,
        scanned,
        "unterminated quoted option, expected a closing `\"` before the end of the line",
    )
}

///
/// Unquoted option, up to the next byte that separates options. `\` followed by a space or tab keeps
/// the blank inside the option, `\` followed by a line break ends it.
///
pub fn bare_option(input: Span) -> IResult<Span, Span> {
    let bytes = input.fragment().as_bytes();
    match bytes.first() {
        None => {
            return ParserError::failure(
                ErrorKind::EndOfInput,
                input,
                0,
                "unexpected end of input, expected an option",
            )
        }
        Some(b'"') => return no_match(input, "expected an unquoted option"),
        Some(b) if is_blank(*b) => return no_match(input, "expected an unquoted option"),
        Some(_) => {}
    }

    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' if line_break_len(bytes, idx + 1) > 0 => break,
            b'\\' if matches!(bytes.get(idx + 1), Some(b' ') | Some(b'\t')) => idx += 2,
            b if is_blank(b) => break,
            _ => idx += 1,
        }
    }
    if idx == 0 {
        return no_match(input, "expected an unquoted option");
    }
    Ok(input.take_split(idx))
}

///
/// Classify the token at the cursor between directives. Checks run in a fixed order and
/// the first match wins, so the result for a given cursor is always the same. Anything
/// that cannot start a token here is a fatal `UnexpectedToken` one byte wide.
///
pub fn classify_top_level(input: Span) -> IResult<Span, Token<TopLevelKind>> {
    if let Ok((rest, span)) = end_of_input(input) {
        return Ok((rest, Token::new(TopLevelKind::EndOfInput, span)));
    }

    alt((
        map(whitespace, |span| Token::new(TopLevelKind::Whitespace, span)),
        map(comment, |span| Token::new(TopLevelKind::Comment, span)),
        map(directive_keyword, |(kind, span)| {
            Token::new(TopLevelKind::Keyword(kind), span)
        }),
    ))(input)
    .or_else(|err| match err {
        nom::Err::Error(_) => ParserError::failure(
            ErrorKind::UnexpectedToken,
            input,
            1,
            "unexpected token while attempting to read a directive",
        ),
        fatal => Err(fatal),
    })
}

/// Classify the token at the cursor inside a directive, in the same fixed order manner.
pub fn classify_option(input: Span) -> IResult<Span, Token<OptionKind>> {
    if let Ok((rest, span)) = end_of_input(input) {
        return Ok((rest, Token::new(OptionKind::EndOfInput, span)));
    }

    alt((
        map(escaped_continuation, |span| {
            Token::new(OptionKind::Continuation, span)
        }),
        map(horizontal_space, |span| Token::new(OptionKind::Whitespace, span)),
        map(line_break, |span| Token::new(OptionKind::LineBreak, span)),
        map(quoted_option, |span| Token::new(OptionKind::QuotedOption, span)),
        map(bare_option, |span| Token::new(OptionKind::BareOption, span)),
    ))(input)
    .or_else(|err| match err {
        nom::Err::Error(_) => ParserError::failure(
            ErrorKind::UnexpectedToken,
            input,
            1,
            "unexpected token while attempting to read an option",
        ),
        fatal => Err(fatal),
    })
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod scanner_tests;
