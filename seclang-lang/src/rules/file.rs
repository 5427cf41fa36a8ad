use log::debug;
use nom::error::context;

use crate::rules::diagnostic::{Diagnostic, SourceBuffer};
use crate::rules::errors::ErrorKind;
use crate::rules::exprs::ParseRoot;
use crate::rules::parser::directives::{directives, Directives};
use crate::rules::parser::{IResult, ParserConfig, Span};

/// Stage every parse failure is reported under, nested stages follow after a `/`.
pub const ROOT_STAGE: &str = "directives";

/// Parse with the default configuration.
pub fn parse(source: &SourceBuffer) -> Result<ParseRoot, Diagnostic> {
    parse_with(source, &ParserConfig::default())
}

///
/// Parse a whole file. The first error aborts the parse and is returned as a
/// [`Diagnostic`] over `source`, there is no partial result. The diagnostic context starts
/// with [`ROOT_STAGE`]. Non fatal findings are attached to the root as warnings.
///
pub fn parse_with(source: &SourceBuffer, config: &ParserConfig) -> Result<ParseRoot, Diagnostic> {
    debug!(
        "parsing {} ({} bytes, {:?} emission)",
        source.name(),
        source.len(),
        config.emission
    );

    match staged(source.span(), config) {
        Ok((_rest, parsed)) => {
            debug!(
                "{} directive(s), {} warning(s) in {}",
                parsed.directives.len(),
                parsed.warnings.len(),
                source.name()
            );
            Ok(ParseRoot {
                source_name: source.name().to_string(),
                directives: parsed.directives,
                warnings: parsed
                    .warnings
                    .into_iter()
                    .map(|warning| warning.into_diagnostic(source))
                    .collect(),
            })
        }
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            Err(err.into_diagnostic(source))
        }
        Err(nom::Err::Incomplete(_)) => Err(Diagnostic::error(
            ErrorKind::EndOfInput,
            "unexpected end of input",
            source.len(),
            0,
            source.clone(),
        )),
    }
}

fn staged<'a>(
    input: Span<'a>,
    config: &ParserConfig,
) -> IResult<'a, Span<'a>, Directives<'a>> {
    context(ROOT_STAGE, |i: Span<'a>| directives(i, config))(input)
}

///
/// Parse raw file content. Bytes that are not valid UTF-8 are reported as
/// `InvalidEncoding` at the first offending byte, over a lossy copy of the content.
///
pub fn parse_bytes(
    name: &str,
    bytes: &[u8],
    config: &ParserConfig,
) -> Result<ParseRoot, Diagnostic> {
    match std::str::from_utf8(bytes) {
        Ok(content) => parse_with(&SourceBuffer::new(name, content), config),
        Err(err) => {
            let offset = err.valid_up_to();
            let lossy = String::from_utf8_lossy(bytes);
            Err(Diagnostic::error(
                ErrorKind::InvalidEncoding,
                format!("content is not valid UTF-8, invalid byte at offset {}", offset),
                offset,
                err.error_len().unwrap_or(1),
                SourceBuffer::new(name, &*lossy),
            ))
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod file_tests;
