use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use log::{debug, info};
use seclang_lang::{parse_bytes, ParserConfig};

use crate::command::Command;
use crate::commands::files::{
    alphabetical, collect_rule_files, iterate_over, last_modified, regular_ordering, Comparator,
};
use crate::commands::report::{BatchReport, FileReport, OutputFormat};
use crate::commands::{
    parser_config, ALPHABETICAL, CONFIG, JOBS, LAST_MODIFIED, OUTPUT_FORMAT, PATHS, RUN,
    ZERO_ARITY,
};
use crate::errors::{Error, Result};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Run {}

#[allow(clippy::new_without_default)]
impl Run {
    pub fn new() -> Self {
        Run {}
    }
}

impl Command for Run {
    fn name(&self) -> &'static str {
        RUN
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(RUN)
            .about(
                r#"Lints SecLang rule files. Each file is parsed on its own, a syntax error
fails that file only and is reported with the offending source lines underlined.
"#,
            )
            .arg(
                Arg::new(PATHS)
                    .help("Rule files or directories to lint. Directories are walked recursively for .conf files, `dir/...` is accepted as well")
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .required(true),
            )
            .arg(
                Arg::new(ALPHABETICAL.0)
                    .long(ALPHABETICAL.0)
                    .short(ALPHABETICAL.1)
                    .action(ArgAction::SetTrue)
                    .help("Lint files in a directory ordered alphabetically"),
            )
            .arg(
                Arg::new(LAST_MODIFIED.0)
                    .long(LAST_MODIFIED.0)
                    .short(LAST_MODIFIED.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with(ALPHABETICAL.0)
                    .help("Lint files in a directory ordered by last modified times"),
            )
            .arg(
                Arg::new(OUTPUT_FORMAT.0)
                    .long(OUTPUT_FORMAT.0)
                    .short(OUTPUT_FORMAT.1)
                    .value_parser(PossibleValuesParser::new(OutputFormat::NAMES))
                    .default_value("single-line-summary")
                    .action(ArgAction::Set)
                    .help("Specify the format in which the results should be displayed"),
            )
            .arg(
                Arg::new(ZERO_ARITY.0)
                    .long(ZERO_ARITY.0)
                    .short(ZERO_ARITY.1)
                    .action(ArgAction::Append)
                    .help("Directive keyword that may appear without options, can be repeated"),
            )
            .arg(
                Arg::new(CONFIG.0)
                    .long(CONFIG.0)
                    .short(CONFIG.1)
                    .action(ArgAction::Set)
                    .help("YAML configuration file"),
            )
            .arg(
                Arg::new(JOBS.0)
                    .long(JOBS.0)
                    .short(JOBS.1)
                    .value_parser(value_parser!(usize))
                    .default_value("1")
                    .action(ArgAction::Set)
                    .help("Number of files linted in parallel"),
            )
            .arg_required_else_help(true)
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, _reader: &mut Reader) -> Result<i32> {
        let cmp: Comparator = if app.get_flag(LAST_MODIFIED.0) {
            last_modified
        } else if app.get_flag(ALPHABETICAL.0) {
            alphabetical
        } else {
            regular_ordering
        };

        let paths = app
            .get_many::<String>(PATHS)
            .map(|paths| paths.cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        let format = match app.get_one::<String>(OUTPUT_FORMAT.0) {
            Some(format) => format.parse::<OutputFormat>()?,
            None => OutputFormat::SingleLineSummary,
        };
        let jobs = app.get_one::<usize>(JOBS.0).copied().unwrap_or(1);

        let config = parser_config(app, None)?;
        let files = collect_rule_files(&paths, cmp)?;
        info!("linting {} file(s) with {} job(s)", files.len(), jobs);

        let report = BatchReport::new(lint_files(&files, &config, jobs)?);
        report.write(format, writer)?;
        info!("{} of {} files passed", report.passed, report.total);

        Ok(report.status_code())
    }
}

///
/// Lints `files` and returns one report per file, in the order of `files`. With more than
/// one job the list is split into contiguous chunks, one scoped thread per chunk.
///
pub(crate) fn lint_files(
    files: &[PathBuf],
    config: &ParserConfig,
    jobs: usize,
) -> Result<Vec<FileReport>> {
    let lint = |content: Vec<u8>, path: &PathBuf| -> Result<FileReport> {
        let name = path.display().to_string();
        debug!("linting {}", name);
        let parsed = parse_bytes(&name, &content, config);
        Ok(FileReport::from_parse(name, parsed))
    };

    if jobs <= 1 || files.len() <= 1 {
        return iterate_over(files, lint).collect();
    }

    let chunk_size = (files.len() + jobs - 1) / jobs;
    std::thread::scope(|scope| {
        let workers = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || iterate_over(chunk, lint).collect::<Result<Vec<_>>>())
            })
            .collect::<Vec<_>>();

        let mut reports = Vec::with_capacity(files.len());
        for worker in workers {
            match worker.join() {
                Ok(chunk) => reports.extend(chunk?),
                Err(_) => {
                    return Err(Error::WorkerError(
                        "a thread panicked while linting".to_string(),
                    ))
                }
            }
        }
        Ok(reports)
    })
}
