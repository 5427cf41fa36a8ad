use clap::ArgMatches;
use seclang_lang::{Emission, ParserConfig};

use crate::config::LinterConfig;
use crate::errors::Result;

pub(crate) mod files;
pub mod parse_tree;
pub(crate) mod report;
pub mod run;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "seclang-linter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const RUN: &str = "run";
pub const PARSE_TREE: &str = "parse-tree";
// Global arguments
pub const VERBOSE: (&str, char) = ("verbose", 'v');
// Arguments for run
pub const PATHS: &str = "paths";
pub const ALPHABETICAL: (&str, char) = ("alphabetical", 'a');
pub const LAST_MODIFIED: (&str, char) = ("last-modified", 'm');
pub const OUTPUT_FORMAT: (&str, char) = ("output-format", 'o');
pub const JOBS: (&str, char) = ("jobs", 'j');
// Arguments for run, parse-tree
pub const ZERO_ARITY: (&str, char) = ("zero-arity", 'z');
pub const CONFIG: (&str, char) = ("config", 'c');
// Arguments for parse-tree
pub const RULES: (&str, char) = ("rules", 'r');
pub const OUTPUT: (&str, char) = ("output", 'o');
pub const PRINT_JSON: (&str, char) = ("print-json", 'p');
pub const PRINT_YAML: (&str, char) = ("print-yaml", 'y');
pub const EMIT_LINES: (&str, char) = ("emit-lines", 'l');

pub(crate) const RULE_FILE_SUPPORTED_EXTENSIONS: [&str; 1] = [".conf"];
// `dir/...` walks `dir` recursively
pub(crate) const RECURSIVE_SUFFIX: &str = "/...";

pub const SUCCESS_STATUS_CODE: i32 = 0;
pub const FAILURE_STATUS_CODE: i32 = 19;
pub const ERROR_STATUS_CODE: i32 = 5;

///
/// Parser settings for one invocation: the `--config` file when given, extended with the
/// `--zero-arity` keywords of the command line. `emission` overrides the configured mode.
///
pub(crate) fn parser_config(args: &ArgMatches, emission: Option<Emission>) -> Result<ParserConfig> {
    let mut config = match args.get_one::<String>(CONFIG.0) {
        Some(path) => LinterConfig::from_file(path)?,
        None => LinterConfig::default(),
    };
    if let Some(keywords) = args.get_many::<String>(ZERO_ARITY.0) {
        config = config.with_zero_arity(keywords.cloned());
    }
    if let Some(emission) = emission {
        config = config.with_emission(emission);
    }
    config.parser_config()
}
