use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches};
use log::debug;
use seclang_lang::{parse_bytes, Emission};

use crate::command::Command;
use crate::commands::files::read_file_content;
use crate::commands::{
    parser_config, CONFIG, EMIT_LINES, ERROR_STATUS_CODE, OUTPUT, PARSE_TREE, PRINT_JSON,
    PRINT_YAML, RULES, SUCCESS_STATUS_CODE, ZERO_ARITY,
};
use crate::errors::{Error, Result};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct ParseTree {}

#[allow(clippy::new_without_default)]
impl ParseTree {
    pub fn new() -> Self {
        ParseTree {}
    }
}

impl Command for ParseTree {
    fn name(&self) -> &'static str {
        PARSE_TREE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(PARSE_TREE)
            .about("Prints out the parse tree for the directives defined in the file.")
            .arg(
                Arg::new(RULES.0)
                    .long(RULES.0)
                    .short(RULES.1)
                    .help("Provide a rules file, read from STDIN when absent")
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(OUTPUT.0)
                    .long(OUTPUT.0)
                    .short(OUTPUT.1)
                    .help("Write to output file")
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(PRINT_JSON.0)
                    .long(PRINT_JSON.0)
                    .short(PRINT_JSON.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with(PRINT_YAML.0)
                    .help("Print output in JSON format"),
            )
            .arg(
                Arg::new(PRINT_YAML.0)
                    .long(PRINT_YAML.0)
                    .short(PRINT_YAML.1)
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("Print output in YAML format, the default"),
            )
            .arg(
                Arg::new(EMIT_LINES.0)
                    .long(EMIT_LINES.0)
                    .short(EMIT_LINES.1)
                    .action(ArgAction::SetTrue)
                    .help("Emit Empty and Comment entries so that every source line is listed"),
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
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let (name, content) = match app.get_one::<String>(RULES.0) {
            Some(file) => {
                if !Path::new(file).exists() {
                    return Err(Error::FileNotFoundError(file.clone()));
                }
                (file.clone(), read_file_content(File::open(file)?)?)
            }
            None => {
                let mut content = Vec::new();
                reader.read_to_end(&mut content)?;
                (String::new(), content)
            }
        };

        let emission = if app.get_flag(EMIT_LINES.0) {
            Some(Emission::Lines)
        } else {
            None
        };
        let config = parser_config(app, emission)?;
        debug!("parse tree for {:?} with {:?}", name, config);

        let root = match parse_bytes(&name, &content, &config) {
            Ok(root) => root,
            Err(diagnostic) => {
                writer.write_err(diagnostic.render().trim_end().to_string())?;
                return Ok(ERROR_STATUS_CODE);
            }
        };

        for warning in &root.warnings {
            writer.write_err(warning.render().trim_end().to_string())?;
        }

        if app.get_flag(PRINT_JSON.0) {
            serde_json::to_writer_pretty(&mut *writer, &root)?;
            writeln!(writer)?;
        } else {
            serde_yaml::to_writer(writer, &root)?;
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
