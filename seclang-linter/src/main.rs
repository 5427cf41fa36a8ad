use std::collections::HashMap;
use std::fs::File;
use std::process::exit;

use clap::{Arg, ArgAction};
use log::{debug, Level};

use seclang_linter::commands::{APP_NAME, APP_VERSION, OUTPUT, PARSE_TREE, VERBOSE};
use seclang_linter::utils::get_linter_commands;
use seclang_linter::utils::reader::{ReadBuffer, Reader};
use seclang_linter::utils::writer::{WriteBuffer, Writer};
use seclang_linter::Error;

fn main() -> Result<(), Error> {
    let mut app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Finds syntax errors in SecLang rule files as understood by Coraza. Every
  directive keyword is checked against the known vocabulary and its options are
  checked for balanced quotes and separators. Errors are reported with the
  offending source lines underlined."#,
        )
        .arg(
            Arg::new(VERBOSE.0)
                .long(VERBOSE.0)
                .short(VERBOSE.1)
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity - add v's to increase output"),
        )
        .arg_required_else_help(true);

    let commands = get_linter_commands();
    let mappings = commands.iter().map(|s| (s.name(), s)).fold(
        HashMap::with_capacity(commands.len()),
        |mut map, entry| {
            map.insert(entry.0, entry.1.as_ref());
            map
        },
    );

    for each in &commands {
        app = app.subcommand(each.command());
    }

    let help = app.render_usage();
    let app = app.get_matches();

    let log_level = match app.get_count(VERBOSE.0) {
        0 => Level::Error,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(log_level)?;

    match app.subcommand() {
        Some((name, value)) => {
            if let Some(command) = mappings.get(name) {
                debug!("running {} with {:?}", name, value);
                let mut output_writer = if command.name() == PARSE_TREE {
                    match value.get_one::<String>(OUTPUT.0) {
                        Some(file) => Writer::new(
                            WriteBuffer::File(File::create(file)?),
                            WriteBuffer::Stderr(std::io::stderr()),
                        ),
                        None => Writer::default(),
                    }
                } else {
                    Writer::default()
                };

                match (*command).execute(
                    value,
                    &mut output_writer,
                    &mut Reader::new(ReadBuffer::Stdin(std::io::stdin())),
                ) {
                    Err(e) => {
                        output_writer.write_err(format!("Error occurred {}", e))?;
                        exit(-1);
                    }
                    Ok(code) => exit(code),
                }
            } else {
                println!("{}", help);
            }
        }
        None => {
            println!("{}", help);
        }
    }

    Ok(())
}
