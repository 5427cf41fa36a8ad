use std::io::Write;
use std::str::FromStr;

use colored::Colorize;
use seclang_lang::{Diagnostic, ParseRoot};
use serde::Serialize;

use crate::commands::{FAILURE_STATUS_CODE, SUCCESS_STATUS_CODE};
use crate::errors::{Error, Result};
use crate::utils::writer::Writer;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub enum Status {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    SingleLineSummary,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["single-line-summary", "json", "yaml"];
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single-line-summary" => Ok(OutputFormat::SingleLineSummary),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(Error::IllegalArguments(format!(
                "unsupported output format `{}`, expected one of {:?}",
                s,
                OutputFormat::NAMES
            ))),
        }
    }
}

/// Outcome of linting one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub status: Status,
    pub directives: usize,
    pub warnings: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Diagnostic>,
}

impl FileReport {
    pub fn from_parse(name: String, parsed: std::result::Result<ParseRoot, Diagnostic>) -> Self {
        match parsed {
            Ok(root) => FileReport {
                name,
                status: Status::Pass,
                directives: root.statements().count(),
                warnings: root.warnings,
                error: None,
            },
            Err(diagnostic) => FileReport {
                name,
                status: Status::Fail,
                directives: 0,
                warnings: vec![],
                error: Some(diagnostic),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub passed: usize,
    pub total: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let passed = files
            .iter()
            .filter(|file| file.status == Status::Pass)
            .count();
        BatchReport {
            passed,
            total: files.len(),
            files,
        }
    }

    pub fn status_code(&self) -> i32 {
        if self.passed == self.total {
            SUCCESS_STATUS_CODE
        } else {
            FAILURE_STATUS_CODE
        }
    }

    pub fn write(&self, format: OutputFormat, writer: &mut Writer) -> Result<()> {
        match format {
            OutputFormat::SingleLineSummary => self.write_summary(writer),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                writeln!(writer)?;
                Ok(())
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_writer(writer, self)?),
        }
    }

    fn write_summary(&self, writer: &mut Writer) -> Result<()> {
        for file in &self.files {
            write!(writer, "validating file {}", file.name)?;
            match &file.error {
                None => writeln!(writer, ".........{}", "success!".green())?,
                Some(diagnostic) => {
                    writeln!(writer, ".........{}", "failed!".red().bold())?;
                    write!(writer, "{}", diagnostic)?;
                }
            }
            for warning in &file.warnings {
                write!(writer, "{}", warning)?;
            }
        }
        writeln!(writer, "{} of {} files passed", self.passed, self.total)?;
        Ok(())
    }
}
