use seclang_lang::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error writing JSON output {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error reading or writing YAML {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("I/O error when reading {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error walking directory {0}")]
    WalkDirError(#[from] walkdir::Error),
    #[error("Could not initialise logging {0}")]
    LoggerError(#[from] log::SetLoggerError),
    #[error("Invalid linter configuration {0}")]
    ConfigError(#[from] seclang_lang::Error),
    #[error("{0}")]
    ParseError(#[from] Diagnostic),
    #[error("The path `{0}` does not exist")]
    FileNotFoundError(String),
    #[error("{0}")]
    IllegalArguments(String),
    #[error("Lint worker stopped unexpectedly: {0}")]
    WorkerError(String),
}

pub type Result<R> = std::result::Result<R, Error>;
