use crate::registry::CommandKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    FileUnreadable { path: PathBuf, source: io::Error },

    #[error("malformed configuration line (expected 5 '|'-separated fields): {line}")]
    MalformedLine { line: String },

    #[error("missing required field in configuration line: {line}")]
    MissingField { line: String },

    #[error("no cluster profiles found in configuration file")]
    EmptyConfiguration,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("selection {value} is out of range (expected 1-{max})")]
    OutOfRange { value: i64, max: usize },

    #[error("expected a number, got {input:?}")]
    ParseFailure { input: String },

    #[error("input stream closed")]
    InputClosed,

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to launch gcloud: {source}")]
    Spawn { source: io::Error },

    #[error("cluster authentication failed for {cluster}: gcloud exited with {status}")]
    AuthFailed { cluster: String, status: String },
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to launch {tool}: {source}")]
    Spawn { tool: &'static str, source: io::Error },

    #[error("{command} exited with {status}")]
    ExternalCommand { command: String, status: String },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("command {kind:?} is listed in the menu but has no registered handler")]
pub struct RegistryIntegrityError {
    pub kind: CommandKind,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("selection aborted: {0}")]
    Selection(#[from] SelectionError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}
