use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid setting {name}={value}")]
    InvalidSetting { name: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("initials are required")]
    MissingInitials,
    #[error("full name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("score submission rejected: {0}")]
    Rejected(String),
}
