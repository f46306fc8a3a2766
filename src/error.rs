use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Bf2cError {
    #[error("invalid array size {0}: must be at least 1")]
    InvalidArraySize(usize),

    #[error("Unmatched '[' at position {0}")]
    UnmatchedOpenBracket(usize),

    #[error("Unmatched ']' at position {0}")]
    UnmatchedCloseBracket(usize),

    #[error("{}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Bf2cError>;
