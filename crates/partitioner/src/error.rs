use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification surfaced to users alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    File,
    Parse,
    Value,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::File => "FileError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Value => "ValueError",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Please select a file first!")]
    NoInput,

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[source] io::Error),

    #[error("no columns to parse from file")]
    EmptyInput,

    #[error("malformed input{}: {source}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Malformed {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected {expected} fields, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("key {key:?} cannot be used in a file name")]
    InvalidKey { key: String },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "keys {earlier_key:?} and {key:?} resolve to the same file {}",
        .path.display()
    )]
    OutputCollision {
        earlier_key: String,
        key: String,
        path: PathBuf,
    },

    #[error("Invalid number entered for N: {input:?}")]
    InvalidShardCount { input: String },

    #[error("N must be at most {max}, got {count}")]
    TooManyShards { count: usize, max: usize },
}

impl PartitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartitionError::NoInput
            | PartitionError::Open { .. }
            | PartitionError::Read(_)
            | PartitionError::EmptyInput
            | PartitionError::InvalidKey { .. }
            | PartitionError::OutputCollision { .. }
            | PartitionError::Write { .. } => ErrorKind::File,
            PartitionError::Malformed { .. } | PartitionError::RaggedRow { .. } => {
                ErrorKind::Parse
            }
            PartitionError::InvalidShardCount { .. } | PartitionError::TooManyShards { .. } => {
                ErrorKind::Value
            }
        }
    }

    /// Splits reader-side csv failures into I/O and content problems.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        if err.is_io_error() {
            return PartitionError::Read(io::Error::from(err));
        }
        let line = err.position().map(|p| p.line());
        PartitionError::Malformed { line, source: err }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        PartitionError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PartitionError>;
