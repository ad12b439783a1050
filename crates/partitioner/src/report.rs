use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Split,
    Distribute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
}

/// What a completed operation left on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionReport {
    pub operation: Operation,
    pub source: PathBuf,
    pub files: Vec<WrittenFile>,
}

impl PartitionReport {
    pub fn new(operation: Operation, source: impl Into<PathBuf>) -> Self {
        Self {
            operation,
            source: source.into(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, path: PathBuf, rows: usize) {
        self.files.push(WrittenFile { path, rows });
    }

    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }

    pub fn notice(&self) -> &'static str {
        match self.operation {
            Operation::Split => "Files have been split successfully.",
            Operation::Distribute => "Files have been distributed successfully.",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
