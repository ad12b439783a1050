pub mod config;
pub mod distribute;
pub mod error;
pub mod grouper;
pub mod naming;
pub mod report;
pub mod split;
pub mod table;
pub mod writer;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use config::{DistributeOptions, HeaderPolicy, ShardCount};
pub use distribute::{distribute, distribute_with};
pub use error::{ErrorKind, PartitionError, Result};
pub use grouper::{group_by_key, Group};
pub use report::{Operation, PartitionReport, WrittenFile};
pub use split::split;
pub use table::{Row, Table};

/// One user-triggered operation, as collected by a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Request {
    Split {
        path: PathBuf,
        has_header: bool,
    },
    Distribute {
        path: PathBuf,
        has_header: bool,
        /// Raw shard count as typed by the user.
        shard_count: String,
        #[serde(default)]
        header: HeaderPolicy,
    },
}

impl Request {
    pub fn execute(&self) -> Result<PartitionReport> {
        match self {
            Request::Split { path, has_header } => split(path, *has_header),
            Request::Distribute {
                path,
                has_header,
                shard_count,
                header,
            } => {
                let shard_count: ShardCount = shard_count.parse()?;
                let options =
                    DistributeOptions::new(*has_header, shard_count).with_header_policy(*header);
                distribute_with(path, &options)
            }
        }
    }
}

/// The single message a front end shows after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure { kind: ErrorKind, message: String },
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) => message,
            Notice::Failure { message, .. } => message,
        }
    }
}

/// Runs `request` to completion and folds the outcome into a [`Notice`].
///
/// Files written before a failure are left on disk.
pub fn run(request: &Request) -> Notice {
    match request.execute() {
        Ok(report) => Notice::Success(report.notice().to_string()),
        Err(err) => {
            tracing::error!(kind = %err.kind(), "{err}");
            Notice::Failure {
                kind: err.kind(),
                message: err.to_string(),
            }
        }
    }
}
