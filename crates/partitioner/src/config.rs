use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::PartitionError;

/// Number of output shards for distribute mode, between one and
/// [`ShardCount::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ShardCount(NonZeroUsize);

impl ShardCount {
    /// Each shard is a separate output file; counts above this are rejected
    /// before anything is allocated or written.
    pub const MAX: usize = 100_000;

    pub fn new(count: usize) -> Option<Self> {
        if count > Self::MAX {
            return None;
        }
        NonZeroUsize::new(count).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl FromStr for ShardCount {
    type Err = PartitionError;

    /// Accepts a decimal integer with optional surrounding whitespace and an
    /// optional leading `+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || PartitionError::InvalidShardCount {
            input: s.to_string(),
        };
        // All digits but too large for usize still counts as "too many".
        let count = match trimmed.parse::<usize>() {
            Ok(count) => count,
            Err(_) if is_unsigned_integer(trimmed) => usize::MAX,
            Err(_) => return Err(invalid()),
        };
        Self::try_from(count).map_err(|err| match err {
            PartitionError::InvalidShardCount { .. } => invalid(),
            other => other,
        })
    }
}

fn is_unsigned_integer(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl TryFrom<usize> for ShardCount {
    type Error = PartitionError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        if count > Self::MAX {
            return Err(PartitionError::TooManyShards {
                count,
                max: Self::MAX,
            });
        }
        Self::new(count).ok_or_else(|| PartitionError::InvalidShardCount {
            input: count.to_string(),
        })
    }
}

impl From<ShardCount> for usize {
    fn from(count: ShardCount) -> Self {
        count.get()
    }
}

impl fmt::Display for ShardCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether distribute mode writes a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Always write a header; positional indices when the source has none.
    #[default]
    Always,
    /// Write a header only when the source had one, like split mode.
    Source,
}

impl FromStr for HeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(HeaderPolicy::Always),
            "source" => Ok(HeaderPolicy::Source),
            other => Err(format!(
                "unknown header policy '{other}' (expected 'always' or 'source')"
            )),
        }
    }
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderPolicy::Always => f.write_str("always"),
            HeaderPolicy::Source => f.write_str("source"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeOptions {
    pub has_header: bool,
    pub shard_count: ShardCount,
    #[serde(default)]
    pub header: HeaderPolicy,
}

impl DistributeOptions {
    pub fn new(has_header: bool, shard_count: ShardCount) -> Self {
        Self {
            has_header,
            shard_count,
            header: HeaderPolicy::default(),
        }
    }

    pub fn with_header_policy(mut self, header: HeaderPolicy) -> Self {
        self.header = header;
        self
    }

    /// Whether output shards get a header row for a source with or without one.
    pub fn writes_header(&self) -> bool {
        match self.header {
            HeaderPolicy::Always => true,
            HeaderPolicy::Source => self.has_header,
        }
    }
}
