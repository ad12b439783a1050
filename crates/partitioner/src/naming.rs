use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PartitionError, Result};

pub const OUTPUT_EXTENSION: &str = "tsv";

/// The input path with its final extension removed.
pub fn stem(input: &Path) -> PathBuf {
    input.with_extension("")
}

/// `<stem>_<key>.tsv`, next to the input.
pub fn key_output_path(input: &Path, key: &str) -> Result<PathBuf> {
    if key.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
        return Err(PartitionError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(with_suffix(input, key))
}

/// `<stem>_Part<index + 1>.tsv`, next to the input.
pub fn shard_output_path(input: &Path, index: usize) -> PathBuf {
    with_suffix(input, &format!("Part{}", index + 1))
}

/// Whether writing `candidate` would land on the file already written at
/// `earlier`. On case-insensitive filesystems names that differ only by case
/// share one file.
pub fn aliases(earlier: &Path, candidate: &Path) -> bool {
    if earlier == candidate {
        return true;
    }
    let fold = |p: &Path| p.to_string_lossy().to_lowercase();
    fold(earlier) == fold(candidate) && same_file(earlier, candidate)
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(_earlier: &Path, candidate: &Path) -> bool {
    fs::metadata(candidate).is_ok()
}

fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem(input));
    name.push("_");
    name.push(suffix);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}
