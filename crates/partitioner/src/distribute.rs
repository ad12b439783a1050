use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{DistributeOptions, HeaderPolicy, ShardCount};
use crate::error::Result;
use crate::grouper::{group_by_key, Group};
use crate::naming::shard_output_path;
use crate::report::{Operation, PartitionReport};
use crate::table::{Row, Table};
use crate::writer::write_tsv;

/// Distributes the file at `path` over `n` shards.
///
/// `n` is the raw user input; it is validated before the file is touched so
/// an invalid count writes nothing.
pub fn distribute<P: AsRef<Path>>(path: P, has_header: bool, n: &str) -> Result<PartitionReport> {
    let shard_count: ShardCount = n.parse()?;
    distribute_with(path, &DistributeOptions::new(has_header, shard_count))
}

pub fn distribute_with<P: AsRef<Path>>(
    path: P,
    options: &DistributeOptions,
) -> Result<PartitionReport> {
    let path = path.as_ref();
    let table = Table::load(path, options.has_header)?;
    distribute_table(&table, path, options)
}

/// Round-robin assignment within each group.
///
/// The row at position `p` of a group goes to shard `p % n`, groups are
/// processed in order, and each shard keeps the order rows were appended in.
pub fn assign_shards<'a>(groups: &[Group<'a>], shard_count: ShardCount) -> Vec<Vec<&'a Row>> {
    let n = shard_count.get();
    let mut shards: Vec<Vec<&'a Row>> = vec![Vec::new(); n];
    for group in groups {
        for (position, row) in group.rows.iter().enumerate() {
            shards[position % n].push(*row);
        }
    }
    shards
}

/// Writes `<stem>_Part<i>.tsv` for every shard, empty shards included.
pub fn distribute_table(
    table: &Table,
    input: &Path,
    options: &DistributeOptions,
) -> Result<PartitionReport> {
    let groups = group_by_key(table);
    debug!(groups = groups.len(), rows = table.len(), "grouped rows");

    let shards = assign_shards(&groups, options.shard_count);

    let columns = table.columns();
    let header = if options.writes_header() {
        if !table.has_header() && options.header == HeaderPolicy::Always {
            warn!(
                source = %input.display(),
                "source has no header; writing positional column indices as the header"
            );
        }
        Some(columns.as_slice())
    } else {
        None
    };

    let mut report = PartitionReport::new(Operation::Distribute, input);
    for (index, shard) in shards.iter().enumerate() {
        let output = shard_output_path(input, index);
        let rows = write_tsv(&output, header, shard.iter().copied())?;
        report.push(output, rows);
    }

    info!(
        source = %input.display(),
        shards = shards.len(),
        rows = report.total_rows(),
        "distribute complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PartitionError};
    use std::fs;
    use tempfile::TempDir;

    fn shard_values(shards: &[Vec<&Row>]) -> Vec<Vec<String>> {
        shards
            .iter()
            .map(|s| s.iter().map(|r| r.join("")).collect())
            .collect()
    }

    #[test]
    fn test_assign_matches_worked_example() {
        let table = Table::from_reader("A\t1\nB\t2\nA\t3\nA\t4\nB\t5\n".as_bytes(), false).unwrap();
        let groups = group_by_key(&table);

        let shards = assign_shards(&groups, ShardCount::new(2).unwrap());

        assert_eq!(
            shard_values(&shards),
            vec![vec!["A1", "A4", "B2"], vec!["A3", "B5"]]
        );
    }

    #[test]
    fn test_assign_more_shards_than_rows() {
        let table = Table::from_reader("A\t1\nA\t2\n".as_bytes(), false).unwrap();
        let groups = group_by_key(&table);

        let shards = assign_shards(&groups, ShardCount::new(4).unwrap());

        assert_eq!(shards.len(), 4);
        assert_eq!(shards[0].len(), 1);
        assert_eq!(shards[1].len(), 1);
        assert!(shards[2].is_empty());
        assert!(shards[3].is_empty());
    }

    #[test]
    fn test_positional_header_when_source_has_none() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trials.tsv");
        fs::write(&input, "A\t1\nB\t2\nA\t3\n").unwrap();

        let report = distribute(&input, false, "2").unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("trials_Part1.tsv")).unwrap(),
            "0\t1\nA\t1\nB\t2\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("trials_Part2.tsv")).unwrap(),
            "0\t1\nA\t3\n"
        );
    }

    #[test]
    fn test_source_header_policy() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trials.tsv");
        fs::write(&input, "A\t1\nB\t2\nA\t3\n").unwrap();

        let options = DistributeOptions::new(false, ShardCount::new(2).unwrap())
            .with_header_policy(HeaderPolicy::Source);
        distribute_with(&input, &options).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("trials_Part2.tsv")).unwrap(),
            "A\t3\n"
        );
    }

    #[test]
    fn test_invalid_count_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trials.tsv");
        fs::write(&input, "A\t1\n").unwrap();

        for n in ["0", "abc"] {
            let err = distribute(&input, false, n).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_huge_count_is_value_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trials.tsv");
        fs::write(&input, "A\t1\nB\t2\n").unwrap();

        for n in [usize::MAX.to_string(), (ShardCount::MAX + 1).to_string()] {
            let err = distribute(&input, false, &n).unwrap_err();
            assert!(matches!(err, PartitionError::TooManyShards { .. }), "n = {n}");
            assert_eq!(err.kind(), ErrorKind::Value);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_count_checked_before_loading() {
        let err = distribute("/definitely/not/here.tsv", false, "zero").unwrap_err();
        assert!(matches!(err, PartitionError::InvalidShardCount { .. }));
    }

    #[test]
    fn test_header_only_input_writes_empty_shards() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trials.tsv");
        fs::write(&input, "kind\tvalue\n").unwrap();

        let report = distribute(&input, true, "3").unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.total_rows(), 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("trials_Part3.tsv")).unwrap(),
            "kind\tvalue\n"
        );
    }
}
