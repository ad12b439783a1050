use std::path::Path;

use tracing::info;

use crate::error::{PartitionError, Result};
use crate::grouper::group_by_key;
use crate::naming::{aliases, key_output_path};
use crate::report::{Operation, PartitionReport};
use crate::table::Table;
use crate::writer::write_tsv;

/// Writes one `<stem>_<key>.tsv` file per distinct key of the file at `path`.
pub fn split<P: AsRef<Path>>(path: P, has_header: bool) -> Result<PartitionReport> {
    let path = path.as_ref();
    let table = Table::load(path, has_header)?;
    split_table(&table, path)
}

/// Writes one file per key group of `table`, named after `input`.
///
/// The header row is copied only when the table has one. Groups are written
/// in order of first appearance; the first failure stops the run and leaves
/// earlier files in place. Two keys that resolve to the same file (case
/// variants on a case-insensitive filesystem) are an error.
pub fn split_table(table: &Table, input: &Path) -> Result<PartitionReport> {
    let groups = group_by_key(table);
    let mut report = PartitionReport::new(Operation::Split, input);

    for group in &groups {
        let output = key_output_path(input, group.key)?;
        let earlier = report
            .files
            .iter()
            .position(|written| aliases(&written.path, &output));
        if let Some(earlier) = earlier {
            return Err(PartitionError::OutputCollision {
                earlier_key: groups[earlier].key.to_string(),
                key: group.key.to_string(),
                path: output,
            });
        }
        let rows = write_tsv(&output, table.header(), group.rows.iter().copied())?;
        report.push(output, rows);
    }

    info!(
        source = %input.display(),
        groups = groups.len(),
        rows = report.total_rows(),
        "split complete"
    );
    Ok(report)
}
