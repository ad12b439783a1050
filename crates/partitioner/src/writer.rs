use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::error::{PartitionError, Result};
use crate::table::Row;

/// Writes `rows` as tab-separated text to `path`, replacing any existing file.
///
/// Fields that contain a tab, quote or line break are quoted. Returns the
/// number of data rows written.
pub fn write_tsv<'a, I>(path: &Path, header: Option<&[String]>, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Row>,
{
    let file = File::create(path).map_err(|e| PartitionError::write(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    if let Some(header) = header {
        writer
            .write_record(header)
            .map_err(|e| PartitionError::write(path, e))?;
    }

    let mut count = 0;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| PartitionError::write(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| PartitionError::write(path, e))?;

    info!(path = %path.display(), rows = count, "wrote file");
    Ok(count)
}
