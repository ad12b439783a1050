use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{PartitionError, Result};

pub type Row = Vec<String>;

/// A fully loaded tab-separated table.
///
/// Every row has exactly `width()` fields: short rows are padded with empty
/// fields at load time, long rows are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Option<Row>,
    rows: Vec<Row>,
    width: usize,
}

impl Table {
    pub fn load<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PartitionError::NoInput);
        }
        let file = File::open(path).map_err(|source| PartitionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), has_header)?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            width = table.width(),
            has_header,
            "loaded table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, has_header: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.records() {
            // csv skips empty lines itself; a quoted `""` line is a real row
            let record = result.map_err(PartitionError::from_csv)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: Row = record.iter().map(str::to_string).collect();
            records.push((line, row));
        }

        let mut records = records.into_iter();
        let header = if has_header {
            match records.next() {
                Some((_, header)) => Some(header),
                None => return Err(PartitionError::EmptyInput),
            }
        } else {
            None
        };

        let mut rows = Vec::new();
        let mut width = header.as_ref().map(Vec::len);
        for (line, mut row) in records {
            let expected = *width.get_or_insert(row.len());
            if row.len() > expected {
                return Err(PartitionError::RaggedRow {
                    line,
                    expected,
                    found: row.len(),
                });
            }
            row.resize(expected, String::new());
            rows.push(row);
        }

        let width = match width {
            Some(width) => width,
            None => return Err(PartitionError::EmptyInput),
        };

        Ok(Self {
            header,
            rows,
            width,
        })
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Column identifiers: the header when present, otherwise positional
    /// indices starting at `0`.
    pub fn columns(&self) -> Row {
        match &self.header {
            Some(header) => header.clone(),
            None => (0..self.width).map(|i| i.to_string()).collect(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use indoc::indoc;

    fn parse(text: &str, has_header: bool) -> Result<Table> {
        Table::from_reader(text.as_bytes(), has_header)
    }

    #[test]
    fn test_load_with_header() {
        let table = parse(
            indoc! {"
                kind\tvalue
                A\t1
                B\t2
            "},
            true,
        )
        .unwrap();

        assert!(table.has_header());
        assert_eq!(table.columns(), vec!["kind", "value"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], vec!["B", "2"]);
    }

    #[test]
    fn test_positional_columns_without_header() {
        let table = parse("A\t1\tx\nB\t2\ty\n", false).unwrap();

        assert!(table.header().is_none());
        assert_eq!(table.columns(), vec!["0", "1", "2"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let table = parse("007\t1.50\n", false).unwrap();
        assert_eq!(table.rows()[0], vec!["007", "1.50"]);
    }

    #[test]
    fn test_quoted_tab_inside_field() {
        let table = parse("A\t\"left\tright\"\n", false).unwrap();
        assert_eq!(table.rows()[0], vec!["A", "left\tright"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse("A\t1\n\nB\t2\n\n", false).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_quoted_empty_field_is_a_row() {
        let table = parse("A\n\"\"\nB\n", false).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], vec![""]);
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse("A\t1\t2\nB\n", false).unwrap();
        assert_eq!(table.rows()[1], vec!["B", "", ""]);
    }

    #[test]
    fn test_long_row_is_parse_error() {
        let err = parse("a\tb\nA\t1\nB\t2\textra\n", true).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            PartitionError::RaggedRow { line, expected, found } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_file_error() {
        assert_eq!(parse("", false).unwrap_err().kind(), ErrorKind::File);
        assert_eq!(parse("", true).unwrap_err().kind(), ErrorKind::File);
        assert_eq!(parse("\n\n", false).unwrap_err().kind(), ErrorKind::File);
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = parse("kind\tvalue\n", true).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let bytes: &[u8] = b"A\t\xff\xfe\n";
        let err = Table::from_reader(bytes, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_missing_path() {
        let err = Table::load("/definitely/not/here.tsv", false).unwrap_err();
        assert!(matches!(err, PartitionError::Open { .. }));
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn test_empty_path() {
        let err = Table::load("", true).unwrap_err();
        assert!(matches!(err, PartitionError::NoInput));
    }
}
