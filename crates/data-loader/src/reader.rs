//! Streaming reader for gzip-compressed TSV dataset files.
//!
//! IMDb files are tab separated with a header row and no quoting at all:
//! a `"` inside a title is just a character. Rows are handed out one at a
//! time so a multi-gigabyte file never has to fit in memory.

use crate::error::{DataLoadError, Result};
use crate::parser::SENTINEL;
use flate2::read::MultiGzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::rc::Rc;

type Records = csv::StringRecordsIntoIter<MultiGzDecoder<File>>;

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// One data row, addressable by column name
#[derive(Debug, Clone)]
pub struct Row {
    columns: Rc<HashMap<String, usize>>,
    record: csv::StringRecord,
}

impl Row {
    /// Build a row outside of a file, pairing `header` with `values`
    pub fn from_fields(header: &[&str], values: &[&str]) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();
        Self {
            columns: Rc::new(columns),
            record: csv::StringRecord::from(values.to_vec()),
        }
    }

    /// Value of `column`, or `None` when the header lacks it or this row
    /// stops before it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
    }

    /// Value of `column`.
    ///
    /// A row shorter than the header reads as the sentinel for the missing
    /// trailing columns. Builders use [`Row::get`] for columns a record
    /// cannot do without.
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or(SENTINEL)
    }

    /// 1-based line number in the decompressed file
    pub fn line(&self) -> u64 {
        self.record.position().map(|p| p.line()).unwrap_or(0)
    }
}

/// Iterator over the rows of one dataset file
pub struct DatasetReader {
    file: String,
    columns: Rc<HashMap<String, usize>>,
    records: Records,
}

impl DatasetReader {
    /// Open `path` and read its header row
    pub fn open(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(MultiGzDecoder::new(open_file(path)?));

        let columns = reader
            .headers()
            .map_err(|e| DataLoadError::from_csv(&file_name, e))?
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();

        Ok(Self {
            file: file_name,
            columns: Rc::new(columns),
            records: reader.into_records(),
        })
    }

    /// File name used in error messages
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Fail unless every column in `required` is present in the header
    pub fn require(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|c| !self.columns.contains_key(**c)) {
            Some(missing) => Err(DataLoadError::MissingColumn {
                file: self.file.clone(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Iterator for DatasetReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(match record {
            Ok(record) => Ok(Row {
                columns: Rc::clone(&self.columns),
                record,
            }),
            Err(e) => Err(DataLoadError::from_csv(&self.file, e)),
        })
    }
}

/// Count data rows (lines minus the header) by decompressing the whole file.
///
/// Only used to size progress bars.
pub fn count_rows(path: &Path) -> Result<u64> {
    let mut reader = BufReader::new(MultiGzDecoder::new(open_file(path)?));
    let mut lines = 0u64;
    let mut last = b'\n';
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        lines += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        last = buf[buf.len() - 1];
        let len = buf.len();
        reader.consume(len);
    }
    // a final line without a trailing newline still counts
    if last != b'\n' {
        lines += 1;
    }
    Ok(lines.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_gz(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap();
        path
    }

    #[test]
    fn test_rows_by_column_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gz(
            dir.path(),
            "title.ratings.tsv.gz",
            b"tconst\taverageRating\tnumVotes\ntt0000001\t5.7\t1882\ntt0000002\t5.8\t250\n",
        );

        let reader = DatasetReader::open(&path).unwrap();
        reader.require(&["tconst", "numVotes"]).unwrap();
        let rows: Vec<Row> = reader.collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("tconst"), "tt0000001");
        assert_eq!(rows[1].field("averageRating"), "5.8");
        assert_eq!(rows[1].field("numVotes"), "250");
    }

    #[test]
    fn test_quotes_are_plain_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gz(
            dir.path(),
            "quotes.tsv.gz",
            b"tconst\tprimaryTitle\ntt1\t\"Quoted\" start\ntt2\tend \"quote\n",
        );

        let rows: Vec<Row> = DatasetReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows[0].field("primaryTitle"), "\"Quoted\" start");
        assert_eq!(rows[1].field("primaryTitle"), "end \"quote");
    }

    #[test]
    fn test_short_row_reads_as_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gz(dir.path(), "short.tsv.gz", b"a\tb\tc\n1\t2\n");

        let row = DatasetReader::open(&path).unwrap().next().unwrap().unwrap();
        assert_eq!(row.field("b"), "2");
        assert_eq!(row.field("c"), SENTINEL);
        assert_eq!(row.field("not-a-column"), SENTINEL);
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gz(dir.path(), "cols.tsv.gz", b"tconst\tgenres\n");

        let reader = DatasetReader::open(&path).unwrap();
        let err = reader.require(&["tconst", "titleType"]).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn { ref column, .. } if column == "titleType"
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title.basics.tsv.gz");
        assert!(matches!(
            DatasetReader::open(&path),
            Err(DataLoadError::FileNotFound { .. })
        ));
        assert!(matches!(count_rows(&path), Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_not_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.tsv.gz");
        std::fs::write(&path, b"tconst\ttitle\ntt1\tx\n").unwrap();

        assert!(matches!(
            DatasetReader::open(&path),
            Err(DataLoadError::IoError(_))
        ));
        assert!(matches!(count_rows(&path), Err(DataLoadError::IoError(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gz(dir.path(), "latin1.tsv.gz", b"tconst\ttitle\ntt1\tCaf\xe9\n");

        let mut reader = DatasetReader::open(&path).unwrap();
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, DataLoadError::DecodeError { .. }));
    }

    #[test]
    fn test_count_rows() {
        let dir = tempfile::tempdir().unwrap();
        let with_newline = write_gz(dir.path(), "a.tsv.gz", b"h\n1\n2\n3\n");
        let without_newline = write_gz(dir.path(), "b.tsv.gz", b"h\n1\n2\n3");
        let header_only = write_gz(dir.path(), "c.tsv.gz", b"h\n");
        let empty = write_gz(dir.path(), "d.tsv.gz", b"");

        assert_eq!(count_rows(&with_newline).unwrap(), 3);
        assert_eq!(count_rows(&without_newline).unwrap(), 3);
        assert_eq!(count_rows(&header_only).unwrap(), 0);
        assert_eq!(count_rows(&empty).unwrap(), 0);
    }
}
