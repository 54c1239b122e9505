use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A delimited table read back as plain strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of `name` in the header row, ignoring case and surrounding whitespace.
    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Field `col` of `row`, or "" when the row is short or the column is absent.
    pub(crate) fn field<'a>(&self, row: &'a [String], col: Option<usize>) -> &'a str {
        col.and_then(|c| row.get(c)).map(String::as_str).unwrap_or("")
    }
}

/// True when the file does not exist or holds no bytes at all.
pub(crate) fn is_blank(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

/// Read the whole file. The first record is the header row; a zero-length file gives
/// an empty table with no headers.
pub(crate) fn read(path: &Path) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)?;

    let mut records = rdr.records();
    let headers = match records.next() {
        Some(first) => first?.iter().map(|s| s.trim().to_string()).collect(),
        None => return Ok(RawTable::default()),
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        // Blank lines come back as a single empty field.
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(RawTable { headers, rows })
}

/// Replace the whole file with `headers` followed by `rows`.
///
/// The table is written to a sibling file first and renamed over the original, so a
/// failed write leaves the previous contents in place.
pub(crate) fn rewrite<H, I>(path: &Path, headers: &[H], rows: I) -> Result<()>
where
    H: AsRef<[u8]>,
    I: IntoIterator<Item = Vec<String>>,
{
    let tmp = temp_path(path);
    {
        let mut wtr = csv::Writer::from_path(&tmp)?;
        wtr.write_record(headers)?;
        let mut count = 0usize;
        for row in rows {
            wtr.write_record(&row)?;
            count += 1;
        }
        wtr.flush()?;
        tracing::debug!(path = %path.display(), rows = count, "rewrote table");
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Add one row at the end of the file without touching existing rows. A zero-length
/// or missing file gets the header row first.
pub(crate) fn append<H: AsRef<[u8]>>(path: &Path, headers: &[H], row: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    let len = file.metadata()?.len();
    let needs_header = len == 0;
    if !needs_header && !ends_with_newline(&mut file, len)? {
        file.write_all(b"\n")?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if needs_header {
        wtr.write_record(headers)?;
    }
    wtr.write_record(row)?;
    wtr.flush()?;

    tracing::debug!(path = %path.display(), "appended row");
    Ok(())
}

fn ends_with_newline(file: &mut fs::File, len: u64) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
