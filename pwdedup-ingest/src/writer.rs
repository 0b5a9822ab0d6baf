//! Serialize rows back to CSV.
//!
//! The header is every column seen across the rows, in first-seen order:
//! the first row's columns, then any later extras (`_3`, ...) appended.
//! A row missing a header column gets an empty value there.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use pwdedup_core::Row;
use tracing::debug;

/// Union of the rows' columns, first-seen order.
pub fn header_for<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for col in row.columns() {
            if !header.iter().any(|h| h == col) {
                header.push(col.to_string());
            }
        }
    }
    header
}

pub struct RowWriter<W: io::Write> {
    inner: csv::Writer<W>,
    header: Option<Vec<String>>,
    written: usize,
}

impl RowWriter<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: io::Write> RowWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
            header: None,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn start(&mut self, header: Vec<String>) -> Result<()> {
        self.inner
            .write_record(header.iter())
            .context("writing header row")?;
        self.header = Some(header);
        Ok(())
    }

    /// Write one row. Without a header yet, this row's columns become it.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if self.header.is_none() {
            self.start(row.columns().map(String::from).collect())?;
        }
        let Some(header) = &self.header else {
            return Ok(());
        };
        self.inner
            .write_record(header.iter().map(|col| row.get(col).unwrap_or("")))
            .with_context(|| format!("writing row {}", self.written + 1))?;
        self.written += 1;
        Ok(())
    }

    /// Write a full result set, using the union of all its columns as header.
    pub fn write_all(&mut self, rows: &[Row]) -> Result<()> {
        if self.header.is_none() && !rows.is_empty() {
            self.start(header_for(rows))?;
        }
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().context("flushing CSV output")?;
        self.inner
            .into_inner()
            .map_err(|e| anyhow!("flushing CSV output: {}", e.error()))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".pwdedup-tmp");
    path.with_file_name(name)
}

/// Write `rows` to `path`, returning how many were written.
///
/// Output goes to a hidden sibling file first and is renamed over `path`
/// once complete, so a failed write leaves any existing file untouched.
/// A replaced file keeps its permissions.
pub fn write_rows_to_path(path: impl AsRef<Path>, rows: &[Row]) -> Result<usize> {
    let path = path.as_ref();
    let staging = staging_path(path);

    let result = (|| -> Result<usize> {
        let mut writer = RowWriter::from_path(&staging)?;
        writer.write_all(rows)?;
        let written = writer.written();
        writer.finish()?.sync_all().context("syncing output")?;
        if let Ok(existing) = fs::metadata(path) {
            fs::set_permissions(&staging, existing.permissions())
                .context("copying permissions of the replaced file")?;
        }
        Ok(written)
    })();

    let written = match result {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&staging);
            return Err(e).with_context(|| format!("writing {}", path.display()));
        }
    };

    fs::rename(&staging, path)
        .with_context(|| format!("moving {} into place", path.display()))?;
    debug!(path = %path.display(), rows = written, "output written");
    Ok(written)
}
