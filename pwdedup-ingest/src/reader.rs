//! Lazy row stream over a CSV export.
//!
//! The first record is the header. Values map to header names by position;
//! a short record is padded with empty values so every row carries every
//! header column, and values past the header are kept under `_N`
//! (zero-based column index).

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use pwdedup_core::Row;

fn builder() -> csv::ReaderBuilder {
    let mut b = csv::ReaderBuilder::new();
    b.has_headers(true).flexible(true);
    b
}

pub struct RowReader<R> {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<R>,
}

impl RowReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = builder()
            .from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        Self::from_csv(rdr).with_context(|| format!("reading {}", path.display()))
    }
}

impl<R: io::Read> RowReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_csv(builder().from_reader(reader))
    }

    fn from_csv(mut rdr: csv::Reader<R>) -> Result<Self> {
        let headers = rdr
            .headers()
            .context("reading header row")?
            .iter()
            .map(String::from)
            .collect();
        Ok(Self {
            headers,
            records: rdr.into_records(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn to_row(&self, record: &StringRecord) -> Row {
        let mut row = Row::with_capacity(record.len().max(self.headers.len()));
        for (i, name) in self.headers.iter().enumerate() {
            row.set(name.as_str(), record.get(i).unwrap_or(""));
        }
        for (i, value) in record.iter().enumerate().skip(self.headers.len()) {
            row.set(format!("_{i}"), value);
        }
        row
    }
}

impl<R: io::Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(anyhow::Error::new(e).context("reading CSV record"))),
        };
        Some(Ok(self.to_row(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &str) -> Vec<Row> {
        RowReader::from_reader(data.as_bytes())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_positional_mapping() {
        let rows = read_all("name,url,username\nBank,https://bank.com,me\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("url"), Some("https://bank.com"));
        let cols: Vec<_> = rows[0].columns().collect();
        assert_eq!(cols, vec!["name", "url", "username"]);
    }

    #[test]
    fn test_short_record_is_padded() {
        let rows = read_all("name,url,username\nBank\n");
        assert_eq!(rows[0].get("name"), Some("Bank"));
        assert_eq!(rows[0].get("url"), Some(""));
        assert_eq!(rows[0].get("username"), Some(""));
        let cols: Vec<_> = rows[0].columns().collect();
        assert_eq!(cols, vec!["name", "url", "username"]);
    }

    #[test]
    fn test_extra_values_are_kept() {
        let rows = read_all("name,url\nBank,https://bank.com,extra,more\n");
        assert_eq!(rows[0].get("_2"), Some("extra"));
        assert_eq!(rows[0].get("_3"), Some("more"));
    }

    #[test]
    fn test_quoted_fields() {
        let rows = read_all("name,note\n\"Acme, Inc\",\"line one\nline two\"\n");
        assert_eq!(rows[0].get("name"), Some("Acme, Inc"));
        assert_eq!(rows[0].get("note"), Some("line one\nline two"));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all("").is_empty());
        assert!(read_all("name,url\n").is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let data: &[u8] = b"name,url\n\xff\xfe,x\n";
        let mut reader = RowReader::from_reader(data).unwrap();
        assert!(reader.next().unwrap().is_err());
    }
}
