//! The raw-record source: a delimited UTF-8 export with a header row.
//!
//! The file is read once up front; the records themselves are yielded
//! lazily and can only be replayed by re-opening the source. An
//! unreadable file fails here, before any record is processed. A row
//! the reader rejects mid-stream is handed downstream as an error item
//! for the pipeline to absorb.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use ipamr_common::inventory::record::RawRecord;

pub struct CsvSource {
    headers: Vec<String>,
    reader: csv::Reader<Cursor<String>>,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = read_as_utf8(path)
            .with_context(|| format!("cannot read input file {}", path.display()))?;

        // flexible: a short row yields absent columns, not an error
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(Cursor::new(content));

        let headers: Vec<String> = reader
            .headers()
            .context("cannot read header row")?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self { headers, reader })
    }

    /// Source column names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Consume the source into its lazy record stream.
    pub fn records(self) -> impl Iterator<Item = Result<RawRecord>> {
        let headers = self.headers;
        self.reader.into_records().map(move |row| {
            let row = row.context("malformed row")?;
            Ok(to_raw_record(&headers, &row))
        })
    }
}

fn to_raw_record(headers: &[String], row: &StringRecord) -> RawRecord {
    headers
        .iter()
        .zip(row.iter())
        .map(|(header, value)| (header.clone(), value.to_string()))
        .collect()
}

/// Exports out of spreadsheet tooling are commonly Windows-1252 rather
/// than UTF-8; fall back to that instead of failing on stray bytes.
fn read_as_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
