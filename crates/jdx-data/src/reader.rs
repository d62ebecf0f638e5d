//! Data file reading.
//!
//! This module provides async reading of data files line-by-line with
//! buffering and line number tracking for error reporting.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};
use crate::record::{Record, RecordCounts, parse_line};

/// Async reader for JDX data.
///
/// `RecordReader` wraps an async reader, decodes one record per line and keeps
/// running [`RecordCounts`]. Blank lines are skipped but still numbered so that
/// errors point at the right line.
///
/// # Examples
///
/// ```no_run
/// use jdx_data::reader::RecordReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("project.data").await?;
/// let mut reader = RecordReader::new(file);
/// while let Some(record) = reader.next_record().await? {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecordReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Line number of the last line read (1-based, 0 before any lines).
    line_number: usize,
    /// Tallies of records decoded so far.
    counts: RecordCounts,
    /// Reused line buffer.
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> RecordReader<R> {
    /// Creates a new `RecordReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }

    /// Creates a new `RecordReader` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_buf_reader(BufReader::with_capacity(capacity, reader))
    }

    fn from_buf_reader(reader: BufReader<R>) -> Self {
        Self {
            reader,
            line_number: 0,
            counts: RecordCounts::default(),
            buf: Vec::new(),
        }
    }

    /// Returns the line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the record tallies so far.
    #[must_use]
    pub fn counts(&self) -> RecordCounts {
        self.counts
    }

    /// Reads the next record, skipping blank lines.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the underlying read fails, or a format error
    /// for a malformed or non-UTF-8 line. The reader should not be used after
    /// an error.
    pub async fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buf.clear();
            let read = self.reader.read_until(b'\n', &mut self.buf).await?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = std::str::from_utf8(&self.buf)
                .map_err(|_| Error::format(self.line_number, "line is not valid UTF-8"))?;
            if let Some(record) = parse_line(self.line_number, line)? {
                self.counts.record(&record);
                return Ok(Some(record));
            }
        }
    }

    /// Reads all remaining records.
    ///
    /// # Errors
    ///
    /// Aborts on the first IO or format error; no partial result is returned.
    pub async fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record().await? {
            records.push(record);
        }
        tracing::debug!(
            lines = self.line_number,
            records = records.len(),
            "finished reading data"
        );
        Ok(records)
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}
