//! Data file writing.
//!
//! Writes records back in the line format. A file written by
//! [`RecordWriter::write_header`] followed by blocks of records reads back
//! into the same records, plus the header and block comments.

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::Result;
use crate::record::{Record, RecordTag};

/// Title written as the first comment of a data file.
pub const DEFAULT_TITLE: &str = "Java Package Dependency Data";

/// Format of the date comment written in the header.
const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Async writer for JDX data.
///
/// # Examples
///
/// ```no_run
/// use jdx_data::record::Record;
/// use jdx_data::writer::RecordWriter;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::create("project.data").await?;
/// let mut writer = RecordWriter::new(file);
/// writer.write_header("Java Package Dependency Data", "project.data").await?;
/// writer.write_record(&Record::Package("com.acme".into())).await?;
/// writer.flush().await?;
/// # Ok(())
/// # }
/// ```
pub struct RecordWriter<W> {
    /// Buffered writer wrapping the underlying async writer.
    writer: BufWriter<W>,
    /// Number of lines written.
    lines: usize,
}

impl<W: AsyncWrite + Unpin> RecordWriter<W> {
    /// Creates a new `RecordWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    /// Number of lines written so far.
    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Writes one record as a line.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the write fails.
    pub async fn write_record(&mut self, record: &Record) -> Result<()> {
        let mut line = record.to_string();
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.lines += 1;
        Ok(())
    }

    /// Writes a comment line.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the write fails.
    pub async fn write_comment(&mut self, text: &str) -> Result<()> {
        self.write_record(&Record::Comment(text.to_string())).await
    }

    /// Writes the three positional metadata comments (title, current local
    /// date, file name) followed by an empty comment.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the write fails.
    pub async fn write_header(&mut self, title: &str, file_name: &str) -> Result<()> {
        let date = chrono::Local::now().format(DATE_FORMAT).to_string();
        self.write_comment(title).await?;
        self.write_comment(&date).await?;
        self.write_comment(file_name).await?;
        self.write_comment("").await
    }

    /// Writes an empty comment, a heading comment, then the records.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the write fails.
    pub async fn write_block<'r, I>(&mut self, heading: &str, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        self.write_comment("").await?;
        self.write_comment(heading).await?;
        for record in records {
            debug_assert_ne!(record.tag(), RecordTag::Comment, "blocks hold data records");
            self.write_record(record).await?;
        }
        Ok(())
    }

    /// Flushes buffered output to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// Does not flush; call [`flush`](Self::flush) first.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ClassRef, parse_str};
    use std::io::Cursor;

    fn buffer_writer() -> RecordWriter<Cursor<Vec<u8>>> {
        RecordWriter::new(Cursor::new(Vec::new()))
    }

    async fn finish(mut writer: RecordWriter<Cursor<Vec<u8>>>) -> String {
        writer.flush().await.unwrap();
        String::from_utf8(writer.into_inner().into_inner().into_inner()).unwrap()
    }

    #[tokio::test]
    async fn header_has_three_positional_comments() {
        let mut writer = buffer_writer();
        writer.write_header(DEFAULT_TITLE, "demo.data").await.unwrap();
        let text = finish(writer).await;

        let records = parse_str(&text).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], Record::Comment(DEFAULT_TITLE.into()));
        assert!(matches!(&records[1], Record::Comment(date) if !date.is_empty()));
        assert_eq!(records[2], Record::Comment("demo.data".into()));
        assert_eq!(records[3], Record::Comment(String::new()));
    }

    #[tokio::test]
    async fn block_is_headed_by_comments() {
        let deps = [Record::Dependency {
            source: ClassRef::new(0, 0),
            target: ClassRef::new(1, 0),
        }];
        let mut writer = buffer_writer();
        writer.write_block("Source Dependencies", &deps).await.unwrap();
        let text = finish(writer).await;

        assert_eq!(text, ";\n;Source Dependencies\nD0.0>1.0\n");
    }

    #[tokio::test]
    async fn counts_lines_written() {
        let mut writer = buffer_writer();
        writer.write_comment("x").await.unwrap();
        writer
            .write_record(&Record::Cycle(vec![2, 0]))
            .await
            .unwrap();
        assert_eq!(writer.lines_written(), 2);
    }
}
