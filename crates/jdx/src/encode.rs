//! Writing a model back to the data format.
//!
//! The output carries a fresh header and three blocks: declarations,
//! dependencies and cycles. Decoding the output yields the same indices as
//! the model it came from.

use jdx_data::RecordWriter;
use jdx_data::writer::DEFAULT_TITLE;
use tokio::io::AsyncWrite;

use crate::error::Result;
use crate::model::GraphModel;

/// Heading of the package and class declarations block.
pub const PACKAGES_HEADING: &str = "Packages/Sources";
/// Heading of the dependency block.
pub const DEPENDENCIES_HEADING: &str = "Source Dependencies";
/// Heading of the cycle block.
pub const CYCLES_HEADING: &str = "Package Cycles";

/// Encode `model` to `writer`, recording `file_name` in the header. Returns
/// the number of lines written.
///
/// The model's title is kept when it has one.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub async fn encode<W: AsyncWrite + Unpin>(
    model: &GraphModel,
    writer: W,
    file_name: &str,
) -> Result<usize> {
    let title = match model.metadata().title.as_str() {
        "" => DEFAULT_TITLE,
        title => title,
    };
    let [declarations, dependencies, cycles] = model.to_record_blocks();

    let mut writer = RecordWriter::new(writer);
    writer.write_header(title, file_name).await?;
    writer.write_block(PACKAGES_HEADING, &declarations).await?;
    writer.write_block(DEPENDENCIES_HEADING, &dependencies).await?;
    writer.write_block(CYCLES_HEADING, &cycles).await?;
    writer.flush().await?;

    tracing::debug!(lines = writer.lines_written(), file_name, "encoded model");
    Ok(writer.lines_written())
}
