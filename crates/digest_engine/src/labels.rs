use std::path::Path;

use digest_core::LabelSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("label file has no rows")]
    Empty,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the first CSV row of `path` as an ordered label set.
pub fn read_label_row(path: &Path) -> Result<LabelSet, LabelError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    first_row(reader)
}

/// Same as [`read_label_row`] for in-memory CSV text.
pub fn parse_label_row(text: &str) -> Result<LabelSet, LabelError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    first_row(reader)
}

fn first_row<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<LabelSet, LabelError> {
    let record = reader.records().next().ok_or(LabelError::Empty)??;
    Ok(record.iter().map(ToOwned::to_owned).collect::<Vec<_>>().into())
}
