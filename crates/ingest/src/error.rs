use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read tabular source: {0}")]
    Csv(#[from] csv::Error),

    #[error("Source ended before the two header rows (found {0} rows after the preamble)")]
    MissingHeaderRows(usize),

    #[error("Source is missing the identifying column '{0}'")]
    MissingNameColumn(String),

    #[error("Column {column} has header '{value}' which is not a {format} date")]
    InvalidDateHeader {
        column: usize,
        value: String,
        format: String,
    },

    #[error("Row {row}, column '{column}': '{value}' is not a numeric return")]
    InvalidNumericCell {
        row: usize,
        column: String,
        value: String,
    },
}
