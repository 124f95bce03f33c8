use crate::error::IngestError;
use csv::ReaderBuilder;
use std::io::Read;

/// A positional grid of cells read from the source, preamble already removed.
///
/// Row 0 and row 1 are the two header rows; everything below is data. Cells
/// are stored as raw strings; an empty or whitespace-only cell reads back as
/// `None`, which is how the source encodes both "no attribute" and "no return
/// this month".
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, header rows included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The widest row defines the column count; the reader is flexible, so
    /// short rows are simply padded with absent cells on access.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The trimmed cell at `(row, column)`, or `None` if it is blank or the
    /// row is too short to reach it.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(column)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }
}

/// Reads CSV bytes into a [`RawTable`], skipping `preamble_rows` leading rows
/// before the two header rows.
///
/// The reader runs headerless and flexible: header detection is the
/// normalizer's job, and real exports pad rows unevenly.
pub fn read_raw_table<R: Read>(reader: R, preamble_rows: usize) -> Result<RawTable, IngestError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if index < preamble_rows {
            continue;
        }
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    tracing::debug!(
        rows = rows.len(),
        skipped = preamble_rows,
        "read raw table from source"
    );

    Ok(RawTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_cells_read_as_none() {
        let table = RawTable::new(vec![vec!["a".into(), "  ".into(), "".into()]]);
        assert_eq!(table.cell(0, 0), Some("a"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(0, 3), None);
        assert_eq!(table.cell(1, 0), None);
    }

    #[test]
    fn read_raw_table_skips_preamble() {
        let source = "junk,junk\nmore junk\n,31/01/2024\nGroup/Investment,\nAlpha,1.5\n";
        let table = read_raw_table(source.as_bytes(), 2).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, 1), Some("31/01/2024"));
        assert_eq!(table.cell(2, 0), Some("Alpha"));
    }

    #[test]
    fn column_count_tracks_widest_row() {
        let source = "a,b,c\nd\n";
        let table = read_raw_table(source.as_bytes(), 0).unwrap();
        assert_eq!(table.column_count(), 3);
    }
}
