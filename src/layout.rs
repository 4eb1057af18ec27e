use tracing::debug;

use crate::domain::{DEFAULT_TERMINAL_WIDTH, TVError};
use crate::loader::Record;
use crate::table::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub width: usize,
}

/// Widest a single column may be for the given terminal width (`COLUMNS`).
///
/// The terminal width is halved so a single wide column can not push all
/// others off screen.
pub fn max_column_width(columns: Option<&str>) -> Result<usize, TVError> {
    let term_width = match columns.map(str::trim) {
        None | Some("") => DEFAULT_TERMINAL_WIDTH,
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| TVError::InvalidTerminalWidth(value.to_string()))?,
    };
    Ok(term_width / 2)
}

/// Build the column schema from the loaded records.
///
/// The first record decides how many columns there are. Titles are the
/// 1-based column position in hex.
pub fn plan(records: &[Record], max_width: usize) -> Vec<Column> {
    let ncolumns = records.first().map(|r| r.len()).unwrap_or(0);
    let mut columns: Vec<Column> = (0..ncolumns)
        .map(|idx| Column {
            title: format!("{:x}", idx + 1),
            width: 0,
        })
        .collect();

    for record in records {
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            if cell.len() > column.width {
                column.width = cell.len();
            }
            if column.width > max_width {
                column.width = max_width;
            }
        }
    }

    for c in columns.iter() {
        debug!("Column: \"{}\", width: {}", c.title, c.width);
    }
    columns
}

/// Pad or cut every record to exactly `ncolumns` fields.
pub fn normalize_rows(records: Vec<Record>, ncolumns: usize) -> Vec<Row> {
    records
        .into_iter()
        .map(|mut record| {
            record.resize(ncolumns, String::new());
            record
        })
        .collect()
}
