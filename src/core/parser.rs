use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

/// Knobs for `parse_csv_with`. The default matches `parse_csv`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Accept a header row with no data rows, yielding zero records.
    pub allow_header_only: bool,
    /// Fail on rows whose value count differs from the header count instead
    /// of padding with empty strings or dropping the extras.
    pub strict_columns: bool,
}

/// Parses comma-separated text whose first line is the header row.
///
/// No quoting or escaping is understood: every comma separates values.
pub fn parse_csv(text: &str) -> Result<Vec<Record>> {
    parse_csv_with(text, &ParseOptions::default())
}

pub fn parse_csv_with(text: &str, options: &ParseOptions) -> Result<Vec<Record>> {
    // A leading byte-order mark is not whitespace to `str::trim`.
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    let lines: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('\n').collect()
    };

    let min_lines = if options.allow_header_only { 1 } else { 2 };
    if lines.len() < min_lines {
        return Err(EtlError::EmptyInput { lines: lines.len() });
    }

    let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();
    tracing::debug!("Parsed header with {} column(s): {:?}", headers.len(), headers);

    let mut records = Vec::with_capacity(lines.len() - 1);
    for (offset, line) in lines[1..].iter().enumerate() {
        let values: Vec<&str> = line.split(',').collect();

        if options.strict_columns && values.len() != headers.len() {
            return Err(EtlError::MalformedRow {
                line: offset + 2,
                expected: headers.len(),
                found: values.len(),
            });
        }

        let record = Record::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (*header, values.get(i).map_or("", |v| v.trim()))),
        );
        records.push(record);
    }

    tracing::debug!("Parsed {} record(s)", records.len());
    Ok(records)
}
