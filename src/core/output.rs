use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unsupported format '{}'. Valid formats: csv, tsv, json",
                other
            )),
        }
    }
}

pub fn render(records: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => render_delimited(records, b','),
        OutputFormat::Tsv => render_delimited(records, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

// The header row comes from the first record; parsed records share one schema.
fn render_delimited(records: &[Record], delimiter: u8) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(first.keys())?;
    for record in records {
        writer.write_record(record.values())?;
    }

    let bytes = writer.into_inner().map_err(|e| EtlError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EtlError::ValidationError {
        message: format!("rendered output is not UTF-8: {}", e),
    })
}
