//! Result export in CSV and JSON Lines form.
//!
//! Both exporters stream records into any async writer, so the same code
//! serves file downloads and in-memory buffers. CSV mirrors the result
//! table operators see in the review UI; JSONL keeps the full record for
//! downstream tooling.

use futures::Stream;
use std::borrow::Cow;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::PinoutResult;
use crate::types::AttributeRecord;

/// Column order of the detailed results CSV.
const CSV_HEADER: &str = "Prompt Name,Extracted Value,Source,Is Success,Is Error,\
Is Not Found,Is Rate Limit,Latency (s),Raw Output,Parse Error";

/// Statistics from an export operation.
#[derive(Debug, Default, Clone)]
pub struct ExportStats {
    /// Total records processed.
    pub total: u64,
    /// Successfully exported records.
    pub exported: u64,
    /// Error messages for failed exports.
    pub errors: Vec<String>,
}

impl ExportStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if export completed without errors.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.total == self.exported
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn csv_row(record: &AttributeRecord) -> String {
    let source = record.source.to_string();
    let is_success = record.is_success.to_string();
    let is_error = record.is_error.to_string();
    let is_not_found = record.is_not_found.to_string();
    let is_rate_limited = record.is_rate_limited.to_string();
    let latency = format!("{:.2}", record.latency_seconds);
    let fields = [
        record.prompt_name.as_str(),
        record.extracted_value.as_str(),
        source.as_str(),
        is_success.as_str(),
        is_error.as_str(),
        is_not_found.as_str(),
        is_rate_limited.as_str(),
        latency.as_str(),
        record.raw_output.as_str(),
        record.parse_error.as_deref().unwrap_or(""),
    ];
    let quoted: Vec<Cow<'_, str>> = fields.iter().map(|field| csv_field(field)).collect();
    quoted.join(",")
}

/// Export attribute records as a detailed results CSV.
///
/// Writes a header row followed by one row per record. Uses buffered
/// writing for efficient I/O.
///
/// # Returns
///
/// Export statistics including count and any errors.
pub async fn export_csv<W, S>(records: S, writer: W) -> PinoutResult<ExportStats>
where
    W: AsyncWrite + Unpin,
    S: Stream<Item = AttributeRecord>,
{
    use futures::StreamExt;

    let mut stats = ExportStats::new();
    let mut writer = BufWriter::new(writer);
    let mut records = std::pin::pin!(records);

    if let Err(e) = writer.write_all(CSV_HEADER.as_bytes()).await {
        stats.errors.push(format!("Header write error: {}", e));
    }
    if let Err(e) = writer.write_all(b"\n").await {
        stats.errors.push(format!("Header newline error: {}", e));
    }

    while let Some(record) = records.next().await {
        stats.total += 1;

        let row = csv_row(&record);
        if let Err(e) = writer.write_all(row.as_bytes()).await {
            stats.errors.push(format!(
                "Write error for attribute {}: {}",
                record.prompt_name, e
            ));
            continue;
        }
        if let Err(e) = writer.write_all(b"\n").await {
            stats.errors.push(format!(
                "Write newline error for attribute {}: {}",
                record.prompt_name, e
            ));
            continue;
        }

        stats.exported += 1;
    }

    if let Err(e) = writer.flush().await {
        stats.errors.push(format!("Final flush error: {}", e));
    }

    Ok(stats)
}

/// Export attribute records to JSON Lines format.
///
/// Each record is serialized as a single JSON object per line, keeping
/// every field of [`AttributeRecord`] for downstream processing.
pub async fn export_jsonl<W, S>(records: S, writer: W) -> PinoutResult<ExportStats>
where
    W: AsyncWrite + Unpin,
    S: Stream<Item = AttributeRecord>,
{
    use futures::StreamExt;

    let mut stats = ExportStats::new();
    let mut writer = BufWriter::new(writer);
    let mut records = std::pin::pin!(records);

    while let Some(record) = records.next().await {
        stats.total += 1;

        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = writer.write_all(json.as_bytes()).await {
                    stats.errors.push(format!(
                        "Write error for attribute {}: {}",
                        record.prompt_name, e
                    ));
                    continue;
                }
                if let Err(e) = writer.write_all(b"\n").await {
                    stats.errors.push(format!(
                        "Write newline error for attribute {}: {}",
                        record.prompt_name, e
                    ));
                    continue;
                }
                stats.exported += 1;
            }
            Err(e) => {
                stats.errors.push(format!(
                    "Serialization error for attribute {}: {}",
                    record.prompt_name, e
                ));
            }
        }
    }

    if let Err(e) = writer.flush().await {
        stats.errors.push(format!("Final flush error: {}", e));
    }

    Ok(stats)
}
