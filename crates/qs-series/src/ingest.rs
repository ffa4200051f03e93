//! CSV-like ingestion for exported two-column series.
//!
//! Exports come from different tools and locales, so the delimiter, a leading
//! header line and a UTF-8 byte-order mark are all optional. One strategy
//! covers every case: try each candidate delimiter in preference order and
//! keep the first one for which most rows parse as two finite numbers.

use std::borrow::Cow;
use std::io::{self, Read};

use csv::{ReaderBuilder, StringRecord, Trim};
use qs_core::{Real, parse_finite};

use crate::series::TimeSeries;

/// Delimiters tried, in order of preference.
pub const CANDIDATE_DELIMITERS: [u8; 2] = [b',', b';'];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Layout detected for an accepted stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub delimiter: u8,
    pub has_header: bool,
}

/// What ingestion found, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// `None` when no candidate delimiter was accepted.
    pub layout: Option<CsvLayout>,
    /// Records after the header under the accepted layout.
    pub data_rows: usize,
    /// Rows kept in the series.
    pub valid_rows: usize,
    /// Invalid UTF-8 was replaced during decoding.
    pub lossy_decode: bool,
}

impl IngestReport {
    pub fn dropped_rows(&self) -> usize {
        self.data_rows - self.valid_rows
    }
}

/// Parse `bytes` into a sorted series named `value_column_name`.
///
/// Never fails: an empty or unusable stream gives an empty series.
pub fn ingest(bytes: &[u8], value_column_name: &str) -> TimeSeries {
    ingest_with_report(bytes, value_column_name).0
}

/// Read `reader` to the end and ingest it.
pub fn ingest_reader<R: Read>(mut reader: R, value_column_name: &str) -> io::Result<TimeSeries> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(ingest(&bytes, value_column_name))
}

/// Same as [`ingest`], also returning what was detected.
pub fn ingest_with_report(bytes: &[u8], value_column_name: &str) -> (TimeSeries, IngestReport) {
    let (text, lossy_decode) = decode_text(bytes);
    let mut report = IngestReport {
        lossy_decode,
        ..IngestReport::default()
    };

    if text.trim().is_empty() {
        tracing::debug!(series = value_column_name, "empty stream");
        return (TimeSeries::empty(value_column_name), report);
    }

    for &delimiter in &CANDIDATE_DELIMITERS {
        let attempt = parse_with_delimiter(&text, delimiter);
        tracing::trace!(
            series = value_column_name,
            delimiter = %char::from(delimiter),
            has_header = attempt.layout.has_header,
            data_rows = attempt.data_rows,
            valid_rows = attempt.rows.len(),
            "delimiter candidate"
        );

        if !attempt.accepted() {
            continue;
        }

        report.layout = Some(attempt.layout);
        report.data_rows = attempt.data_rows;
        report.valid_rows = attempt.rows.len();

        let series = match TimeSeries::from_samples(value_column_name, attempt.rows) {
            Ok(series) => series,
            Err(err) => {
                // Rows are filtered to finite values above, so this is unreachable in practice.
                tracing::warn!(series = value_column_name, error = %err, "rejected parsed rows");
                report.valid_rows = 0;
                TimeSeries::empty(value_column_name)
            }
        };

        tracing::debug!(
            series = value_column_name,
            delimiter = %char::from(delimiter),
            has_header = attempt.layout.has_header,
            rows = series.len(),
            dropped = report.dropped_rows(),
            "ingested series"
        );
        return (series, report);
    }

    tracing::warn!(
        series = value_column_name,
        "no delimiter candidate produced usable numeric rows"
    );
    (TimeSeries::empty(value_column_name), report)
}

/// Decode bytes as UTF-8 without a leading BOM, replacing invalid sequences.
///
/// The flag is set when a replacement happened.
fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => (Cow::Borrowed(text), false),
        Err(err) => {
            tracing::debug!(valid_up_to = err.valid_up_to(), "falling back to lossy UTF-8 decoding");
            (String::from_utf8_lossy(body), true)
        }
    }
}

struct Attempt {
    layout: CsvLayout,
    data_rows: usize,
    rows: Vec<(Real, Real)>,
}

impl Attempt {
    /// More than half of the data rows valid, and at least one.
    fn accepted(&self) -> bool {
        !self.rows.is_empty() && self.rows.len() * 2 > self.data_rows
    }
}

fn parse_with_delimiter(text: &str, delimiter: u8) -> Attempt {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    // Malformed records stay in the count as invalid rows. Blank lines do not count.
    let records: Vec<Option<StringRecord>> = reader
        .records()
        .map(Result::ok)
        .filter(|record| !record.as_ref().is_some_and(is_blank))
        .collect();

    let has_header = match records.first() {
        Some(Some(first)) => numeric_pair(first).is_none(),
        Some(None) => true,
        None => false,
    };

    let data = if has_header { &records[1..] } else { &records[..] };
    let rows = data
        .iter()
        .filter_map(|record| record.as_ref().and_then(numeric_pair))
        .collect();

    Attempt {
        layout: CsvLayout {
            delimiter,
            has_header,
        },
        data_rows: data.len(),
        rows,
    }
}

/// Every field empty after trimming, e.g. a whitespace-only line.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// First two fields as finite numbers.
fn numeric_pair(record: &StringRecord) -> Option<(Real, Real)> {
    let time = parse_finite(record.get(0)?)?;
    let value = parse_finite(record.get(1)?)?;
    Some((time, value))
}
