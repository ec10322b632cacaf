// src/history/daily.rs

use tracing::{debug, instrument, trace};

use super::table::ObservationTable;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::{urls::daily_history_url, HttpFetch};

/// Fetch one day of observations for a station.
///
/// Date fields are not range-checked here; whatever the remote sends for
/// an impossible date goes through the same parser.
#[instrument(level = "debug", skip(fetcher, cfg))]
pub async fn fetch_day<F: HttpFetch>(
    fetcher: &F,
    cfg: &ScraperConfig,
    station_id: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<ObservationTable> {
    let url = daily_history_url(cfg, station_id, year, month, day)?;
    let body = fetcher.get_text(&url).await?;
    let table = parse_daily_history(&body)?;
    debug!(rows = table.len(), columns = table.columns().len(), "parsed day");
    Ok(table)
}

/// Turn the `<br>`-separated body into real lines.
///
/// 1) drop raw newlines, 2) `<br>` becomes a newline, 3) a comma right
/// before a newline is dropped.
pub fn normalize_body(raw: &str) -> String {
    raw.replace('\n', "")
        .replace("<br>", "\n")
        .replace(",\n", "\n")
}

/// Parse a daily-history body: first line is the header, last line is a
/// trailer that is always discarded, blank lines in between are skipped.
pub fn parse_daily_history(raw: &str) -> Result<ObservationTable> {
    let text = normalize_body(raw);
    let lines: Vec<&str> = text.split('\n').collect();

    let (header, rest) = match lines.split_first() {
        Some((h, rest)) if !rest.is_empty() => (h, rest),
        _ => {
            return Err(ScrapeError::format(format!(
                "expected a header and a trailer line, found {} line(s)",
                lines.len()
            )))
        }
    };
    if header.trim().is_empty() {
        return Err(ScrapeError::format("header line is empty"));
    }
    let columns = split_record(header)?;

    // rest ends with the trailer
    let body = &rest[..rest.len() - 1];
    if let Some(trailer) = rest.last() {
        trace!(trailer = %trailer, "discarding trailer");
    }

    let mut rows = Vec::with_capacity(body.len());
    for (i, line) in body.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line)?;
        if fields.len() != columns.len() {
            return Err(ScrapeError::format(format!(
                "line {} has {} fields, header has {}",
                i + 1,
                fields.len(),
                columns.len()
            )));
        }
        rows.push(fields);
    }

    ObservationTable::from_parts(columns, rows)
}

/// Split one line into fields with a headerless CSV reader. Double-quoted
/// fields may contain commas.
pub fn split_record(line: &str) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match rdr.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}
