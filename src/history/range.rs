// src/history/range.rs

use chrono::{Datelike, NaiveDate};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use super::daily::fetch_day;
use super::table::{CombinedTable, ObservationTable};
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::HttpFetch;

/// Decode a `YYYYMMDD` integer into a calendar date.
pub fn parse_compact_date(value: u32) -> Result<NaiveDate> {
    let s = value.to_string();
    if s.len() != 8 {
        return Err(ScrapeError::format(format!(
            "date {} is not 8 digits (YYYYMMDD)",
            value
        )));
    }
    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        s[range]
            .parse()
            .map_err(|_| ScrapeError::format(format!("date {} has a non-numeric field", value)))
    };
    let (year, month, day) = (field(0..4)?, field(4..6)?, field(6..8)?);

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| ScrapeError::format(format!("date {} is not a calendar date", value)))
}

/// Every date from `start` to `end`, both included. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Fetch every day in `[start_date, end_date]` and concatenate the rows.
///
/// `seed` is the starting accumulator; its rows come first. Waits `delay`
/// between consecutive days. Any failed day aborts the whole range.
#[instrument(level = "info", skip(fetcher, cfg, seed))]
pub async fn fetch_range<F: HttpFetch>(
    fetcher: &F,
    cfg: &ScraperConfig,
    station_id: &str,
    start_date: u32,
    end_date: u32,
    delay: Duration,
    seed: Option<ObservationTable>,
) -> Result<CombinedTable> {
    let start = parse_compact_date(start_date)?;
    let end = parse_compact_date(end_date)?;
    let mut combined = seed.unwrap_or_default();

    if end < start {
        warn!(%start, %end, "end date precedes start date; nothing to fetch");
        return Ok(combined);
    }

    let mut days = days_inclusive(start, end).peekable();
    while let Some(date) = days.next() {
        info!(
            station = station_id,
            year = date.year(),
            month = date.month(),
            day = date.day(),
            "retrieving observations"
        );
        let day_table =
            fetch_day(fetcher, cfg, station_id, date.year(), date.month(), date.day()).await?;
        combined.append(day_table);

        if days.peek().is_some() && !delay.is_zero() {
            sleep(delay).await;
        }
    }

    info!(rows = combined.len(), "range complete");
    Ok(combined)
}
