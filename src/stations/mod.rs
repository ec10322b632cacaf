// src/stations/mod.rs

pub mod extract;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::{charset::decode_html, urls::station_list_url, HttpFetch};
pub use extract::{PositionalRowExtractor, RowExtractor};

/// One registered station as listed in the regional directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: String,
    pub neighborhood: String,
    pub city: String,
    #[serde(rename = "type")]
    pub station_type: String,
}

impl StationRecord {
    /// Fields in [`StationDirectory::COLUMNS`] order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.id, &self.neighborhood, &self.city, &self.station_type]
    }
}

/// All stations of one region, in page order. Column labels live in
/// [`StationDirectory::COLUMNS`], never among the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDirectory {
    pub records: Vec<StationRecord>,
}

impl StationDirectory {
    pub const COLUMNS: [&'static str; 4] = ["id", "neighborhood", "city", "type"];

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.records.iter()
    }
}

/// Scrape the station directory for `region_code` with the positional extractor.
pub async fn scrape_stations<F: HttpFetch>(
    fetcher: &F,
    cfg: &ScraperConfig,
    region_code: &str,
) -> Result<StationDirectory> {
    scrape_stations_with(fetcher, cfg, region_code, &PositionalRowExtractor).await
}

#[instrument(level = "info", skip(fetcher, cfg, extractor))]
pub async fn scrape_stations_with<F: HttpFetch, E: RowExtractor>(
    fetcher: &F,
    cfg: &ScraperConfig,
    region_code: &str,
    extractor: &E,
) -> Result<StationDirectory> {
    let url = station_list_url(cfg, region_code)?;
    let bytes = fetcher.get_bytes(&url).await?;
    let html = decode_html(&bytes);
    let directory = parse_station_directory(&html, extractor)?;
    info!(stations = directory.len(), "scraped station directory");
    Ok(directory)
}

/// Every `<tr>` after the first becomes one record. The first row is
/// taken to be the header by position alone.
pub fn parse_station_directory<E: RowExtractor>(html: &str, extractor: &E) -> Result<StationDirectory> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("tr")
        .map_err(|e| ScrapeError::format(format!("row selector: {:?}", e)))?;

    let mut records = Vec::new();
    for (row, element) in document.select(&selector).enumerate().skip(1) {
        let markup = element.html();
        let record = extractor
            .extract(&markup)
            .map_err(|source| ScrapeError::Extraction { row, source })?;
        records.push(record);
    }
    debug!(rows = records.len() + 1, "parsed directory rows");
    Ok(StationDirectory { records })
}
