//! Scrape personal-weather-station history and station listings from
//! Weather Underground's legacy `weatherstation/` pages.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod history;
pub mod stations;

pub use config::ScraperConfig;
pub use error::{ExtractFault, Result, ScrapeError};
pub use fetch::{HttpFetch, ReqwestFetcher};
pub use history::{fetch_day, fetch_range, CombinedTable, Observation, ObservationTable};
pub use stations::{
    scrape_stations, scrape_stations_with, PositionalRowExtractor, RowExtractor, StationDirectory,
    StationRecord,
};
