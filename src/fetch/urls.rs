// src/fetch/urls.rs

use url::Url;

use crate::config::ScraperConfig;
use crate::error::Result;

const DAILY_HISTORY_PATH: &str = "weatherstation/WXDailyHistory.asp";
const LIST_STATIONS_PATH: &str = "weatherstation/ListStations.asp";

/// One day of observations for `station_id`, as comma text.
///
/// The station id and date fields are forwarded untouched; the remote
/// site decides what is valid.
pub fn daily_history_url(
    cfg: &ScraperConfig,
    station_id: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Url> {
    let mut url = cfg.base_url.join(DAILY_HISTORY_PATH)?;
    url.set_query(Some(&format!(
        "ID={}&day={}&month={}&year={}&graphspan=day&format=1",
        station_id, day, month, year
    )));
    Ok(url)
}

/// The station directory page for one state/region.
pub fn station_list_url(cfg: &ScraperConfig, region_code: &str) -> Result<Url> {
    let mut url = cfg.base_url.join(LIST_STATIONS_PATH)?;
    url.set_query(Some(&format!(
        "selectedState={}&selectedCountry={}&MR=1",
        region_code, cfg.country
    )));
    Ok(url)
}
