// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_BASE_URL: &str = "https://www.wunderground.com/";
pub const DEFAULT_COUNTRY: &str = "United+States";
pub const DEFAULT_REGION: &str = "WA";
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Where to scrape from and how to pace it.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site root; the fixed `weatherstation/...` paths are joined onto it.
    pub base_url: Url,
    /// Value of `selectedCountry`, already in query form.
    pub country: String,
    pub default_region: String,
    /// Pause between consecutive day fetches of a range.
    #[serde(with = "secs")]
    pub delay: Duration,
    /// Request timeout handed to the HTTP client. `None` keeps its default.
    #[serde(with = "opt_secs")]
    pub timeout: Option<Duration>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            country: DEFAULT_COUNTRY.to_string(),
            default_region: DEFAULT_REGION.to_string(),
            delay: DEFAULT_DELAY,
            timeout: None,
        }
    }
}

impl ScraperConfig {
    /// Load a JSON config file; missing keys fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scraper config");
        let text = fs::read_to_string(path)?;
        let mut cfg: ScraperConfig = serde_json::from_str(&text)?;
        cfg.base_url = normalize_base(cfg.base_url)?;
        Ok(cfg)
    }

    /// Replace the site root. A missing trailing slash is added so joins keep the path.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        self.base_url = normalize_base(Url::parse(base)?)?;
        Ok(self)
    }
}

fn normalize_base(url: Url) -> Result<Url> {
    if url.cannot_be_a_base() {
        return Err(ScrapeError::format(format!("{} cannot be used as a base URL", url)));
    }
    if url.path().ends_with('/') {
        return Ok(url);
    }
    let mut url = url;
    let path = format!("{}/", url.path());
    url.set_path(&path);
    Ok(url)
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

mod opt_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}
