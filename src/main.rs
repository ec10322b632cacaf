use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pwscraper::{
    export::{load_table_json, save_json, write_stations_csv, write_table_csv},
    fetch_day, fetch_range, scrape_stations, ObservationTable, ReqwestFetcher, ScraperConfig,
    StationDirectory,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Download personal weather station history and station listings.
#[derive(Parser, Debug)]
#[command(name = "pwscraper", version)]
struct Cli {
    /// Write results here; `.json` gives JSON, anything else CSV. Stdout CSV if omitted.
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    /// JSON file overriding the default scraper settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Site root to scrape instead of the public one.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One day of observations.
    Day {
        station: String,
        year: i32,
        month: u32,
        day: u32,
    },
    /// Every day from START to END (YYYYMMDD, inclusive).
    Range {
        station: String,
        start: u32,
        end: u32,
        /// Seconds to wait between days (config default: 3).
        #[arg(long)]
        delay: Option<u64>,
        /// JSON table whose rows go before the fetched ones.
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// The station directory for one state.
    Stations {
        #[arg(long)]
        region: Option<String>,
    },
}

enum Output {
    Table(ObservationTable),
    Stations(StationDirectory),
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // ─── 2) configuration ───────────────────────────────────────────
    let mut cfg = match &cli.config {
        Some(path) => ScraperConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScraperConfig::default(),
    };
    if let Some(base) = &cli.base_url {
        cfg = cfg
            .with_base_url(base)
            .with_context(|| format!("parsing base URL {}", base))?;
    }
    let fetcher = ReqwestFetcher::from_config(&cfg)?;
    info!(base = %cfg.base_url, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let output = match cli.command {
        Command::Day {
            station,
            year,
            month,
            day,
        } => Output::Table(
            fetch_day(&fetcher, &cfg, &station, year, month, day)
                .await
                .with_context(|| format!("fetching {} on {}-{}-{}", station, year, month, day))?,
        ),
        Command::Range {
            station,
            start,
            end,
            delay,
            seed,
        } => {
            let seed = seed
                .map(|p| {
                    load_table_json(&p).with_context(|| format!("loading seed {}", p.display()))
                })
                .transpose()?;
            let delay = delay.map(Duration::from_secs).unwrap_or(cfg.delay);
            Output::Table(
                fetch_range(&fetcher, &cfg, &station, start, end, delay, seed)
                    .await
                    .with_context(|| format!("fetching {} from {} to {}", station, start, end))?,
            )
        }
        Command::Stations { region } => {
            let region = region.unwrap_or_else(|| cfg.default_region.clone());
            Output::Stations(
                scrape_stations(&fetcher, &cfg, &region)
                    .await
                    .with_context(|| format!("scraping stations for {}", region))?,
            )
        }
    };

    // ─── 4) write ────────────────────────────────────────────────────
    match (&cli.out, &output) {
        (Some(path), Output::Table(t)) if is_json(path) => save_json(t, path)?,
        (Some(path), Output::Stations(s)) if is_json(path) => save_json(s, path)?,
        (Some(path), Output::Table(t)) => write_table_csv(t, create(path)?)?,
        (Some(path), Output::Stations(s)) => write_stations_csv(s, create(path)?)?,
        (None, Output::Table(t)) => write_table_csv(t, io::stdout().lock())?,
        (None, Output::Stations(s)) => write_stations_csv(s, io::stdout().lock())?,
    }

    info!("all done");
    Ok(())
}

fn create(path: &Path) -> Result<io::BufWriter<fs::File>> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(io::BufWriter::new(file))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}
