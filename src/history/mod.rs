// src/history/mod.rs

pub mod daily;
pub mod range;
pub mod table;

pub use daily::{fetch_day, parse_daily_history};
pub use range::{fetch_range, parse_compact_date};
pub use table::{CombinedTable, Observation, ObservationTable};
