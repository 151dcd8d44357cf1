//! # timeboard-entries
//!
//! Ingestion and aggregation core for timeboard: decode the JSONL time log,
//! hold it as an atomically replaced snapshot, refresh it in the background,
//! and fold it into per-project, per-day and per-week summaries.

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod parser;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod watcher;

pub use aggregate::{
    aggregate_by_day, aggregate_by_project, aggregate_by_week, filter_by_range, round_hours,
};
pub use dates::{add_days, week_start_sunday};
pub use error::LoadError;
pub use parser::{load_jsonl, parse_line, ParsedLine, MAX_LINE_BYTES};
pub use scheduler::{refresh, RefreshScheduler};
pub use store::{EntryStore, Snapshot};
pub use types::{DayStat, ProjectStat, TimeEntry, WeekStat};
pub use watcher::LogWatcher;
