//! Range filtering and per-project / per-day / per-week summaries.
//!
//! Dates are compared as canonical `YYYY-MM-DD` strings, which order the
//! same way as the calendar. Callers validate `from`/`to` beforehand.

use std::collections::{BTreeMap, HashMap};

use crate::dates::{add_days, week_start_sunday};
use crate::types::{DayStat, ProjectStat, TimeEntry, WeekStat};

/// Entries whose date lies in `[from, to]`, in their original order.
pub fn filter_by_range(entries: &[TimeEntry], from: &str, to: &str) -> Vec<TimeEntry> {
    entries
        .iter()
        .filter(|e| e.date.as_str() >= from && e.date.as_str() <= to)
        .cloned()
        .collect()
}

/// Totals per exact project label, largest first; ties by project name.
pub fn aggregate_by_project(entries: &[TimeEntry]) -> Vec<ProjectStat> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for e in entries {
        *totals.entry(e.project.as_str()).or_insert(0) += e.minutes;
    }

    let mut stats: Vec<ProjectStat> = totals
        .into_iter()
        .map(|(project, minutes)| ProjectStat {
            project: project.to_string(),
            minutes,
            hours: round_hours(minutes),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.minutes
            .cmp(&a.minutes)
            .then_with(|| a.project.cmp(&b.project))
    });

    stats
}

/// One row per calendar day in `[from, to]`, zero-filled where no entry
/// falls on that day.
pub fn aggregate_by_day(entries: &[TimeEntry], from: &str, to: &str) -> Vec<DayStat> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for e in entries {
        *totals.entry(e.date.as_str()).or_insert(0) += e.minutes;
    }

    let mut stats = Vec::new();
    let mut day = from.to_string();
    while day.as_str() <= to {
        let minutes = totals.get(day.as_str()).copied().unwrap_or(0);
        let next = add_days(&day, 1);
        stats.push(DayStat {
            date: day,
            minutes,
            hours: round_hours(minutes),
        });
        // add_days hands malformed input back unchanged; stop rather than spin.
        if stats.last().is_some_and(|last| next <= last.date) {
            break;
        }
        day = next;
    }

    stats
}

/// Totals per Sunday-starting week, oldest first. Weeks without entries
/// are omitted.
pub fn aggregate_by_week(entries: &[TimeEntry]) -> Vec<WeekStat> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for e in entries {
        *totals.entry(week_start_sunday(&e.date)).or_insert(0) += e.minutes;
    }

    totals
        .into_iter()
        .map(|(week_start, minutes)| WeekStat {
            week_start,
            minutes,
            hours: round_hours(minutes),
        })
        .collect()
}

/// Minutes as hours, rounded half away from zero to two decimals.
pub fn round_hours(minutes: u64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}
