use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;

use timeboard_entries::{
    aggregate_by_day, aggregate_by_project, aggregate_by_week, filter_by_range, load_jsonl,
    DayStat, ProjectStat, WeekStat,
};

use crate::config::Config;
use crate::range::{today_in, DateRange, RangeParams};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupBy {
    Project,
    Day,
    Week,
}

pub fn handle_report_command(
    config: &Config,
    params: RangeParams,
    by: GroupBy,
    json: bool,
) -> Result<()> {
    let range = DateRange::resolve(params, today_in(config.tz())).map_err(anyhow::Error::msg)?;

    let entries = load_jsonl(&config.jsonl_path)
        .with_context(|| "Failed to load time entries")?;
    let entries = filter_by_range(&entries, &range.from, &range.to);

    match by {
        GroupBy::Project => {
            let stats = aggregate_by_project(&entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_projects(&range, &stats);
            }
        }
        GroupBy::Day => {
            let stats = aggregate_by_day(&entries, &range.from, &range.to);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_days(&range, &stats);
            }
        }
        GroupBy::Week => {
            let stats = aggregate_by_week(&entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_weeks(&range, &stats);
            }
        }
    }

    Ok(())
}

fn print_header(title: &str, range: &DateRange) {
    println!(
        "{} {}",
        format!("=== {} ===", title).bright_blue().bold(),
        format!("{} .. {}", range.from, range.to).dimmed()
    );
}

fn print_projects(range: &DateRange, stats: &[ProjectStat]) {
    print_header("Hours by Project", range);
    if stats.is_empty() {
        println!("{}", "No entries in range.".dimmed());
        return;
    }

    println!(
        "{:<30} {:>8} {:>8}",
        "PROJECT".dimmed(),
        "MINUTES".dimmed(),
        "HOURS".dimmed()
    );
    for s in stats {
        println!("{:<30} {:>8} {:>8.2}", s.project, s.minutes, s.hours);
    }

    let total: u64 = stats.iter().map(|s| s.minutes).sum();
    println!(
        "{:<30} {:>8} {:>8.2}",
        "Total".bold(),
        total,
        timeboard_entries::round_hours(total)
    );
}

fn print_days(range: &DateRange, stats: &[DayStat]) {
    print_header("Hours by Day", range);
    for s in stats {
        let hours = format!("{:>6.2}", s.hours);
        let hours = if s.minutes == 0 {
            hours.dimmed().to_string()
        } else {
            hours.bright_green().to_string()
        };
        println!("{}  {}  {}", s.date, hours, bar(s.minutes, 30));
    }
}

fn print_weeks(range: &DateRange, stats: &[WeekStat]) {
    print_header("Hours by Week (Sunday start)", range);
    if stats.is_empty() {
        println!("{}", "No entries in range.".dimmed());
        return;
    }
    for s in stats {
        println!("{}  {:>7.2}  {}", s.week_start, s.hours, bar(s.minutes, 150));
    }
}

fn bar(minutes: u64, per_block: u64) -> String {
    "#".repeat((minutes / per_block) as usize).cyan().to_string()
}
