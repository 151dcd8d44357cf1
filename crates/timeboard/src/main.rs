mod api;
mod config;
mod range;
mod report;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use timeboard_logging::{init_tracing, LogFormat};

use crate::config::{Config, Overrides};
use crate::range::RangeParams;
use crate::report::GroupBy;

#[derive(Parser, Debug)]
#[command(
    name = "timeboard",
    about = "Serve and summarize a time-tracking JSONL log",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Path to config file (default: ./timeboard.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to JSONL export file
    #[arg(long, global = true)]
    jsonl: Option<PathBuf>,

    /// Timezone used to resolve "today" (e.g. Australia/Sydney)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormatChoice>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dashboard API server (default)
    Serve(ServeArgs),

    /// Print a summary for a date range
    Report {
        /// First day of the range (YYYY-MM-DD, default: 30 days ago)
        #[arg(long)]
        from: Option<String>,

        /// Last day of the range (YYYY-MM-DD, default: today)
        #[arg(long)]
        to: Option<String>,

        /// Grouping
        #[arg(long, value_enum, default_value = "project")]
        by: GroupBy,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Reload interval in hours (0 disables)
    #[arg(long)]
    poll: Option<u64>,

    /// Path to the built frontend directory
    #[arg(long)]
    frontend: Option<PathBuf>,

    /// Reload whenever the JSONL file changes
    #[arg(long)]
    watch: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));

    let config_path = cli.global.config.unwrap_or_else(Config::default_path);
    let serve_args = match &command {
        Command::Serve(args) => Some(args),
        Command::Report { .. } => None,
    };
    let overrides = Overrides {
        jsonl_path: cli.global.jsonl,
        timezone: cli.global.tz,
        log_level: cli.global.log_level,
        log_format: cli.global.log_format.map(Into::into),
        port: serve_args.and_then(|a| a.port),
        poll_interval_hours: serve_args.and_then(|a| a.poll),
        frontend_dir: serve_args.and_then(|a| a.frontend.clone()),
        watch: serve_args.is_some_and(|a| a.watch),
    };
    let config = Config::load(&config_path)?.apply(overrides);

    let _log_guard = init_tracing(
        &config.log_level,
        config.log_format,
        config.log_dir.as_deref(),
    );

    match command {
        Command::Serve(_) => server::handle_serve_command(config).await,
        Command::Report { from, to, by, json } => {
            report::handle_report_command(&config, RangeParams { from, to }, by, json)
        }
    }
}
