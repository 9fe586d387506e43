use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use logtally::config::{self, Config};
use logtally::logging::{self, LogTarget};
use logtally::{analyze_file, Aggregator, Report};

#[derive(Parser)]
#[command(name = "logtally")]
#[command(version, about = "Count log severities and list the most recent errors")]
struct Cli {
    /// Log file to analyze
    file: PathBuf,

    /// Config file (default: ~/.logtally/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of recent errors to keep (overrides config)
    #[arg(short, long)]
    recent: Option<usize>,

    /// Print counts only, without the recent-errors listing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(recent) = cli.recent {
        config.recent_errors_capacity = recent;
        config.validate()?;
    }

    let target = if config.log_to_file {
        LogTarget::Directory(config::logs_dir())
    } else {
        LogTarget::Stderr
    };
    let guard = logging::init_logging(target, &config.log_filter)?;

    if let Some(path) = &guard.path {
        tracing::info!("Logging to: {}", path.display());
        match logging::cleanup_old_logs(&config::logs_dir(), config.log_retention_days) {
            Ok(count) if count > 0 => tracing::info!("Cleaned up {} old log files", count),
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to clean up old log files: {}", e),
        }
    }

    let mut aggregator = Aggregator::new(config.recent_errors_capacity);
    let stats = analyze_file(&cli.file, &mut aggregator)?;

    let report = Report::new(&aggregator);
    let report = if cli.quiet { report.counts_only() } else { report };
    report
        .write_to(io::stdout().lock())
        .context("Failed to write report")?;

    let recent = aggregator.recent_errors();
    tracing::info!(
        "Analyzed {}: {} parsed, {} skipped, {} of {} errors listed",
        cli.file.display(),
        stats.parsed,
        stats.skipped,
        recent.len(),
        recent.total_inserted()
    );
    Ok(())
}
