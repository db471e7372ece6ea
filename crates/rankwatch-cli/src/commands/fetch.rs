//! Fetch and import commands

use super::{open_store, CommandResult};
use crate::config::Settings;
use clap::Args;
use rankwatch_core::diff::render_changes_summary;
use rankwatch_core::errors::Result;
use rankwatch_engine::{
    run_cycle, CycleReport, FileFetcher, HttpFetcher, ScheduleOptions, Scheduler,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Run a single cycle and exit (non-zero on failure)
    #[arg(long)]
    pub once: bool,

    /// Minutes between cycles
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Stop after this many cycles
    #[arg(long, conflicts_with = "once")]
    pub max_cycles: Option<u64>,

    /// Ranking API URL
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON payload to save
    pub file: PathBuf,
}

fn print_report(report: &CycleReport) {
    print!(
        "{}",
        render_changes_summary(
            report.snapshot_id,
            report.updated_at.as_deref(),
            &report.changes
        )
    );
}

pub fn execute(args: FetchArgs, settings: &Settings) -> CommandResult {
    let url = args.url.unwrap_or_else(|| settings.api_url.clone());
    let timeout = args
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.timeout());
    let fetcher = HttpFetcher::new(url, timeout)?;
    let mut store = open_store(settings)?;

    if args.once {
        let report = run_cycle(&mut store, &fetcher)?;
        print_report(&report);
        return Ok(());
    }

    let interval = args.interval.unwrap_or(settings.interval_minutes);
    println!(
        "Fetching {} every {} minutes into {}",
        fetcher.url(),
        interval,
        settings.db_path.display()
    );

    let scheduler = Scheduler::new(ScheduleOptions {
        max_cycles: args.max_cycles,
        ..ScheduleOptions::every_minutes(interval)
    });
    let summary = scheduler.run_with(&mut store, &fetcher, |outcome: &Result<CycleReport>| {
        match outcome {
            Ok(report) => print_report(report),
            Err(e) => eprintln!("Cycle failed: {}", e),
        }
    });

    println!(
        "Stopped after {} cycles ({} failed)",
        summary.cycles, summary.failures
    );
    Ok(())
}

pub fn execute_import(args: ImportArgs, settings: &Settings) -> CommandResult {
    let mut store = open_store(settings)?;
    let report = run_cycle(&mut store, &FileFetcher::new(&args.file))?;
    print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct FetchCli {
        #[command(flatten)]
        args: FetchArgs,
    }

    #[test]
    fn test_interval_must_be_positive() {
        assert!(FetchCli::try_parse_from(["fetch", "--interval", "0"]).is_err());

        let cli = FetchCli::try_parse_from(["fetch", "--interval", "15"]).unwrap();
        assert_eq!(cli.args.interval, Some(15));
    }

    #[test]
    fn test_max_cycles_conflicts_with_once() {
        assert!(FetchCli::try_parse_from(["fetch", "--once", "--max-cycles", "2"]).is_err());
    }
}
