//! ga-report - Run a report query against a profile.
//!
//! # Usage
//!
//! ```bash
//! ga-report 12345 -d browser -m pageviews,visits
//! ga-report 12345 -d browser -m pageviews -s -pageviews -f "pageviews > 100"
//! ga-report 12345 -d country -m visits --start-date 2010-01-01 --end-date 2010-01-31 --json
//! ```
//!
//! Field names are given without the `ga:` prefix; it is added on the wire.

use crate::cmd::common::{init_logging, ConnectionArgs};
use crate::cmd::completions::ShellType;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use ganalytics_core::{AggregateMetrics, FeedRootMetadata, ReportEntry};
use ganalytics_query::{ReportQuery, DATE_FORMAT, DEFAULT_MAX_RESULTS, DEFAULT_START_INDEX};
use std::io::{self, Write};
use std::process::ExitCode;

/// Run an analytics report query.
#[derive(Parser, Debug)]
#[command(name = "ga-report")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions for the specified shell.
    #[arg(long, value_name = "SHELL")]
    generate_completions: Option<ShellType>,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    report: ReportArgs,
}

/// Report-specific arguments.
#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Profile (report) id to query.
    #[arg(value_name = "PROFILE_ID", required_unless_present = "generate_completions")]
    report_id: Option<String>,

    /// Dimensions to group by (e.g. browser,country).
    #[arg(short, long = "dimension", value_delimiter = ',')]
    dimensions: Vec<String>,

    /// Metrics to report (e.g. pageviews,visits).
    #[arg(
        short,
        long = "metric",
        value_delimiter = ',',
        required_unless_present = "generate_completions"
    )]
    metrics: Vec<String>,

    /// Sort fields; prefix with `-` for descending. Defaults to the metrics.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    sort: Vec<String>,

    /// Filter expression, e.g. "pageviews > 100 && browser == Firefox".
    #[arg(short, long)]
    filter: Option<String>,

    /// First day of the report (YYYY-MM-DD, defaults to one month ago).
    #[arg(long)]
    start_date: Option<String>,

    /// Last day of the report (YYYY-MM-DD).
    #[arg(long)]
    end_date: Option<String>,

    /// 1-based index of the first row.
    #[arg(long, default_value_t = DEFAULT_START_INDEX)]
    start_index: u32,

    /// Maximum number of rows.
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
}

impl ReportArgs {
    /// Build the report query from the arguments.
    pub fn to_query(&self) -> Result<ReportQuery> {
        let report_id = self
            .report_id
            .as_deref()
            .context("a profile id is required")?;

        let mut query = ReportQuery::new(
            report_id,
            self.dimensions.as_slice(),
            self.metrics.as_slice(),
        )
        .start_index(self.start_index)
        .max_results(self.max_results);
        if !self.sort.is_empty() {
            query = query.sort(self.sort.as_slice());
        }
        if let Some(filter) = &self.filter {
            query = query.filter(filter.as_str());
        }
        if let Some(date) = &self.start_date {
            query = query.start_date(validate_date(date)?);
        }
        if let Some(date) = &self.end_date {
            query = query.end_date(validate_date(date)?);
        }
        Ok(query)
    }
}

fn validate_date(date: &str) -> Result<&str> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .with_context(|| format!("invalid date: {date}"))?;
    Ok(date)
}

/// Main entry point for the report command.
pub fn main() -> ExitCode {
    main_with_name("ga-report")
}

/// Main entry point with a custom binary name.
pub fn main_with_name(bin_name: &str) -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, bin_name);
        return ExitCode::SUCCESS;
    }

    init_logging(args.connection.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let query = args.report.to_query()?;
    let mut client = args.connection.connect()?;
    client
        .request_report_data(&query)
        .with_context(|| format!("failed to run report for profile {}", query.report_id()))?;

    let entries = client.results().reports().unwrap_or_default();
    let mut stdout = io::stdout().lock();
    if args.connection.json {
        write_json(
            entries,
            client.aggregate_metrics(),
            client.report_root(),
            &mut stdout,
        )?;
    } else {
        write_text(entries, client.aggregate_metrics(), &mut stdout)?;
    }
    Ok(())
}

/// Write one line per row, then the aggregate totals.
///
/// A row is its dimension values followed by `metric=value` pairs.
pub fn write_text<W: Write>(
    entries: &[ReportEntry],
    aggregates: &AggregateMetrics,
    out: &mut W,
) -> Result<()> {
    for entry in entries {
        let metrics = entry
            .metrics()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        if entry.dimensions().is_empty() {
            writeln!(out, "{metrics}")?;
        } else {
            writeln!(out, "{entry}\t{metrics}")?;
        }
    }

    if !aggregates.is_empty() {
        let totals = aggregates
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "total\t{totals}")?;
    }
    Ok(())
}

/// Write the feed metadata, aggregates and rows as one JSON document.
pub fn write_json<W: Write>(
    entries: &[ReportEntry],
    aggregates: &AggregateMetrics,
    root: &FeedRootMetadata,
    out: &mut W,
) -> Result<()> {
    let document = serde_json::json!({
        "feed": root,
        "aggregates": aggregates,
        "entries": entries,
    });
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganalytics_core::{Value, ValueMap};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_args_to_query() {
        let args = parse(&[
            "ga-report",
            "12345",
            "-d",
            "browser,country",
            "-m",
            "pageviews",
            "-s",
            "-pageviews",
            "-f",
            "pageviews > 100",
            "--start-date",
            "2010-01-01",
        ]);
        let query = args.report.to_query().unwrap();
        assert_eq!(query.report_id(), "12345");
        assert_eq!(query.dimensions(), ["browser", "country"]);

        let today = NaiveDate::from_ymd_opt(2010, 2, 1).unwrap();
        let params = query.to_parameters(today, false);
        assert_eq!(params.get("sort"), Some("-ga:pageviews"));
        assert_eq!(params.get("start-date"), Some("2010-01-01"));
        assert_eq!(params.get("filters"), Some("ga%3Apageviews%3E100"));
        assert!(!params.contains("end-date"));
    }

    #[test]
    fn test_args_require_metrics() {
        assert!(Args::try_parse_from(["ga-report", "12345"]).is_err());
    }

    #[test]
    fn test_args_completions_only() {
        let args = parse(&["ga-report", "--generate-completions", "bash"]);
        assert_eq!(args.generate_completions, Some(ShellType::Bash));
    }

    #[test]
    fn test_invalid_date() {
        let args = parse(&["ga-report", "1", "-m", "visits", "--end-date", "2010-13-01"]);
        let err = args.report.to_query().unwrap_err();
        assert!(err.to_string().contains("invalid date: 2010-13-01"));
    }

    #[test]
    fn test_write_text() {
        let entries = vec![
            ReportEntry::new(
                [("pageviews", Value::Integer(150))].into_iter().collect(),
                [("browser", "Firefox")].into_iter().collect(),
            ),
            ReportEntry::new(
                [("pageviews", Value::Integer(100))].into_iter().collect(),
                [("browser", "Safari")].into_iter().collect(),
            ),
        ];
        let aggregates: ValueMap = [("pageviews", Value::Integer(250))].into_iter().collect();

        let mut out = Vec::new();
        write_text(&entries, &aggregates, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Firefox\tpageviews=150\nSafari\tpageviews=100\ntotal\tpageviews=250\n"
        );
    }

    #[test]
    fn test_write_json() {
        let entries = vec![ReportEntry::new(
            [("visits", Value::Float(35.5))].into_iter().collect(),
            [("country", "Norway")].into_iter().collect(),
        )];
        let mut out = Vec::new();
        write_json(
            &entries,
            &ValueMap::new(),
            &FeedRootMetadata::default(),
            &mut out,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["entries"][0]["metrics"]["visits"], 35.5);
        assert_eq!(parsed["entries"][0]["dimensions"]["country"], "Norway");
    }
}
