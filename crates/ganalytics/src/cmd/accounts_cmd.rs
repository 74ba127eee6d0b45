//! ga-accounts - List the accounts and profiles visible to a user.
//!
//! # Usage
//!
//! ```bash
//! ga-accounts --email me@example.com --password secret
//! GA_AUTH_TOKEN=... ga-accounts --max-results 50 --json
//! ```

use crate::cmd::common::{init_logging, ConnectionArgs};
use crate::cmd::completions::ShellType;
use anyhow::{Context, Result};
use clap::Parser;
use ganalytics_core::{AccountEntry, FeedRootMetadata};
use ganalytics_query::{AccountQuery, DEFAULT_MAX_RESULTS, DEFAULT_START_INDEX};
use std::io::{self, Write};
use std::process::ExitCode;

/// List analytics accounts and profiles.
#[derive(Parser, Debug)]
#[command(name = "ga-accounts")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions for the specified shell.
    #[arg(long, value_name = "SHELL")]
    generate_completions: Option<ShellType>,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// 1-based index of the first account.
    #[arg(long, default_value_t = DEFAULT_START_INDEX)]
    start_index: u32,

    /// Maximum number of accounts to list.
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
}

/// Main entry point for the accounts command.
pub fn main() -> ExitCode {
    main_with_name("ga-accounts")
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
    let mut client = args.connection.connect()?;
    let query = AccountQuery::new()
        .start_index(args.start_index)
        .max_results(args.max_results);
    client
        .request_account_data(&query)
        .context("failed to list accounts")?;

    let entries = client.results().accounts().unwrap_or_default();
    let mut stdout = io::stdout().lock();
    if args.connection.json {
        write_json(entries, client.account_root(), &mut stdout)?;
    } else {
        write_text(entries, &mut stdout)?;
    }
    Ok(())
}

/// Write one block per account: the title, then its other properties.
pub fn write_text<W: Write>(entries: &[AccountEntry], out: &mut W) -> Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
        for (name, value) in entry.properties() {
            if name != "title" {
                writeln!(out, "  {name}: {value}")?;
            }
        }
    }
    Ok(())
}

/// Write the feed metadata and accounts as one JSON document.
pub fn write_json<W: Write>(
    entries: &[AccountEntry],
    root: &FeedRootMetadata,
    out: &mut W,
) -> Result<()> {
    let document = serde_json::json!({
        "feed": root,
        "accounts": entries,
    });
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}
