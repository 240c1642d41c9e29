//! CLI interface for ytstat
//!
//! This module defines the command-line interface using clap. Two
//! subcommands share the same fetch arguments: `report` prints the
//! per-channel summaries to the terminal, `export` writes spreadsheet files.
//!
//! # Example
//!
//! ```bash
//! # Report on two channels for the first half of 2024
//! ytstat report UC_x5XG1OV2P6uZZ5FSM9Ttw UCBR8-60-B28hp2BmDPdntcQ \
//!     --since 2024-01-01 --until 2024-06-30
//!
//! # Channel IDs from a file, JSON output
//! ytstat report --channels-file channels.txt --since 2024-01 --json
//!
//! # Export one workbook per channel plus the combined workbook
//! ytstat export --channels-file channels.txt --since 2024-01-01 --out-dir out/
//! ```

use crate::error::{Result, YtstatError};
use crate::filters::DateRange;
use crate::types::ChannelId;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch and summarize YouTube channel upload statistics
#[derive(Parser, Debug, Clone)]
#[command(name = "ytstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Show debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every subcommand that fetches channel data
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Channel IDs to process
    #[arg(value_name = "CHANNEL_ID")]
    pub channels: Vec<String>,

    /// File with one channel ID per line (blank lines and # comments ignored)
    #[arg(long, value_name = "FILE")]
    pub channels_file: Option<PathBuf>,

    /// Start date, inclusive (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub since: String,

    /// End date, inclusive (YYYY-MM-DD or YYYY-MM); defaults to today
    #[arg(long)]
    pub until: Option<String>,
}

/// Arguments for the export subcommand
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Directory to write workbooks into
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Write only the combined workbook, skipping per-channel files
    #[arg(long)]
    pub combined_only: bool,
}

/// Arguments for the report subcommand
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch channels and print per-channel reports
    Report(ReportArgs),
    /// Fetch channels and export spreadsheet workbooks
    Export(ExportArgs),
}

impl FetchArgs {
    /// Resolve the date range from the CLI flags
    ///
    /// `--until` defaults to today's UTC date when omitted.
    pub fn date_range(&self) -> Result<DateRange> {
        let since = parse_date_filter(&self.since)?;
        let until = match &self.until {
            Some(s) => parse_date_filter(s)?,
            None => chrono::Utc::now().date_naive(),
        };
        DateRange::new(since, until)
    }

    /// Collect channel IDs from positional args and the optional file
    ///
    /// Order is preserved: positional IDs first, then file entries.
    pub fn channel_ids(&self) -> Result<Vec<ChannelId>> {
        let mut ids: Vec<ChannelId> = self
            .channels
            .iter()
            .map(|s| ChannelId::new(s.trim()))
            .collect();

        if let Some(path) = &self.channels_file {
            let contents = std::fs::read_to_string(path)?;
            ids.extend(parse_channel_list(&contents));
        }

        if ids.is_empty() {
            return Err(YtstatError::Config(
                "no channel IDs given; pass them as arguments or via --channels-file".to_string(),
            ));
        }

        Ok(ids)
    }
}

/// Parse a newline-separated channel ID list
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_channel_list(contents: &str) -> Vec<ChannelId> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ChannelId::new)
        .collect()
}

/// Parse date filter from string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format.
/// For YYYY-MM format, defaults to the first day of the month.
///
/// # Example
///
/// ```
/// use ytstat::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-01").unwrap();
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<NaiveDate> {
    // Try YYYY-MM-DD format first
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    // Try YYYY-MM format (convert to first day of month)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| YtstatError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| YtstatError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(YtstatError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| YtstatError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(YtstatError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}
