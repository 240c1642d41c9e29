//! Output formatting module for ytstat
//!
//! This module provides formatters for displaying channel reports in
//! different formats:
//! - Table format for human-readable terminal output, including ASCII
//!   bar-chart series for the monthly breakdown
//! - JSON format for machine-readable output and integration with other
//!   tools
//!
//! # Examples
//!
//! ```
//! use ytstat::aggregation::{ChannelOutcome, RunTotals};
//! use ytstat::output::get_formatter;
//! use ytstat::types::ChannelId;
//!
//! let outcomes = vec![ChannelOutcome::Empty {
//!     channel_id: ChannelId::new("UCexample"),
//!     channel_title: "Example".to_string(),
//! }];
//! let totals = RunTotals::from_outcomes(&outcomes);
//!
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_outcomes(&outcomes, &totals));
//! ```

use crate::aggregation::{ChannelOutcome, ChannelReport, MonthlySummary, RunTotals};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Width of the widest ASCII chart bar
const BAR_WIDTH: usize = 30;

/// Trait for output formatters
///
/// Implementations render the full batch of per-channel outcomes plus the
/// run-level totals into a single printable string.
pub trait OutputFormatter {
    /// Format all channel outcomes with run totals
    fn format_outcomes(&self, outcomes: &[ChannelOutcome], totals: &RunTotals) -> String;
}

/// Get the appropriate formatter based on output preferences
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}

/// Table formatter for human-readable terminal output
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Scale a value into an ASCII bar against the series maximum
    ///
    /// Any non-zero value renders at least one block so small months stay
    /// visible next to large ones.
    fn bar(value: u64, max: u64) -> String {
        if value == 0 || max == 0 {
            return String::new();
        }
        let scaled = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
        "█".repeat(scaled.max(1))
    }

    fn monthly_table(monthly: &[MonthlySummary]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Uploads", b -> "Total Views", b -> "Avg Views"]);

        for summary in monthly {
            table.add_row(row![
                summary.month,
                r -> Self::format_number(summary.upload_count as u64),
                r -> Self::format_number(summary.total_views),
                r -> Self::format_number(summary.avg_views)
            ]);
        }

        table.to_string()
    }

    fn chart(monthly: &[MonthlySummary], label: &str, value: impl Fn(&MonthlySummary) -> u64) -> String {
        let max = monthly.iter().map(&value).max().unwrap_or(0);
        let mut output = format!("{label}\n");
        for summary in monthly {
            output.push_str(&format!(
                "  {} │{} {}\n",
                summary.month,
                Self::bar(value(summary), max),
                Self::format_number(value(summary))
            ));
        }
        output
    }

    fn channel_section(report: &ChannelReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            "Channel:".bold(),
            report.channel_title.bold().cyan()
        ));
        output.push_str(&format!(
            "Uploads: {} | Total views: {} | Average views: {}\n\n",
            Self::format_number(report.upload_count as u64),
            Self::format_number(report.total_views),
            Self::format_number(report.avg_views)
        ));

        output.push_str(&Self::monthly_table(&report.monthly));
        output.push('\n');
        output.push_str(&Self::chart(&report.monthly, "Uploads per month", |m| {
            m.upload_count as u64
        }));
        output.push('\n');
        output.push_str(&Self::chart(&report.monthly, "Views per month", |m| {
            m.total_views
        }));

        output.push_str(&format!("\n{}\n", "Top videos".bold()));
        for (i, video) in report.top_videos.iter().enumerate() {
            output.push_str(&format!(
                "  [{}] {}\n      {} | {} views | {}\n      thumbnail: {}\n",
                i + 1,
                video.title,
                video.published_at.format("%Y-%m-%d"),
                Self::format_number(video.view_count),
                video.video_url,
                video.thumbnail_url
            ));
        }

        output.push_str(&format!("\n{}\n", "All videos in range".bold()));
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Published", b -> "Title", b -> "Views", b -> "Link"]);
        for video in &report.videos {
            table.add_row(row![
                video.published_at.format("%Y-%m-%d"),
                video.title,
                r -> Self::format_number(video.view_count),
                video.video_url
            ]);
        }
        output.push_str(&table.to_string());

        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_outcomes(&self, outcomes: &[ChannelOutcome], totals: &RunTotals) -> String {
        let mut output = String::new();

        for outcome in outcomes {
            match outcome {
                ChannelOutcome::Report(report) => {
                    output.push_str(&Self::channel_section(report));
                }
                ChannelOutcome::Empty {
                    channel_title,
                    channel_id,
                } => {
                    output.push_str(&format!(
                        "\n{} {} ({})\n",
                        "No videos in the selected range:".yellow(),
                        channel_title,
                        channel_id
                    ));
                }
                ChannelOutcome::Failed { channel_id, reason } => {
                    output.push_str(&format!(
                        "\n{} {}: {}\n",
                        "Failed:".red().bold(),
                        channel_id,
                        reason
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\n{} {} reported, {} empty, {} failed | {} uploads, {} total views\n",
            "Summary:".bold(),
            totals.reported,
            totals.empty,
            totals.failed,
            Self::format_number(totals.total_uploads as u64),
            Self::format_number(totals.total_views)
        ));

        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_outcomes(&self, outcomes: &[ChannelOutcome], totals: &RunTotals) -> String {
        let value = json!({
            "channels": outcomes,
            "totals": totals,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChannelId, ReportVideo, VideoId};
    use chrono::NaiveDate;

    fn sample_outcomes() -> Vec<ChannelOutcome> {
        let video = ReportVideo {
            video_id: VideoId::new("v1"),
            title: "Hit video".to_string(),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            thumbnail_url: "https://i.ytimg.com/vi/v1/mqdefault.jpg".to_string(),
            video_url: "https://www.youtube.com/watch?v=v1".to_string(),
            view_count: 1234567,
        };
        vec![
            ChannelOutcome::Report(Box::new(ChannelReport {
                channel_id: ChannelId::new("UCtest"),
                channel_title: "Test Channel".to_string(),
                upload_count: 1,
                total_views: 1234567,
                avg_views: 1234567,
                monthly: vec![MonthlySummary {
                    month: "2024-01".to_string(),
                    upload_count: 1,
                    total_views: 1234567,
                    avg_views: 1234567,
                }],
                top_videos: vec![video.clone()],
                videos: vec![video],
            })),
            ChannelOutcome::Empty {
                channel_id: ChannelId::new("UCempty"),
                channel_title: "Quiet Channel".to_string(),
            },
            ChannelOutcome::Failed {
                channel_id: ChannelId::new("UCbad"),
                reason: "Channel not found: UCbad".to_string(),
            },
        ]
    }

    #[test]
    fn test_format_number() {
        assert_eq!(TableFormatter::format_number(0), "0");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(1000), "1,000");
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(TableFormatter::bar(0, 100), "");
        assert_eq!(TableFormatter::bar(100, 100).chars().count(), BAR_WIDTH);
        // Small non-zero values still render at least one block
        assert_eq!(TableFormatter::bar(1, 1_000_000).chars().count(), 1);
    }

    #[test]
    fn test_table_output_sections() {
        let outcomes = sample_outcomes();
        let totals = RunTotals::from_outcomes(&outcomes);
        let output = TableFormatter.format_outcomes(&outcomes, &totals);

        assert!(output.contains("Test Channel"));
        assert!(output.contains("1,234,567"));
        assert!(output.contains("2024-01"));
        // Highlight lines carry the thumbnail alongside the watch link
        assert!(output.contains("thumbnail: https://i.ytimg.com/vi/v1/mqdefault.jpg"));
        assert!(output.contains("https://www.youtube.com/watch?v=v1"));
        assert!(output.contains("Quiet Channel"));
        assert!(output.contains("Channel not found: UCbad"));
        assert!(output.contains("1 reported, 1 empty, 1 failed"));
    }

    #[test]
    fn test_json_output_shape() {
        let outcomes = sample_outcomes();
        let totals = RunTotals::from_outcomes(&outcomes);
        let output = JsonFormatter.format_outcomes(&outcomes, &totals);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let channels = value["channels"].as_array().unwrap();
        assert_eq!(channels.len(), 3);
        assert_eq!(channels[0]["status"], "report");
        assert_eq!(channels[1]["status"], "empty");
        assert_eq!(channels[2]["status"], "failed");
        assert_eq!(value["totals"]["reported"], 1);
        assert_eq!(value["totals"]["total_views"], 1234567);
    }
}
