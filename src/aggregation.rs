//! Aggregation module for building per-channel reports
//!
//! This module turns the raw fetch products (video records plus a view-count
//! lookup) into a [`ChannelReport`]: date-filtered, joined, sorted, totaled,
//! grouped by month and ranked.
//!
//! Two policies here are deliberate and worth calling out:
//!
//! - **Inner join**: a video whose statistics are missing from the batch
//!   response is dropped from the report, not defaulted to zero views.
//! - **Empty is not an error**: a channel with no uploads in range produces
//!   [`ChannelOutcome::Empty`], a valid terminal state distinct from
//!   [`ChannelOutcome::Failed`].
//!
//! # Examples
//!
//! ```
//! use ytstat::aggregation::{ChannelOutcome, build_channel_report};
//! use ytstat::filters::DateRange;
//! use ytstat::types::ChannelId;
//! use chrono::NaiveDate;
//! use std::collections::HashMap;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! )
//! .unwrap();
//!
//! let outcome = build_channel_report(
//!     ChannelId::new("UCexample"),
//!     "Example Channel".to_string(),
//!     vec![],
//!     &HashMap::new(),
//!     &range,
//! );
//! assert!(matches!(outcome, ChannelOutcome::Empty { .. }));
//! ```

use crate::filters::DateRange;
use crate::types::{ChannelId, ReportVideo, VideoId, VideoRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of videos in the highlights ranking
pub const TOP_VIDEO_COUNT: usize = 5;

/// Summary statistics for one calendar month
///
/// One row per distinct month present in the filtered videos, ordered
/// chronologically by month key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Calendar month in YYYY-MM format
    pub month: String,
    /// Videos uploaded in this month
    pub upload_count: usize,
    /// Sum of view counts
    pub total_views: u64,
    /// Mean view count, rounded to the nearest integer
    pub avg_views: u64,
}

/// Accumulator for monthly grouping
#[derive(Debug, Default)]
struct MonthAccumulator {
    upload_count: usize,
    total_views: u64,
}

impl MonthAccumulator {
    fn add(&mut self, view_count: u64) {
        self.upload_count += 1;
        self.total_views += view_count;
    }

    fn into_summary(self, month: String) -> MonthlySummary {
        let avg_views = if self.upload_count == 0 {
            0
        } else {
            (self.total_views as f64 / self.upload_count as f64).round() as u64
        };
        MonthlySummary {
            month,
            upload_count: self.upload_count,
            total_views: self.total_views,
            avg_views,
        }
    }
}

/// Complete report for one channel over the requested date range
///
/// Owned exclusively by the per-channel processing step; nothing here is
/// shared across channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReport {
    /// Channel identifier
    pub channel_id: ChannelId,
    /// Channel display name
    pub channel_title: String,
    /// Number of uploads in range
    pub upload_count: usize,
    /// Sum of view counts over the filtered, joined set
    pub total_views: u64,
    /// Mean view count, truncated to an integer
    pub avg_views: u64,
    /// Per-month summary rows, chronological
    pub monthly: Vec<MonthlySummary>,
    /// Highlights: top videos by view count, descending, stable ties
    pub top_videos: Vec<ReportVideo>,
    /// All videos in range, published_at descending
    pub videos: Vec<ReportVideo>,
}

/// Tagged result of processing one channel
///
/// Success-with-report, empty-but-valid, and error-with-reason are three
/// distinct states; only the last one represents a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelOutcome {
    /// Channel processed and at least one video is in range
    Report(Box<ChannelReport>),
    /// Channel processed but no uploads fall inside the date range
    Empty {
        /// Channel identifier
        channel_id: ChannelId,
        /// Channel display name
        channel_title: String,
    },
    /// Processing failed; other channels are unaffected
    Failed {
        /// Channel identifier
        channel_id: ChannelId,
        /// User-visible failure reason
        reason: String,
    },
}

impl ChannelOutcome {
    /// The report, if this outcome carries one
    pub fn report(&self) -> Option<&ChannelReport> {
        match self {
            ChannelOutcome::Report(report) => Some(report),
            _ => None,
        }
    }
}

/// Build the report for one channel
///
/// Steps: filter by date range → inner-join with view counts → sort by
/// upload time descending → totals → monthly grouping → top-5 ranking.
/// An empty filtered (or joined) set short-circuits to
/// [`ChannelOutcome::Empty`].
pub fn build_channel_report(
    channel_id: ChannelId,
    channel_title: String,
    videos: Vec<VideoRecord>,
    view_counts: &HashMap<VideoId, u64>,
    range: &DateRange,
) -> ChannelOutcome {
    let in_range = videos
        .into_iter()
        .filter(|v| range.contains(&v.published_at))
        .collect::<Vec<_>>();

    if in_range.is_empty() {
        return ChannelOutcome::Empty {
            channel_id,
            channel_title,
        };
    }

    // Inner join: videos without a statistics entry are dropped.
    let mut joined = in_range
        .into_iter()
        .filter_map(|record| {
            view_counts
                .get(&record.video_id)
                .map(|&views| ReportVideo::from_record(record, views))
        })
        .collect::<Vec<_>>();

    if joined.is_empty() {
        return ChannelOutcome::Empty {
            channel_id,
            channel_title,
        };
    }

    joined.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let upload_count = joined.len();
    let total_views: u64 = joined.iter().map(|v| v.view_count).sum();
    // Integer division truncates, matching the truncated mean in the summary.
    let avg_views = total_views / upload_count as u64;

    let mut monthly_map: BTreeMap<String, MonthAccumulator> = BTreeMap::new();
    for video in &joined {
        monthly_map
            .entry(video.month_key())
            .or_default()
            .add(video.view_count);
    }
    let monthly = monthly_map
        .into_iter()
        .map(|(month, acc)| acc.into_summary(month))
        .collect();

    let top_videos = rank_top_videos(&joined);

    ChannelOutcome::Report(Box::new(ChannelReport {
        channel_id,
        channel_title,
        upload_count,
        total_views,
        avg_views,
        monthly,
        top_videos,
        videos: joined,
    }))
}

/// Select the top videos by view count, descending
///
/// The sort is stable, so ties keep their position from the input order
/// (published_at descending). Running this twice on the same input yields
/// the same list.
fn rank_top_videos(videos: &[ReportVideo]) -> Vec<ReportVideo> {
    let mut ranked = videos.to_vec();
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ranked.truncate(TOP_VIDEO_COUNT);
    ranked
}

/// Run-level rollup across all channel outcomes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunTotals {
    /// Channels that produced a non-empty report
    pub reported: usize,
    /// Channels with no uploads in range
    pub empty: usize,
    /// Channels that failed
    pub failed: usize,
    /// Views summed over every produced report
    pub total_views: u64,
    /// Uploads summed over every produced report
    pub total_uploads: usize,
}

impl RunTotals {
    /// Compute totals from a batch of outcomes
    pub fn from_outcomes(outcomes: &[ChannelOutcome]) -> Self {
        let mut totals = Self::default();
        for outcome in outcomes {
            match outcome {
                ChannelOutcome::Report(report) => {
                    totals.reported += 1;
                    totals.total_views += report.total_views;
                    totals.total_uploads += report.upload_count;
                }
                ChannelOutcome::Empty { .. } => totals.empty += 1,
                ChannelOutcome::Failed { .. } => totals.failed += 1,
            }
        }
        totals
    }
}
