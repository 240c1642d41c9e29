//! ytstat - Fetch and summarize YouTube channel upload statistics
//!
//! This library provides functionality to:
//! - Resolve YouTube channels and page through their uploads playlists
//! - Join video metadata with batched view-count statistics
//! - Filter by an inclusive date range and compute per-channel and
//!   per-month summary statistics with a top-video ranking
//! - Render reports as terminal tables or JSON
//! - Export per-channel and combined multi-sheet XLSX workbooks
//!
//! # Examples
//!
//! ```no_run
//! use ytstat::{
//!     aggregation::RunTotals,
//!     filters::DateRange,
//!     output::get_formatter,
//!     report::ReportRunner,
//!     types::ChannelId,
//!     youtube::YouTubeApi,
//! };
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> ytstat::Result<()> {
//!     let range = DateRange::new(
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
//!     )?;
//!
//!     let runner = ReportRunner::new(YouTubeApi::new("api-key"));
//!     let outcomes = runner
//!         .run_channels(&[ChannelId::new("UC_x5XG1OV2P6uZZ5FSM9Ttw")], &range)
//!         .await;
//!
//!     let totals = RunTotals::from_outcomes(&outcomes);
//!     println!("{}", get_formatter(false).format_outcomes(&outcomes, &totals));
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod error;
pub mod export;
pub mod filters;
pub mod output;
pub mod platform;
pub mod report;
pub mod types;
pub mod youtube;

// Re-export commonly used types
pub use error::{Result, YtstatError};
pub use types::{ChannelId, PlaylistId, ReportVideo, VideoId, VideoRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
