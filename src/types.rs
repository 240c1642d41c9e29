//! Core domain types for ytstat
//!
//! This module contains the fundamental types used throughout the ytstat
//! library. These types provide strong typing for common concepts like
//! channel IDs, video IDs, playlist IDs, and the video records produced by
//! the fetching layer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed YouTube channel ID wrapper
///
/// This ensures channel IDs are consistently handled throughout the
/// application and cannot be confused with video or playlist IDs.
///
/// # Examples
/// ```
/// use ytstat::types::ChannelId;
///
/// let channel = ChannelId::new("UC_x5XG1OV2P6uZZ5FSM9Ttw");
/// assert_eq!(channel.as_str(), "UC_x5XG1OV2P6uZZ5FSM9Ttw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a new ChannelId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed video ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Create a new VideoId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed uploads playlist ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a new PlaylistId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single uploaded video as produced by the fetching layer
///
/// `published_at` is normalized to a timezone-naive UTC timestamp before any
/// date comparison happens. View counts live in a separate statistics lookup
/// and are only attached during the join step (see [`crate::aggregation`]).
///
/// # Examples
/// ```
/// use ytstat::types::{VideoId, VideoRecord};
/// use chrono::NaiveDate;
///
/// let video = VideoRecord {
///     video_id: VideoId::new("dQw4w9WgXcQ"),
///     title: "A video".to_string(),
///     published_at: NaiveDate::from_ymd_opt(2024, 1, 15)
///         .unwrap()
///         .and_hms_opt(10, 30, 0)
///         .unwrap(),
///     thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/mqdefault.jpg".to_string(),
///     video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
/// };
/// assert_eq!(video.month_key(), "2024-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Unique video identifier
    pub video_id: VideoId,
    /// Video title
    pub title: String,
    /// Upload timestamp, naive UTC
    pub published_at: NaiveDateTime,
    /// Medium-resolution thumbnail URL
    pub thumbnail_url: String,
    /// Watch URL
    pub video_url: String,
}

impl VideoRecord {
    /// Calendar month this video was published in, formatted as YYYY-MM
    pub fn month_key(&self) -> String {
        self.published_at.format("%Y-%m").to_string()
    }
}

/// A video record enriched with its resolved view count
///
/// Produced by the join step. Every video inside a report carries a resolved
/// count, so the field is not optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVideo {
    /// Unique video identifier
    pub video_id: VideoId,
    /// Video title
    pub title: String,
    /// Upload timestamp, naive UTC
    pub published_at: NaiveDateTime,
    /// Medium-resolution thumbnail URL
    pub thumbnail_url: String,
    /// Watch URL
    pub video_url: String,
    /// Resolved view count
    pub view_count: u64,
}

impl ReportVideo {
    /// Join a fetched record with its view count
    pub fn from_record(record: VideoRecord, view_count: u64) -> Self {
        Self {
            video_id: record.video_id,
            title: record.title,
            published_at: record.published_at,
            thumbnail_url: record.thumbnail_url,
            video_url: record.video_url,
            view_count,
        }
    }

    /// Calendar month this video was published in, formatted as YYYY-MM
    pub fn month_key(&self) -> String {
        self.published_at.format("%Y-%m").to_string()
    }
}
