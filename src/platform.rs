//! Video platform abstraction
//!
//! The fetching layer is modeled as an injected collaborator with exactly
//! the capability set the reports need: channel metadata lookup, paginated
//! playlist-item listing, and batched video-statistics lookup. The
//! production implementation is [`crate::youtube::YouTubeApi`]; integration
//! tests substitute an in-memory double.

use crate::error::Result;
use crate::types::{ChannelId, PlaylistId, VideoId, VideoRecord};
use async_trait::async_trait;
use std::collections::HashMap;

/// Platform-imposed page size and statistics batch limit
pub const MAX_BATCH_SIZE: usize = 50;

/// Resolved channel metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Display name of the channel
    pub title: String,
    /// Playlist holding every upload of the channel
    pub uploads_playlist: PlaylistId,
}

/// One page of playlist items
///
/// `next_page_token` is the opaque continuation cursor; `None` means the
/// listing is exhausted.
#[derive(Debug, Clone, Default)]
pub struct PlaylistPage {
    /// Video records on this page, in platform order, views unset
    pub items: Vec<VideoRecord>,
    /// Cursor for the next page, if any
    pub next_page_token: Option<String>,
}

/// Capability set required from the external video platform
///
/// Each method issues one logical API call. Errors propagate untouched to
/// the per-channel boundary; no retries happen at this layer.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Resolve a channel's display name and uploads playlist
    ///
    /// Fails with [`crate::error::YtstatError::ChannelNotFound`] when the
    /// platform returns no matching channel.
    async fn resolve_channel(&self, channel_id: &ChannelId) -> Result<ChannelInfo>;

    /// Fetch one page of up to [`MAX_BATCH_SIZE`] playlist items
    async fn list_playlist_page(
        &self,
        playlist_id: &PlaylistId,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage>;

    /// Fetch view counts for the given videos
    ///
    /// Implementations batch the IDs into groups of at most
    /// [`MAX_BATCH_SIZE`] and merge the results. A video present in the
    /// response but missing a view count maps to 0; a video absent from the
    /// response is simply absent from the map.
    async fn fetch_view_counts(&self, video_ids: &[VideoId]) -> Result<HashMap<VideoId, u64>>;
}
