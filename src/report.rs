//! Per-channel report runner
//!
//! Drives the fetch → aggregate pipeline for a list of channels. Channels
//! are processed fully one at a time; any error raised while processing one
//! channel is caught here and converted into
//! [`ChannelOutcome::Failed`], so a bad channel ID or a flaky API response
//! never aborts the remaining channels. The returned outcome vector is the
//! explicit result collection: one entry per requested channel, in input
//! order.

use crate::aggregation::{ChannelOutcome, build_channel_report};
use crate::error::Result;
use crate::filters::DateRange;
use crate::platform::VideoPlatform;
use crate::types::{ChannelId, PlaylistId, VideoRecord};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Orchestrates fetching and aggregation across channels
pub struct ReportRunner<P> {
    platform: P,
    show_progress: bool,
}

impl<P: VideoPlatform> ReportRunner<P> {
    /// Create a new runner over the given platform collaborator
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            show_progress: false,
        }
    }

    /// Enable or disable progress spinners
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process every channel sequentially, one outcome per channel
    pub async fn run_channels(
        &self,
        channel_ids: &[ChannelId],
        range: &DateRange,
    ) -> Vec<ChannelOutcome> {
        let mut outcomes = Vec::with_capacity(channel_ids.len());

        for channel_id in channel_ids {
            let outcome = match self.process_channel(channel_id, range).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(channel = %channel_id, error = %e, "channel processing failed");
                    ChannelOutcome::Failed {
                        channel_id: channel_id.clone(),
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Fetch and aggregate a single channel
    async fn process_channel(
        &self,
        channel_id: &ChannelId,
        range: &DateRange,
    ) -> Result<ChannelOutcome> {
        info!(channel = %channel_id, "resolving channel");
        let info = self.platform.resolve_channel(channel_id).await?;

        let videos = self.collect_videos(&info.uploads_playlist).await?;
        info!(
            channel = %info.title,
            videos = videos.len(),
            "fetched uploads listing"
        );

        // Only the in-range videos need a statistics lookup; out-of-range
        // IDs would be dropped by the aggregation filter anyway.
        let in_range_ids = videos
            .iter()
            .filter(|v| range.contains(&v.published_at))
            .map(|v| v.video_id.clone())
            .collect::<Vec<_>>();

        if in_range_ids.is_empty() {
            return Ok(ChannelOutcome::Empty {
                channel_id: channel_id.clone(),
                channel_title: info.title,
            });
        }

        let view_counts = self.platform.fetch_view_counts(&in_range_ids).await?;
        info!(
            channel = %info.title,
            resolved = view_counts.len(),
            requested = in_range_ids.len(),
            "fetched view counts"
        );

        Ok(build_channel_report(
            channel_id.clone(),
            info.title,
            videos,
            &view_counts,
            range,
        ))
    }

    /// Materialize the full uploads listing via cursor-based pagination
    ///
    /// Follows the opaque continuation token until the platform stops
    /// returning one. Order is whatever the platform yields; no sort
    /// happens at this stage.
    async fn collect_videos(&self, playlist_id: &PlaylistId) -> Result<Vec<VideoRecord>> {
        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} videos fetched")
                    .unwrap(),
            );
            pb.set_message("Fetching uploads");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .platform
                .list_playlist_page(playlist_id, page_token.as_deref())
                .await?;
            videos.extend(page.items);

            if let Some(ref pb) = progress {
                pb.set_position(videos.len() as u64);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Fetched {} videos", videos.len()));
        }

        Ok(videos)
    }
}
