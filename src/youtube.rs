//! YouTube Data API v3 client
//!
//! Production implementation of [`VideoPlatform`] over HTTPS. Three logical
//! calls are used: `channels.list` for metadata, `playlistItems.list` for
//! the paginated uploads listing, and `videos.list` for batched statistics.
//!
//! The client carries a request timeout but performs no retries; any network
//! or API error propagates to the per-channel boundary in
//! [`crate::report`].

use crate::error::{Result, YtstatError};
use crate::platform::{ChannelInfo, MAX_BATCH_SIZE, PlaylistPage, VideoPlatform};
use crate::types::{ChannelId, PlaylistId, VideoId, VideoRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Base URL of the YouTube Data API
const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Request timeout for all API calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    items: Option<Vec<ChannelResource>>,
}

#[derive(Debug, Deserialize)]
struct ChannelResource {
    snippet: ChannelSnippet,
    #[serde(rename = "contentDetails")]
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemListResponse {
    items: Option<Vec<PlaylistItemResource>>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemSnippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
    #[serde(rename = "resourceId")]
    resource_id: ResourceId,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium resolution preferred, falling back to whatever exists
    fn best_url(&self) -> String {
        self.medium
            .as_ref()
            .or(self.high.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Option<Vec<VideoResource>>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

// --- Client ---

/// YouTube Data API client
pub struct YouTubeApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeApi {
    /// Create a new client for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue a GET request and decode the JSON body, classifying failures
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(YtstatError::Auth {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(YtstatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeApi {
    async fn resolve_channel(&self, channel_id: &ChannelId) -> Result<ChannelInfo> {
        let response: ChannelListResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet,contentDetails"),
                    ("id", channel_id.as_str()),
                    ("key", self.api_key.as_str()),
                ],
            )
            .await?;

        // An unknown channel ID comes back as an empty item list, not an
        // HTTP error. Surface that explicitly instead of indexing into it.
        let resource = response
            .items
            .and_then(|items| items.into_iter().next())
            .ok_or_else(|| YtstatError::ChannelNotFound(channel_id.clone()))?;

        Ok(ChannelInfo {
            title: resource.snippet.title,
            uploads_playlist: PlaylistId::new(resource.content_details.related_playlists.uploads),
        })
    }

    async fn list_playlist_page(
        &self,
        playlist_id: &PlaylistId,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage> {
        let max_results = MAX_BATCH_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id.as_str()),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: PlaylistItemListResponse =
            self.get_json("playlistItems", &query).await?;

        let items = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let snippet = item.snippet;
                let video_id = VideoId::new(snippet.resource_id.video_id);
                let video_url = video_id.watch_url();
                VideoRecord {
                    video_id,
                    title: snippet.title,
                    published_at: snippet.published_at.naive_utc(),
                    thumbnail_url: snippet.thumbnails.best_url(),
                    video_url,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            playlist = %playlist_id,
            items = items.len(),
            has_next = response.next_page_token.is_some(),
            "fetched playlist page"
        );

        Ok(PlaylistPage {
            items,
            next_page_token: response.next_page_token,
        })
    }

    async fn fetch_view_counts(&self, video_ids: &[VideoId]) -> Result<HashMap<VideoId, u64>> {
        let mut counts = HashMap::with_capacity(video_ids.len());

        for batch in video_ids.chunks(MAX_BATCH_SIZE) {
            let ids = batch
                .iter()
                .map(VideoId::as_str)
                .collect::<Vec<_>>()
                .join(",");

            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[
                        ("part", "statistics"),
                        ("id", ids.as_str()),
                        ("key", self.api_key.as_str()),
                    ],
                )
                .await?;

            for resource in response.items.unwrap_or_default() {
                // viewCount arrives as a decimal string; a present item
                // with missing statistics counts as zero views.
                let views = resource
                    .statistics
                    .and_then(|s| s.view_count)
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                counts.insert(VideoId::new(resource.id), views);
            }

            debug!(batch = batch.len(), "fetched statistics batch");
        }

        Ok(counts)
    }
}
