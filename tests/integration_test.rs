//! Integration tests for ytstat
//!
//! These tests drive the full fetch → aggregate → format/export pipeline
//! against an in-memory platform double.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use ytstat::{
    aggregation::{ChannelOutcome, RunTotals},
    error::YtstatError,
    export,
    filters::DateRange,
    output::get_formatter,
    platform::{ChannelInfo, PlaylistPage, VideoPlatform},
    report::ReportRunner,
    types::{ChannelId, PlaylistId, VideoId, VideoRecord},
};

/// One channel configured on the fake platform
struct FakeChannel {
    title: String,
    videos: Vec<VideoRecord>,
}

/// In-memory platform double with configurable page size and statistics
struct FakePlatform {
    channels: HashMap<String, FakeChannel>,
    view_counts: HashMap<VideoId, u64>,
    page_size: usize,
}

impl FakePlatform {
    fn new(page_size: usize) -> Self {
        Self {
            channels: HashMap::new(),
            view_counts: HashMap::new(),
            page_size,
        }
    }

    fn with_channel(mut self, id: &str, title: &str, videos: Vec<VideoRecord>) -> Self {
        self.channels.insert(
            id.to_string(),
            FakeChannel {
                title: title.to_string(),
                videos,
            },
        );
        self
    }

    fn with_views(mut self, id: &str, views: u64) -> Self {
        self.view_counts.insert(VideoId::new(id), views);
        self
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn resolve_channel(&self, channel_id: &ChannelId) -> ytstat::Result<ChannelInfo> {
        let channel = self
            .channels
            .get(channel_id.as_str())
            .ok_or_else(|| YtstatError::ChannelNotFound(channel_id.clone()))?;
        Ok(ChannelInfo {
            title: channel.title.clone(),
            uploads_playlist: PlaylistId::new(format!("UU{}", channel_id.as_str())),
        })
    }

    async fn list_playlist_page(
        &self,
        playlist_id: &PlaylistId,
        page_token: Option<&str>,
    ) -> ytstat::Result<PlaylistPage> {
        let channel_id = playlist_id.as_str().strip_prefix("UU").unwrap();
        let videos = &self.channels[channel_id].videos;

        let start = page_token
            .map(|t| t.parse::<usize>().unwrap())
            .unwrap_or(0);
        let end = (start + self.page_size).min(videos.len());

        Ok(PlaylistPage {
            items: videos[start..end].to_vec(),
            next_page_token: if end < videos.len() {
                Some(end.to_string())
            } else {
                None
            },
        })
    }

    async fn fetch_view_counts(
        &self,
        video_ids: &[VideoId],
    ) -> ytstat::Result<HashMap<VideoId, u64>> {
        Ok(video_ids
            .iter()
            .filter_map(|id| self.view_counts.get(id).map(|&v| (id.clone(), v)))
            .collect())
    }
}

fn video(id: &str, y: i32, m: u32, d: u32) -> VideoRecord {
    VideoRecord {
        video_id: VideoId::new(id),
        title: format!("Video {id}"),
        published_at: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
        video_url: format!("https://www.youtube.com/watch?v={id}"),
    }
}

fn video_at_midnight(id: &str, y: i32, m: u32, d: u32) -> VideoRecord {
    VideoRecord {
        published_at: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        ..video(id, y, m, d)
    }
}

fn range(since: (i32, u32, u32), until: (i32, u32, u32)) -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(since.0, since.1, since.2).unwrap(),
        NaiveDate::from_ymd_opt(until.0, until.1, until.2).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_date_range_scenario() {
    // Videos on 2023-12-31, 2024-01-01 and 2024-06-15 against
    // [2024-01-01, 2024-06-30]: the December one is excluded.
    let platform = FakePlatform::new(50)
        .with_channel(
            "UCmain",
            "Main Channel",
            vec![
                video("jun", 2024, 6, 15),
                video("jan", 2024, 1, 1),
                video("dec", 2023, 12, 31),
            ],
        )
        .with_views("jun", 300)
        .with_views("jan", 100)
        .with_views("dec", 999);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 6, 30)))
        .await;

    let report = outcomes[0].report().expect("expected a report");
    assert_eq!(report.upload_count, 2);
    assert_eq!(report.total_views, 400);
    assert!(report.videos.iter().all(|v| v.video_id.as_str() != "dec"));

    // Newest first
    assert_eq!(report.videos[0].video_id.as_str(), "jun");
}

#[tokio::test]
async fn test_boundary_midnight_retained() {
    let platform = FakePlatform::new(50)
        .with_channel(
            "UCmain",
            "Main Channel",
            vec![
                video_at_midnight("start", 2024, 1, 1),
                video_at_midnight("end", 2024, 6, 30),
            ],
        )
        .with_views("start", 10)
        .with_views("end", 20);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 6, 30)))
        .await;

    assert_eq!(outcomes[0].report().unwrap().upload_count, 2);
}

#[tokio::test]
async fn test_summary_statistics_scenario() {
    // Views {100, 300, 200}: total 600, truncated mean 200, top order
    // 300/200/100.
    let platform = FakePlatform::new(50)
        .with_channel(
            "UCmain",
            "Main Channel",
            vec![
                video("v1", 2024, 1, 10),
                video("v2", 2024, 2, 10),
                video("v3", 2024, 3, 10),
            ],
        )
        .with_views("v1", 100)
        .with_views("v2", 300)
        .with_views("v3", 200);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 12, 31)))
        .await;

    let report = outcomes[0].report().unwrap();
    assert_eq!(report.total_views, 600);
    assert_eq!(report.avg_views, 200);

    let top: Vec<u64> = report.top_videos.iter().map(|v| v.view_count).collect();
    assert_eq!(top, vec![300, 200, 100]);

    // Monthly rows partition the set
    let monthly_uploads: usize = report.monthly.iter().map(|m| m.upload_count).sum();
    assert_eq!(monthly_uploads, report.upload_count);
}

#[tokio::test]
async fn test_pagination_across_many_pages() {
    // 7 videos with a page size of 3 exercises the continuation token loop.
    let videos = (1..=7).map(|i| video(&format!("v{i}"), 2024, 1, i)).collect();
    let mut platform = FakePlatform::new(3).with_channel("UCmain", "Main Channel", videos);
    for i in 1..=7 {
        platform = platform.with_views(&format!("v{i}"), i * 10);
    }

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 12, 31)))
        .await;

    let report = outcomes[0].report().unwrap();
    assert_eq!(report.upload_count, 7);
    assert_eq!(report.total_views, (1..=7).map(|i| i * 10).sum::<u64>());
}

#[tokio::test]
async fn test_missing_statistics_video_dropped() {
    let platform = FakePlatform::new(50)
        .with_channel(
            "UCmain",
            "Main Channel",
            vec![video("known", 2024, 1, 10), video("orphan", 2024, 2, 10)],
        )
        .with_views("known", 500);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 12, 31)))
        .await;

    let report = outcomes[0].report().unwrap();
    assert_eq!(report.upload_count, 1);
    assert_eq!(report.total_views, 500);
}

#[tokio::test]
async fn test_empty_channel_and_failure_isolation() {
    // Three channels: one fails, one is empty in range, one reports.
    // The failure affects neither of the others.
    let platform = FakePlatform::new(50)
        .with_channel("UCempty", "Quiet Channel", vec![video("old", 2020, 5, 1)])
        .with_channel("UCgood", "Good Channel", vec![video("hit", 2024, 3, 1)])
        .with_views("old", 42)
        .with_views("hit", 1000);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(
            &[
                ChannelId::new("UCmissing"),
                ChannelId::new("UCempty"),
                ChannelId::new("UCgood"),
            ],
            &range((2024, 1, 1), (2024, 12, 31)),
        )
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], ChannelOutcome::Failed { .. }));
    assert!(matches!(outcomes[1], ChannelOutcome::Empty { .. }));
    assert_eq!(outcomes[2].report().unwrap().total_views, 1000);

    let totals = RunTotals::from_outcomes(&outcomes);
    assert_eq!((totals.reported, totals.empty, totals.failed), (1, 1, 1));
}

#[tokio::test]
async fn test_json_output_end_to_end() {
    let platform = FakePlatform::new(50)
        .with_channel("UCmain", "Main Channel", vec![video("v1", 2024, 1, 10)])
        .with_views("v1", 250);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(&[ChannelId::new("UCmain")], &range((2024, 1, 1), (2024, 12, 31)))
        .await;
    let totals = RunTotals::from_outcomes(&outcomes);

    let output = get_formatter(true).format_outcomes(&outcomes, &totals);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["channels"][0]["status"], "report");
    assert_eq!(value["channels"][0]["channel_title"], "Main Channel");
    assert_eq!(value["channels"][0]["total_views"], 250);
    assert_eq!(value["totals"]["reported"], 1);
}

#[tokio::test]
async fn test_export_to_disk() {
    let platform = FakePlatform::new(50)
        .with_channel("UCa", "Channel Alpha", vec![video("a1", 2024, 1, 10)])
        .with_channel("UCb", "Channel Beta", vec![video("b1", 2024, 2, 10)])
        .with_views("a1", 100)
        .with_views("b1", 200);

    let runner = ReportRunner::new(platform);
    let outcomes = runner
        .run_channels(
            &[ChannelId::new("UCa"), ChannelId::new("UCb")],
            &range((2024, 1, 1), (2024, 12, 31)),
        )
        .await;

    let reports = outcomes
        .iter()
        .filter_map(ChannelOutcome::report)
        .collect::<Vec<_>>();
    assert_eq!(reports.len(), 2);

    let dir = tempfile::tempdir().unwrap();

    let mut used_names = std::collections::HashSet::new();
    for report in &reports {
        let path = dir
            .path()
            .join(export::unique_export_file_name(&report.channel_title, &mut used_names));
        std::fs::write(&path, export::channel_workbook(report).unwrap()).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[0..4], b"PK\x03\x04");
    }

    let combined = export::combined_workbook(reports.iter().copied()).unwrap();
    let combined_path = dir.path().join("combined_report.xlsx");
    std::fs::write(&combined_path, combined).unwrap();
    assert!(combined_path.exists());
}
