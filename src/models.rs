use serde::Deserialize;

/// One page of the `videos: list` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
    pub next_page_token: Option<String>,
}

/// A raw video record as returned in the `items` array. Every sub-structure
/// may be absent; absence is handled downstream, never at parse time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<Statistics>,
    pub content_details: Option<ContentDetails>,
    pub paid_product_placement_details: Option<PaidProductPlacementDetails>,
}

impl Video {
    /// Channel id from the snippet, empty when either is missing.
    pub fn channel_id(&self) -> &str {
        self.snippet
            .as_ref()
            .map(|s| s.channel_id.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnails: Option<Thumbnails>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// Engagement counters. The API serializes these as decimal strings, and
/// omits `likeCount`/`commentCount` entirely when ratings or comments are
/// disabled for the video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

impl Statistics {
    pub fn view_count(&self) -> u64 {
        parse_count(self.view_count.as_deref())
    }

    pub fn likes(&self) -> u64 {
        parse_count(self.like_count.as_deref())
    }

    pub fn comment_count(&self) -> u64 {
        parse_count(self.comment_count.as_deref())
    }

    pub fn has_like_count(&self) -> bool {
        self.like_count.is_some()
    }

    pub fn has_comment_count(&self) -> bool {
        self.comment_count.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub definition: String,
    pub region_restriction: Option<RegionRestriction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionRestriction {
    pub allowed: Option<Vec<String>>,
    pub blocked: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidProductPlacementDetails {
    #[serde(default)]
    pub has_paid_product_placement: bool,
}

/// One page of the `channels: list` endpoint, used for subscriber lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
}

impl ChannelListResponse {
    /// Subscriber count of the first listed channel, 0 when anything along
    /// the path is missing or unparsable.
    pub fn subscriber_count(&self) -> u64 {
        self.items
            .first()
            .and_then(|c| c.statistics.as_ref())
            .map(|s| parse_count(s.subscriber_count.as_deref()))
            .unwrap_or(0)
    }
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}
