//! YouTube Data API v3 client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::extract::SchemaVariant;
use crate::models::{ChannelListResponse, VideoListResponse};

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";
const CHANNELS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/channels";

/// Page size requested from the trending chart.
pub const PAGE_SIZE: &str = "50";

/// Failures at the API seam. Only `RateLimited` is allowed to travel to the
/// top of the run; everything else is absorbed by the collector.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("rate limited by the API (HTTP 429), no further requests will be made")]
    RateLimited,

    #[error("API returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The two remote operations the collector depends on. A trait seam so the
/// pagination and orchestration logic is testable without network access.
#[async_trait]
pub trait TrendingApi: Send + Sync {
    /// Fetch one page of the trending chart for a region, optionally
    /// continuing from a previous page's token.
    async fn fetch_trending_page(
        &self,
        region: &str,
        page_token: Option<&str>,
    ) -> Result<VideoListResponse, ApiError>;

    /// Fetch a channel's subscriber count.
    async fn fetch_subscriber_count(&self, channel_id: &str) -> Result<u64, ApiError>;
}

/// Live client against the public API.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    variant: SchemaVariant,
}

impl YouTubeClient {
    pub fn new(
        api_key: String,
        variant: SchemaVariant,
        timeout_seconds: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            variant,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Status { status, body })
            }
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl TrendingApi for YouTubeClient {
    async fn fetch_trending_page(
        &self,
        region: &str,
        page_token: Option<&str>,
    ) -> Result<VideoListResponse, ApiError> {
        let mut params = vec![
            ("part", self.variant.parts()),
            ("chart", "mostPopular"),
            ("regionCode", region),
            ("maxResults", PAGE_SIZE),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        debug!(
            "Fetching trending page for {} (token: {:?})",
            region, page_token
        );

        let response = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&params)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        Ok(response.json().await?)
    }

    async fn fetch_subscriber_count(&self, channel_id: &str) -> Result<u64, ApiError> {
        let params = [
            ("part", "statistics"),
            ("id", channel_id),
            ("key", self.api_key.as_str()),
        ];

        debug!("Fetching subscriber count for channel {}", channel_id);

        let response = self
            .client
            .get(CHANNELS_ENDPOINT)
            .query(&params)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: ChannelListResponse = response.json().await?;
        Ok(body.subscriber_count())
    }
}
