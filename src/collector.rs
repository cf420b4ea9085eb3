//! Per-region pagination and row accumulation.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::api::{ApiError, TrendingApi};
use crate::extract::{FieldExtractor, SchemaVariant, TrendingRow};

/// Drives the trending endpoint for one region at a time, feeding every raw
/// item through the extractor. Rows come back in API response order, which
/// is the chart's rank order and is never re-sorted.
pub struct TrendingCollector<A> {
    api: A,
    extractor: FieldExtractor,
    // Per-run memo: one subscriber lookup per distinct channel, failures
    // cached as 0 so a dead channel is not retried.
    subscriber_counts: HashMap<String, u64>,
}

impl<A: TrendingApi> TrendingCollector<A> {
    pub fn new(api: A, variant: SchemaVariant, trending_date: String) -> Self {
        Self {
            api,
            extractor: FieldExtractor::new(variant, trending_date),
            subscriber_counts: HashMap::new(),
        }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.extractor.variant()
    }

    /// Collect every trending row for one region. Follows the continuation
    /// token until the API stops supplying one. A non-429 fetch failure ends
    /// the region early with whatever was gathered; a 429 is returned to the
    /// caller and must halt the whole run.
    pub async fn collect_region(&mut self, region: &str) -> Result<Vec<TrendingRow>, ApiError> {
        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_number = 0u32;

        loop {
            let page = match self
                .api
                .fetch_trending_page(region, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(ApiError::RateLimited) => return Err(ApiError::RateLimited),
                Err(e) => {
                    warn!("Fetch failed for {} page {}: {}", region, page_number, e);
                    break;
                }
            };
            page_number += 1;
            debug!(
                "Page {} for {}: {} items",
                page_number,
                region,
                page.items.len()
            );

            for video in &page.items {
                if !self.variant().accepts(video) {
                    continue;
                }

                let subscriber_count = if self.variant().needs_subscriber_count() {
                    self.subscriber_count_for(video.channel_id()).await?
                } else {
                    0
                };

                if let Some(row) = self.extractor.extract(video, subscriber_count) {
                    rows.push(row);
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("📊 Collected {} rows for {}", rows.len(), region);
        Ok(rows)
    }

    async fn subscriber_count_for(&mut self, channel_id: &str) -> Result<u64, ApiError> {
        if channel_id.is_empty() {
            return Ok(0);
        }
        if let Some(&count) = self.subscriber_counts.get(channel_id) {
            return Ok(count);
        }

        let count = match self.api.fetch_subscriber_count(channel_id).await {
            Ok(count) => count,
            Err(ApiError::RateLimited) => return Err(ApiError::RateLimited),
            Err(e) => {
                warn!("Subscriber lookup failed for {}: {}", channel_id, e);
                0
            }
        };

        self.subscriber_counts.insert(channel_id.to_string(), count);
        Ok(count)
    }
}
