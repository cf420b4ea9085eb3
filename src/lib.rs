/// Trending-Video Collector
///
/// Fetches the trending chart from the YouTube Data API for a set of
/// regions and writes one CSV snapshot per region per run.

pub mod api;
pub mod categories;
pub mod collector;
pub mod config;
pub mod csv;
pub mod extract;
pub mod models;
pub mod runner;

// Re-export main types for easy access
pub use crate::api::{ApiError, TrendingApi, YouTubeClient};
pub use crate::categories::{category_name, UNKNOWN_CATEGORY};
pub use crate::collector::TrendingCollector;
pub use crate::config::Config;
pub use crate::extract::{
    capture_date, FieldExtractor, SchemaVariant, TrendingRow, VariantFields,
};
pub use crate::models::{Video, VideoListResponse};
pub use crate::runner::{RunSummary, Runner};
