//! Turns raw video records into flat, schema-stable rows.

use serde::{Deserialize, Serialize};

use crate::categories::category_name;
use crate::models::Video;

/// Value joined in place of an absent tag list.
pub const NO_TAGS_PLACEHOLDER: &str = "[none]";

/// Sentinel written when a video carries no region restriction.
pub const NO_REGION_RESTRICTION: &str = "None";

/// The two column schemas the collector can emit. Both generations of the
/// dataset exist in the wild, so the choice is configuration, not code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Full schema: duration, subscriber count, engagement rate and region
    /// restriction. Requires `statistics` and `contentDetails`.
    Extended,
    /// Lean schema: definition and paid-placement flag. Requires only
    /// `statistics`.
    Compact,
}

impl SchemaVariant {
    /// `part` parameter sent to the videos endpoint.
    pub fn parts(&self) -> &'static str {
        match self {
            SchemaVariant::Extended => "snippet,statistics,contentDetails",
            SchemaVariant::Compact => {
                "snippet,statistics,contentDetails,paidProductPlacementDetails"
            }
        }
    }

    /// Column header, in exact output order.
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Extended => &[
                "video_id",
                "title",
                "publishedAt",
                "channelId",
                "channelTitle",
                "category",
                "trending_date",
                "tags",
                "duration",
                "view_count",
                "likes",
                "dislikes",
                "comment_count",
                "subscriber_count",
                "engagement_rate",
                "comments_disabled",
                "ratings_disabled",
                "thumbnail_link",
                "description",
                "region_restriction",
            ],
            SchemaVariant::Compact => &[
                "video_id",
                "title",
                "publishedAt",
                "channelId",
                "channelTitle",
                "category",
                "trending_date",
                "tags",
                "view_count",
                "likes",
                "dislikes",
                "comment_count",
                "comments_disabled",
                "ratings_disabled",
                "thumbnail_link",
                "description",
                "definition",
                "has_paid_product_placement",
            ],
        }
    }

    /// Whether this variant needs a per-channel subscriber lookup.
    pub fn needs_subscriber_count(&self) -> bool {
        matches!(self, SchemaVariant::Extended)
    }

    /// Whether a raw record carries the sub-structures this variant
    /// requires. Records failing this are dropped without a row.
    pub fn accepts(&self, video: &Video) -> bool {
        match self {
            SchemaVariant::Extended => {
                video.statistics.is_some() && video.content_details.is_some()
            }
            SchemaVariant::Compact => video.statistics.is_some(),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "extended" => Some(SchemaVariant::Extended),
            "compact" => Some(SchemaVariant::Compact),
            _ => None,
        }
    }
}

/// Variant-specific tail columns of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantFields {
    Extended {
        duration: String,
        subscriber_count: u64,
        engagement_rate: f64,
        region_restriction: String,
    },
    Compact {
        definition: String,
        has_paid_product_placement: bool,
    },
}

/// One flat, immutable output row. Field count and order always match the
/// owning variant's header.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingRow {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
    pub channel_id: String,
    pub channel_title: String,
    pub category: String,
    pub trending_date: String,
    pub tags: String,
    pub view_count: u64,
    pub likes: u64,
    pub comment_count: u64,
    pub comments_disabled: bool,
    pub ratings_disabled: bool,
    pub thumbnail_link: String,
    pub description: String,
    pub extras: VariantFields,
}

impl TrendingRow {
    /// Flatten to strings in header order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.video_id.clone(),
            self.title.clone(),
            self.published_at.clone(),
            self.channel_id.clone(),
            self.channel_title.clone(),
            self.category.clone(),
            self.trending_date.clone(),
            self.tags.clone(),
        ];

        match &self.extras {
            VariantFields::Extended {
                duration,
                subscriber_count,
                engagement_rate,
                region_restriction,
            } => {
                fields.push(duration.clone());
                fields.push(self.view_count.to_string());
                fields.push(self.likes.to_string());
                // Dislikes are no longer exposed by the platform; the column
                // is retained for schema compatibility.
                fields.push("0".to_string());
                fields.push(self.comment_count.to_string());
                fields.push(subscriber_count.to_string());
                fields.push(engagement_rate.to_string());
                fields.push(self.comments_disabled.to_string());
                fields.push(self.ratings_disabled.to_string());
                fields.push(self.thumbnail_link.clone());
                fields.push(self.description.clone());
                fields.push(region_restriction.clone());
            }
            VariantFields::Compact {
                definition,
                has_paid_product_placement,
            } => {
                fields.push(self.view_count.to_string());
                fields.push(self.likes.to_string());
                fields.push("0".to_string());
                fields.push(self.comment_count.to_string());
                fields.push(self.comments_disabled.to_string());
                fields.push(self.ratings_disabled.to_string());
                fields.push(self.thumbnail_link.clone());
                fields.push(self.description.clone());
                fields.push(definition.clone());
                fields.push(has_paid_product_placement.to_string());
            }
        }

        fields
    }
}

/// Capture-date stamp shared by every row and filename of one run.
pub fn capture_date() -> String {
    chrono::Local::now().format("%y.%d.%m").to_string()
}

/// Extracts rows for one schema variant. Every optional field maps to a
/// documented default; no lookup can fail.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    variant: SchemaVariant,
    trending_date: String,
}

impl FieldExtractor {
    pub fn new(variant: SchemaVariant, trending_date: String) -> Self {
        Self {
            variant,
            trending_date,
        }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Extract one row. `subscriber_count` is supplied by the caller (the
    /// collector resolves it through its per-run cache) and is ignored by
    /// the Compact schema. Returns `None` when a required sub-structure is
    /// missing.
    pub fn extract(&self, video: &Video, subscriber_count: u64) -> Option<TrendingRow> {
        if !self.variant.accepts(video) {
            return None;
        }

        // accepts() guarantees statistics; snippet itself may still be
        // absent and then every snippet field takes its default.
        let statistics = video.statistics.as_ref()?;
        let snippet = video.snippet.clone().unwrap_or_default();

        let ratings_disabled = !statistics.has_like_count();
        let comments_disabled = !statistics.has_comment_count();
        let view_count = statistics.view_count();
        let likes = statistics.likes();
        let comment_count = statistics.comment_count();

        let tags = match &snippet.tags {
            Some(list) => list.join("|"),
            None => NO_TAGS_PLACEHOLDER.to_string(),
        };

        let thumbnail_link = snippet
            .thumbnails
            .as_ref()
            .and_then(|t| t.default.as_ref())
            .map(|d| d.url.clone())
            .unwrap_or_default();

        let category = category_name(snippet.category_id.as_deref()).to_string();

        let extras = match self.variant {
            SchemaVariant::Extended => {
                let details = video.content_details.as_ref()?;
                let engagement_rate = if view_count > 0 {
                    (likes + comment_count) as f64 / view_count as f64
                } else {
                    0.0
                };
                let region_restriction = details
                    .region_restriction
                    .as_ref()
                    .and_then(|r| r.allowed.as_ref())
                    .map(|allowed| allowed.join("|"))
                    .unwrap_or_else(|| NO_REGION_RESTRICTION.to_string());

                VariantFields::Extended {
                    duration: details.duration.clone(),
                    subscriber_count,
                    engagement_rate,
                    region_restriction,
                }
            }
            SchemaVariant::Compact => VariantFields::Compact {
                definition: video
                    .content_details
                    .as_ref()
                    .map(|d| d.definition.clone())
                    .unwrap_or_default(),
                has_paid_product_placement: video
                    .paid_product_placement_details
                    .as_ref()
                    .map(|p| p.has_paid_product_placement)
                    .unwrap_or(false),
            },
        };

        Some(TrendingRow {
            video_id: video.id.clone(),
            title: snippet.title,
            published_at: snippet.published_at,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            category,
            trending_date: self.trending_date.clone(),
            tags,
            view_count,
            likes,
            comment_count,
            comments_disabled,
            ratings_disabled,
            thumbnail_link,
            description: snippet.description,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Video;

    fn video_from_json(value: serde_json::Value) -> Video {
        serde_json::from_value(value).unwrap()
    }

    fn extended_extractor() -> FieldExtractor {
        FieldExtractor::new(SchemaVariant::Extended, "24.05.11".to_string())
    }

    fn full_video() -> serde_json::Value {
        serde_json::json!({
            "id": "vid123",
            "snippet": {
                "title": "A Title",
                "publishedAt": "2024-11-04T10:00:00Z",
                "channelId": "chan1",
                "channelTitle": "Channel One",
                "categoryId": "10",
                "tags": ["a", "b", "c"],
                "thumbnails": {"default": {"url": "https://img/default.jpg"}},
                "description": "hello"
            },
            "statistics": {
                "viewCount": "100",
                "likeCount": "10",
                "commentCount": "5"
            },
            "contentDetails": {
                "duration": "PT4M13S",
                "definition": "hd"
            }
        })
    }

    #[test]
    fn test_missing_statistics_yields_no_row() {
        let mut value = full_video();
        value.as_object_mut().unwrap().remove("statistics");
        let video = video_from_json(value);

        assert!(extended_extractor().extract(&video, 0).is_none());
        let compact = FieldExtractor::new(SchemaVariant::Compact, "24.05.11".to_string());
        assert!(compact.extract(&video, 0).is_none());
    }

    #[test]
    fn test_extended_requires_content_details() {
        let mut value = full_video();
        value.as_object_mut().unwrap().remove("contentDetails");
        let video = video_from_json(value);

        assert!(extended_extractor().extract(&video, 0).is_none());

        // Compact drops the requirement and falls back to defaults.
        let compact = FieldExtractor::new(SchemaVariant::Compact, "24.05.11".to_string());
        let row = compact.extract(&video, 0).unwrap();
        match row.extras {
            VariantFields::Compact { definition, .. } => assert_eq!(definition, ""),
            _ => panic!("expected compact extras"),
        }
    }

    #[test]
    fn test_absent_like_count_sets_flag_and_zero() {
        let mut value = full_video();
        value["statistics"]
            .as_object_mut()
            .unwrap()
            .remove("likeCount");
        let video = video_from_json(value);

        let row = extended_extractor().extract(&video, 0).unwrap();
        assert!(row.ratings_disabled);
        assert_eq!(row.likes, 0);
        assert!(!row.comments_disabled);
    }

    #[test]
    fn test_absent_comment_count_sets_flag_and_zero() {
        let mut value = full_video();
        value["statistics"]
            .as_object_mut()
            .unwrap()
            .remove("commentCount");
        let video = video_from_json(value);

        let row = extended_extractor().extract(&video, 0).unwrap();
        assert!(row.comments_disabled);
        assert_eq!(row.comment_count, 0);
        assert!(!row.ratings_disabled);
    }

    #[test]
    fn test_category_resolution() {
        let row = extended_extractor()
            .extract(&video_from_json(full_video()), 0)
            .unwrap();
        assert_eq!(row.category, "Music");

        let mut value = full_video();
        value["snippet"]["categoryId"] = serde_json::json!("999");
        let row = extended_extractor()
            .extract(&video_from_json(value), 0)
            .unwrap();
        assert_eq!(row.category, "Unknown");

        let mut value = full_video();
        value["snippet"].as_object_mut().unwrap().remove("categoryId");
        let row = extended_extractor()
            .extract(&video_from_json(value), 0)
            .unwrap();
        assert_eq!(row.category, "Unknown");
    }

    #[test]
    fn test_engagement_rate() {
        let row = extended_extractor()
            .extract(&video_from_json(full_video()), 0)
            .unwrap();
        match row.extras {
            VariantFields::Extended {
                engagement_rate, ..
            } => assert_eq!(engagement_rate, 0.15),
            _ => panic!("expected extended extras"),
        }

        let mut value = full_video();
        value["statistics"]["viewCount"] = serde_json::json!("0");
        let row = extended_extractor()
            .extract(&video_from_json(value), 0)
            .unwrap();
        match row.extras {
            VariantFields::Extended {
                engagement_rate, ..
            } => assert_eq!(engagement_rate, 0.0),
            _ => panic!("expected extended extras"),
        }
    }

    #[test]
    fn test_tag_flattening() {
        let row = extended_extractor()
            .extract(&video_from_json(full_video()), 0)
            .unwrap();
        assert_eq!(row.tags, "a|b|c");

        let mut value = full_video();
        value["snippet"].as_object_mut().unwrap().remove("tags");
        let row = extended_extractor()
            .extract(&video_from_json(value), 0)
            .unwrap();
        assert_eq!(row.tags, NO_TAGS_PLACEHOLDER);
    }

    #[test]
    fn test_missing_snippet_defaults_everything() {
        let video = video_from_json(serde_json::json!({
            "id": "bare",
            "statistics": {"viewCount": "1"},
            "contentDetails": {}
        }));

        let row = extended_extractor().extract(&video, 7).unwrap();
        assert_eq!(row.title, "");
        assert_eq!(row.channel_id, "");
        assert_eq!(row.category, "Unknown");
        assert_eq!(row.thumbnail_link, "");
        assert_eq!(row.tags, NO_TAGS_PLACEHOLDER);
        match row.extras {
            VariantFields::Extended {
                subscriber_count,
                region_restriction,
                ..
            } => {
                assert_eq!(subscriber_count, 7);
                assert_eq!(region_restriction, NO_REGION_RESTRICTION);
            }
            _ => panic!("expected extended extras"),
        }
    }

    #[test]
    fn test_row_arity_matches_header_for_both_variants() {
        for variant in [SchemaVariant::Extended, SchemaVariant::Compact] {
            let extractor = FieldExtractor::new(variant, "24.05.11".to_string());
            let row = extractor
                .extract(&video_from_json(full_video()), 0)
                .unwrap();
            assert_eq!(row.to_fields().len(), variant.header().len());
        }
    }

    #[test]
    fn test_compact_paid_placement_flag() {
        let mut value = full_video();
        value["paidProductPlacementDetails"] =
            serde_json::json!({"hasPaidProductPlacement": true});
        let compact = FieldExtractor::new(SchemaVariant::Compact, "24.05.11".to_string());
        let row = compact.extract(&video_from_json(value), 0).unwrap();
        match row.extras {
            VariantFields::Compact {
                has_paid_product_placement,
                definition,
            } => {
                assert!(has_paid_product_placement);
                assert_eq!(definition, "hd");
            }
            _ => panic!("expected compact extras"),
        }
    }

    #[test]
    fn test_capture_date_is_year_day_month() {
        use chrono::Datelike;

        // Sample the clock on both sides of the call so a midnight rollover
        // cannot produce a false failure.
        let stamp_for = |now: chrono::DateTime<chrono::Local>| {
            format!(
                "{:02}.{:02}.{:02}",
                now.year() % 100,
                now.day(),
                now.month()
            )
        };
        let before = stamp_for(chrono::Local::now());
        let stamp = capture_date();
        let after = stamp_for(chrono::Local::now());

        assert!(stamp == before || stamp == after, "unexpected stamp {}", stamp);

        let parts: Vec<&str> = stamp.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!(
            SchemaVariant::parse("extended"),
            Some(SchemaVariant::Extended)
        );
        assert_eq!(SchemaVariant::parse("compact"), Some(SchemaVariant::Compact));
        assert_eq!(SchemaVariant::parse("other"), None);
    }
}
