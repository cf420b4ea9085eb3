//! Static mapping from the API's numeric `categoryId` to a readable name.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Name substituted for unknown or missing category ids.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Known category assignments, including the long-tail ids the API still
/// reports on older uploads.
const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("1", "Film & Animation"),
    ("2", "Autos & Vehicles"),
    ("10", "Music"),
    ("15", "Pets & Animals"),
    ("17", "Sports"),
    ("18", "Short Movies"),
    ("19", "Travel & Events"),
    ("20", "Gaming"),
    ("21", "Videoblogging"),
    ("22", "People & Blogs"),
    ("23", "Comedy"),
    ("24", "Entertainment"),
    ("25", "News & Politics"),
    ("26", "Howto & Style"),
    ("27", "Education"),
    ("28", "Science & Technology"),
    ("29", "Nonprofits & Activism"),
    ("30", "Movies"),
    ("31", "Anime/Animation"),
    ("32", "Action/Adventure"),
    ("33", "Classics"),
    ("34", "Comedy"),
    ("35", "Documentary"),
    ("36", "Drama"),
    ("37", "Family"),
    ("38", "Foreign"),
    ("39", "Horror"),
    ("40", "Sci-Fi/Fantasy"),
    ("41", "Thriller"),
    ("42", "Shorts"),
    ("43", "Shows"),
    ("44", "Trailers"),
];

fn category_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| CATEGORY_TABLE.iter().copied().collect())
}

/// Resolve a raw `categoryId` to its display name.
pub fn category_name(category_id: Option<&str>) -> &'static str {
    category_id
        .and_then(|id| category_map().get(id).copied())
        .unwrap_or(UNKNOWN_CATEGORY)
}
