/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the HTTP layer and the UI layer. Everything here mirrors what the
/// gallery backend returns; the client never mutates a wallpaper, it only
/// re-requests fresh copies.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Wallpaper catalog partition (not the visiting machine's real form factor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Mobile,
    Pc,
}

impl DeviceType {
    pub const ALL: [DeviceType; 2] = [DeviceType::Mobile, DeviceType::Pc];

    /// Name used in query strings and upload forms
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Pc => "pc",
        }
    }

    /// Parse the wire name; anything else is rejected
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "mobile" => Some(DeviceType::Mobile),
            "pc" => Some(DeviceType::Pc),
            _ => None,
        }
    }

    /// Short human label ("Mobile" / "PC")
    pub fn label(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Pc => "PC",
        }
    }

    /// Upper-case badge text shown on cards
    pub fn badge(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "MOBILE",
            DeviceType::Pc => "PC",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "📱",
            DeviceType::Pc => "💻",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile Wallpapers",
            DeviceType::Pc => "PC Wallpapers",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Optimized for smartphones and tablets",
            DeviceType::Pc => "Optimized for desktops and laptops",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wallpaper identifier as the server stores it.
///
/// Older catalogs used numeric ids, newer ones use UUID strings. The id is
/// echoed back to the tracking endpoint in exactly the shape it arrived in,
/// otherwise the server's equality check would never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WallpaperId {
    Text(String),
    Number(i64),
}

impl fmt::Display for WallpaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallpaperId::Text(id) => f.write_str(id),
            WallpaperId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// Represents a single wallpaper in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallpaper {
    /// Server-assigned identifier
    pub id: WallpaperId,
    /// Stored filename (e.g., "3f2a...9c.jpg"), also the static asset name
    pub filename: String,
    /// Display title
    pub title: String,
    /// Free-form category as entered on upload
    pub category: String,
    /// Catalog partition; entries written before partitions existed are mobile
    #[serde(default)]
    pub device_type: DeviceType,
    /// Total tracked downloads (missing on fresh uploads)
    #[serde(default)]
    pub download_count: Option<u64>,
    /// ISO-8601 upload timestamp, when the server recorded one
    #[serde(default)]
    pub upload_date: Option<String>,
}

impl Wallpaper {
    /// Download count for display; absent counts read as zero
    pub fn downloads(&self) -> u64 {
        self.download_count.unwrap_or(0)
    }
}

/// Aggregate download statistics for one device partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_downloads: u64,
    pub total_wallpapers: u64,
    pub downloads_24h: u64,
    /// Top categories by download count
    #[serde(default)]
    pub popular_categories: BTreeMap<String, u64>,
}

impl Stats {
    /// Popular categories ordered by downloads (descending), ties by name
    pub fn ranked_categories(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .popular_categories
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Kind of event in the recent activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Download,
    Upload,
}

/// Filter for the activity endpoint's `type` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Downloads,
    Uploads,
}

impl ActivityFilter {
    pub const ALL: [ActivityFilter; 3] = [
        ActivityFilter::All,
        ActivityFilter::Downloads,
        ActivityFilter::Uploads,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityFilter::All => "all",
            ActivityFilter::Downloads => "downloads",
            ActivityFilter::Uploads => "uploads",
        }
    }
}

impl fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityFilter::All => "All activity",
            ActivityFilter::Downloads => "Downloads",
            ActivityFilter::Uploads => "Uploads",
        })
    }
}

/// One row of the recent activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub filename: String,
    /// Server-local ISO-8601 timestamp
    pub date: String,
}

impl ActivityEntry {
    /// Human-friendly timestamp; falls back to the raw string
    pub fn display_date(&self) -> String {
        match self.date.parse::<NaiveDateTime>() {
            Ok(date) => date.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// Distinct categories present in a wallpaper set, sorted ascending (case-sensitive)
pub fn distinct_categories(wallpapers: &[Wallpaper]) -> Vec<String> {
    wallpapers
        .iter()
        .map(|w| w.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) fn sample_wallpaper(id: &str, category: &str, device_type: DeviceType) -> Wallpaper {
    Wallpaper {
        id: WallpaperId::Text(id.to_string()),
        filename: format!("{}.jpg", id),
        title: format!("Wallpaper {}", id),
        category: category.to_string(),
        device_type,
        download_count: None,
        upload_date: None,
    }
}
