// Common data models for the pipeline

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::Date;

/// Opaque link to one playable video, either given directly or produced
/// by expanding a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    url: String,
}

impl VideoReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Read-only metadata view for one video, valid for one request
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub publish_date: Option<Date>,
    pub view_count: u64,
    pub author: String,
    pub thumbnail_url: String,
}

/// One downloadable rendition of a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// yt-dlp format ID (e.g., "18", "22")
    pub format_id: String,
    /// File extension (mp4, webm)
    pub ext: String,
    /// Video height in pixels
    pub height: Option<u32>,
    /// File size in bytes, when yt-dlp reports one
    pub filesize: Option<u64>,
}

impl StreamDescriptor {
    /// Resolution label used for quality-tier matching (e.g., "480p")
    pub fn resolution_label(&self) -> Option<String> {
        self.height.map(|h| format!("{}p", h))
    }
}

/// A fetched video file plus its caption, scoped to one delivery.
/// The file must be deleted on every exit path.
#[derive(Debug)]
pub struct DownloadedAsset {
    pub local_path: PathBuf,
    pub caption: String,
}
