// Error types for the download pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum DownloadError {
    /// Malformed or unreachable video/playlist link
    InvalidLink(String),

    /// Metadata could not be fetched for a video
    MetadataFetch(String),

    /// Thumbnail GET failed or returned a non-success status.
    /// Recovered locally with the fallback image, never reported to the chat.
    ThumbnailFetch(String),

    /// The video has no downloadable stream at all
    NoStreams(String),

    /// Stream download failed (network, disk, yt-dlp exit)
    Fetch(String),

    /// Chat transport rejected the outbound message
    Delivery(String),

    /// Temp asset could not be removed. Best effort, logged only.
    Cleanup(String),

    /// yt-dlp binary not found in system
    ToolNotFound(String),

    /// A host call exceeded its per-item timeout
    Timeout(String),

    /// Failed to parse yt-dlp JSON output
    Parse(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLink(link) => write!(f, "Invalid link: {}", link),
            Self::MetadataFetch(msg) => write!(f, "Could not fetch video info: {}", msg),
            Self::ThumbnailFetch(msg) => write!(f, "Thumbnail fetch failed: {}", msg),
            Self::NoStreams(url) => write!(f, "No downloadable stream for: {}", url),
            Self::Fetch(msg) => write!(f, "Download failed: {}", msg),
            Self::Delivery(msg) => write!(f, "Could not send message: {}", msg),
            Self::Cleanup(msg) => write!(f, "Cleanup failed: {}", msg),
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::Timeout(msg) => write!(f, "Timed out: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

impl DownloadError {
    /// Whether the error is recovered inside the pipeline without a
    /// user-visible report (fallback image substituted instead).
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::ThumbnailFetch(_) | Self::Cleanup(_))
    }
}

// Classify raw yt-dlp stderr into the taxonomy
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        if s.contains("timeout") || s.contains("timed out") {
            return Self::Timeout(s);
        }

        if s.contains("not found") || s.contains("No such file") || s.contains("command not found")
        {
            return Self::ToolNotFound(s);
        }

        if s.contains("Unsupported URL")
            || s.contains("is not a valid URL")
            || s.contains("Invalid URL")
        {
            return Self::InvalidLink(s);
        }

        if s.contains("Requested format is not available") {
            return Self::NoStreams(s);
        }

        if s.contains("JSON") || s.contains("parse") {
            return Self::Parse(s);
        }

        // Unavailable, private, deleted, geo-blocked videos all surface here
        Self::MetadataFetch(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unsupported_url() {
        let err = DownloadError::from("ERROR: Unsupported URL: httpx://nope".to_string());
        assert!(matches!(err, DownloadError::InvalidLink(_)));
    }

    #[test]
    fn classifies_timeout() {
        let err = DownloadError::from("Read timed out.".to_string());
        assert!(matches!(err, DownloadError::Timeout(_)));
    }

    #[test]
    fn classifies_missing_binary() {
        let err = DownloadError::from("yt-dlp: command not found".to_string());
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[test]
    fn unavailable_video_is_metadata_error() {
        let err = DownloadError::from("ERROR: Video unavailable".to_string());
        assert!(matches!(err, DownloadError::MetadataFetch(_)));
    }

    #[test]
    fn thumbnail_and_cleanup_are_silent() {
        assert!(DownloadError::ThumbnailFetch("404".into()).is_silent());
        assert!(DownloadError::Cleanup("busy".into()).is_silent());
        assert!(!DownloadError::NoStreams("url".into()).is_silent());
    }
}
