// LinkResolver - single video vs playlist classification

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::DownloadError;
use super::hosting::VideoHost;
use super::models::VideoReference;

lazy_static! {
    // Playlist pages ("/playlist?list=...") and watch URLs shared from a
    // playlist view ("watch?v=...&list=...")
    static ref PLAYLIST_RE: Regex = Regex::new(r"/playlist\b|[?&]list=").unwrap();
}

/// Whether a link points at a playlist rather than a single video
pub fn is_playlist_link(link: &str) -> bool {
    PLAYLIST_RE.is_match(link)
}

/// Expands incoming links into ordered video references
pub struct LinkResolver {
    host: Arc<dyn VideoHost>,
}

impl LinkResolver {
    pub fn new(host: Arc<dyn VideoHost>) -> Self {
        Self { host }
    }

    /// Resolve raw command text into 0..N video references.
    ///
    /// Blank input yields an empty list. Playlist links are expanded in
    /// source order through the host; anything else is taken as one video.
    /// Malformed non-blank links surface as `InvalidLink` from the host.
    pub async fn resolve(&self, raw: &str) -> Result<Vec<VideoReference>, DownloadError> {
        let link = raw.trim();
        if link.is_empty() {
            return Ok(Vec::new());
        }

        if is_playlist_link(link) {
            return self.host.expand_playlist(link).await;
        }

        Ok(vec![VideoReference::new(link)])
    }

    /// Resolve strictly as one video: blank yields nothing, everything
    /// else is wrapped as-is. `/vid` never expands playlists.
    pub fn resolve_single(&self, raw: &str) -> Option<VideoReference> {
        let link = raw.trim();
        if link.is_empty() {
            None
        } else {
            Some(VideoReference::new(link))
        }
    }
}
