// VideoHost trait - narrow boundary to the video-hosting service

use std::path::Path;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{StreamDescriptor, VideoMetadata, VideoReference};

/// Trait for video-hosting client implementations
#[async_trait]
pub trait VideoHost: Send + Sync {
    /// Name of the host client (for logging)
    fn name(&self) -> &'static str;

    /// Fetch metadata for one video
    async fn fetch_metadata(
        &self,
        video: &VideoReference,
    ) -> Result<VideoMetadata, DownloadError>;

    /// List downloadable streams for one video
    async fn fetch_streams(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<StreamDescriptor>, DownloadError>;

    /// Expand a playlist link into its member video links, in source order
    async fn expand_playlist(&self, link: &str)
        -> Result<Vec<VideoReference>, DownloadError>;

    /// Download one stream to `dest`
    async fn download(
        &self,
        video: &VideoReference,
        stream: &StreamDescriptor,
        dest: &Path,
    ) -> Result<(), DownloadError>;
}
