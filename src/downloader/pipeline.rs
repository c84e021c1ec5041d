// DownloadPipeline - per-item orchestration with failure isolation
//
// Per video: select stream -> fetch -> caption -> deliver -> cleanup.
// Each item runs to completion on its own; a failed item is logged,
// reported to the chat as plain text, and the batch moves on. Temp
// assets are removed on every exit path by a scoped guard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use teloxide::types::ChatId;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::BotConfig;
use crate::transport::ChatTransport;

use super::caption;
use super::errors::DownloadError;
use super::hosting::VideoHost;
use super::models::{DownloadedAsset, VideoReference};
use super::resolver::LinkResolver;
use super::selector::StreamSelector;

/// Temp file scoped to one delivery. Dropping it removes the file, so
/// partial writes and failed deliveries never leak storage.
struct TempAsset {
    path: PathBuf,
}

impl TempAsset {
    /// Namespaced by a per-request token, never by the video title:
    /// titles are neither unique nor filesystem-safe.
    fn new(dir: &Path, ext: &str) -> Self {
        Self {
            path: dir.join(format!("{}.{}", Uuid::new_v4(), ext)),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAsset {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                // Best effort: logged, never surfaced to the chat
                let err = DownloadError::Cleanup(format!("{}: {}", self.path.display(), e));
                warn!(error = %err, "temp asset not removed");
            }
        }
    }
}

pub struct DownloadPipeline {
    config: BotConfig,
    host: Arc<dyn VideoHost>,
    transport: Arc<dyn ChatTransport>,
    resolver: LinkResolver,
    http: reqwest::Client,
}

impl DownloadPipeline {
    pub fn new(
        config: BotConfig,
        host: Arc<dyn VideoHost>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let resolver = LinkResolver::new(Arc::clone(&host));
        Self {
            config,
            host,
            transport,
            resolver,
            http: reqwest::Client::new(),
        }
    }

    /// `/vid` - one video, delivered as a video message with caption.
    /// Blank input is a silent no-op.
    pub async fn handle_video(&self, chat: ChatId, raw: &str) {
        let Some(video) = self.resolver.resolve_single(raw) else {
            return;
        };

        if let Err(e) = self.process_video(chat, &video).await {
            self.report_error(chat, video.url(), e).await;
        }
    }

    /// `/playlist` - expand, then run every member through the same
    /// sequence as `/vid`. One bad item never aborts the rest.
    pub async fn handle_playlist(&self, chat: ChatId, raw: &str) {
        let videos = match self.resolver.resolve(raw).await {
            Ok(v) => v,
            Err(e) => {
                self.report_error(chat, raw.trim(), e).await;
                return;
            }
        };

        info!(count = videos.len(), "processing playlist");
        for video in &videos {
            if let Err(e) = self.process_video(chat, video).await {
                self.report_error(chat, video.url(), e).await;
            }
        }
    }

    /// `/vid_info` - metadata photo+caption per item, no video download
    pub async fn handle_info(&self, chat: ChatId, raw: &str) {
        let videos = match self.resolver.resolve(raw).await {
            Ok(v) => v,
            Err(e) => {
                self.report_error(chat, raw.trim(), e).await;
                return;
            }
        };

        for video in &videos {
            if let Err(e) = self.process_info(chat, video).await {
                self.report_error(chat, video.url(), e).await;
            }
        }
    }

    /// Full sequence for one video. The temp asset is dropped on every
    /// return path, success and failure alike.
    async fn process_video(
        &self,
        chat: ChatId,
        video: &VideoReference,
    ) -> Result<(), DownloadError> {
        let streams = self.host.fetch_streams(video).await?;
        let stream = StreamSelector::select(&streams, &self.config.quality_order)?;
        info!(
            url = video.url(),
            format = %stream.format_id,
            resolution = stream.resolution_label().as_deref().unwrap_or("?"),
            "stream selected"
        );

        tokio::fs::create_dir_all(&self.config.download_dir)
            .await
            .map_err(|e| DownloadError::Fetch(format!("cannot create download dir: {}", e)))?;

        let temp = TempAsset::new(&self.config.download_dir, &stream.ext);
        self.host.download(video, stream, temp.path()).await?;

        let meta = self.host.fetch_metadata(video).await?;
        let asset = DownloadedAsset {
            local_path: temp.path().to_path_buf(),
            caption: caption::caption(&meta),
        };

        self.transport
            .send_video(chat, &asset.local_path, &asset.caption)
            .await?;
        info!(url = video.url(), "video delivered");
        Ok(())
    }

    /// Metadata-only sequence: thumbnail photo plus caption
    async fn process_info(
        &self,
        chat: ChatId,
        video: &VideoReference,
    ) -> Result<(), DownloadError> {
        let meta = self.host.fetch_metadata(video).await?;
        let text = caption::caption(&meta);

        // Thumbnail misses degrade to the fallback image, not to an error
        let photo = match caption::fetch_thumbnail(&self.http, &meta.thumbnail_url).await {
            Some(bytes) => bytes,
            None => self.fallback_thumbnail().await?,
        };

        self.transport.send_photo(chat, photo, &text).await?;
        info!(url = video.url(), "info delivered");
        Ok(())
    }

    async fn fallback_thumbnail(&self) -> Result<Vec<u8>, DownloadError> {
        tokio::fs::read(&self.config.fallback_thumbnail)
            .await
            .map_err(|e| {
                DownloadError::Fetch(format!(
                    "fallback thumbnail {} unreadable: {}",
                    self.config.fallback_thumbnail.display(),
                    e
                ))
            })
    }

    /// Item boundary: log with context, report once to the chat, move on.
    /// Silent taxonomy members (thumbnail, cleanup) are logged only.
    async fn report_error(&self, chat: ChatId, url: &str, err: DownloadError) {
        error!(url = url, error = %err, "pipeline item failed");

        if err.is_silent() {
            return;
        }

        if let Err(send_err) = self.transport.send_text(chat, &err.to_string()).await {
            error!(error = %send_err, "could not report failure to chat");
        }
    }
}
