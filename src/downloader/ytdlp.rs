// yt-dlp backed VideoHost - shells out to the native binary
//
// Metadata and stream listings come from `--dump-json`; playlist expansion
// uses `--flat-playlist` so member pages are never fetched up front.
// Only progressive formats (audio and video in one file) are exposed, so
// downloads need no merge step.

use std::path::Path;
use std::process::Command as StdCommand;

use async_trait::async_trait;
use time::macros::format_description;
use time::Date;
use tracing::{debug, warn};

use super::errors::DownloadError;
use super::hosting::VideoHost;
use super::models::{StreamDescriptor, VideoMetadata, VideoReference};
use super::utils::run_output_with_timeout;

/// yt-dlp CLI client
pub struct YtDlpHost {
    ytdlp_path: String,
    fetch_timeout_secs: u64,
    download_timeout_secs: u64,
}

impl YtDlpHost {
    pub fn new(fetch_timeout_secs: u64, download_timeout_secs: u64) -> Self {
        Self {
            ytdlp_path: Self::find_ytdlp(),
            fetch_timeout_secs,
            download_timeout_secs,
        }
    }

    /// Find yt-dlp binary
    fn find_ytdlp() -> String {
        let common_paths = vec![
            "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
            "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
            "/usr/bin/yt-dlp",          // System installation
        ];

        for path in common_paths {
            if Path::new(path).exists() {
                return path.to_string();
            }
        }

        // Try to find via `which`
        if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
            if output.status.success() {
                if let Ok(path) = String::from_utf8(output.stdout) {
                    let trimmed = path.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }

        "yt-dlp".to_string()
    }

    /// Check if the yt-dlp binary is available
    pub fn is_available(&self) -> bool {
        match StdCommand::new(&self.ytdlp_path).arg("--version").output() {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "--socket-timeout".to_string(),
            self.fetch_timeout_secs.to_string(),
            "--retries".to_string(),
            "2".to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>, timeout_secs: u64) -> Result<Vec<u8>, DownloadError> {
        debug!(ytdlp = %self.ytdlp_path, args = %args.join(" "), "running yt-dlp");
        let out = run_output_with_timeout(&self.ytdlp_path, args, timeout_secs).await?;
        if out.status.success() {
            Ok(out.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&out.stderr);
            warn!(stderr = %stderr, "yt-dlp exited with failure");
            Err(DownloadError::from(stderr.to_string()))
        }
    }

    /// One `--dump-json` call covers both metadata and formats
    async fn dump_json(&self, url: &str) -> Result<serde_json::Value, DownloadError> {
        let mut args = self.base_args();
        args.push("--dump-json".to_string());
        args.push(url.to_string());

        let stdout = self.run(args, self.fetch_timeout_secs).await?;
        let json_str = String::from_utf8_lossy(&stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| DownloadError::Parse(format!("Invalid JSON: {}", e)))
    }

    fn parse_metadata(json: &serde_json::Value) -> VideoMetadata {
        VideoMetadata {
            title: json["title"].as_str().unwrap_or("Unknown").to_string(),
            publish_date: json["upload_date"].as_str().and_then(parse_upload_date),
            view_count: json["view_count"].as_u64().unwrap_or(0),
            author: json["uploader"]
                .as_str()
                .or_else(|| json["channel"].as_str())
                .unwrap_or("Unknown")
                .to_string(),
            thumbnail_url: json["thumbnail"].as_str().unwrap_or("").to_string(),
        }
    }

    /// Keep progressive formats only: both a video and an audio codec
    fn parse_streams(json: &serde_json::Value) -> Result<Vec<StreamDescriptor>, DownloadError> {
        let formats_array = json["formats"]
            .as_array()
            .ok_or_else(|| DownloadError::Parse("No formats array in JSON".to_string()))?;

        let mut streams = Vec::new();

        for f in formats_array {
            let has_video = f["vcodec"].as_str().map_or(false, |v| v != "none");
            let has_audio = f["acodec"].as_str().map_or(false, |a| a != "none");
            if !has_video || !has_audio {
                continue;
            }

            streams.push(StreamDescriptor {
                format_id: f["format_id"].as_str().unwrap_or("").to_string(),
                ext: f["ext"].as_str().unwrap_or("mp4").to_string(),
                height: f["height"].as_u64().map(|h| h as u32),
                filesize: f["filesize"].as_u64().or(f["filesize_approx"].as_u64()),
            });
        }

        Ok(streams)
    }
}

/// yt-dlp reports upload_date as YYYYMMDD
fn parse_upload_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year][month][day]");
    Date::parse(raw, &format).ok()
}

#[async_trait]
impl VideoHost for YtDlpHost {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_metadata(
        &self,
        video: &VideoReference,
    ) -> Result<VideoMetadata, DownloadError> {
        let json = self.dump_json(video.url()).await?;
        Ok(Self::parse_metadata(&json))
    }

    async fn fetch_streams(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<StreamDescriptor>, DownloadError> {
        let json = self.dump_json(video.url()).await?;
        Self::parse_streams(&json)
    }

    async fn expand_playlist(
        &self,
        link: &str,
    ) -> Result<Vec<VideoReference>, DownloadError> {
        let args = vec![
            "--no-warnings".to_string(),
            "--flat-playlist".to_string(),
            "--print".to_string(),
            "url".to_string(),
            link.to_string(),
        ];

        let stdout = self.run(args, self.fetch_timeout_secs).await?;
        let urls = String::from_utf8_lossy(&stdout);
        Ok(urls
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(VideoReference::new)
            .collect())
    }

    async fn download(
        &self,
        video: &VideoReference,
        stream: &StreamDescriptor,
        dest: &Path,
    ) -> Result<(), DownloadError> {
        let mut args = self.base_args();
        args.push("-f".to_string());
        args.push(stream.format_id.clone());
        args.push("-o".to_string());
        args.push(dest.to_string_lossy().to_string());
        args.push(video.url().to_string());

        self.run(args, self.download_timeout_secs).await?;

        if !dest.exists() {
            return Err(DownloadError::Fetch(format!(
                "yt-dlp reported success but {} is missing",
                dest.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": "dQw4w9WgXcQ",
            "title": "Test Video",
            "uploader": "Test Channel",
            "upload_date": "20091025",
            "view_count": 1_000_000u64,
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg",
            "formats": [
                { "format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none" },
                { "format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2" },
                { "format_id": "18", "ext": "mp4", "height": 360,
                  "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "filesize": 10_000_000u64 },
                { "format_id": "137", "ext": "mp4", "height": 1080,
                  "vcodec": "avc1.640028", "acodec": "none" }
            ]
        })
    }

    #[test]
    fn parses_metadata_fields() {
        let meta = YtDlpHost::parse_metadata(&sample_json());
        assert_eq!(meta.title, "Test Video");
        assert_eq!(meta.author, "Test Channel");
        assert_eq!(meta.view_count, 1_000_000);
        let date = meta.publish_date.unwrap();
        assert_eq!((date.year(), u8::from(date.month()), date.day()), (2009, 10, 25));
    }

    #[test]
    fn keeps_progressive_formats_only() {
        let streams = YtDlpHost::parse_streams(&sample_json()).unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].format_id, "18");
        assert_eq!(streams[0].resolution_label().as_deref(), Some("360p"));
    }

    #[test]
    fn rejects_json_without_formats() {
        let json = serde_json::json!({ "title": "x" });
        assert!(matches!(
            YtDlpHost::parse_streams(&json),
            Err(DownloadError::Parse(_))
        ));
    }

    #[test]
    fn bad_upload_date_is_none() {
        assert!(parse_upload_date("not-a-date").is_none());
        assert!(parse_upload_date("2009").is_none());
    }
}
