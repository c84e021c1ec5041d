// Caption template and thumbnail fetch

use time::macros::format_description;
use tracing::warn;

use super::errors::DownloadError;
use super::models::VideoMetadata;

/// Build the fixed multi-line caption for a video.
///
/// Field order and glyphs are part of the bot's output contract:
/// title, publish date (YYYY/MM/DD), view count, author.
pub fn caption(meta: &VideoMetadata) -> String {
    let format = format_description!("[year]/[month]/[day]");
    let date = meta
        .publish_date
        .and_then(|d| d.format(&format).ok())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "📚   {}\n📅   {}\n👀   {}\n✍️  {}",
        meta.title, date, meta.view_count, meta.author
    )
}

/// Fetch the thumbnail image, or `None` when it is unreachable.
///
/// The status check is an explicit success-range comparison; anything
/// outside 2xx counts as a miss and the caller substitutes the fallback
/// image. A thumbnail miss is never reported to the chat.
pub async fn fetch_thumbnail(client: &reqwest::Client, url: &str) -> Option<Vec<u8>> {
    if url.is_empty() {
        return None;
    }

    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            let err = DownloadError::ThumbnailFetch(format!("{}: {}", url, e));
            warn!(error = %err, "falling back");
            return None;
        }
    };

    if !response.status().is_success() {
        let err = DownloadError::ThumbnailFetch(format!("{} -> {}", url, response.status()));
        warn!(error = %err, "falling back");
        return None;
    }

    match response.bytes().await {
        Ok(body) => Some(body.to_vec()),
        Err(e) => {
            let err = DownloadError::ThumbnailFetch(format!("{}: {}", url, e));
            warn!(error = %err, "falling back");
            None
        }
    }
}
