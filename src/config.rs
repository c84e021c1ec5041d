// Bot configuration - built once at startup, passed down explicitly

use std::env;
use std::path::PathBuf;

use crate::downloader::selector::DEFAULT_QUALITY_ORDER;

/// Process-wide configuration. No module-level state: the guard, the host
/// and the pipeline all receive what they need from this value.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// Chat identities allowed to use the bot
    pub allowed_chats: Vec<i64>,
    /// Quality tiers tried in order before the lowest-resolution fallback
    pub quality_order: Vec<String>,
    /// Directory for scoped temporary video files
    pub download_dir: PathBuf,
    /// Image sent when a thumbnail cannot be fetched
    pub fallback_thumbnail: PathBuf,
    /// Timeout for metadata and playlist expansion calls
    pub fetch_timeout_secs: u64,
    /// Timeout for one stream download
    pub download_timeout_secs: u64,
}

impl BotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            allowed_chats: Vec::new(),
            quality_order: DEFAULT_QUALITY_ORDER.iter().map(|s| s.to_string()).collect(),
            download_dir: PathBuf::from("vids"),
            fallback_thumbnail: PathBuf::from("assets/not_found.jpg"),
            fetch_timeout_secs: 30,
            download_timeout_secs: 600,
        }
    }

    /// Load from the environment. `TELEGRAM_TOKEN` is required; the process
    /// has nothing to do without it.
    pub fn from_env() -> Result<Self, String> {
        let token = env::var("TELEGRAM_TOKEN")
            .map_err(|_| "TELEGRAM_TOKEN is not set".to_string())?;

        let mut config = Self::new(token);

        if let Ok(raw) = env::var("TUBEGRAM_ALLOWED_CHATS") {
            config.allowed_chats = parse_chat_list(&raw)?;
        }

        if let Ok(raw) = env::var("TUBEGRAM_QUALITY_ORDER") {
            config.quality_order = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(dir) = env::var("TUBEGRAM_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }

        if let Ok(path) = env::var("TUBEGRAM_FALLBACK_THUMBNAIL") {
            config.fallback_thumbnail = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn with_allowed_chats(mut self, chats: Vec<i64>) -> Self {
        self.allowed_chats = chats;
        self
    }

    pub fn with_quality_order(mut self, order: Vec<String>) -> Self {
        self.quality_order = order;
        self
    }

    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = dir;
        self
    }

    pub fn with_fallback_thumbnail(mut self, path: PathBuf) -> Self {
        self.fallback_thumbnail = path;
        self
    }

    pub fn with_timeouts(mut self, fetch_secs: u64, download_secs: u64) -> Self {
        self.fetch_timeout_secs = fetch_secs;
        self.download_timeout_secs = download_secs;
        self
    }
}

fn parse_chat_list(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("invalid chat id in TUBEGRAM_ALLOWED_CHATS: {}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_quality_order() {
        let config = BotConfig::new("token");
        assert_eq!(config.quality_order, vec!["480p", "360p"]);
    }

    #[test]
    fn parses_chat_list_with_spaces() {
        let chats = parse_chat_list("140770223, 745585668 ,-100123").unwrap();
        assert_eq!(chats, vec![140770223, 745585668, -100123]);
    }

    #[test]
    fn rejects_garbage_chat_ids() {
        assert!(parse_chat_list("140770223,abc").is_err());
    }

    #[test]
    fn builders_override_defaults() {
        let config = BotConfig::new("token")
            .with_allowed_chats(vec![1, 2])
            .with_quality_order(vec!["720p".to_string()])
            .with_timeouts(5, 60);
        assert_eq!(config.allowed_chats, vec![1, 2]);
        assert_eq!(config.quality_order, vec!["720p"]);
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.download_timeout_secs, 60);
    }
}
