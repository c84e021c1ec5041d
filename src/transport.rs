// ChatTransport - narrow boundary to the chat service

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::downloader::errors::DownloadError;

/// Outbound message surface the pipeline delivers through
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), DownloadError>;

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), DownloadError>;

    async fn send_video(
        &self,
        chat: ChatId,
        video: &Path,
        caption: &str,
    ) -> Result<(), DownloadError>;
}

/// Telegram Bot API transport
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), DownloadError> {
        self.bot
            .send_message(chat, text)
            .await
            .map_err(|e| DownloadError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), DownloadError> {
        self.bot
            .send_photo(chat, InputFile::memory(photo))
            .caption(caption.to_string())
            .await
            .map_err(|e| DownloadError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_video(
        &self,
        chat: ChatId,
        video: &Path,
        caption: &str,
    ) -> Result<(), DownloadError> {
        self.bot
            .send_video(chat, InputFile::file(video.to_path_buf()))
            .caption(caption.to_string())
            .await
            .map_err(|e| DownloadError::Delivery(e.to_string()))?;
        Ok(())
    }
}
