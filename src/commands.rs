// Telegram command surface - every entry point is gated by AccessGuard

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::access::AccessGuard;
use crate::downloader::pipeline::DownloadPipeline;

pub const GREETING: &str = "Hello! Send me a YouTube link to download and upload it.";

pub const USAGE: &str = "use following commands for using the bot:\n\n\
    /vid YOUTUBE_VIDEO_LINK -> download youtube video\n\
    /playlist YOUTUBE_PLAYLIST_LINK -> download all youtube playlist\n\
    /vid_info YOUTUBE_VIDEO_LINK -> information about video\n\
    /help -> see this message again\n\n\
    have fun.";

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Greeting
    Start,
    /// Usage text
    Help,
    /// Download one video and send it back with a caption
    Vid(String),
    /// Download every member of a playlist, in order
    Playlist(String),
    /// Thumbnail and metadata only, no download
    #[command(rename = "vid_info")]
    VidInfo(String),
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    guard: Arc<AccessGuard>,
    pipeline: Arc<DownloadPipeline>,
) -> ResponseResult<()> {
    let chat = msg.chat.id;

    // Deliberate silence: the bot must not acknowledge its existence
    // to chats outside the allow-list
    if !guard.is_authorized(chat.0) {
        debug!(chat = chat.0, "ignoring non-allow-listed chat");
        return Ok(());
    }

    match cmd {
        Command::Start => {
            bot.send_message(chat, GREETING).await?;
        }
        Command::Help => {
            bot.send_message(chat, USAGE).await?;
        }
        Command::Vid(link) => pipeline.handle_video(chat, &link).await,
        Command::Playlist(link) => pipeline.handle_playlist(chat, &link).await,
        Command::VidInfo(link) => pipeline.handle_info(chat, &link).await,
    }

    Ok(())
}
