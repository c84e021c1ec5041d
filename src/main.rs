// tubegram - allow-listed Telegram bot relaying YouTube videos

mod access;
mod commands;
mod config;
mod downloader;
mod transport;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use access::AccessGuard;
use commands::Command;
use config::BotConfig;
use downloader::hosting::VideoHost;
use downloader::pipeline::DownloadPipeline;
use downloader::ytdlp::YtDlpHost;
use transport::{ChatTransport, TelegramTransport};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail fast: nothing to do without a token
    let config = BotConfig::from_env().expect("configuration error");

    if config.allowed_chats.is_empty() {
        warn!("TUBEGRAM_ALLOWED_CHATS is empty; every chat will be ignored");
    }

    let host = Arc::new(YtDlpHost::new(
        config.fetch_timeout_secs,
        config.download_timeout_secs,
    ));
    if !host.is_available() {
        warn!("yt-dlp binary not found; downloads will fail until it is installed");
    }

    let bot = Bot::new(config.token.clone());
    let guard = Arc::new(AccessGuard::new(config.allowed_chats.clone()));
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(bot.clone()));
    let pipeline = Arc::new(DownloadPipeline::new(
        config,
        host as Arc<dyn VideoHost>,
        transport,
    ));

    info!("starting tubegram dispatcher");

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(commands::handle_command);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![guard, pipeline])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
