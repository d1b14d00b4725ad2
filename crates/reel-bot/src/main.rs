//! Reel relay bot binary.

use std::sync::Arc;

use tracing::{error, info, warn};

use reel_bot::bot::{build_bot, prepare_polling, run_polling};
use reel_bot::logging::{init_tracing, LogFormat};
use reel_bot::{metrics, BotConfig, RelayHandler};
use reel_fetch::{InstagramClient, InstagramFetcher, TransientDir};
use reel_telegram::TelegramUploader;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(1);
    }

    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    info!("Starting reel-bot");

    let config = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Bot config: {:?}", config);

    if let Some(port) = config.metrics_port {
        match metrics::init_exporter(port) {
            Ok(()) => info!(port = port, "Prometheus exporter listening"),
            Err(e) => warn!("Metrics exporter disabled: {}", e),
        }
    }

    let workdir = TransientDir::new(&config.download_dir);
    if let Err(e) = workdir.ensure().await {
        error!("Failed to create download dir {}: {}", config.download_dir.display(), e);
        std::process::exit(1);
    }
    if let Err(e) = workdir.sweep().await {
        warn!("Failed to sweep download dir: {}", e);
    }

    let client = match InstagramClient::new(config.instagram.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Instagram client: {}", e);
            std::process::exit(1);
        }
    };

    let uploader = match TelegramUploader::new(config.telegram_config()) {
        Ok(u) => u,
        Err(e) => {
            error!("Failed to create Telegram uploader: {}", e);
            std::process::exit(1);
        }
    };

    let handler = Arc::new(RelayHandler::new(
        Arc::new(InstagramFetcher::new(client, workdir)),
        Arc::new(uploader),
        config.chat_id.clone(),
    ));

    let bot = build_bot(&config.bot_token, config.telegram_api_url.clone());
    match prepare_polling(&bot).await {
        Ok(username) => info!("Polling as @{}", username),
        Err(e) => {
            error!("Failed to start polling: {}", e);
            std::process::exit(1);
        }
    }

    run_polling(bot, handler).await;

    info!("Bot shutdown complete");
}
