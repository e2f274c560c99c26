use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use photo_sticker_bot::bot::{self, Command};
use photo_sticker_bot::config::{BotConfig, ChannelTarget, RunMode};
use photo_sticker_bot::context::AppContext;
use photo_sticker_bot::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[!] {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(&config.log_file)?;

    info!("Starting Photo Sticker Bot");

    let (mode, ignored_args) = RunMode::from_args(std::env::args().skip(1));
    if let Some(args) = ignored_args {
        warn!(?args, "Unrecognized arguments ignored");
    }
    match mode {
        RunMode::Performance => info!("Performance mode: cutout session is loaded once at startup"),
        RunMode::Standard => info!("Standard mode: a cutout session is created per request"),
    }

    match &config.channel {
        ChannelTarget::Id(id) => info!(channel = %id, "Subscription gate uses channel id"),
        ChannelTarget::Username(name) => {
            warn!(channel = %name, "Subscription gate uses a channel handle; a numeric CHANNEL_ID is more reliable")
        }
        ChannelTarget::Malformed(raw) => {
            warn!(channel = %raw, "CHANNEL_ID is malformed; every subscription check will be denied")
        }
    }

    let bot = Bot::new(config.bot_token.clone());
    let ctx = Arc::new(AppContext::new(config, mode)?);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}
