//! Process-scoped state built once at startup and shared by every handler.

use anyhow::Result;

use crate::config::{BotConfig, RunMode};
use crate::cutout::CutoutService;
use crate::localization::LocalizationManager;
use crate::naming::StickerNaming;
use crate::subscription::SubscriptionGate;

pub struct AppContext {
    pub config: BotConfig,
    pub naming: StickerNaming,
    pub gate: SubscriptionGate,
    pub cutout: CutoutService,
    pub messages: LocalizationManager,
    /// Client for downloading photos from the Bot API file endpoint
    pub http: reqwest::Client,
}

impl AppContext {
    pub fn new(config: BotConfig, mode: RunMode) -> Result<Self> {
        let naming = StickerNaming::new(config.bot_name.clone());
        let gate = SubscriptionGate::new(config.channel.clone());
        let cutout = CutoutService::new(config.rembg_url.clone(), config.rembg_model.clone(), mode);
        let messages = LocalizationManager::new()?;

        Ok(Self {
            config,
            naming,
            gate,
            cutout,
            messages,
            http: reqwest::Client::new(),
        })
    }
}
