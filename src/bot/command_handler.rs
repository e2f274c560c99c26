//! Command Handler module for the bot's slash commands

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::UserId;
use teloxide::utils::command::BotCommands;
use tracing::{debug, error};

use super::access::subscription_denial;
use super::contain_failure;
use super::ui_builder::{delete_outcome_text, language_code, pack_link_text, Denial};
use crate::context::AppContext;
use crate::lifecycle::StickerLifecycle;
use crate::platform::{MembershipSource, StickerStore};
use crate::telegram::TelegramPlatform;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start using the bot")]
    Start,
    #[command(description = "show how to make a sticker")]
    Help,
    #[command(description = "get the link to your sticker pack")]
    StickerPackLink,
    #[command(description = "delete your sticker pack")]
    DeleteStickerPack,
}

impl Command {
    fn denial(&self) -> Denial {
        match self {
            Command::Start => Denial::Start,
            _ => Denial::Command,
        }
    }
}

/// Run `cmd` for `user` against `platform` and return the reply text.
///
/// The subscription gate runs before anything else; a denied user gets the
/// subscription hint and no sticker-set call is made.
pub async fn run_command<P>(
    platform: &P,
    ctx: &AppContext,
    user: UserId,
    cmd: Command,
    language_code: Option<&str>,
) -> String
where
    P: MembershipSource + StickerStore,
{
    debug!(user_id = %user.0, command = ?cmd, "Received command");

    if let Some(reply) = subscription_denial(platform, ctx, user, cmd.denial(), language_code).await {
        return reply;
    }

    let lifecycle = StickerLifecycle::new(platform, ctx.naming.clone());

    match cmd {
        Command::Start | Command::Help => ctx.messages.t("help-text", language_code),
        Command::StickerPackLink => match lifecycle.get_link(user).await {
            Ok(link) => pack_link_text(&ctx.messages, link.as_deref(), language_code),
            Err(e) => {
                error!(user_id = %user.0, error = %e, "Failed to look up sticker set");
                ctx.messages.t("error-pack-link", language_code)
            }
        },
        Command::DeleteStickerPack => match lifecycle.delete_set(user).await {
            Ok(outcome) => delete_outcome_text(&ctx.messages, outcome, language_code),
            Err(e) => {
                error!(user_id = %user.0, error = %e, "Failed to delete sticker set");
                ctx.messages.t("error-pack-delete", language_code)
            }
        },
    }
}

async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, ctx: &AppContext) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let platform = TelegramPlatform::new(bot.clone());
    let reply = run_command(&platform, ctx, user.id, cmd, language_code(msg)).await;

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<AppContext>,
) -> Result<()> {
    let result = handle_command(&bot, &msg, cmd, &ctx).await;
    contain_failure(&bot, &msg, &ctx, result).await;
    Ok(())
}
