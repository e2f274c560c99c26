//! Message Handler module for turning photos into stickers

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{FileId, UserId};
use tracing::{debug, error, info, warn};

use super::access::subscription_denial;
use super::contain_failure;
use super::ui_builder::{
    language_code, sticker_error_text, submit_error_text, submit_report_text, Denial,
};
use crate::context::AppContext;
use crate::errors::StickerError;
use crate::lifecycle::StickerLifecycle;
use crate::platform::{MembershipSource, RenderedSticker, StickerStore};
use crate::sticker::{extract_emojis, prepare_sticker_png};
use crate::telegram::TelegramPlatform;

/// Fetch a file from the Bot API file endpoint into memory
pub async fn download_file(
    bot: &Bot,
    http: &reqwest::Client,
    file_id: FileId,
) -> Result<Vec<u8>, StickerError> {
    let file = bot
        .get_file(file_id)
        .await
        .map_err(|e| StickerError::Download(e.to_string()))?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let bytes = http
        .get(&url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| StickerError::Download(e.without_url().to_string()))?
        .bytes()
        .await
        .map_err(|e| StickerError::Download(e.without_url().to_string()))?;

    Ok(bytes.to_vec())
}

/// Download the photo, cut out the background and prepare the sticker PNG
async fn render_sticker(bot: &Bot, ctx: &AppContext, file_id: FileId) -> Result<Vec<u8>, StickerError> {
    let photo = download_file(bot, &ctx.http, file_id).await?;
    let session = ctx.cutout.session()?;
    let cutout = session.remove_background(photo).await?;
    prepare_sticker_png(&cutout)
}

/// Turn a photo from `user` into a sticker and return the final reply.
///
/// Order matters: the subscription gate first, then the caption check, and
/// only then `render` and the sticker-set calls. `render` produces the
/// finished PNG and is never called for a denied user or an emoji-less caption.
pub async fn process_photo<P, R, Fut>(
    platform: &P,
    ctx: &AppContext,
    user: UserId,
    caption: Option<&str>,
    language_code: Option<&str>,
    render: R,
) -> String
where
    P: MembershipSource + StickerStore,
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, StickerError>>,
{
    debug!(user_id = %user.0, "Received photo message from user");

    if let Some(reply) =
        subscription_denial(platform, ctx, user, Denial::Command, language_code).await
    {
        return reply;
    }

    let emojis = match extract_emojis(caption) {
        Ok(emojis) => emojis,
        Err(e) => {
            info!(user_id = %user.0, "Photo rejected, caption has no emoji");
            return sticker_error_text(&ctx.messages, &e, language_code);
        }
    };

    let png = match render().await {
        Ok(png) => png,
        Err(e) => {
            error!(user_id = %user.0, error = %e, "Failed to render sticker");
            return sticker_error_text(&ctx.messages, &e, language_code);
        }
    };

    let sticker = RenderedSticker { png, emojis };
    let lifecycle = StickerLifecycle::new(platform, ctx.naming.clone());

    match lifecycle.submit_sticker(user, &sticker).await {
        Ok(report) => submit_report_text(&ctx.messages, &report, language_code),
        Err(e) => {
            error!(
                user_id = %user.0,
                error = %e,
                permanent = e.is_permanent(),
                "Failed to submit sticker"
            );
            submit_error_text(&ctx.messages, &e, language_code)
        }
    }
}

async fn handle_photo_message(bot: &Bot, msg: &Message, ctx: &AppContext) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) else {
        return Ok(());
    };
    let language_code = language_code(msg);
    let file_id = largest_photo.file.id.clone();

    let platform = TelegramPlatform::new(bot.clone());
    let reply = process_photo(
        &platform,
        ctx,
        user.id,
        msg.caption(),
        language_code,
        move || async move {
            let notice = ctx.messages.t("processing-photo", language_code);
            if let Err(e) = bot.send_message(msg.chat.id, notice).await {
                warn!(chat_id = %msg.chat.id, error = %e, "Failed to send processing notice");
            }
            render_sticker(bot, ctx, file_id).await
        },
    )
    .await;

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn photo_handler(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    let result = handle_photo_message(&bot, &msg, &ctx).await;
    contain_failure(&bot, &msg, &ctx, result).await;
    Ok(())
}
