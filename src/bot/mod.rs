//! Bot module for handling Telegram interactions
//!
//! - `command_handler`: `/start`, `/help`, `/sticker_pack_link`, `/delete_sticker_pack`
//! - `message_handler`: photos with an emoji caption, private chats only
//! - `access`: subscription gate wiring shared by both
//! - `ui_builder`: localized reply texts

pub mod access;
pub mod command_handler;
pub mod message_handler;
pub mod ui_builder;

use anyhow::Result;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use tracing::error;

use crate::context::AppContext;

pub use command_handler::{command_handler, Command};
pub use message_handler::photo_handler;

/// Dispatcher tree: commands first, then private-chat photos
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(
            dptree::filter(|msg: Message| msg.chat.is_private() && msg.photo().is_some())
                .endpoint(photo_handler),
        )
}

/// Handler boundary: log whatever escaped and apologise to the user.
///
/// The error is not propagated so one user's failure never affects others.
pub(crate) async fn contain_failure(bot: &Bot, msg: &Message, ctx: &AppContext, result: Result<()>) {
    let Err(e) = result else {
        return;
    };

    error!(chat_id = %msg.chat.id, error = ?e, "Unhandled error while processing update");
    let apology = ctx
        .messages
        .t("error-generic", ui_builder::language_code(msg));
    if let Err(send_err) = bot.send_message(msg.chat.id, apology).await {
        error!(chat_id = %msg.chat.id, error = %send_err, "Failed to send apology");
    }
}
