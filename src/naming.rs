//! Sticker set naming.
//!
//! Set names are keyed by the numeric user id: handles can be absent or
//! change, which would break the one-set-per-user rule.

use teloxide::types::UserId;

pub const ADD_STICKERS_URL: &str = "https://t.me/addstickers/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerNaming {
    bot_name: String,
}

impl StickerNaming {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
        }
    }

    /// `for_<user id>_by_<bot name>`
    pub fn set_name(&self, user: UserId) -> String {
        format!("for_{}_by_{}", user.0, self.bot_name)
    }

    pub fn set_title(&self) -> String {
        format!("Stickers from @{}", self.bot_name)
    }

    pub fn set_link(&self, user: UserId) -> String {
        link_for(&self.set_name(user))
    }
}

/// Canonical share link for a sticker set name
pub fn link_for(set_name: &str) -> String {
    format!("{ADD_STICKERS_URL}{set_name}")
}
