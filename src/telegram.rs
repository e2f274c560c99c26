//! Telegram implementation of the platform seams.

use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, InputFile, InputSticker, Recipient, StickerFormat, UserId};
use teloxide::{ApiError, RequestError};

use crate::errors::{PlatformError, PlatformErrorKind};
use crate::platform::{ChannelInfo, MembershipSource, MembershipStatus, RenderedSticker, StickerStore};

const STICKER_FILE_NAME: &str = "sticker.png";

/// Thin wrapper around a teloxide [`Bot`]; cheap to clone
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Reduce a teloxide error to a tagged kind.
///
/// This is the only place that inspects platform errors. Known sticker-set
/// failures arrive as typed [`ApiError`] variants; only unrecognized API
/// errors fall back to their description.
pub fn classify_request_error(err: &RequestError) -> PlatformError {
    let kind = match err {
        RequestError::Api(ApiError::InvalidStickersSet) => PlatformErrorKind::SetNotFound,
        RequestError::Api(ApiError::StickerSetNameOccupied) => PlatformErrorKind::NameOccupied,
        RequestError::Api(ApiError::StickerSetOwnerIsBot) => PlatformErrorKind::OwnerNotAllowed,
        RequestError::Api(ApiError::Unknown(description)) => classify_api_description(description),
        RequestError::Api(_) => PlatformErrorKind::Other,
        RequestError::RetryAfter(_) => PlatformErrorKind::RateLimited,
        RequestError::Network(_) | RequestError::Io(_) => PlatformErrorKind::Network,
        _ => PlatformErrorKind::Other,
    };
    PlatformError::new(kind, err.to_string())
}

/// Classify the description of an API error teloxide does not recognize
pub fn classify_api_description(description: &str) -> PlatformErrorKind {
    let lowered = description.to_lowercase();
    if lowered.contains("stickerset_invalid") {
        PlatformErrorKind::SetNotFound
    } else if lowered.contains("sticker set name is already occupied") {
        PlatformErrorKind::NameOccupied
    } else if lowered.contains("user_is_bot") {
        PlatformErrorKind::OwnerNotAllowed
    } else if lowered.contains("too many requests") {
        PlatformErrorKind::RateLimited
    } else {
        PlatformErrorKind::Other
    }
}

/// Map a chat member kind onto the status the subscription gate checks
pub fn membership_status(kind: &ChatMemberKind) -> MembershipStatus {
    match kind {
        ChatMemberKind::Owner(_) => MembershipStatus::Owner,
        ChatMemberKind::Administrator(_) => MembershipStatus::Administrator,
        ChatMemberKind::Member(_) => MembershipStatus::Member,
        ChatMemberKind::Restricted(_) => MembershipStatus::Restricted,
        ChatMemberKind::Left => MembershipStatus::Left,
        ChatMemberKind::Banned(_) => MembershipStatus::Banned,
    }
}

fn input_sticker(sticker: &RenderedSticker) -> InputSticker {
    InputSticker {
        sticker: InputFile::memory(sticker.png.clone()).file_name(STICKER_FILE_NAME),
        format: StickerFormat::Static,
        emoji_list: sticker.emojis.clone(),
        mask_position: None,
        keywords: Vec::new(),
    }
}

impl MembershipSource for TelegramPlatform {
    async fn membership(
        &self,
        channel: Recipient,
        user: UserId,
    ) -> Result<MembershipStatus, PlatformError> {
        let member = self
            .bot
            .get_chat_member(channel, user)
            .await
            .map_err(|e| classify_request_error(&e))?;

        Ok(membership_status(&member.kind))
    }

    async fn channel_info(&self, channel: Recipient) -> Result<ChannelInfo, PlatformError> {
        let chat = self
            .bot
            .get_chat(channel)
            .await
            .map_err(|e| classify_request_error(&e))?;

        Ok(ChannelInfo {
            username: chat.username().map(str::to_string),
            invite_link: chat.invite_link().map(str::to_string),
        })
    }
}

impl StickerStore for TelegramPlatform {
    async fn add_sticker(
        &self,
        owner: UserId,
        set_name: &str,
        sticker: &RenderedSticker,
    ) -> Result<(), PlatformError> {
        self.bot
            .add_sticker_to_set(owner, set_name, input_sticker(sticker))
            .await
            .map(|_| ())
            .map_err(|e| classify_request_error(&e))
    }

    async fn create_set(
        &self,
        owner: UserId,
        set_name: &str,
        title: &str,
        first: &RenderedSticker,
    ) -> Result<(), PlatformError> {
        self.bot
            .create_new_sticker_set(owner, set_name, title, vec![input_sticker(first)])
            .await
            .map(|_| ())
            .map_err(|e| classify_request_error(&e))
    }

    async fn delete_set(&self, set_name: &str) -> Result<(), PlatformError> {
        self.bot
            .delete_sticker_set(set_name)
            .await
            .map(|_| ())
            .map_err(|e| classify_request_error(&e))
    }

    async fn get_set(&self, set_name: &str) -> Result<(), PlatformError> {
        self.bot
            .get_sticker_set(set_name)
            .await
            .map(|_| ())
            .map_err(|e| classify_request_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{Banned, Member, Owner, Seconds, UntilDate};

    fn kind_of(err: RequestError) -> PlatformErrorKind {
        classify_request_error(&err).kind
    }

    #[test]
    fn test_classify_typed_api_errors() {
        assert_eq!(
            kind_of(RequestError::Api(ApiError::InvalidStickersSet)),
            PlatformErrorKind::SetNotFound
        );
        assert_eq!(
            kind_of(RequestError::Api(ApiError::StickerSetNameOccupied)),
            PlatformErrorKind::NameOccupied
        );
        assert_eq!(
            kind_of(RequestError::Api(ApiError::StickerSetOwnerIsBot)),
            PlatformErrorKind::OwnerNotAllowed
        );
        assert_eq!(
            kind_of(RequestError::Api(ApiError::BotBlocked)),
            PlatformErrorKind::Other
        );
        assert_eq!(
            kind_of(RequestError::RetryAfter(Seconds::from_seconds(5))),
            PlatformErrorKind::RateLimited
        );
    }

    /// Unrecognized API errors are classified by their description
    #[test]
    fn test_classify_unknown_api_errors() {
        let unknown = |text: &str| RequestError::Api(ApiError::Unknown(text.to_string()));

        assert_eq!(
            kind_of(unknown("Bad Request: STICKERSET_INVALID")),
            PlatformErrorKind::SetNotFound
        );
        assert_eq!(
            kind_of(unknown("Too Many Requests: retry later")),
            PlatformErrorKind::RateLimited
        );
        assert_eq!(
            kind_of(unknown("Bad Request: chat not found")),
            PlatformErrorKind::Other
        );
    }

    #[test]
    fn test_classify_api_descriptions() {
        assert_eq!(
            classify_api_description("Bad Request: sticker set name is already occupied"),
            PlatformErrorKind::NameOccupied
        );
        assert_eq!(
            classify_api_description("Bad Request: USER_IS_BOT"),
            PlatformErrorKind::OwnerNotAllowed
        );
    }

    /// The channel creator is allowed, a kicked user is not
    #[test]
    fn test_membership_status_mapping() {
        let owner = ChatMemberKind::Owner(Owner {
            custom_title: None,
            is_anonymous: false,
        });
        let member = ChatMemberKind::Member(Member { until_date: None });
        let banned = ChatMemberKind::Banned(Banned {
            until_date: UntilDate::Forever,
        });

        assert_eq!(membership_status(&owner), MembershipStatus::Owner);
        assert!(membership_status(&owner).grants_access());
        assert!(membership_status(&member).grants_access());

        assert_eq!(membership_status(&banned), MembershipStatus::Banned);
        assert!(!membership_status(&banned).grants_access());
        assert_eq!(membership_status(&ChatMemberKind::Left), MembershipStatus::Left);
        assert!(!membership_status(&ChatMemberKind::Left).grants_access());
    }
}
