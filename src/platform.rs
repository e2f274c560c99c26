//! # Platform Seams
//!
//! The subscription gate and the sticker lifecycle only talk to the messaging
//! platform through these traits. `telegram::TelegramPlatform` implements them
//! on top of teloxide; tests inject in-memory fakes.

use std::future::Future;

use teloxide::types::{Recipient, UserId};

use crate::errors::PlatformError;

/// A user's standing in a chat, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MembershipStatus {
    /// Only members, administrators and the owner may use the bot
    pub fn grants_access(self) -> bool {
        matches!(
            self,
            MembershipStatus::Owner | MembershipStatus::Administrator | MembershipStatus::Member
        )
    }
}

/// Public details of a channel used to tell users where to subscribe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelInfo {
    pub username: Option<String>,
    pub invite_link: Option<String>,
}

/// A finished sticker image together with the emoji attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSticker {
    pub png: Vec<u8>,
    pub emojis: Vec<String>,
}

pub trait MembershipSource: Send + Sync {
    fn membership(
        &self,
        channel: Recipient,
        user: UserId,
    ) -> impl Future<Output = Result<MembershipStatus, PlatformError>> + Send;

    fn channel_info(
        &self,
        channel: Recipient,
    ) -> impl Future<Output = Result<ChannelInfo, PlatformError>> + Send;
}

/// Sticker-set operations of the platform.
///
/// Absence of a set is reported as `PlatformErrorKind::SetNotFound`, a name
/// clash on creation as `PlatformErrorKind::NameOccupied`.
pub trait StickerStore: Send + Sync {
    fn add_sticker(
        &self,
        owner: UserId,
        set_name: &str,
        sticker: &RenderedSticker,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    fn create_set(
        &self,
        owner: UserId,
        set_name: &str,
        title: &str,
        first: &RenderedSticker,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    fn delete_set(&self, set_name: &str) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Succeeds iff the set exists
    fn get_set(&self, set_name: &str) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

impl<T: MembershipSource> MembershipSource for &T {
    fn membership(
        &self,
        channel: Recipient,
        user: UserId,
    ) -> impl Future<Output = Result<MembershipStatus, PlatformError>> + Send {
        (**self).membership(channel, user)
    }

    fn channel_info(
        &self,
        channel: Recipient,
    ) -> impl Future<Output = Result<ChannelInfo, PlatformError>> + Send {
        (**self).channel_info(channel)
    }
}

impl<T: StickerStore> StickerStore for &T {
    fn add_sticker(
        &self,
        owner: UserId,
        set_name: &str,
        sticker: &RenderedSticker,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send {
        (**self).add_sticker(owner, set_name, sticker)
    }

    fn create_set(
        &self,
        owner: UserId,
        set_name: &str,
        title: &str,
        first: &RenderedSticker,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send {
        (**self).create_set(owner, set_name, title, first)
    }

    fn delete_set(&self, set_name: &str) -> impl Future<Output = Result<(), PlatformError>> + Send {
        (**self).delete_set(set_name)
    }

    fn get_set(&self, set_name: &str) -> impl Future<Output = Result<(), PlatformError>> + Send {
        (**self).get_set(set_name)
    }
}
