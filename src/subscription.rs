//! # Subscription Gate
//!
//! Every privileged action requires membership in the configured channel.
//! The gate fails closed: a malformed channel id or any platform failure
//! denies access, and the reason is logged so operators can tell a broken
//! gate from a user who simply is not subscribed.

use teloxide::types::UserId;
use tracing::{debug, error, warn};

use crate::config::ChannelTarget;
use crate::platform::MembershipSource;

/// How to point a denied user at the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelHint {
    /// `@handle` of a public channel
    Handle(String),
    /// Invite link of a private channel
    InviteLink(String),
    /// Neither is known; only the configured identifier can be shown
    RawId(String),
}

impl ChannelHint {
    /// Whether the hint is something the user can follow directly
    pub fn is_followable(&self) -> bool {
        !matches!(self, ChannelHint::RawId(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChannelHint::Handle(s) | ChannelHint::InviteLink(s) | ChannelHint::RawId(s) => s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionGate {
    channel: ChannelTarget,
}

impl SubscriptionGate {
    pub fn new(channel: ChannelTarget) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &ChannelTarget {
        &self.channel
    }

    pub async fn is_subscribed<M: MembershipSource>(&self, source: &M, user: UserId) -> bool {
        let Some(recipient) = self.channel.recipient() else {
            error!(
                user_id = %user.0,
                channel = %self.channel.raw(),
                "Channel id is malformed, subscription cannot be checked; set a numeric CHANNEL_ID"
            );
            return false;
        };

        match source.membership(recipient, user).await {
            Ok(status) => {
                debug!(user_id = %user.0, status = ?status, "Subscription status fetched");
                status.grants_access()
            }
            Err(e) => {
                error!(
                    user_id = %user.0,
                    channel = %self.channel.raw(),
                    error = %e,
                    "Subscription check failed; make sure the bot is an administrator of the channel and the id is correct"
                );
                false
            }
        }
    }

    /// Best-effort description of where to subscribe. Never fails.
    pub async fn join_hint<M: MembershipSource>(&self, source: &M) -> ChannelHint {
        match &self.channel {
            ChannelTarget::Username(name) => ChannelHint::Handle(format!("@{name}")),
            ChannelTarget::Malformed(raw) => {
                warn!(channel = %raw, "Channel id is malformed, showing it verbatim");
                ChannelHint::RawId(raw.clone())
            }
            ChannelTarget::Id(id) => match source.channel_info((*id).into()).await {
                Ok(info) => {
                    if let Some(username) = info.username {
                        ChannelHint::Handle(format!("@{username}"))
                    } else if let Some(link) = info.invite_link {
                        ChannelHint::InviteLink(link)
                    } else {
                        ChannelHint::RawId(id.0.to_string())
                    }
                }
                Err(e) => {
                    error!(channel = %id, error = %e, "Failed to fetch channel details for subscription hint");
                    ChannelHint::RawId(id.0.to_string())
                }
            },
        }
    }
}
