//! Subscription gate wiring for handlers

use teloxide::types::UserId;
use tracing::info;

use super::ui_builder::{subscription_required_text, Denial};
use crate::context::AppContext;
use crate::platform::MembershipSource;

/// Check the sender's subscription.
///
/// Returns `None` when the handler may proceed, otherwise the reply telling
/// the user where to subscribe.
pub async fn subscription_denial<M: MembershipSource>(
    source: &M,
    ctx: &AppContext,
    user: UserId,
    denial: Denial,
    language_code: Option<&str>,
) -> Option<String> {
    if ctx.gate.is_subscribed(source, user).await {
        return None;
    }

    info!(user_id = %user.0, "Access denied, user is not subscribed");
    let hint = ctx.gate.join_hint(source).await;
    Some(subscription_required_text(
        &ctx.messages,
        denial,
        &hint,
        language_code,
    ))
}
