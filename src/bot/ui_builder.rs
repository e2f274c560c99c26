//! UI Builder module for composing user-facing replies

use teloxide::types::Message;

use crate::errors::{PlatformErrorKind, StickerError};
use crate::lifecycle::{DeleteOutcome, Stage, SubmitError, SubmitOutcome, SubmitReport};
use crate::localization::LocalizationManager;
use crate::subscription::ChannelHint;

/// Which command ran into the subscription gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// `/start` asks the user to press `/start` again
    Start,
    /// Everything else asks the user to repeat the command
    Command,
}

/// Telegram language code of the message sender
pub fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

pub fn subscription_required_text(
    messages: &LocalizationManager,
    denial: Denial,
    hint: &ChannelHint,
    language_code: Option<&str>,
) -> String {
    let hint_key = if hint.is_followable() {
        "subscribe-hint-link"
    } else {
        "subscribe-hint-id"
    };
    let hint_text = messages.t_args(hint_key, &[("channel", hint.as_str())], language_code);

    let key = match denial {
        Denial::Start => "subscribe-start",
        Denial::Command => "subscribe-required",
    };
    messages.t_args(key, &[("hint", &hint_text)], language_code)
}

pub fn submit_report_text(
    messages: &LocalizationManager,
    report: &SubmitReport,
    language_code: Option<&str>,
) -> String {
    let key = match report.outcome {
        SubmitOutcome::Created => "sticker-created",
        SubmitOutcome::Appended => "sticker-appended",
        SubmitOutcome::ExistingSetUnchanged => "sticker-set-existed",
    };
    messages.t_args(key, &[("link", &report.link)], language_code)
}

pub fn submit_error_text(
    messages: &LocalizationManager,
    error: &SubmitError,
    language_code: Option<&str>,
) -> String {
    let key = if error.error.is(PlatformErrorKind::OwnerNotAllowed) {
        "error-owner-is-bot"
    } else {
        match error.stage {
            Stage::Append => "error-add-sticker",
            Stage::Create => "error-create-set",
        }
    };
    messages.t(key, language_code)
}

pub fn sticker_error_text(
    messages: &LocalizationManager,
    error: &StickerError,
    language_code: Option<&str>,
) -> String {
    let key = match error {
        StickerError::NoEmoji => "error-no-emoji",
        StickerError::Cutout(_) => "error-cutout",
        StickerError::Download(_) | StickerError::ImageProcessing(_) => "error-processing",
    };
    messages.t(key, language_code)
}

pub fn delete_outcome_text(
    messages: &LocalizationManager,
    outcome: DeleteOutcome,
    language_code: Option<&str>,
) -> String {
    match outcome {
        DeleteOutcome::Deleted => messages.t("pack-deleted", language_code),
        DeleteOutcome::AlreadyAbsent => messages.t("pack-already-absent", language_code),
    }
}

pub fn pack_link_text(
    messages: &LocalizationManager,
    link: Option<&str>,
    language_code: Option<&str>,
) -> String {
    match link {
        Some(link) => messages.t_args("pack-link", &[("link", link)], language_code),
        None => messages.t("pack-missing", language_code),
    }
}
