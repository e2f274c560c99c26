//! # Bot Tests
//!
//! Command parsing and the reply texts handlers send for each outcome.

use photo_sticker_bot::bot::ui_builder::{
    delete_outcome_text, pack_link_text, sticker_error_text, submit_error_text,
    submit_report_text, subscription_required_text, Denial,
};
use photo_sticker_bot::bot::Command;
use photo_sticker_bot::errors::{PlatformError, PlatformErrorKind, StickerError};
use photo_sticker_bot::lifecycle::{DeleteOutcome, Stage, SubmitError, SubmitOutcome, SubmitReport};
use photo_sticker_bot::localization::LocalizationManager;
use photo_sticker_bot::subscription::ChannelHint;
use teloxide::utils::command::BotCommands;

const LINK: &str = "https://t.me/addstickers/for_42_by_foo";

fn messages() -> LocalizationManager {
    LocalizationManager::new().expect("Failed to create localization manager")
}

fn report(outcome: SubmitOutcome) -> SubmitReport {
    SubmitReport {
        outcome,
        link: LINK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "foo_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "foo_bot").unwrap(), Command::Help);
        assert_eq!(
            Command::parse("/sticker_pack_link", "foo_bot").unwrap(),
            Command::StickerPackLink
        );
        assert_eq!(
            Command::parse("/delete_sticker_pack@foo_bot", "foo_bot").unwrap(),
            Command::DeleteStickerPack
        );
        assert!(Command::parse("/unknown", "foo_bot").is_err());
    }

    #[test]
    fn test_command_descriptions_cover_all_commands() {
        let commands = Command::bot_commands();
        let names: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();
        for expected in ["start", "help", "sticker_pack_link", "delete_sticker_pack"] {
            assert!(
                names.iter().any(|name| name.trim_start_matches('/') == expected),
                "missing {expected} in {names:?}"
            );
        }
    }

    /// Followable hints invite the user to subscribe directly
    #[test]
    fn test_subscription_text_with_handle() {
        let text = subscription_required_text(
            &messages(),
            Denial::Command,
            &ChannelHint::Handle("@sticker_news".to_string()),
            Some("en"),
        );
        assert!(text.contains("Subscribe here: @sticker_news"));
        assert!(text.contains("try the command again"));
    }

    /// Raw ids ask the user to make sure they are subscribed
    #[test]
    fn test_subscription_text_with_raw_id() {
        let text = subscription_required_text(
            &messages(),
            Denial::Start,
            &ChannelHint::RawId("-100123".to_string()),
            None,
        );
        assert!(text.contains("channel with ID -100123"));
        assert!(text.contains("/start again"));
    }

    #[test]
    fn test_subscription_text_in_russian() {
        let text = subscription_required_text(
            &messages(),
            Denial::Command,
            &ChannelHint::InviteLink("https://t.me/+abc".to_string()),
            Some("ru"),
        );
        assert!(text.contains("Подпишитесь здесь: https://t.me/+abc"));
    }

    #[test]
    fn test_submit_report_texts_contain_link() {
        let messages = messages();
        for outcome in [
            SubmitOutcome::Created,
            SubmitOutcome::Appended,
            SubmitOutcome::ExistingSetUnchanged,
        ] {
            let text = submit_report_text(&messages, &report(outcome), Some("en"));
            assert!(text.contains(LINK), "{outcome:?}: {text}");
        }

        let created = submit_report_text(&messages, &report(SubmitOutcome::Created), Some("en"));
        let appended = submit_report_text(&messages, &report(SubmitOutcome::Appended), Some("en"));
        assert_ne!(created, appended);

        let unchanged = submit_report_text(
            &messages,
            &report(SubmitOutcome::ExistingSetUnchanged),
            Some("en"),
        );
        assert!(unchanged.contains("not added"));
        assert!(unchanged.contains("send the photo again"));
        assert!(!unchanged.starts_with('✅'));
    }

    #[test]
    fn test_submit_error_texts() {
        let messages = messages();
        let error = |stage, kind| SubmitError {
            stage,
            error: PlatformError::new(kind, "test"),
        };

        assert_eq!(
            submit_error_text(&messages, &error(Stage::Append, PlatformErrorKind::Other), None),
            messages.t("error-add-sticker", None)
        );
        assert_eq!(
            submit_error_text(&messages, &error(Stage::Create, PlatformErrorKind::Network), None),
            messages.t("error-create-set", None)
        );
        assert_eq!(
            submit_error_text(
                &messages,
                &error(Stage::Create, PlatformErrorKind::OwnerNotAllowed),
                None
            ),
            messages.t("error-owner-is-bot", None)
        );
    }

    /// Missing emoji gets its own corrective message
    #[test]
    fn test_sticker_error_texts() {
        let messages = messages();
        let no_emoji = sticker_error_text(&messages, &StickerError::NoEmoji, Some("en"));
        assert!(no_emoji.contains("emoji"));

        let cutout = sticker_error_text(&messages, &StickerError::Cutout("down".into()), Some("en"));
        assert_ne!(no_emoji, cutout);
        assert!(!cutout.contains("down"));
    }

    #[test]
    fn test_pack_texts() {
        let messages = messages();
        assert!(pack_link_text(&messages, Some(LINK), None).contains(LINK));
        assert_eq!(
            pack_link_text(&messages, None, None),
            messages.t("pack-missing", None)
        );
        assert_ne!(
            delete_outcome_text(&messages, DeleteOutcome::Deleted, None),
            delete_outcome_text(&messages, DeleteOutcome::AlreadyAbsent, None)
        );
    }
}
