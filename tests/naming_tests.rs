//! # Sticker Naming Tests

use photo_sticker_bot::naming::{link_for, StickerNaming};
use std::collections::HashSet;
use teloxide::types::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_format() {
        let naming = StickerNaming::new("foo");
        assert_eq!(naming.set_name(UserId(42)), "for_42_by_foo");
        assert_eq!(naming.set_title(), "Stickers from @foo");
        assert_eq!(
            naming.set_link(UserId(42)),
            "https://t.me/addstickers/for_42_by_foo"
        );
    }

    #[test]
    fn test_set_name_is_deterministic() {
        let naming = StickerNaming::new("foo");
        assert_eq!(naming.set_name(UserId(7)), naming.set_name(UserId(7)));
        assert_eq!(
            StickerNaming::new("foo").set_name(UserId(7)),
            naming.set_name(UserId(7))
        );
    }

    /// Distinct users always get distinct set names
    #[test]
    fn test_set_name_is_injective() {
        let naming = StickerNaming::new("foo");
        let ids = (0..1_000u64).chain([u64::MAX, u64::MAX - 1, 1 << 40]);

        let mut seen = HashSet::new();
        for id in ids {
            assert!(seen.insert(naming.set_name(UserId(id))), "collision for {id}");
        }
    }

    #[test]
    fn test_link_for_set_name() {
        assert_eq!(link_for("abc"), "https://t.me/addstickers/abc");
    }
}
