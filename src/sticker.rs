//! # Sticker Preparation
//!
//! Turns a photo caption into the sticker's emoji list and a cutout image
//! into a PNG the platform accepts as a static sticker.

use std::io::Cursor;
use std::sync::LazyLock;

use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat};
use regex::Regex;
use tracing::debug;

use crate::errors::StickerError;

/// Longest side of a static sticker, in pixels
pub const STICKER_SIDE: u32 = 512;
/// Platform limit on emoji attached to one sticker
pub const MAX_STICKER_EMOJIS: usize = 20;

// Keycaps and flag pairs first. A leading pictograph must either default to
// emoji presentation or carry VS16 or a skin tone, so bare text symbols such
// as `©` are skipped. ZWJ chains may join further pictographs.
static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[0-9#*]\x{FE0F}?\x{20E3}",
        r"|\p{Regional_Indicator}{2}",
        r"|(?:[\p{Emoji_Presentation}&&\p{Extended_Pictographic}](?:\x{FE0F}|\p{Emoji_Modifier})?",
        r"|\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier}))",
        r"(?:\x{200D}\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})?)*",
    ))
    .expect("emoji pattern is valid")
});

/// Emoji found in `caption`, de-duplicated in order of appearance
pub fn extract_emojis(caption: Option<&str>) -> Result<Vec<String>, StickerError> {
    let caption = caption.unwrap_or_default();
    let mut emojis: Vec<String> = Vec::new();

    for found in EMOJI_REGEX.find_iter(caption) {
        let emoji = found.as_str().to_string();
        if !emojis.contains(&emoji) {
            emojis.push(emoji);
        }
        if emojis.len() == MAX_STICKER_EMOJIS {
            break;
        }
    }

    if emojis.is_empty() {
        return Err(StickerError::NoEmoji);
    }
    debug!(emoji_count = emojis.len(), "Emoji extracted from caption");
    Ok(emojis)
}

/// Scale a cutout so its longer side is exactly [`STICKER_SIDE`] and encode it as PNG
pub fn prepare_sticker_png(cutout: &[u8]) -> Result<Vec<u8>, StickerError> {
    let image = image::load_from_memory(cutout)
        .map_err(|e| StickerError::ImageProcessing(format!("cannot decode cutout: {e}")))?;

    let resized = image.resize(STICKER_SIDE, STICKER_SIDE, FilterType::Lanczos3);
    let rgba = DynamicImage::ImageRgba8(resized.to_rgba8());

    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| StickerError::ImageProcessing(format!("cannot encode sticker: {e}")))?;

    debug!(
        width = rgba.width(),
        height = rgba.height(),
        bytes = png.len(),
        "Sticker image prepared"
    );
    Ok(png)
}
