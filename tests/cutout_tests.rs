//! # Cutout Adapter Tests
//!
//! Session construction and the pooled / per-request fallback. No request
//! reaches a real background-removal service here.

use photo_sticker_bot::config::RunMode;
use photo_sticker_bot::cutout::{CutoutService, CutoutSession};
use photo_sticker_bot::errors::StickerError;
use std::sync::Arc;

const ENDPOINT: &str = "http://127.0.0.1:7000/api/remove";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = CutoutSession::new(ENDPOINT, " u2net ").unwrap();
        assert_eq!(session.model(), "u2net");
        assert_eq!(session.endpoint().as_str(), ENDPOINT);
    }

    #[test]
    fn test_session_rejects_blank_model() {
        let err = CutoutSession::new(ENDPOINT, "  ").unwrap_err();
        assert!(matches!(err, StickerError::Cutout(_)));
    }

    #[test]
    fn test_session_rejects_invalid_endpoint() {
        let err = CutoutSession::new("not a url", "u2net").unwrap_err();
        assert!(matches!(err, StickerError::Cutout(msg) if msg.contains("not a url")));
    }

    /// Standard mode builds a fresh session per request
    #[test]
    fn test_standard_mode_creates_sessions_per_request() {
        let service = CutoutService::new(ENDPOINT, "u2net", RunMode::Standard);
        assert!(!service.is_pooled());

        let first = service.session().unwrap();
        let second = service.session().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    /// Performance mode shares one session across requests
    #[test]
    fn test_performance_mode_shares_one_session() {
        let service = CutoutService::new(ENDPOINT, "u2net", RunMode::Performance);
        assert!(service.is_pooled());

        let first = service.session().unwrap();
        let second = service.session().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    /// A failed preload does not abort startup; requests fall back to ad hoc sessions
    #[test]
    fn test_failed_preload_falls_back() {
        let service = CutoutService::new(ENDPOINT, "", RunMode::Performance);
        assert!(!service.is_pooled());
        assert!(matches!(service.session(), Err(StickerError::Cutout(_))));
    }
}
