//! # Error Types Module
//!
//! Structured error types shared by the sticker pipeline, the platform adapter
//! and startup configuration. Platform failures are reduced to a tagged
//! [`PlatformErrorKind`] in exactly one place (`telegram::classify_request_error`)
//! so handlers never inspect raw error strings.

/// What went wrong when talking to the messaging platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The named sticker set does not exist
    SetNotFound,
    /// A sticker set with this name already exists
    NameOccupied,
    /// The target account cannot own sticker sets (e.g. it is a bot)
    OwnerNotAllowed,
    /// Flood control kicked in
    RateLimited,
    /// Transport-level failure
    Network,
    /// Anything the adapter could not classify
    Other,
}

impl PlatformErrorKind {
    /// Transient failures may succeed if the user simply tries again later
    pub fn is_transient(self) -> bool {
        matches!(self, PlatformErrorKind::RateLimited | PlatformErrorKind::Network)
    }
}

/// A classified platform failure together with the platform's own description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub kind: PlatformErrorKind,
    pub message: String,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is(&self, kind: PlatformErrorKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PlatformErrorKind::SetNotFound => write!(f, "Sticker set not found: {}", self.message),
            PlatformErrorKind::NameOccupied => {
                write!(f, "Sticker set name occupied: {}", self.message)
            }
            PlatformErrorKind::OwnerNotAllowed => {
                write!(f, "Owner cannot hold sticker sets: {}", self.message)
            }
            PlatformErrorKind::RateLimited => write!(f, "Rate limited: {}", self.message),
            PlatformErrorKind::Network => write!(f, "Network error: {}", self.message),
            PlatformErrorKind::Other => write!(f, "Platform error: {}", self.message),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Failures of the photo → sticker image pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickerError {
    /// The caption carried no emoji to attach to the sticker
    NoEmoji,
    /// Fetching the photo from the platform failed
    Download(String),
    /// The background-removal service failed or could not be reached
    Cutout(String),
    /// The cutout result could not be turned into a sticker image
    ImageProcessing(String),
}

impl std::fmt::Display for StickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StickerError::NoEmoji => write!(f, "No emoji found in caption"),
            StickerError::Download(msg) => write!(f, "Download error: {msg}"),
            StickerError::Cutout(msg) => write!(f, "Cutout error: {msg}"),
            StickerError::ImageProcessing(msg) => write!(f, "Image processing error: {msg}"),
        }
    }
}

impl std::error::Error for StickerError {}

/// Startup configuration errors; these are fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent or blank
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "`{key}` must be set in the environment or the `.env` file")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
