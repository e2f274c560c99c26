//! # Image Cutout Adapter
//!
//! Background removal is delegated to an external rembg-compatible HTTP
//! service. A [`CutoutSession`] binds a model name to an HTTP client; the
//! [`CutoutService`] either hands out one session created at startup
//! (performance mode) or builds a fresh one per request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::config::RunMode;
use crate::errors::StickerError;

/// Upper bound for one background-removal round trip
pub const CUTOUT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug)]
pub struct CutoutSession {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl CutoutSession {
    /// Create a session for `model` served at `endpoint`
    ///
    /// Fails for a blank model name, an unparsable endpoint or when the HTTP
    /// client cannot be built.
    pub fn new(endpoint: &str, model: &str) -> Result<Self, StickerError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(StickerError::Cutout("model name is empty".to_string()));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| StickerError::Cutout(format!("invalid cutout endpoint `{endpoint}`: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CUTOUT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StickerError::Cutout(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `image` to the service and return the background-free PNG
    pub async fn remove_background(&self, image: Vec<u8>) -> Result<Vec<u8>, StickerError> {
        debug!(model = %self.model, bytes = image.len(), "Requesting background removal");

        let part = Part::bytes(image)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| StickerError::Cutout(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| StickerError::Cutout(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| StickerError::Cutout(format!("service rejected image: {e}")))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StickerError::Cutout(format!("cannot read response: {e}")))?;

        Ok(bytes.to_vec())
    }
}

/// Hands out cutout sessions; shared read-only by all requests
#[derive(Debug)]
pub struct CutoutService {
    endpoint: String,
    model: String,
    pooled: Option<Arc<CutoutSession>>,
}

impl CutoutService {
    /// In performance mode the session is created here; if that fails the
    /// service logs a warning and falls back to per-request sessions.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, mode: RunMode) -> Self {
        let endpoint = endpoint.into();
        let model = model.into();

        let pooled = match mode {
            RunMode::Standard => None,
            RunMode::Performance => match CutoutSession::new(&endpoint, &model) {
                Ok(session) => {
                    info!(model = %model, "Cutout session preloaded in performance mode");
                    Some(Arc::new(session))
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Failed to preload cutout session, falling back to per-request sessions");
                    None
                }
            },
        };

        Self {
            endpoint,
            model,
            pooled,
        }
    }

    pub fn is_pooled(&self) -> bool {
        self.pooled.is_some()
    }

    pub fn session(&self) -> Result<Arc<CutoutSession>, StickerError> {
        match &self.pooled {
            Some(session) => Ok(Arc::clone(session)),
            None => CutoutSession::new(&self.endpoint, &self.model).map(Arc::new),
        }
    }
}
