//! # Sticker Set Lifecycle
//!
//! Decides between appending to a user's sticker set and creating it.
//! Nothing is remembered between requests: whether the set exists is
//! re-derived from the platform's answer every time.
//!
//! The decision logic lives in [`transition`], a pure function over the
//! result of the previous platform call, so it can be tested without any
//! network. [`StickerLifecycle::submit_sticker`] drives it against a
//! [`StickerStore`].
//!
//! ```text
//! Append ──ok──────────────▶ Appended
//!   │ set not found
//!   ▼
//! Create ──ok──────────────▶ Created
//!   │ name occupied (race)
//!   ▼
//! FollowUpAppend ──ok──────▶ Appended
//!   └──────err─────────────▶ ExistingSetUnchanged
//! ```

use teloxide::types::UserId;
use tracing::{debug, info, warn};

use crate::errors::{PlatformError, PlatformErrorKind};
use crate::naming::StickerNaming;
use crate::platform::{RenderedSticker, StickerStore};

/// Platform call to make next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Append,
    Create,
    /// Single retry after losing the creation race; never loops back
    FollowUpAppend,
}

/// Where the submission stood when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Append,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Appended,
    /// The set was created concurrently by another request and this image
    /// could not be added to it
    ExistingSetUnchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub stage: Stage,
    pub error: PlatformError,
}

impl SubmitError {
    pub fn is_permanent(&self) -> bool {
        !self.error.kind.is_transient()
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Stage::Append => write!(f, "Adding sticker failed: {}", self.error),
            Stage::Create => write!(f, "Creating sticker set failed: {}", self.error),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Next(Step),
    Done(SubmitOutcome),
    Fail(SubmitError),
}

/// Decide what follows `step` given the platform's answer to it
pub fn transition(step: Step, result: Result<(), PlatformError>) -> Transition {
    match (step, result) {
        (Step::Append, Ok(())) => Transition::Done(SubmitOutcome::Appended),
        (Step::Append, Err(e)) if e.is(PlatformErrorKind::SetNotFound) => {
            Transition::Next(Step::Create)
        }
        (Step::Append, Err(error)) => Transition::Fail(SubmitError {
            stage: Stage::Append,
            error,
        }),

        (Step::Create, Ok(())) => Transition::Done(SubmitOutcome::Created),
        (Step::Create, Err(e)) if e.is(PlatformErrorKind::NameOccupied) => {
            Transition::Next(Step::FollowUpAppend)
        }
        (Step::Create, Err(error)) => Transition::Fail(SubmitError {
            stage: Stage::Create,
            error,
        }),

        (Step::FollowUpAppend, Ok(())) => Transition::Done(SubmitOutcome::Appended),
        (Step::FollowUpAppend, Err(_)) => Transition::Done(SubmitOutcome::ExistingSetUnchanged),
    }
}

pub struct StickerLifecycle<S> {
    store: S,
    naming: StickerNaming,
}

impl<S: StickerStore> StickerLifecycle<S> {
    pub fn new(store: S, naming: StickerNaming) -> Self {
        Self { store, naming }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn submit_sticker(
        &self,
        user: UserId,
        sticker: &RenderedSticker,
    ) -> Result<SubmitReport, SubmitError> {
        let set_name = self.naming.set_name(user);
        let mut step = Step::Append;

        loop {
            let result = match step {
                Step::Append | Step::FollowUpAppend => {
                    self.store.add_sticker(user, &set_name, sticker).await
                }
                Step::Create => {
                    self.store
                        .create_set(user, &set_name, &self.naming.set_title(), sticker)
                        .await
                }
            };

            if let (Step::FollowUpAppend, Err(e)) = (step, &result) {
                warn!(
                    user_id = %user.0,
                    set_name = %set_name,
                    error = %e,
                    "Follow-up append after name race failed, image not added"
                );
            }

            match transition(step, result) {
                Transition::Next(next) => {
                    match next {
                        Step::Create => {
                            info!(user_id = %user.0, set_name = %set_name, "Sticker set not found, creating it")
                        }
                        Step::FollowUpAppend => {
                            warn!(user_id = %user.0, set_name = %set_name, "Sticker set name already occupied, likely a concurrent request")
                        }
                        Step::Append => {}
                    }
                    step = next;
                }
                Transition::Done(outcome) => {
                    info!(user_id = %user.0, set_name = %set_name, outcome = ?outcome, "Sticker submitted");
                    return Ok(SubmitReport {
                        outcome,
                        link: self.naming.set_link(user),
                    });
                }
                Transition::Fail(err) => return Err(err),
            }
        }
    }

    /// Delete the user's set; an already absent set counts as success
    pub async fn delete_set(&self, user: UserId) -> Result<DeleteOutcome, PlatformError> {
        let set_name = self.naming.set_name(user);
        match self.store.delete_set(&set_name).await {
            Ok(()) => {
                info!(user_id = %user.0, set_name = %set_name, "Sticker set deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.is(PlatformErrorKind::SetNotFound) => {
                info!(user_id = %user.0, set_name = %set_name, "Sticker set already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => Err(e),
        }
    }

    /// Link to the user's set, `None` when the user has no set yet
    pub async fn get_link(&self, user: UserId) -> Result<Option<String>, PlatformError> {
        let set_name = self.naming.set_name(user);
        match self.store.get_set(&set_name).await {
            Ok(()) => Ok(Some(self.naming.set_link(user))),
            Err(e) if e.is(PlatformErrorKind::SetNotFound) => {
                debug!(user_id = %user.0, set_name = %set_name, "No sticker set for user");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
