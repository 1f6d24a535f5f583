//! Save/upsert orchestration: the one transaction boundary in the app.
//!
//! Create-vs-update branches on [`DraftState`], never on an ad hoc null
//! check. Saves against the same draft are serialized through an async
//! mutex held across the remote call, so a double-fired save can never
//! produce two creates: the second save observes the id assigned by the
//! first and updates. The draft itself stays freely editable while a save
//! is in flight — the payload is snapshotted up front, and the next save
//! carries whatever the user typed since (last-write-wins).

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::api::{ApiError, ClinicApi};
use crate::config::SavePolicy;
use crate::draft::{DraftState, EncounterDraft};
use crate::models::AppointmentStatus;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Internal lock error")]
    LockPoisoned,
}

/// What a successful save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save: the backend assigned this id.
    Created(i64),
    /// Subsequent save against the existing record.
    Updated(i64),
}

impl SaveOutcome {
    pub fn id(&self) -> i64 {
        match *self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

pub struct EncounterSaver {
    api: Arc<dyn ClinicApi>,
    policy: SavePolicy,
    /// Serializes saves. Held across the remote call so two near-
    /// simultaneous saves on a not-yet-persisted draft become create
    /// followed by update, never two creates.
    save_lock: tokio::sync::Mutex<()>,
}

impl EncounterSaver {
    pub fn new(api: Arc<dyn ClinicApi>, policy: SavePolicy) -> Self {
        Self {
            api,
            policy,
            save_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Persist the draft: create on first save, update afterwards.
    ///
    /// On failure the draft is left exactly as it was — no partial commit,
    /// no dropped fields — and the error carries the server's message for
    /// the user to act on.
    pub async fn save(&self, draft: &Mutex<EncounterDraft>) -> Result<SaveOutcome, SaveError> {
        let _guard = self.save_lock.lock().await;

        // Snapshot under the lock, then release: the form stays responsive
        // and editable while the request is in flight.
        let (payload, state, draft_id) = {
            let draft = draft.lock().map_err(|_| SaveError::LockPoisoned)?;
            (draft.payload(), draft.state, draft.draft_id)
        };

        let outcome = match state {
            DraftState::New => {
                let persisted = self.api.create_encounter(&payload).await?;
                let id = persisted.id.ok_or_else(|| {
                    ApiError::Decode("created encounter came back without an id".into())
                })?;
                let mut draft = draft.lock().map_err(|_| SaveError::LockPoisoned)?;
                draft.state = DraftState::Existing(id);
                tracing::info!(
                    %draft_id,
                    atencion_id = payload.atencion_id,
                    id,
                    "encounter created"
                );
                SaveOutcome::Created(id)
            }
            DraftState::Existing(id) => {
                self.api.update_encounter(id, &payload).await?;
                tracing::info!(
                    %draft_id,
                    atencion_id = payload.atencion_id,
                    id,
                    "encounter updated"
                );
                SaveOutcome::Updated(id)
            }
        };

        if self.policy.mark_attended_on_save {
            // Policy action, best-effort: the clinical record is already
            // safe, so a failed status transition must not fail the save.
            if let Err(err) = self
                .api
                .set_appointment_status(payload.atencion_id, AppointmentStatus::Atendida)
                .await
            {
                tracing::warn!(
                    atencion_id = payload.atencion_id,
                    %err,
                    "could not mark appointment attended after save"
                );
            }
        }

        Ok(outcome)
    }
}
