//! In-memory [`ClinicApi`] double for unit and end-to-end tests.
//!
//! Persists creates with sequential ids the way the backend does, records
//! call counts so idempotence assertions can distinguish create from
//! update, and can be told to fail specific operations.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::error::ApiError;
use super::{ClinicApi, FileUpload};
use crate::models::{
    AppointmentStatus, Attachment, AttachmentCategory, AttachmentOwner, Encounter, HistoryRecord,
};

#[derive(Default)]
struct MockState {
    existing: Option<Encounter>,
    history: Vec<HistoryRecord>,
    saved: Vec<Encounter>,
    attachments: Vec<Attachment>,
    status_changes: Vec<(i64, AppointmentStatus)>,
    next_id: i64,
    next_attachment_id: i64,
    create_calls: usize,
    update_calls: usize,
    history_calls: usize,
    fail_history: bool,
    fail_create: Option<String>,
    fail_status: bool,
}

pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_id: 55,
                next_attachment_id: 1,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    // ── Arrangement ─────────────────────────────────────────

    pub fn with_existing(self, encounter: Encounter) -> Self {
        self.lock().existing = Some(encounter);
        self
    }

    pub fn with_history(self, history: Vec<HistoryRecord>) -> Self {
        self.lock().history = history;
        self
    }

    pub fn failing_history(self) -> Self {
        self.lock().fail_history = true;
        self
    }

    pub fn failing_create(self, message: &str) -> Self {
        self.lock().fail_create = Some(message.into());
        self
    }

    pub fn failing_status_updates(self) -> Self {
        self.lock().fail_status = true;
        self
    }

    // ── Inspection ──────────────────────────────────────────

    pub fn saved(&self) -> Vec<Encounter> {
        self.lock().saved.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    pub fn history_calls(&self) -> usize {
        self.lock().history_calls
    }

    pub fn status_changes(&self) -> Vec<(i64, AppointmentStatus)> {
        self.lock().status_changes.clone()
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        self.lock().attachments.clone()
    }
}

#[async_trait]
impl ClinicApi for MockApi {
    async fn encounter_by_appointment(
        &self,
        atencion_id: i64,
    ) -> Result<Option<Encounter>, ApiError> {
        let state = self.lock();
        Ok(state
            .existing
            .clone()
            .filter(|enc| enc.atencion_id == atencion_id))
    }

    async fn patient_history(&self, paciente_id: i64) -> Result<Vec<HistoryRecord>, ApiError> {
        let mut state = self.lock();
        state.history_calls += 1;
        if state.fail_history {
            return Err(ApiError::Transport("history service unavailable".into()));
        }
        Ok(state
            .history
            .iter()
            .filter(|record| record.encounter.paciente_id == paciente_id)
            .cloned()
            .collect())
    }

    async fn create_encounter(&self, payload: &Encounter) -> Result<Encounter, ApiError> {
        let mut state = self.lock();
        state.create_calls += 1;
        if let Some(message) = &state.fail_create {
            return Err(ApiError::Application(message.clone()));
        }
        let mut persisted = payload.clone();
        persisted.id = Some(state.next_id);
        state.next_id += 1;
        state.saved.push(persisted.clone());
        Ok(persisted)
    }

    async fn update_encounter(&self, id: i64, payload: &Encounter) -> Result<Encounter, ApiError> {
        let mut state = self.lock();
        state.update_calls += 1;
        let slot = state
            .saved
            .iter_mut()
            .find(|enc| enc.id == Some(id))
            .ok_or_else(|| ApiError::Application(format!("consulta {id} no existe")))?;
        let mut persisted = payload.clone();
        persisted.id = Some(id);
        *slot = persisted.clone();
        Ok(persisted)
    }

    async fn set_appointment_status(
        &self,
        atencion_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        if state.fail_status {
            return Err(ApiError::Transport("status service unavailable".into()));
        }
        state.status_changes.push((atencion_id, status));
        Ok(())
    }

    async fn list_attachments(&self, owner: AttachmentOwner) -> Result<Vec<Attachment>, ApiError> {
        Ok(self
            .lock()
            .attachments
            .iter()
            .filter(|a| a.owner == owner)
            .cloned()
            .collect())
    }

    async fn upload_attachment(
        &self,
        owner: AttachmentOwner,
        category: AttachmentCategory,
        file: FileUpload,
    ) -> Result<Attachment, ApiError> {
        let mut state = self.lock();
        let attachment = Attachment {
            id: state.next_attachment_id,
            owner,
            category,
            mime: mime_guess::from_path(&file.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            path: format!("uploads/{}", file.file_name),
            file_name: file.file_name,
            created_at: Utc::now().naive_utc(),
        };
        state.next_attachment_id += 1;
        state.attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn delete_attachment(&self, attachment_id: i64) -> Result<(), ApiError> {
        let mut state = self.lock();
        let before = state.attachments.len();
        state.attachments.retain(|a| a.id != attachment_id);
        if state.attachments.len() == before {
            return Err(ApiError::Application(format!(
                "archivo {attachment_id} no existe"
            )));
        }
        Ok(())
    }
}
