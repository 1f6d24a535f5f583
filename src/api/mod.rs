//! Remote clinic-service boundary.
//!
//! [`ClinicApi`] is the seam between the consultation core and the backend:
//! every suspension point in the crate is one of these calls. The HTTP
//! implementation lives in [`http`]; tests run against the in-memory
//! [`mock`] double. Responses follow the `{ success, data, message }`
//! envelope normalized in [`envelope`].

pub mod envelope;
pub mod error;
pub mod http;
#[cfg(test)]
pub mod mock;

pub use envelope::Envelope;
pub use error::ApiError;
pub use http::HttpClinicApi;

use async_trait::async_trait;

use crate::models::{
    AppointmentStatus, Attachment, AttachmentCategory, AttachmentOwner, Encounter, HistoryRecord,
};

/// File content handed to [`ClinicApi::upload_attachment`]. The transport
/// builds the multipart body; callers only supply a name and bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Operations the backend exposes to the consultation core.
///
/// Not-found on the encounter lookup is part of the contract (`Ok(None)` =
/// creation mode); an empty history is equally valid. Create returns the
/// persisted record including its backend-assigned id.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    /// Encounter documentation tied to one appointment, if any exists yet.
    async fn encounter_by_appointment(&self, atencion_id: i64)
        -> Result<Option<Encounter>, ApiError>;

    /// All past encounters for a patient, most recent first.
    async fn patient_history(&self, paciente_id: i64) -> Result<Vec<HistoryRecord>, ApiError>;

    /// Persist a brand-new encounter. The returned record carries the id.
    async fn create_encounter(&self, payload: &Encounter) -> Result<Encounter, ApiError>;

    /// Overwrite an existing encounter.
    async fn update_encounter(&self, id: i64, payload: &Encounter) -> Result<Encounter, ApiError>;

    /// Move an appointment through its status machine.
    async fn set_appointment_status(
        &self,
        atencion_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), ApiError>;

    /// Every attachment owned by a patient or encounter. Fetched in full
    /// per request, no streaming.
    async fn list_attachments(&self, owner: AttachmentOwner) -> Result<Vec<Attachment>, ApiError>;

    /// Store one file against an owner, tagged with a category.
    async fn upload_attachment(
        &self,
        owner: AttachmentOwner,
        category: AttachmentCategory,
        file: FileUpload,
    ) -> Result<Attachment, ApiError>;

    /// Remove an attachment and its backing file. Irreversible.
    async fn delete_attachment(&self, attachment_id: i64) -> Result<(), ApiError>;
}
