//! Media attachments: files linked to a patient or a persisted encounter.
//!
//! Attachments live independently from the encounter draft — once uploaded
//! they persist even if the draft is abandoned. The one precondition is
//! enforced here, before any network call: attaching to an encounter
//! requires the encounter to have been saved, because the backend needs a
//! real id to own the file.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, ClinicApi, FileUpload};
use crate::draft::EncounterDraft;
use crate::models::{Attachment, AttachmentCategory, AttachmentOwner};

#[derive(Debug, Error)]
pub enum MediaError {
    /// Upload attempted against an unsaved draft. Rejected client-side;
    /// the message tells the user what to do.
    #[error("Save the encounter before attaching files")]
    UnsavedEncounter,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Proof that the user confirmed a destructive action. Deletion is
/// immediate and irreversible, so the call site must go through the
/// confirmation dialog to construct this token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
}

pub struct MediaManager {
    api: Arc<dyn ClinicApi>,
}

impl MediaManager {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self { api }
    }

    /// Every attachment for an owner, fetched in full. Restartable.
    pub async fn list(&self, owner: AttachmentOwner) -> Result<Vec<Attachment>, MediaError> {
        Ok(self.api.list_attachments(owner).await?)
    }

    /// Attachments of one category. The filter is client-side over the
    /// full listing, matching how the gallery tabs work.
    pub async fn list_by_category(
        &self,
        owner: AttachmentOwner,
        category: AttachmentCategory,
    ) -> Result<Vec<Attachment>, MediaError> {
        let mut attachments = self.list(owner).await?;
        attachments.retain(|a| a.category == category);
        Ok(attachments)
    }

    /// Upload one file for a patient or an already-persisted encounter,
    /// tagged with the category selected in the UI at upload time.
    pub async fn upload(
        &self,
        owner: AttachmentOwner,
        category: AttachmentCategory,
        file: FileUpload,
    ) -> Result<Attachment, MediaError> {
        tracing::info!(
            owner_type = owner.kind.as_str(),
            owner_id = owner.id,
            category = category.as_str(),
            file = %file.file_name,
            "uploading attachment"
        );
        Ok(self.api.upload_attachment(owner, category, file).await?)
    }

    /// Upload against the open consultation. Fails before any I/O when the
    /// draft has never been saved — there is no id to attach to yet.
    pub async fn upload_for_draft(
        &self,
        draft: &EncounterDraft,
        category: AttachmentCategory,
        file: FileUpload,
    ) -> Result<Attachment, MediaError> {
        let id = draft.persisted_id().ok_or(MediaError::UnsavedEncounter)?;
        self.upload(AttachmentOwner::encounter(id), category, file)
            .await
    }

    /// Remove an attachment and its backing file. The [`Confirmation`]
    /// token is the evidence the user went through the dialog.
    pub async fn delete(
        &self,
        attachment_id: i64,
        _confirmation: Confirmation,
    ) -> Result<(), MediaError> {
        self.api.delete_attachment(attachment_id).await?;
        tracing::info!(attachment_id, "attachment deleted");
        Ok(())
    }
}
