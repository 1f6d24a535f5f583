use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{AttachmentCategory, AttachmentOwnerType};

/// Owner of an attachment: a `(type, id)` pair pointing at either a patient
/// or a persisted encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentOwner {
    #[serde(rename = "owner_type")]
    pub kind: AttachmentOwnerType,
    #[serde(rename = "owner_id")]
    pub id: i64,
}

impl AttachmentOwner {
    pub fn patient(id: i64) -> Self {
        Self {
            kind: AttachmentOwnerType::Paciente,
            id,
        }
    }

    pub fn encounter(id: i64) -> Self {
        Self {
            kind: AttachmentOwnerType::Consulta,
            id,
        }
    }
}

/// How the UI should present an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Image content, rendered inline.
    Inline,
    /// Video or anything else: placeholder with an external-open action.
    External,
}

/// A stored file linked to a patient or encounter. Lifecycle is independent
/// from the encounter draft: files persist even if the draft is abandoned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    #[serde(flatten)]
    pub owner: AttachmentOwner,
    #[serde(rename = "categoria")]
    pub category: AttachmentCategory,
    #[serde(rename = "nombre")]
    pub file_name: String,
    pub mime: String,
    #[serde(rename = "ruta")]
    pub path: String,
    pub created_at: NaiveDateTime,
}

impl Attachment {
    /// Viewing branch: images render inline, everything else opens
    /// externally. The mime recorded at upload wins; the extension is the
    /// fallback when the backend left it generic.
    pub fn render_mode(&self) -> RenderMode {
        if self.mime.starts_with("image/") {
            return RenderMode::Inline;
        }
        if self.mime.is_empty() || self.mime == "application/octet-stream" {
            let guessed = mime_guess::from_path(&self.file_name).first_or_octet_stream();
            if guessed.type_() == mime_guess::mime::IMAGE {
                return RenderMode::Inline;
            }
        }
        RenderMode::External
    }
}
