//! Clínica core — outpatient consultation management over a remote clinic API.
//!
//! This crate is the headless core of the consultation screen: everything
//! the form does between "doctor opens the visit" and "record persisted",
//! with the UI and the backend kept on the far side of two seams
//! ([`api::ClinicApi`] and the host's view layer).
//!
//! # Flow
//!
//! ```text
//! open consultation
//!       │
//!       ├─ appointment → En Atención              (best-effort)
//!       ├─ encounter-by-appointment lookup
//!       │      ├─ found      → Draft Store loads verbatim (edit mode)
//!       │      └─ not found  → Carry-Forward seeds antecedents from the
//!       │                      patient's latest prior encounter; contact
//!       │                      fields from the current profile
//!       │
//!       ├─ edits across tabs → EncounterDraft (BMI re-derived on vitals)
//!       │
//!       ├─ save → EncounterSaver: create (assigns id) or update,
//!       │         serialized per draft, pressure joined at save time
//!       │
//!       └─ attachments → MediaManager, keyed off the persisted id,
//!                        lifecycle independent from the draft
//! ```
//!
//! # Modules
//!
//! - [`models`]: wire-shaped domain records (patient, appointment,
//!   encounter, attachment, history)
//! - [`api`]: remote-service trait, envelope normalization, HTTP client
//! - [`draft`]: section-organized in-memory encounter draft
//! - [`vitals`]: BMI derivation and pressure string handling
//! - [`carry_forward`]: antecedent projection into a new draft
//! - [`history`]: ordered past-encounter assembly
//! - [`saver`]: create-vs-update orchestration
//! - [`media`]: attachment listing, upload precondition, deletion
//! - [`consultation`]: the opening flow tying the above together
//! - [`roles`]: closed role enum + capability table
//! - [`session`]: injected token/unauthorized capability

pub mod api;
pub mod carry_forward;
pub mod config;
pub mod consultation;
pub mod draft;
pub mod history;
pub mod media;
pub mod models;
pub mod roles;
pub mod saver;
pub mod session;
pub mod vitals;

pub use api::{ApiError, ClinicApi, FileUpload, HttpClinicApi};
pub use carry_forward::CarryForward;
pub use config::SavePolicy;
pub use consultation::{Consultation, ConsultationMode, ConsultationService};
pub use draft::{DraftState, EncounterDraft, Flag};
pub use history::{HistoryAssembler, HistorySummary};
pub use media::{Confirmation, MediaManager, MediaError};
pub use models::{
    Appointment, AppointmentStatus, Attachment, AttachmentCategory, AttachmentOwner, Encounter,
    HistoryRecord, Patient,
};
pub use saver::{EncounterSaver, SaveError, SaveOutcome};
pub use session::{SessionContext, TokenSession};
