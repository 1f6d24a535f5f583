//! History assembler: a patient's past encounters, ordered for the
//! read-only timeline and for the carry-forward resolver.
//!
//! The backend already sends most-recent-first, but ordering is a contract
//! consumers rely on, so the assembler re-sorts defensively. A failed
//! lookup is informational for the carry-forward path: the consultation
//! proceeds with a blank draft rather than blocking.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ClinicApi};
use crate::models::HistoryRecord;

/// Longest diagnosis excerpt shown in a summary row.
const BRIEF_DIAGNOSIS_LEN: usize = 60;

/// One row of the patient's encounter timeline. Carries everything the
/// list view renders, so no secondary fetch is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub encounter_id: Option<i64>,
    pub date: NaiveDate,
    pub reason: String,
    pub diagnosis: String,
    pub doctor_name: String,
}

impl HistorySummary {
    fn from_record(record: &HistoryRecord) -> Self {
        Self {
            encounter_id: record.encounter.id,
            date: record.date,
            reason: record.reason.clone(),
            diagnosis: brief_diagnosis(record),
            doctor_name: record.doctor_name.clone(),
        }
    }
}

/// Definitive diagnosis when present, presumptive otherwise, shortened to
/// fit a summary row.
fn brief_diagnosis(record: &HistoryRecord) -> String {
    let full = if record.encounter.definitive_diagnosis.is_empty() {
        &record.encounter.presumptive_diagnosis
    } else {
        &record.encounter.definitive_diagnosis
    };
    let mut brief: String = full.chars().take(BRIEF_DIAGNOSIS_LEN).collect();
    if brief.len() < full.len() {
        brief.push('…');
    }
    brief
}

pub struct HistoryAssembler {
    api: Arc<dyn ClinicApi>,
}

impl HistoryAssembler {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self { api }
    }

    /// Full history for a patient, most recent first. Restartable: every
    /// call fetches fresh.
    pub async fn list_for_patient(
        &self,
        paciente_id: i64,
    ) -> Result<Vec<HistoryRecord>, ApiError> {
        let mut records = self.api.patient_history(paciente_id).await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::debug!(paciente_id, count = records.len(), "fetched patient history");
        Ok(records)
    }

    /// Summary rows for the timeline view.
    pub async fn summaries(&self, paciente_id: i64) -> Result<Vec<HistorySummary>, ApiError> {
        let records = self.list_for_patient(paciente_id).await?;
        Ok(records.iter().map(HistorySummary::from_record).collect())
    }

    /// Most recent prior encounter, feeding the carry-forward resolver.
    ///
    /// Failure here is non-fatal by design: it is logged and reported as
    /// "no prior encounter", and the caller proceeds with a blank draft.
    pub async fn latest(&self, paciente_id: i64) -> Option<HistoryRecord> {
        match self.list_for_patient(paciente_id).await {
            Ok(records) => records.into_iter().next(),
            Err(err) => {
                tracing::warn!(paciente_id, %err, "history lookup failed, proceeding without carry-forward");
                None
            }
        }
    }
}
