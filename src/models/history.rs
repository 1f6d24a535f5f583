use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::encounter::Encounter;

/// One entry of a patient's encounter history as the backend returns it:
/// the full flat encounter plus the display fields the timeline needs, so
/// a summary row never requires a secondary fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub encounter: Encounter,
    /// Date of the owning appointment.
    #[serde(rename = "fecha_atencion")]
    pub date: NaiveDate,
    /// Visit reason from the owning appointment.
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "medico_nombre", default)]
    pub doctor_name: String,
}
