//! Persisted outpatient-encounter record ("consulta externa").
//!
//! This is the flat wire shape exchanged with the backend: every section
//! field lives at the top level of the payload, under its legacy Spanish
//! name. The in-memory, section-organized editing view lives in
//! [`crate::draft`]; this type is what create/update actually send and what
//! lookups return.
//!
//! Vitals are kept as form strings (empty string = not taken), matching the
//! persisted shape: blood pressure travels combined as `"SYS/DIA"`, and the
//! BMI field carries the derived value as a fixed two-decimal string.

use serde::{Deserialize, Serialize};

/// Clinical documentation for exactly one appointment. `id` is `None`
/// until the backend has persisted the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub atencion_id: i64,
    pub paciente_id: i64,
    pub medico_id: i64,

    // ── Contact snapshot (from the patient profile, editable per visit) ──
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "ocupacion", default)]
    pub occupation: String,
    #[serde(default)]
    pub email: String,

    // ── Symptoms ─────────────────────────────────────────────────────────
    #[serde(rename = "sintomas", default)]
    pub symptoms: String,
    #[serde(rename = "tiempo_enfermedad", default)]
    pub illness_duration: String,

    // ── Antecedents: chronic-disease flags ───────────────────────────────
    #[serde(default)]
    pub diabetes: bool,
    #[serde(rename = "hipertension", default)]
    pub hypertension: bool,
    #[serde(rename = "asma", default)]
    pub asthma: bool,
    #[serde(rename = "tbc", default)]
    pub tuberculosis: bool,

    // ── Antecedents: infectious-disease flags ────────────────────────────
    #[serde(default)]
    pub hepatitis_b: bool,
    #[serde(rename = "its", default)]
    pub sti: bool,

    // ── Antecedents: allergies ───────────────────────────────────────────
    #[serde(rename = "alergias", default)]
    pub allergy: bool,
    #[serde(rename = "alergias_detalle", default)]
    pub allergy_detail: String,

    // ── Antecedents: habits ──────────────────────────────────────────────
    #[serde(rename = "tabaco", default)]
    pub smoking: bool,
    #[serde(default)]
    pub alcohol: bool,
    #[serde(rename = "drogas", default)]
    pub drugs: bool,

    // ── Antecedents: menstrual data (where applicable) ───────────────────
    /// Last menstrual period, `YYYY-MM-DD` or empty.
    #[serde(rename = "fur", default)]
    pub last_period: String,
    #[serde(rename = "regimen_regular", default)]
    pub cycle_regular: bool,
    #[serde(rename = "regimen_irregular", default)]
    pub cycle_irregular: bool,

    // ── Antecedents: free text ───────────────────────────────────────────
    #[serde(rename = "otros_antecedentes", default)]
    pub other_antecedents: String,
    #[serde(rename = "tratamiento_actual", default)]
    pub current_treatment: String,
    #[serde(rename = "antecedentes_quirurgicos", default)]
    pub surgical_history: String,

    // ── Vitals ───────────────────────────────────────────────────────────
    /// Combined blood pressure, `"SYS/DIA"` or empty.
    #[serde(rename = "presion", default)]
    pub pressure: String,
    #[serde(rename = "frecuencia_cardiaca", default)]
    pub heart_rate: String,
    #[serde(rename = "frecuencia_respiratoria", default)]
    pub respiratory_rate: String,
    #[serde(rename = "temperatura", default)]
    pub temperature: String,
    #[serde(rename = "peso", default)]
    pub weight: String,
    #[serde(rename = "talla", default)]
    pub height: String,
    /// Derived, never entered directly. See [`crate::vitals::derive_bmi`].
    #[serde(rename = "imc", default)]
    pub bmi: String,

    // ── Physical exam ────────────────────────────────────────────────────
    #[serde(rename = "examen_fisico", default)]
    pub exam_findings: String,

    // ── Diagnosis ────────────────────────────────────────────────────────
    #[serde(rename = "diagnostico_presuntivo", default)]
    pub presumptive_diagnosis: String,
    #[serde(rename = "diagnostico_definitivo", default)]
    pub definitive_diagnosis: String,

    // ── Plan ─────────────────────────────────────────────────────────────
    #[serde(rename = "tratamiento", default)]
    pub treatment_plan: String,
    /// Follow-up date, `YYYY-MM-DD` or empty.
    #[serde(rename = "proxima_cita", default)]
    pub follow_up_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_flat_with_legacy_names() {
        let enc = Encounter {
            atencion_id: 12,
            paciente_id: 7,
            medico_id: 3,
            pressure: "120/80".into(),
            weight: "80".into(),
            height: "1.60".into(),
            bmi: "31.25".into(),
            definitive_diagnosis: "J00".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&enc).unwrap();
        assert_eq!(json["atencion_id"], 12);
        assert_eq!(json["presion"], "120/80");
        assert_eq!(json["imc"], "31.25");
        assert_eq!(json["diagnostico_definitivo"], "J00");
        // Unsaved record: no id key at all.
        assert!(json.get("id").is_none());
        // No nesting: the sections collapse to top-level keys.
        assert!(json.get("vitals").is_none());
    }

    #[test]
    fn partial_server_payload_deserializes_with_defaults() {
        let enc: Encounter = serde_json::from_str(
            r#"{"id": 55, "atencion_id": 12, "paciente_id": 7, "medico_id": 3, "diabetes": true}"#,
        )
        .unwrap();
        assert_eq!(enc.id, Some(55));
        assert!(enc.diabetes);
        assert!(!enc.smoking);
        assert_eq!(enc.pressure, "");
    }
}
