//! Consultation opening flow.
//!
//! Entering a consultation: mark the appointment `En Atención`, look up
//! whether documentation already exists for it, then either load that
//! record verbatim (edit mode) or seed a fresh draft — antecedents carried
//! forward from the patient's most recent prior encounter, contact fields
//! from the current profile. The carry-forward resolver never runs in edit
//! mode, and its failure never blocks the doctor from documenting.

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ClinicApi};
use crate::carry_forward::{seed_contact, CarryForward};
use crate::config::SavePolicy;
use crate::draft::EncounterDraft;
use crate::history::HistoryAssembler;
use crate::models::{Appointment, AppointmentStatus, Patient};
use crate::saver::{EncounterSaver, SaveError, SaveOutcome};

/// Whether the consultation edits an existing record or documents a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationMode {
    /// No documentation existed for the appointment yet.
    New,
    /// A persisted record was loaded into the draft.
    Edit,
}

/// An open consultation: the active draft plus how it came to be.
///
/// The draft sits behind a mutex so the form can keep editing while a save
/// is in flight; the saver snapshots it per save.
pub struct Consultation {
    pub mode: ConsultationMode,
    pub draft: Mutex<EncounterDraft>,
}

pub struct ConsultationService {
    api: Arc<dyn ClinicApi>,
    history: HistoryAssembler,
    saver: EncounterSaver,
}

impl ConsultationService {
    pub fn new(api: Arc<dyn ClinicApi>, policy: SavePolicy) -> Self {
        Self {
            history: HistoryAssembler::new(api.clone()),
            saver: EncounterSaver::new(api.clone(), policy),
            api,
        }
    }

    /// Open the consultation screen for an appointment.
    pub async fn open(
        &self,
        appointment: &Appointment,
        patient: &Patient,
    ) -> Result<Consultation, ApiError> {
        self.mark_in_attention(appointment).await;

        // Not-found is the normal creation path, never an error.
        if let Some(record) = self.api.encounter_by_appointment(appointment.id).await? {
            tracing::info!(atencion_id = appointment.id, id = ?record.id, "editing existing encounter");
            return Ok(Consultation {
                mode: ConsultationMode::Edit,
                draft: Mutex::new(EncounterDraft::load(record)),
            });
        }

        let mut draft = EncounterDraft::new(appointment.id, patient.id, appointment.medico_id);
        if let Some(prior) = self.history.latest(patient.id).await {
            tracing::info!(
                paciente_id = patient.id,
                prior_id = ?prior.encounter.id,
                "carrying antecedents forward from prior encounter"
            );
            CarryForward::from_prior(&prior.encounter).apply(&mut draft);
        }
        seed_contact(&mut draft, patient);

        Ok(Consultation {
            mode: ConsultationMode::New,
            draft: Mutex::new(draft),
        })
    }

    /// Persist the consultation's draft. Safe to call repeatedly; the
    /// first save creates, every later one updates the same record.
    pub async fn save(&self, consultation: &Consultation) -> Result<SaveOutcome, SaveError> {
        self.saver.save(&consultation.draft).await
    }

    /// Entering the core puts the visit in attention. Best-effort: the
    /// status board lagging behind must not keep the doctor out of the form.
    async fn mark_in_attention(&self, appointment: &Appointment) {
        if !appointment.status.can_transition(AppointmentStatus::EnAtencion) {
            return;
        }
        if let Err(err) = self
            .api
            .set_appointment_status(appointment.id, AppointmentStatus::EnAtencion)
            .await
        {
            tracing::warn!(atencion_id = appointment.id, %err, "could not mark appointment in attention");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::models::{
        AttentionKind, CoverageKind, DocumentIdType, Encounter, HistoryRecord,
    };

    fn appointment(id: i64) -> Appointment {
        Appointment {
            id,
            paciente_id: 7,
            medico_id: 3,
            specialty: "Medicina General".into(),
            date: "2026-03-02".parse().unwrap(),
            time: "10:30".into(),
            kind: AttentionKind::Consulta,
            coverage: CoverageKind::Particular,
            amount: 50.0,
            reason: "Fiebre y malestar".into(),
            status: AppointmentStatus::EnEspera,
        }
    }

    fn patient() -> Patient {
        Patient {
            id: 7,
            document_type: DocumentIdType::Dni,
            document_number: "45678912".into(),
            given_names: "María".into(),
            paternal_surname: "Quispe".into(),
            maternal_surname: "Flores".into(),
            birth_date: None,
            phone: "987654321".into(),
            address: "Av. Los Olivos 120".into(),
            email: String::new(),
            occupation: "Docente".into(),
            insurance: CoverageKind::Particular,
            blood_type: "O+".into(),
            allergies: String::new(),
            antecedents: String::new(),
            record_number: "HC-000451".into(),
        }
    }

    fn prior_record() -> HistoryRecord {
        HistoryRecord {
            encounter: Encounter {
                id: Some(40),
                atencion_id: 9,
                paciente_id: 7,
                medico_id: 3,
                diabetes: true,
                smoking: false,
                definitive_diagnosis: "E11".into(),
                treatment_plan: "Metformina".into(),
                ..Default::default()
            },
            date: "2026-01-15".parse().unwrap(),
            reason: "Control".into(),
            doctor_name: "Dr. Rojas".into(),
        }
    }

    /// Full scenario: prior encounter, new appointment, carry-forward,
    /// BMI derivation, create on first save, update on the second.
    #[tokio::test]
    async fn new_consultation_end_to_end() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(
                crate::config::default_log_filter(),
            ))
            .with_test_writer()
            .try_init();
        let api = Arc::new(MockApi::new().with_history(vec![prior_record()]));
        let service = ConsultationService::new(api.clone(), SavePolicy::default());

        let consultation = service.open(&appointment(12), &patient()).await.unwrap();
        assert_eq!(consultation.mode, ConsultationMode::New);
        // Entering moved the appointment into attention.
        assert_eq!(
            api.status_changes(),
            vec![(12, AppointmentStatus::EnAtencion)]
        );

        {
            let draft = consultation.draft.lock().unwrap();
            assert!(draft.antecedents.diabetes);
            assert!(!draft.antecedents.smoking);
            assert_eq!(draft.diagnosis.definitive, "");
            assert_eq!(draft.plan.treatment, "");
            assert_eq!(draft.paciente_id, 7);
            assert_eq!(draft.contact.phone, "987654321");
        }

        {
            let mut draft = consultation.draft.lock().unwrap();
            draft.vitals.weight = "80".into();
            draft.vitals.height = "160".into();
            draft.recompute_bmi();
            assert_eq!(draft.vitals.bmi, "31.25");
        }

        let outcome = service.save(&consultation).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Created(55));
        assert_eq!(api.saved()[0].bmi, "31.25");

        consultation.draft.lock().unwrap().diagnosis.definitive = "J00".into();
        let outcome = service.save(&consultation).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Updated(55));
        assert_eq!(api.saved().len(), 1);
        assert_eq!(api.saved()[0].definitive_diagnosis, "J00");
    }

    #[tokio::test]
    async fn existing_record_loads_verbatim_and_skips_carry_forward() {
        let existing = Encounter {
            id: Some(61),
            atencion_id: 12,
            paciente_id: 7,
            medico_id: 3,
            pressure: "130/85".into(),
            definitive_diagnosis: "J02".into(),
            ..Default::default()
        };
        let api = Arc::new(
            MockApi::new()
                .with_existing(existing)
                .with_history(vec![prior_record()]),
        );
        let service = ConsultationService::new(api.clone(), SavePolicy::default());

        let consultation = service.open(&appointment(12), &patient()).await.unwrap();
        assert_eq!(consultation.mode, ConsultationMode::Edit);
        // The resolver must not have run at all in edit mode.
        assert_eq!(api.history_calls(), 0);

        let draft = consultation.draft.lock().unwrap();
        assert_eq!(draft.persisted_id(), Some(61));
        assert_eq!(draft.vitals.systolic, "130");
        assert_eq!(draft.diagnosis.definitive, "J02");
        // Loaded verbatim: the prior encounter's diabetes flag is absent.
        assert!(!draft.antecedents.diabetes);
    }

    #[tokio::test]
    async fn history_failure_is_non_fatal_for_opening() {
        let api = Arc::new(MockApi::new().failing_history());
        let service = ConsultationService::new(api, SavePolicy::default());

        let consultation = service.open(&appointment(12), &patient()).await.unwrap();
        assert_eq!(consultation.mode, ConsultationMode::New);
        let draft = consultation.draft.lock().unwrap();
        // Defaults, no carry-forward, contact still seeded from profile.
        assert!(!draft.antecedents.diabetes);
        assert_eq!(draft.contact.phone, "987654321");
    }

    #[tokio::test]
    async fn patient_without_history_gets_blank_antecedents() {
        let api = Arc::new(MockApi::new());
        let service = ConsultationService::new(api, SavePolicy::default());

        let consultation = service.open(&appointment(12), &patient()).await.unwrap();
        let draft = consultation.draft.lock().unwrap();
        assert!(!draft.antecedents.diabetes);
        assert_eq!(draft.antecedents.surgical_history, "");
    }

    #[tokio::test]
    async fn failed_status_transition_does_not_block_opening() {
        let api = Arc::new(MockApi::new().failing_status_updates());
        let service = ConsultationService::new(api, SavePolicy::default());
        assert!(service.open(&appointment(12), &patient()).await.is_ok());
    }

    #[tokio::test]
    async fn terminal_appointment_is_not_retransitioned() {
        let api = Arc::new(MockApi::new());
        let service = ConsultationService::new(api.clone(), SavePolicy::default());
        let mut appt = appointment(12);
        appt.status = AppointmentStatus::Atendida;

        service.open(&appt, &patient()).await.unwrap();
        assert!(api.status_changes().is_empty());
    }
}
