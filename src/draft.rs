//! In-memory encounter draft: the single source of truth for the open
//! consultation form.
//!
//! The draft is organized into the named sections the tabs edit; the flat
//! wire shape only materializes in [`EncounterDraft::payload`]. Two
//! representations deliberately differ from the wire:
//!
//! - blood pressure is edited as two numeric sub-fields and joined to the
//!   stored `"SYS/DIA"` string only at save time;
//! - menstrual-cycle regularity is a single tri-state, expanded to the
//!   legacy two-boolean pair only at the serialization boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CycleRegularity, Encounter};
use crate::vitals;

/// Persistence state of the draft. Create-vs-update branches on this, not
/// on ad hoc null checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftState {
    /// Never saved: the next save creates.
    New,
    /// Persisted under this backend id: the next save updates.
    Existing(i64),
}

/// Boolean antecedent/habit fields reachable through [`EncounterDraft::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Diabetes,
    Hypertension,
    Asthma,
    Tuberculosis,
    HepatitisB,
    Sti,
    Allergy,
    Smoking,
    Alcohol,
    Drugs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSection {
    pub phone: String,
    pub address: String,
    pub occupation: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomsSection {
    pub symptoms: String,
    pub illness_duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AntecedentsSection {
    pub diabetes: bool,
    pub hypertension: bool,
    pub asthma: bool,
    pub tuberculosis: bool,
    pub hepatitis_b: bool,
    pub sti: bool,
    pub allergy: bool,
    pub allergy_detail: String,
    pub smoking: bool,
    pub alcohol: bool,
    pub drugs: bool,
    pub last_period: String,
    pub cycle: CycleRegularity,
    pub other_antecedents: String,
    pub current_treatment: String,
    pub surgical_history: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsSection {
    pub systolic: String,
    pub diastolic: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub temperature: String,
    pub weight: String,
    pub height: String,
    /// Derived. Kept in the draft so the form can display it, but always
    /// recomputed from weight/height before it is read or saved.
    pub bmi: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamSection {
    pub findings: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSection {
    pub presumptive: String,
    pub definitive: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSection {
    pub treatment: String,
    pub follow_up_date: String,
}

/// Mutable record for the active consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDraft {
    /// Client-side correlation id for logging. Not part of the wire
    /// payload; the backend id lives in `state`.
    pub draft_id: Uuid,
    pub state: DraftState,
    pub atencion_id: i64,
    pub paciente_id: i64,
    pub medico_id: i64,
    pub contact: ContactSection,
    pub symptoms: SymptomsSection,
    pub antecedents: AntecedentsSection,
    pub vitals: VitalsSection,
    pub exam: ExamSection,
    pub diagnosis: DiagnosisSection,
    pub plan: PlanSection,
}

impl EncounterDraft {
    /// Blank draft for a consultation that has no documentation yet.
    pub fn new(atencion_id: i64, paciente_id: i64, medico_id: i64) -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            state: DraftState::New,
            atencion_id,
            paciente_id,
            medico_id,
            contact: ContactSection::default(),
            symptoms: SymptomsSection::default(),
            antecedents: AntecedentsSection::default(),
            vitals: VitalsSection::default(),
            exam: ExamSection::default(),
            diagnosis: DiagnosisSection::default(),
            plan: PlanSection::default(),
        }
    }

    /// Replace the whole draft with a persisted record (edit mode).
    pub fn load(record: Encounter) -> Self {
        let (systolic, diastolic) = vitals::parse_pressure(&record.pressure);
        Self {
            draft_id: Uuid::new_v4(),
            state: match record.id {
                Some(id) => DraftState::Existing(id),
                None => DraftState::New,
            },
            atencion_id: record.atencion_id,
            paciente_id: record.paciente_id,
            medico_id: record.medico_id,
            contact: ContactSection {
                phone: record.phone,
                address: record.address,
                occupation: record.occupation,
                email: record.email,
            },
            symptoms: SymptomsSection {
                symptoms: record.symptoms,
                illness_duration: record.illness_duration,
            },
            antecedents: AntecedentsSection {
                diabetes: record.diabetes,
                hypertension: record.hypertension,
                asthma: record.asthma,
                tuberculosis: record.tuberculosis,
                hepatitis_b: record.hepatitis_b,
                sti: record.sti,
                allergy: record.allergy,
                allergy_detail: record.allergy_detail,
                smoking: record.smoking,
                alcohol: record.alcohol,
                drugs: record.drugs,
                last_period: record.last_period,
                cycle: CycleRegularity::from_flags(record.cycle_regular, record.cycle_irregular),
                other_antecedents: record.other_antecedents,
                current_treatment: record.current_treatment,
                surgical_history: record.surgical_history,
            },
            vitals: VitalsSection {
                systolic,
                diastolic,
                heart_rate: record.heart_rate,
                respiratory_rate: record.respiratory_rate,
                temperature: record.temperature,
                weight: record.weight,
                height: record.height,
                bmi: record.bmi,
            },
            exam: ExamSection {
                findings: record.exam_findings,
            },
            diagnosis: DiagnosisSection {
                presumptive: record.presumptive_diagnosis,
                definitive: record.definitive_diagnosis,
            },
            plan: PlanSection {
                treatment: record.treatment_plan,
                follow_up_date: record.follow_up_date,
            },
        }
    }

    /// Restore all sections to their defaults, keeping the owning ids and
    /// persistence state.
    pub fn reset(&mut self) {
        let (draft_id, state) = (self.draft_id, self.state);
        *self = Self::new(self.atencion_id, self.paciente_id, self.medico_id);
        self.draft_id = draft_id;
        self.state = state;
    }

    pub fn is_new(&self) -> bool {
        matches!(self.state, DraftState::New)
    }

    /// Backend id once persisted.
    pub fn persisted_id(&self) -> Option<i64> {
        match self.state {
            DraftState::New => None,
            DraftState::Existing(id) => Some(id),
        }
    }

    /// Flip one boolean antecedent/habit field.
    pub fn toggle(&mut self, flag: Flag) {
        let section = &mut self.antecedents;
        let field = match flag {
            Flag::Diabetes => &mut section.diabetes,
            Flag::Hypertension => &mut section.hypertension,
            Flag::Asthma => &mut section.asthma,
            Flag::Tuberculosis => &mut section.tuberculosis,
            Flag::HepatitisB => &mut section.hepatitis_b,
            Flag::Sti => &mut section.sti,
            Flag::Allergy => &mut section.allergy,
            Flag::Smoking => &mut section.smoking,
            Flag::Alcohol => &mut section.alcohol,
            Flag::Drugs => &mut section.drugs,
        };
        *field = !*field;
    }

    /// Recompute the derived BMI from the current weight/height.
    ///
    /// Skips the write when the newly computed string equals the stored
    /// one, so a change listener wired to the vitals section cannot loop.
    /// Returns whether the stored value changed.
    pub fn recompute_bmi(&mut self) -> bool {
        let computed = vitals::derive_bmi(&self.vitals.weight, &self.vitals.height);
        if computed == self.vitals.bmi {
            return false;
        }
        self.vitals.bmi = computed;
        true
    }

    /// Assemble the flat wire payload for a save.
    ///
    /// This is where the two sub-field representations fold back into the
    /// persisted shape: pressure joins into `"SYS/DIA"`, the cycle
    /// tri-state expands to its two booleans, and BMI is derived fresh so
    /// the payload can never carry a stale value.
    pub fn payload(&self) -> Encounter {
        let (cycle_regular, cycle_irregular) = self.antecedents.cycle.to_flags();
        Encounter {
            id: self.persisted_id(),
            atencion_id: self.atencion_id,
            paciente_id: self.paciente_id,
            medico_id: self.medico_id,
            phone: self.contact.phone.clone(),
            address: self.contact.address.clone(),
            occupation: self.contact.occupation.clone(),
            email: self.contact.email.clone(),
            symptoms: self.symptoms.symptoms.clone(),
            illness_duration: self.symptoms.illness_duration.clone(),
            diabetes: self.antecedents.diabetes,
            hypertension: self.antecedents.hypertension,
            asthma: self.antecedents.asthma,
            tuberculosis: self.antecedents.tuberculosis,
            hepatitis_b: self.antecedents.hepatitis_b,
            sti: self.antecedents.sti,
            allergy: self.antecedents.allergy,
            allergy_detail: self.antecedents.allergy_detail.clone(),
            smoking: self.antecedents.smoking,
            alcohol: self.antecedents.alcohol,
            drugs: self.antecedents.drugs,
            last_period: self.antecedents.last_period.clone(),
            cycle_regular,
            cycle_irregular,
            other_antecedents: self.antecedents.other_antecedents.clone(),
            current_treatment: self.antecedents.current_treatment.clone(),
            surgical_history: self.antecedents.surgical_history.clone(),
            pressure: vitals::format_pressure(&self.vitals.systolic, &self.vitals.diastolic),
            heart_rate: self.vitals.heart_rate.clone(),
            respiratory_rate: self.vitals.respiratory_rate.clone(),
            temperature: self.vitals.temperature.clone(),
            weight: self.vitals.weight.clone(),
            height: self.vitals.height.clone(),
            bmi: vitals::derive_bmi(&self.vitals.weight, &self.vitals.height),
            exam_findings: self.exam.findings.clone(),
            presumptive_diagnosis: self.diagnosis.presumptive.clone(),
            definitive_diagnosis: self.diagnosis.definitive.clone(),
            treatment_plan: self.plan.treatment.clone(),
            follow_up_date: self.plan.follow_up_date.clone(),
        }
    }
}
