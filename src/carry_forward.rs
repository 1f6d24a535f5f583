//! Antecedent carry-forward: seeding a new draft from the patient's most
//! recent prior encounter.
//!
//! Only runs in creation mode (no encounter exists for the current
//! appointment) and only copies the carry-over-eligible set: chronic,
//! infectious, allergy and habit flags, menstrual data, and the standing
//! free-text antecedents. Diagnosis, treatment, exam findings, vitals and
//! follow-up describe the *prior* visit and must start blank. Contact
//! fields come from the patient's current profile, not from the old
//! encounter.

use crate::draft::EncounterDraft;
use crate::models::{CycleRegularity, Encounter, Patient};

/// The projection of a prior encounter that is eligible to carry over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarryForward {
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

impl CarryForward {
    /// Project the carry-over fields out of a prior encounter.
    pub fn from_prior(prior: &Encounter) -> Self {
        Self {
            diabetes: prior.diabetes,
            hypertension: prior.hypertension,
            asthma: prior.asthma,
            tuberculosis: prior.tuberculosis,
            hepatitis_b: prior.hepatitis_b,
            sti: prior.sti,
            allergy: prior.allergy,
            allergy_detail: prior.allergy_detail.clone(),
            smoking: prior.smoking,
            alcohol: prior.alcohol,
            drugs: prior.drugs,
            last_period: prior.last_period.clone(),
            cycle: CycleRegularity::from_flags(prior.cycle_regular, prior.cycle_irregular),
            other_antecedents: prior.other_antecedents.clone(),
            current_treatment: prior.current_treatment.clone(),
            surgical_history: prior.surgical_history.clone(),
        }
    }

    /// Merge into a defaulted draft. Touches only the antecedents section.
    pub fn apply(&self, draft: &mut EncounterDraft) {
        let section = &mut draft.antecedents;
        section.diabetes = self.diabetes;
        section.hypertension = self.hypertension;
        section.asthma = self.asthma;
        section.tuberculosis = self.tuberculosis;
        section.hepatitis_b = self.hepatitis_b;
        section.sti = self.sti;
        section.allergy = self.allergy;
        section.allergy_detail = self.allergy_detail.clone();
        section.smoking = self.smoking;
        section.alcohol = self.alcohol;
        section.drugs = self.drugs;
        section.last_period = self.last_period.clone();
        section.cycle = self.cycle;
        section.other_antecedents = self.other_antecedents.clone();
        section.current_treatment = self.current_treatment.clone();
        section.surgical_history = self.surgical_history.clone();
    }
}

/// Populate the contact section from the patient's current profile.
pub fn seed_contact(draft: &mut EncounterDraft, patient: &Patient) {
    draft.contact.phone = patient.phone.clone();
    draft.contact.address = patient.address.clone();
    draft.contact.occupation = patient.occupation.clone();
    draft.contact.email = patient.email.clone();
}
