use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Clínica";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `RUST_LOG`-style filter when the environment sets none.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME").replace('-', "_"))
}

/// What the save orchestrator does after a successful save.
///
/// Whether saving the clinical documentation should also mark the visit
/// `Atendida` differs between clinics: some want the staff desk to close
/// visits manually, some want the doctor's save to do it. This is a policy
/// knob, not a hardcoded behavior; the default keeps completion a manual
/// staff action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePolicy {
    /// Transition the owning appointment to `Atendida` after each
    /// successful save. Best-effort: a failed transition is logged, never
    /// fails the save.
    pub mark_attended_on_save: bool,
}

impl SavePolicy {
    pub fn manual_completion() -> Self {
        Self {
            mark_attended_on_save: false,
        }
    }

    pub fn attend_on_save() -> Self {
        Self {
            mark_attended_on_save: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_keeps_completion_manual() {
        assert!(!SavePolicy::default().mark_attended_on_save);
        assert_eq!(SavePolicy::default(), SavePolicy::manual_completion());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn log_filter_targets_this_crate() {
        assert_eq!(default_log_filter(), "clinica_core=info");
    }
}
