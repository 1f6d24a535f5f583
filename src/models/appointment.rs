//! Appointment ("atención") record and its status state machine.
//!
//! Status is owned by intake staff and the consultation flow; the encounter
//! core consumes it but never forces completion — saving clinical
//! documentation does not itself mark the visit `Atendida` (see
//! `config::SavePolicy`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{AttentionKind, CoverageKind};
use super::ParseError;

/// Appointment lifecycle status.
///
/// Main path: `Programada → EnEspera → EnAtencion → Atendida`.
/// Side branches `Cancelada` and `NoAsistio` are reachable from any
/// non-terminal state. `Atendida`, `Cancelada` and `NoAsistio` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "Programada")]
    Programada,
    #[serde(rename = "En Espera")]
    EnEspera,
    #[serde(rename = "En Atención")]
    EnAtencion,
    #[serde(rename = "Atendida")]
    Atendida,
    #[serde(rename = "Cancelada")]
    Cancelada,
    #[serde(rename = "No Asistió")]
    NoAsistio,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Programada => "Programada",
            Self::EnEspera => "En Espera",
            Self::EnAtencion => "En Atención",
            Self::Atendida => "Atendida",
            Self::Cancelada => "Cancelada",
            Self::NoAsistio => "No Asistió",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Atendida | Self::Cancelada | Self::NoAsistio)
    }

    /// Whether a transition to `next` is allowed.
    ///
    /// Forward moves along the main path may skip states (a walk-in can go
    /// straight from `Programada` to `EnAtencion` when the doctor opens the
    /// consultation). Terminal states accept nothing.
    pub fn can_transition(&self, next: AppointmentStatus) -> bool {
        if self.is_terminal() || *self == next {
            return false;
        }
        match next {
            Self::Programada => false,
            Self::EnEspera => matches!(self, Self::Programada),
            Self::EnAtencion => matches!(self, Self::Programada | Self::EnEspera),
            Self::Atendida => matches!(self, Self::EnAtencion),
            Self::Cancelada | Self::NoAsistio => true,
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Programada" => Ok(Self::Programada),
            "En Espera" => Ok(Self::EnEspera),
            "En Atención" => Ok(Self::EnAtencion),
            "Atendida" => Ok(Self::Atendida),
            "Cancelada" => Ok(Self::Cancelada),
            "No Asistió" => Ok(Self::NoAsistio),
            _ => Err(ParseError::InvalidEnum {
                field: "AppointmentStatus".into(),
                value: s.into(),
            }),
        }
    }
}

/// A scheduled or walk-in visit. Created by intake staff; the consultation
/// core reads it and (through the flow) moves its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub paciente_id: i64,
    pub medico_id: i64,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora", default)]
    pub time: String,
    #[serde(rename = "tipo")]
    pub kind: AttentionKind,
    #[serde(rename = "cobertura")]
    pub coverage: CoverageKind,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
}
