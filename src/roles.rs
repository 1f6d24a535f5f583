//! Role-based capability gating.
//!
//! Roles are a closed enum, not free-text names compared on every check.
//! The capability table is resolved once per session into a [`Capabilities`]
//! value; view code asks `allows(module, action)` and never re-normalizes
//! strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Medico,
    Enfermera,
    Admision,
}

/// Functional areas of the application that gating applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleArea {
    Pacientes,
    Citas,
    Consultas,
    Archivos,
    Usuarios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Delete,
}

/// Resolved capability set for one role. Build once at session start.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    role: Role,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn allows(&self, module: ModuleArea, action: Action) -> bool {
        use Action::*;
        use ModuleArea::*;
        use Role::*;

        match self.role {
            Admin => true,
            Medico => match module {
                Consultas | Archivos => true,
                Pacientes | Citas => action == View,
                Usuarios => false,
            },
            Enfermera => match module {
                Pacientes | Citas | Consultas => action == View,
                Archivos => matches!(action, View | Edit),
                Usuarios => false,
            },
            Admision => match module {
                Pacientes | Citas => matches!(action, View | Edit),
                Consultas => action == View,
                Archivos | Usuarios => false,
            },
        }
    }
}
