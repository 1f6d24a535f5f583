use serde::{Deserialize, Serialize};

use super::ParseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// Wire values are the legacy API strings; serde serializes through them
/// so the persisted shape stays compatible with the backend.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentIdType {
    Dni => "dni",
    CarnetExtranjeria => "carnet_extranjeria",
    Pasaporte => "pasaporte",
});

str_enum!(AttentionKind {
    Consulta => "consulta",
    Control => "control",
    Emergencia => "emergencia",
    Procedimiento => "procedimiento",
});

str_enum!(CoverageKind {
    Particular => "particular",
    Seguro => "seguro",
    Convenio => "convenio",
});

str_enum!(AttachmentCategory {
    Foto => "foto",
    Video => "video",
    Documento => "documento",
});

str_enum!(AttachmentOwnerType {
    Paciente => "paciente",
    Consulta => "consulta",
});

/// Menstrual-cycle regularity. The backend stores two independent booleans
/// (`regimen_regular` / `regimen_irregular`); in memory this is a single
/// tri-state so both can never be true at once. Marshaling to and from the
/// two-boolean shape happens only at the serialization boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleRegularity {
    #[default]
    Unspecified,
    Regular,
    Irregular,
}

impl CycleRegularity {
    /// Collapse the legacy two-boolean wire shape. If the backend ever
    /// carries both flags (legacy data), `regular` wins.
    pub fn from_flags(regular: bool, irregular: bool) -> Self {
        match (regular, irregular) {
            (true, _) => Self::Regular,
            (false, true) => Self::Irregular,
            (false, false) => Self::Unspecified,
        }
    }

    /// Expand back to the `(regular, irregular)` wire pair.
    pub fn to_flags(self) -> (bool, bool) {
        match self {
            Self::Unspecified => (false, false),
            Self::Regular => (true, false),
            Self::Irregular => (false, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn str_enum_round_trip() {
        for cat in [
            AttachmentCategory::Foto,
            AttachmentCategory::Video,
            AttachmentCategory::Documento,
        ] {
            assert_eq!(AttachmentCategory::from_str(cat.as_str()).unwrap(), cat);
        }
    }

    #[test]
    fn str_enum_rejects_unknown() {
        let err = AttachmentOwnerType::from_str("doctor").unwrap_err();
        assert!(err.to_string().contains("doctor"));
    }

    #[test]
    fn cycle_regularity_never_both_flags() {
        for cycle in [
            CycleRegularity::Unspecified,
            CycleRegularity::Regular,
            CycleRegularity::Irregular,
        ] {
            let (regular, irregular) = cycle.to_flags();
            assert!(!(regular && irregular));
            assert_eq!(CycleRegularity::from_flags(regular, irregular), cycle);
        }
    }

    #[test]
    fn cycle_regularity_legacy_both_true_prefers_regular() {
        assert_eq!(
            CycleRegularity::from_flags(true, true),
            CycleRegularity::Regular
        );
    }
}
