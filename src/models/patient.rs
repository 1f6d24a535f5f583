use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{CoverageKind, DocumentIdType};

/// A registered patient. The backend owns identity: `id` and the durable
/// medical-record number are assigned at creation and never invented
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "tipo_documento")]
    pub document_type: DocumentIdType,
    #[serde(rename = "numero_documento")]
    pub document_number: String,
    #[serde(rename = "nombres")]
    pub given_names: String,
    #[serde(rename = "apellido_paterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellido_materno")]
    pub maternal_surname: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "ocupacion", default)]
    pub occupation: String,
    #[serde(rename = "tipo_seguro")]
    pub insurance: CoverageKind,
    #[serde(rename = "grupo_sanguineo", default)]
    pub blood_type: String,
    /// Free-text clinical allergy notes from the registry form.
    #[serde(rename = "alergias", default)]
    pub allergies: String,
    /// Free-text antecedent notes from the registry form.
    #[serde(rename = "antecedentes", default)]
    pub antecedents: String,
    /// Durable medical-record number, assigned once by the backend.
    #[serde(rename = "numero_historia")]
    pub record_number: String,
}

impl Patient {
    /// Display name in registry order: surnames first.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.paternal_surname, self.maternal_surname, self.given_names
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patient {
        Patient {
            id: 7,
            document_type: DocumentIdType::Dni,
            document_number: "45678912".into(),
            given_names: "María Elena".into(),
            paternal_surname: "Quispe".into(),
            maternal_surname: "Flores".into(),
            birth_date: NaiveDate::from_ymd_opt(1988, 4, 12),
            phone: "987654321".into(),
            address: "Av. Los Olivos 120".into(),
            email: String::new(),
            occupation: "Docente".into(),
            insurance: CoverageKind::Seguro,
            blood_type: "O+".into(),
            allergies: "Penicilina".into(),
            antecedents: String::new(),
            record_number: "HC-000451".into(),
        }
    }

    #[test]
    fn full_name_is_surnames_first() {
        assert_eq!(sample().full_name(), "Quispe Flores María Elena");
    }

    #[test]
    fn wire_shape_uses_legacy_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["numero_documento"], "45678912");
        assert_eq!(json["tipo_documento"], "dni");
        assert_eq!(json["numero_historia"], "HC-000451");
        assert!(json.get("document_number").is_none());
    }
}
