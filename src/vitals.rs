//! Derived vitals: BMI computation and blood-pressure string handling.
//!
//! Pure functions over form values. Vitals travel as strings (empty string
//! means "not taken"), so everything here takes and returns `&str`/`String`
//! rather than parsed numbers: the caller never loses what the user typed.

use serde::{Deserialize, Serialize};

/// Compute body-mass index from weight (kg) and height.
///
/// Returns the BMI fixed to two decimals, or an empty string when either
/// input is empty, non-numeric or non-positive. Heights above 3 are taken
/// as centimeters and converted to meters first, so both `1.60` and `160`
/// yield the same result.
pub fn derive_bmi(weight: &str, height: &str) -> String {
    let (Some(weight), Some(height)) = (parse_positive(weight), parse_positive(height)) else {
        return String::new();
    };
    let meters = if height > 3.0 { height / 100.0 } else { height };
    format!("{:.2}", weight / (meters * meters))
}

fn parse_positive(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// WHO-style BMI band for display next to the derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify an already-derived BMI string. `None` when the field is
    /// empty or unparsable.
    pub fn from_bmi(bmi: &str) -> Option<Self> {
        let value = parse_positive(bmi)?;
        Some(if value < 18.5 {
            Self::Underweight
        } else if value < 25.0 {
            Self::Normal
        } else if value < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        })
    }
}

/// Join the two pressure sub-fields into the stored `"SYS/DIA"` string.
/// Either side empty means the reading was not taken: the result is empty.
pub fn format_pressure(systolic: &str, diastolic: &str) -> String {
    let (systolic, diastolic) = (systolic.trim(), diastolic.trim());
    if systolic.is_empty() || diastolic.is_empty() {
        return String::new();
    }
    format!("{systolic}/{diastolic}")
}

/// Split a stored `"SYS/DIA"` string back into the two sub-fields.
/// Anything missing comes back as an empty string.
pub fn parse_pressure(combined: &str) -> (String, String) {
    match combined.split_once('/') {
        Some((systolic, diastolic)) => (systolic.trim().into(), diastolic.trim().into()),
        None => (combined.trim().into(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_from_meters_and_centimeters_agree() {
        assert_eq!(derive_bmi("80", "1.60"), "31.25");
        assert_eq!(derive_bmi("80", "160"), "31.25");
    }

    #[test]
    fn bmi_empty_on_missing_or_invalid_input() {
        assert_eq!(derive_bmi("", "1.70"), "");
        assert_eq!(derive_bmi("70", ""), "");
        assert_eq!(derive_bmi("0", "1.70"), "");
        assert_eq!(derive_bmi("-5", "1.70"), "");
        assert_eq!(derive_bmi("setenta", "1.70"), "");
        assert_eq!(derive_bmi("70", "0"), "");
    }

    #[test]
    fn bmi_is_fixed_to_two_decimals() {
        assert_eq!(derive_bmi("70", "1.70"), "24.22");
        assert_eq!(derive_bmi("100", "2"), "25.00");
    }

    #[test]
    fn bmi_recompute_is_stable() {
        // Re-running with unchanged inputs yields the identical string, so
        // the draft store can skip the write and avoid update loops.
        let first = derive_bmi("80", "160");
        assert_eq!(derive_bmi("80", "160"), first);
    }

    #[test]
    fn bmi_category_bands() {
        assert_eq!(BmiCategory::from_bmi("17.00"), Some(BmiCategory::Underweight));
        assert_eq!(BmiCategory::from_bmi("24.22"), Some(BmiCategory::Normal));
        assert_eq!(BmiCategory::from_bmi("27.80"), Some(BmiCategory::Overweight));
        assert_eq!(BmiCategory::from_bmi("31.25"), Some(BmiCategory::Obese));
        assert_eq!(BmiCategory::from_bmi(""), None);
    }

    #[test]
    fn pressure_round_trip() {
        let combined = format_pressure("120", "80");
        assert_eq!(combined, "120/80");
        assert_eq!(parse_pressure(&combined), ("120".into(), "80".into()));
    }

    #[test]
    fn pressure_empty_when_either_side_missing() {
        assert_eq!(format_pressure("120", ""), "");
        assert_eq!(format_pressure("", "80"), "");
        assert_eq!(format_pressure("", ""), "");
    }

    #[test]
    fn pressure_parse_tolerates_malformed_input() {
        assert_eq!(parse_pressure(""), (String::new(), String::new()));
        assert_eq!(parse_pressure("130"), ("130".into(), String::new()));
        assert_eq!(parse_pressure(" 120 / 80 "), ("120".into(), "80".into()));
    }
}
