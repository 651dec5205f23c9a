use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::present;

/// Validation messages for prescription creation, in check order.
pub const PRESCRIPTION_REQUIRED_MSG: &str = "Patient ID and issue date are required";
pub const MEDICATIONS_ARRAY_MSG: &str = "Medications must be provided as an array";
pub const MEDICATION_FIELDS_MSG: &str =
    "All medication fields (name, dosage, frequency, duration) are required";

/// One entry of a prescription's medication list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// A persisted prescription row. The medications list is stored as a JSON
/// blob (order preserved) and always returned in structured form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Inbound prescription payload. `medications` stays an untyped JSON value
/// so a non-array shape is reported as a validation failure, not a
/// deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrescriptionPayload {
    pub patient_id: Option<i64>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub medications: Option<Value>,
    pub notes: Option<String>,
}

/// A validated prescription ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPrescription {
    pub patient_id: i64,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
}

impl PrescriptionPayload {
    /// Validate for creation. Check order is observable through the
    /// returned message and must stay: required scalars, list shape,
    /// per-entry fields.
    pub fn validate(self) -> Result<NewPrescription, &'static str> {
        if self.patient_id.is_none() || !present(&self.issue_date) {
            return Err(PRESCRIPTION_REQUIRED_MSG);
        }
        let medications = parse_medications(self.medications.as_ref())?;
        Ok(NewPrescription {
            patient_id: self.patient_id.unwrap_or_default(),
            issue_date: self.issue_date.unwrap_or_default(),
            expiry_date: self.expiry_date,
            medications,
            notes: self.notes,
        })
    }
}

/// Parse the medications value into a typed list. An absent or non-array
/// value fails on shape; any entry missing one of the four fields fails
/// with a message naming all four.
fn parse_medications(value: Option<&Value>) -> Result<Vec<Medication>, &'static str> {
    let entries = match value {
        Some(Value::Array(entries)) => entries,
        _ => return Err(MEDICATIONS_ARRAY_MSG),
    };

    let mut medications = Vec::with_capacity(entries.len());
    for entry in entries {
        let field = |key: &str| -> Option<String> {
            entry
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let medication = Medication {
            name: field("name").ok_or(MEDICATION_FIELDS_MSG)?,
            dosage: field("dosage").ok_or(MEDICATION_FIELDS_MSG)?,
            frequency: field("frequency").ok_or(MEDICATION_FIELDS_MSG)?,
            duration: field("duration").ok_or(MEDICATION_FIELDS_MSG)?,
        };
        medications.push(medication);
    }
    Ok(medications)
}
