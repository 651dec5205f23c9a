use serde::{Deserialize, Serialize};

use super::present;

/// Validation message for patient create/update.
pub const PATIENT_REQUIRED_MSG: &str =
    "First name, last name, date of birth, and gender are required";

/// A persisted patient row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub created_at: String,
}

/// Inbound patient payload. All fields optional so that presence
/// validation produces a structured 400 instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
}

/// A validated patient ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
}

/// A validated full replacement of the editable patient fields.
/// Address and medical history are not editable through the update route.
#[derive(Debug, Clone)]
pub struct UpdatePatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PatientPayload {
    fn required_present(&self) -> bool {
        present(&self.first_name)
            && present(&self.last_name)
            && present(&self.date_of_birth)
            && present(&self.gender)
    }

    /// Validate for creation. first_name, last_name, date_of_birth and
    /// gender must all be present.
    pub fn validate_new(self) -> Result<NewPatient, &'static str> {
        if !self.required_present() {
            return Err(PATIENT_REQUIRED_MSG);
        }
        Ok(NewPatient {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            date_of_birth: self.date_of_birth.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            phone: self.phone,
            email: self.email,
            address: self.address,
            medical_history: self.medical_history,
        })
    }

    /// Validate for full replacement. Same required-field rule as create.
    pub fn validate_update(self) -> Result<UpdatePatient, &'static str> {
        if !self.required_present() {
            return Err(PATIENT_REQUIRED_MSG);
        }
        Ok(UpdatePatient {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            date_of_birth: self.date_of_birth.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            phone: self.phone,
            email: self.email,
        })
    }
}
