use serde::{Deserialize, Serialize};

use super::present;

/// Validation message for appointment creation.
pub const APPOINTMENT_REQUIRED_MSG: &str = "Patient ID, date, and time are required";

/// A persisted appointment row. Create/delete only, no update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub date: String,
    pub time: String,
    pub duration: Option<i64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Inbound appointment payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPayload {
    pub patient_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

/// A validated appointment ready for insertion. Referential integrity of
/// patient_id is left to the schema's foreign key constraint.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub date: String,
    pub time: String,
    pub duration: Option<i64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

impl AppointmentPayload {
    /// Validate for creation: patient_id, date and time must be present.
    pub fn validate(self) -> Result<NewAppointment, &'static str> {
        let patient_id = match self.patient_id {
            Some(id) => id,
            None => return Err(APPOINTMENT_REQUIRED_MSG),
        };
        if !present(&self.date) || !present(&self.time) {
            return Err(APPOINTMENT_REQUIRED_MSG);
        }
        Ok(NewAppointment {
            patient_id,
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            duration: self.duration,
            purpose: self.purpose,
            notes: self.notes,
        })
    }
}
