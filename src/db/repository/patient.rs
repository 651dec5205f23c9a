use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient, UpdatePatient};

const PATIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, phone, email,
         address, medical_history, created_at";

/// Sortable patient columns. The allow-list keeps the `sort` query
/// parameter out of SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    LastName,
    DateOfBirth,
}

impl SortField {
    fn as_str(self) -> &'static str {
        match self {
            SortField::FirstName => "first_name",
            SortField::LastName => "last_name",
            SortField::DateOfBirth => "date_of_birth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A parsed `field:direction` sort. Anything outside the allow-list parses
/// to `None` and the listing stays unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl PatientSort {
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = raw.split_once(':')?;
        let field = match field {
            "first_name" => SortField::FirstName,
            "last_name" => SortField::LastName,
            "date_of_birth" => SortField::DateOfBirth,
            _ => return None,
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        Some(Self { field, direction })
    }
}

/// Listing filter: optional substring search and optional sort.
#[derive(Debug, Clone, Default)]
pub struct PatientListFilter {
    pub search: Option<String>,
    pub sort: Option<PatientSort>,
}

pub fn insert_patient(conn: &Connection, patient: &NewPatient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (first_name, last_name, date_of_birth, gender, phone, email,
         address, medical_history)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            patient.first_name,
            patient.last_name,
            patient.date_of_birth,
            patient.gender,
            patient.phone,
            patient.email,
            patient.address,
            patient.medical_history,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List patients, optionally filtered by a case-insensitive substring match
/// across name, email and phone, optionally sorted by an allow-listed field.
pub fn list_patients(
    conn: &Connection,
    filter: &PatientListFilter,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut sql = format!("SELECT {PATIENT_COLUMNS} FROM patients");
    if filter.search.is_some() {
        sql.push_str(
            " WHERE LOWER(first_name) LIKE LOWER(?1) OR LOWER(last_name) LIKE LOWER(?1)
              OR LOWER(email) LIKE LOWER(?1) OR LOWER(phone) LIKE LOWER(?1)",
        );
    }
    if let Some(sort) = filter.sort {
        sql.push_str(" ORDER BY ");
        sql.push_str(sort.field.as_str());
        sql.push(' ');
        sql.push_str(sort.direction.as_str());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut patients = Vec::new();
    match &filter.search {
        Some(term) => {
            let pattern = format!("%{term}%");
            let rows = stmt.query_map(params![pattern], patient_from_row)?;
            for row in rows {
                patients.push(row?);
            }
        }
        None => {
            let rows = stmt.query_map([], patient_from_row)?;
            for row in rows {
                patients.push(row?);
            }
        }
    }
    Ok(patients)
}

/// Full replace of the editable patient fields.
pub fn update_patient(
    conn: &Connection,
    id: i64,
    patient: &UpdatePatient,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET first_name = ?1, last_name = ?2, date_of_birth = ?3,
         gender = ?4, phone = ?5, email = ?6 WHERE id = ?7",
        params![
            patient.first_name,
            patient.last_name,
            patient.date_of_birth,
            patient.gender,
            patient.phone,
            patient.email,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Patient",
            id,
        });
    }
    Ok(())
}

pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Patient",
            id,
        });
    }
    Ok(())
}

fn patient_from_row(row: &Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        gender: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        address: row.get(7)?,
        medical_history: row.get(8)?,
        created_at: row.get(9)?,
    })
}
