use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Medication, NewPrescription, Prescription};

/// Insert a prescription. The medications list is serialized to a JSON
/// blob; order is preserved. patient_id is checked by the foreign key.
pub fn insert_prescription(
    conn: &Connection,
    prescription: &NewPrescription,
) -> Result<i64, DatabaseError> {
    let blob = serde_json::to_string(&prescription.medications)?;
    conn.execute(
        "INSERT INTO prescriptions (patient_id, issue_date, expiry_date, medications, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            prescription.patient_id,
            prescription.issue_date,
            prescription.expiry_date,
            blob,
            prescription.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All prescriptions, unfiltered, with the medications blob deserialized
/// back into its structured form.
pub fn list_prescriptions(conn: &Connection) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, issue_date, expiry_date, medications, notes, created_at
         FROM prescriptions",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut prescriptions = Vec::new();
    for row in rows {
        let (id, patient_id, issue_date, expiry_date, blob, notes, created_at) = row?;
        let medications: Vec<Medication> = serde_json::from_str(&blob)?;
        prescriptions.push(Prescription {
            id,
            patient_id,
            issue_date,
            expiry_date,
            medications,
            notes,
            created_at,
        });
    }
    Ok(prescriptions)
}

pub fn delete_prescription(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM prescriptions WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Prescription",
            id,
        });
    }
    Ok(())
}
