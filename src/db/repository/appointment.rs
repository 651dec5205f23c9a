use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::{Appointment, NewAppointment};

/// Insert an appointment. A patient_id with no matching patient fails here
/// on the foreign key constraint and surfaces as a storage error.
pub fn insert_appointment(
    conn: &Connection,
    appointment: &NewAppointment,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, date, time, duration, purpose, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appointment.patient_id,
            appointment.date,
            appointment.time,
            appointment.duration,
            appointment.purpose,
            appointment.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All appointments, unfiltered. The listing route has no search or sort.
pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, date, time, duration, purpose, notes, created_at
         FROM appointments",
    )?;
    let rows = stmt.query_map([], appointment_from_row)?;
    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(row?);
    }
    Ok(appointments)
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        });
    }
    Ok(())
}

fn appointment_from_row(row: &Row<'_>) -> Result<Appointment, rusqlite::Error> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        date: row.get(2)?,
        time: row.get(3)?,
        duration: row.get(4)?,
        purpose: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
    })
}
