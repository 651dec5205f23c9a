//! Aggregate queries behind the dashboard endpoints.
//!
//! Each statistic is its own query; the multi-read aggregation is not
//! wrapped in a transaction, so a dashboard fetch can observe a torn view
//! under concurrent writes. Accepted trade-off for a read-only dashboard.

use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Total patient count.
pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

/// Patients registered on or before the cutoff (`YYYY-MM-DD HH:MM:SS`).
/// Trend baseline uses registration time, not date of birth.
pub fn count_patients_registered_by(
    conn: &Connection,
    cutoff: &str,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM patients WHERE created_at <= ?1",
        params![cutoff],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Patients registered within one `YYYY-MM` calendar month.
pub fn count_registrations_in_month(
    conn: &Connection,
    year_month: &str,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM patients WHERE strftime('%Y-%m', created_at) = ?1",
        params![year_month],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Appointments dated exactly `date` (`YYYY-MM-DD`).
pub fn count_appointments_on(conn: &Connection, date: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE date = ?1",
        params![date],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Prescriptions whose expiry date is null or on/after `today`.
/// ISO dates compare correctly as text.
pub fn count_active_prescriptions(conn: &Connection, today: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM prescriptions WHERE expiry_date IS NULL OR expiry_date >= ?1",
        params![today],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// `[male_count, female_count]`. The bucketing is deliberately lossy for
/// compatibility with the existing frontend chart: anything whose gender
/// does not compare case-insensitively to "male" counts as female, so the
/// two buckets always sum to the total.
pub fn gender_distribution(conn: &Connection) -> Result<(i64, i64), DatabaseError> {
    let total = count_patients(conn)?;
    let male: i64 = conn.query_row(
        "SELECT COUNT(*) FROM patients WHERE LOWER(gender) = 'male'",
        [],
        |row| row.get(0),
    )?;
    Ok((male, total - male))
}

/// Newest patients by registration time.
#[derive(Debug, Clone)]
pub struct RecentPatient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

pub fn recent_patients(conn: &Connection, limit: u32) -> Result<Vec<RecentPatient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, created_at
         FROM patients ORDER BY created_at DESC, id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(RecentPatient {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Most recent appointments by scheduled date and time.
#[derive(Debug, Clone)]
pub struct RecentAppointment {
    pub id: i64,
    pub patient_name: Option<String>,
    pub date: String,
    pub time: String,
}

pub fn recent_appointments(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<RecentAppointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, p.first_name || ' ' || p.last_name, a.date, a.time
         FROM appointments a
         LEFT JOIN patients p ON a.patient_id = p.id
         ORDER BY a.date DESC, a.time DESC, a.id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(RecentAppointment {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Most recent prescriptions by issue date, creation time as tiebreak.
#[derive(Debug, Clone)]
pub struct RecentPrescription {
    pub id: i64,
    pub patient_name: Option<String>,
    pub issue_date: String,
}

pub fn recent_prescriptions(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<RecentPrescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, p.first_name || ' ' || p.last_name, r.issue_date
         FROM prescriptions r
         LEFT JOIN patients p ON r.patient_id = p.id
         ORDER BY r.issue_date DESC, r.created_at DESC, r.id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(RecentPrescription {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            issue_date: row.get(2)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn seed_patient(conn: &Connection, first: &str, gender: &str, created_at: &str) -> i64 {
        conn.execute(
            "INSERT INTO patients (first_name, last_name, date_of_birth, gender, created_at)
             VALUES (?1, 'Test', '1990-01-15', ?2, ?3)",
            params![first, gender, created_at],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn counts_start_at_zero() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        assert_eq!(count_patients(&conn).unwrap(), 0);
        assert_eq!(count_appointments_on(&conn, "2024-12-25").unwrap(), 0);
        assert_eq!(count_active_prescriptions(&conn, "2024-12-25").unwrap(), 0);
        assert_eq!(gender_distribution(&conn).unwrap(), (0, 0));
    }

    #[test]
    fn registration_cutoff_counts_by_created_at() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed_patient(&conn, "Old", "Male", "2024-01-10 09:00:00");
        seed_patient(&conn, "New", "Female", "2024-06-10 09:00:00");

        assert_eq!(
            count_patients_registered_by(&conn, "2024-05-31 23:59:59").unwrap(),
            1
        );
        assert_eq!(count_patients(&conn).unwrap(), 2);
    }

    #[test]
    fn month_buckets_count_only_their_month() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed_patient(&conn, "A", "Male", "2024-04-02 10:00:00");
        seed_patient(&conn, "B", "Female", "2024-04-20 10:00:00");
        seed_patient(&conn, "C", "Female", "2024-05-01 10:00:00");

        assert_eq!(count_registrations_in_month(&conn, "2024-04").unwrap(), 2);
        assert_eq!(count_registrations_in_month(&conn, "2024-05").unwrap(), 1);
        assert_eq!(count_registrations_in_month(&conn, "2024-06").unwrap(), 0);
    }

    #[test]
    fn appointments_counted_for_exact_date_only() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let id = seed_patient(&conn, "John", "Male", "2024-01-01 09:00:00");
        conn.execute(
            "INSERT INTO appointments (patient_id, date, time) VALUES (?1, '2024-12-25', '10:00:00')",
            params![id],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO appointments (patient_id, date, time) VALUES (?1, '2024-12-26', '10:00:00')",
            params![id],
        )
        .unwrap();

        assert_eq!(count_appointments_on(&conn, "2024-12-25").unwrap(), 1);
        assert_eq!(count_appointments_on(&conn, "2024-12-27").unwrap(), 0);
    }

    #[test]
    fn active_prescriptions_include_null_and_today_boundary() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let id = seed_patient(&conn, "John", "Male", "2024-01-01 09:00:00");
        let insert = |expiry: Option<&str>| {
            conn.execute(
                "INSERT INTO prescriptions (patient_id, issue_date, expiry_date, medications)
                 VALUES (?1, '2024-12-01', ?2, '[]')",
                params![id, expiry],
            )
            .unwrap();
        };
        insert(None); // never expires
        insert(Some("2024-12-25")); // expires today: still active
        insert(Some("2024-12-24")); // expired yesterday

        assert_eq!(count_active_prescriptions(&conn, "2024-12-25").unwrap(), 2);
    }

    #[test]
    fn gender_buckets_sum_to_total_with_other_values() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed_patient(&conn, "A", "Male", "2024-01-01 09:00:00");
        seed_patient(&conn, "B", "male", "2024-01-02 09:00:00");
        seed_patient(&conn, "C", "Female", "2024-01-03 09:00:00");
        seed_patient(&conn, "D", "Other", "2024-01-04 09:00:00");

        let (male, female) = gender_distribution(&conn).unwrap();
        assert_eq!(male, 2);
        assert_eq!(female, 2); // "Other" buckets as female
        assert_eq!(male + female, count_patients(&conn).unwrap());
    }

    #[test]
    fn recent_patients_ordered_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed_patient(&conn, "First", "Male", "2024-01-01 09:00:00");
        seed_patient(&conn, "Second", "Female", "2024-02-01 09:00:00");
        seed_patient(&conn, "Third", "Female", "2024-03-01 09:00:00");

        let recent = recent_patients(&conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].first_name, "Third");
        assert_eq!(recent[1].first_name, "Second");
    }

    #[test]
    fn recent_appointments_ordered_by_date_then_time() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let id = seed_patient(&conn, "John", "Male", "2024-01-01 09:00:00");
        for (date, time) in [
            ("2024-12-20", "09:00:00"),
            ("2024-12-25", "08:00:00"),
            ("2024-12-25", "15:00:00"),
        ] {
            conn.execute(
                "INSERT INTO appointments (patient_id, date, time) VALUES (?1, ?2, ?3)",
                params![id, date, time],
            )
            .unwrap();
        }

        let recent = recent_appointments(&conn, 2).unwrap();
        assert_eq!(recent[0].time, "15:00:00");
        assert_eq!(recent[1].time, "08:00:00");
        assert_eq!(recent[0].patient_name.as_deref(), Some("John Test"));
    }

    #[test]
    fn recent_prescriptions_ordered_by_issue_date() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let id = seed_patient(&conn, "John", "Male", "2024-01-01 09:00:00");
        for issue in ["2024-12-01", "2024-12-20", "2024-12-10"] {
            conn.execute(
                "INSERT INTO prescriptions (patient_id, issue_date, medications)
                 VALUES (?1, ?2, '[]')",
                params![id, issue],
            )
            .unwrap();
        }

        let recent = recent_prescriptions(&conn, 2).unwrap();
        assert_eq!(recent[0].issue_date, "2024-12-20");
        assert_eq!(recent[1].issue_date, "2024-12-10");
    }
}
