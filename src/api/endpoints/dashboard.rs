//! Dashboard endpoints: summary stats, patient growth, gender
//! distribution, recent activity.
//!
//! The aggregate reads are independent queries without a wrapping
//! transaction; a concurrent write can produce a slightly torn view,
//! which is acceptable for a dashboard refresh.

use axum::extract::State;
use axum::Json;
use chrono::{Local, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::activity::{parse_date, parse_date_time, parse_timestamp, relative_time};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::dashboard as repo;

/// Billing is not modeled yet, so revenue is a flat per-patient estimate
/// and the non-patient trends are static until there is history to
/// compare against.
const REVENUE_PER_PATIENT: i64 = 150;
const APPOINTMENT_TREND: f64 = 8.0;
const TREATMENT_TREND: f64 = 5.0;
const REVENUE_TREND: f64 = 12.0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: i64,
    pub patient_trend: f64,
    pub today_appointments: i64,
    pub appointment_trend: f64,
    pub active_treatments: i64,
    pub treatment_trend: f64,
    pub monthly_revenue: i64,
    pub revenue_trend: f64,
}

#[derive(Serialize)]
pub struct PatientGrowth {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub icon: &'static str,
    pub description: String,
    pub time_ago: String,
    #[serde(skip)]
    at: NaiveDateTime,
}

/// `GET /api/dashboard/stats`
pub async fn stats(State(ctx): State<ApiContext>) -> Result<Json<DashboardStats>, ApiError> {
    let today = Local::now().date_naive();
    let conn = ctx.db.conn()?;

    let total_patients = repo::count_patients(&conn)?;
    let month_ago_cutoff = registration_cutoff(today);
    let patients_month_ago = repo::count_patients_registered_by(&conn, &month_ago_cutoff)?;

    let today_str = today.format("%Y-%m-%d").to_string();
    let today_appointments = repo::count_appointments_on(&conn, &today_str)?;
    let active_treatments = repo::count_active_prescriptions(&conn, &today_str)?;

    Ok(Json(DashboardStats {
        total_patients,
        patient_trend: percent_change(total_patients, patients_month_ago),
        today_appointments,
        appointment_trend: APPOINTMENT_TREND,
        active_treatments,
        treatment_trend: TREATMENT_TREND,
        monthly_revenue: total_patients * REVENUE_PER_PATIENT,
        revenue_trend: REVENUE_TREND,
    }))
}

/// `GET /api/dashboard/patient-growth` — registrations per month for the
/// last six calendar months, current month last.
pub async fn patient_growth(
    State(ctx): State<ApiContext>,
) -> Result<Json<PatientGrowth>, ApiError> {
    let today = Local::now().date_naive();
    let conn = ctx.db.conn()?;

    let mut labels = Vec::with_capacity(6);
    let mut values = Vec::with_capacity(6);
    for (label, year_month) in last_six_months(today) {
        let count = repo::count_registrations_in_month(&conn, &year_month)?;
        labels.push(label);
        values.push(count);
    }

    Ok(Json(PatientGrowth { labels, values }))
}

/// `GET /api/dashboard/gender-distribution` — `[male, female]`; any
/// gender value other than "male" falls into the second bucket.
pub async fn gender_distribution(
    State(ctx): State<ApiContext>,
) -> Result<Json<[i64; 2]>, ApiError> {
    let conn = ctx.db.conn()?;
    let (male, female) = repo::gender_distribution(&conn)?;
    Ok(Json([male, female]))
}

/// `GET /api/dashboard/recent-activity` — the two newest patients,
/// appointments and prescriptions merged into one feed, newest first,
/// at most four entries.
pub async fn recent_activity(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    let now = Local::now().naive_local();
    let conn = ctx.db.conn()?;

    let mut feed = Vec::new();

    for patient in repo::recent_patients(&conn, 2)? {
        let at = parse_timestamp(&patient.created_at).unwrap_or(now);
        feed.push(ActivityEntry {
            id: format!("patient-{}", patient.id),
            icon: "user-plus",
            description: format!(
                "New patient registered: {} {}",
                patient.first_name, patient.last_name
            ),
            time_ago: relative_time(at, now),
            at,
        });
    }

    for appointment in repo::recent_appointments(&conn, 2)? {
        let at = parse_date_time(&appointment.date, &appointment.time).unwrap_or(now);
        let name = appointment
            .patient_name
            .unwrap_or_else(|| "Unknown patient".to_string());
        feed.push(ActivityEntry {
            id: format!("appointment-{}", appointment.id),
            icon: "calendar-check",
            description: format!(
                "Appointment scheduled: {name} on {} at {}",
                appointment.date, appointment.time
            ),
            time_ago: relative_time(at, now),
            at,
        });
    }

    for prescription in repo::recent_prescriptions(&conn, 2)? {
        let at = parse_date(&prescription.issue_date).unwrap_or(now);
        let name = prescription
            .patient_name
            .unwrap_or_else(|| "Unknown patient".to_string());
        feed.push(ActivityEntry {
            id: format!("prescription-{}", prescription.id),
            icon: "file-prescription",
            description: format!("Prescription issued: {name}"),
            time_ago: relative_time(at, now),
            at,
        });
    }

    // Chronological order, not the lexicographic order of the synthetic ids.
    feed.sort_by(|a, b| b.at.cmp(&a.at).then_with(|| b.id.cmp(&a.id)));
    feed.truncate(4);

    Ok(Json(feed))
}

/// End of the day one calendar month before `today`, in `created_at`
/// format. Clamped by chrono for short months.
fn registration_cutoff(today: NaiveDate) -> String {
    let month_ago = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(today);
    format!("{} 23:59:59", month_ago.format("%Y-%m-%d"))
}

/// Last six calendar months ending with the current one, as
/// `(label, "YYYY-MM")` pairs.
fn last_six_months(today: NaiveDate) -> Vec<(String, String)> {
    (0..6)
        .rev()
        .map(|back| {
            let month = today
                .checked_sub_months(Months::new(back))
                .unwrap_or(today);
            (
                month.format("%b").to_string(),
                month.format("%Y-%m").to_string(),
            )
        })
        .collect()
}

fn percent_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        if current == 0 {
            0.0
        } else {
            100.0
        }
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    }
}
