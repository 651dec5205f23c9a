pub mod appointment;
pub mod dashboard;
pub mod patient;
pub mod prescription;
