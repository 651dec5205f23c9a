pub mod appointment;
pub mod patient;
pub mod prescription;

pub use appointment::*;
pub use patient::*;
pub use prescription::*;

/// True when an optional text field carries a non-blank value.
/// Mirrors the presence rule used by all payload validation: a missing
/// field and an empty/whitespace-only string are both "absent".
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
