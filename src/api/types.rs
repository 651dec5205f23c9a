//! Shared state for the API router.

use crate::db::Database;

/// Shared context for all routes. Holds the database handle; there is no
/// other cross-request state.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Database,
}

impl ApiContext {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
