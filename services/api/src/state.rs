//! Application state shared across handlers

use std::sync::Arc;

use common::clock::{Clock, SystemClock};
use sqlx::SqlitePool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State backed by the system clock
    pub fn new(db_pool: SqlitePool) -> Self {
        Self::with_clock(db_pool, Arc::new(SystemClock))
    }

    pub fn with_clock(db_pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db_pool, clock }
    }
}
