//! Application state

use std::ops::Deref;
use std::sync::Arc;

use tally_auth_core::AuthService;
use tally_db::DbPool;
use tally_db::pg::{PgCategoryRepository, PgExpenseRepository, PgUserRepository};
use tally_ledger_core::LedgerService;

use crate::config::Config;

/// Type alias for the auth service with concrete repository types
pub type AuthServiceImpl = AuthService<PgUserRepository>;

/// Type alias for the ledger service with concrete repository types
pub type LedgerServiceImpl = LedgerService<PgCategoryRepository, PgExpenseRepository>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for registration, login and token resolution
    pub auth: Arc<AuthServiceImpl>,
    /// Ledger service for categories, expenses and reports
    pub ledger: Arc<LedgerServiceImpl>,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        auth: AuthServiceImpl,
        ledger: LedgerServiceImpl,
        pool: DbPool,
        config: Config,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            ledger: Arc::new(ledger),
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
