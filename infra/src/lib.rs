//! # Infrastructure Layer
//!
//! Concrete adapters behind the MailGate core:
//! - **Database**: MySQL connection pool and the `access_codes` store using SQLx
//! - **Config**: layered configuration from presets, files and `MAILGATE__*` variables
//! - **Telemetry**: `tracing` subscriber setup
//! - **Mailbox**: in-memory mailbox source

use std::sync::Arc;

use mg_core::errors::StoreError;
use mg_core::repositories::access_code::CodeStore;
use mg_core::services::access::{AccessPolicy, AccessService, LifecycleAdmin, SystemClock};
use mg_shared::config::AppConfig;

/// Configuration loading
pub mod config;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mailbox sources
pub mod mailbox;

/// Logging setup
pub mod telemetry;

use database::{DatabasePool, MySqlCodeStore};

/// Services wired against MySQL and the system clock
#[derive(Clone)]
pub struct MailGateServices {
    pub config: AppConfig,
    pub pool: DatabasePool,
    pub access: Arc<AccessService<MySqlCodeStore, SystemClock>>,
    pub admin: Arc<LifecycleAdmin<MySqlCodeStore, SystemClock>>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Configuration from presets, files and environment
/// - The tracing subscriber
/// - The database pool and the `access_codes` table
pub async fn initialize() -> Result<MailGateServices, InfrastructureError> {
    let config = config::load_config()?;

    if let Err(e) = telemetry::init_tracing(&config.logging) {
        // A subscriber installed by the host process takes precedence.
        tracing::debug!(error = %e, "Tracing already initialized");
    }

    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let pool = DatabasePool::new(&config.database).await?;
    let store = Arc::new(MySqlCodeStore::new(pool.pool().clone()));
    store.ensure_schema().await?;

    let clock = Arc::new(SystemClock);
    let policy = AccessPolicy::from(&config.access);

    let services = MailGateServices {
        access: Arc::new(AccessService::new(store.clone(), clock.clone(), policy.clone())),
        admin: Arc::new(LifecycleAdmin::new(store, clock, policy)),
        pool,
        config,
    };

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Code store error during setup
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber error
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl From<::config::ConfigError> for InfrastructureError {
    fn from(e: ::config::ConfigError) -> Self {
        InfrastructureError::Config(e.to_string())
    }
}
