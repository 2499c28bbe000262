//! App orchestration module.
//!
//! Wires the configuration, the SQLite store and the HTTP router together
//! and serves until shutdown.

use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::sqlite::{create_pool, run_migrations, SqliteStore};
use crate::api::{router, AppState};
use crate::config::Config;
use crate::error::{Error, Result};

/// Main application struct.
pub struct App;

impl App {
    /// Run the marketplace server.
    ///
    /// Opens the connection pool, applies pending migrations and serves the
    /// API on the configured address until the task is cancelled.
    pub async fn run(config: Config) -> Result<()> {
        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;

        let store = SqliteStore::new(pool);
        let state = AppState::new(store, config.tables.clone());

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(Error::Io)?;
        info!(%addr, "listening");

        axum::serve(listener, router(state))
            .await
            .map_err(Error::Io)?;
        Ok(())
    }
}
