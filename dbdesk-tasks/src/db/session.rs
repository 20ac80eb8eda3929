/// Database session management
///
/// The task tracker talks to PostgreSQL over exactly one connection for the
/// whole process. [`Session`] owns that connection and hands it out only
/// inside [`Session::scoped`], which wraps the work in a transaction:
///
/// ```text
/// scoped(work)
///   ├─> BEGIN
///   ├─> work(conn)
///   ├─> Ok  → COMMIT,   return value
///   └─> Err → ROLLBACK, return error
/// ```
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::config::Settings;
/// use dbdesk_tasks::db::session::Session;
/// use dbdesk_tasks::TaskDbError;
///
/// # async fn example() -> Result<(), TaskDbError> {
/// let settings = Settings::load()?;
/// let mut session = Session::open(&settings.db).await?;
///
/// let answer = session
///     .scoped(|conn| {
///         Box::pin(async move {
///             let (value,): (i32,) = sqlx::query_as("SELECT 42").fetch_one(conn).await?;
///             Ok(value)
///         })
///     })
///     .await?;
/// assert_eq!(answer, 42);
///
/// session.close().await;
/// # Ok(())
/// # }
/// ```
use crate::config::PostgresSettings;
use crate::error::{TaskDbError, TaskDbResult};
use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::{debug, info, warn};

/// An open connection to the task database
pub struct Session {
    conn: PgConnection,
}

impl Session {
    /// Opens the connection described by `settings`
    ///
    /// # Errors
    ///
    /// Returns [`TaskDbError::Connect`] if the server is unreachable, the
    /// credentials are rejected or the health check fails.
    pub async fn open(settings: &PostgresSettings) -> TaskDbResult<Self> {
        info!(
            host = %settings.domain,
            port = settings.port,
            database = %settings.db_name,
            "Opening database connection"
        );

        Self::connect_with(&settings.connect_options()).await
    }

    /// Opens a connection from prebuilt options
    pub async fn connect_with(options: &PgConnectOptions) -> TaskDbResult<Self> {
        let mut conn = PgConnection::connect_with(options)
            .await
            .map_err(TaskDbError::Connect)?;

        health_check(&mut conn).await.map_err(TaskDbError::Connect)?;

        info!("Database connection opened");
        Ok(Session { conn })
    }

    /// Runs `work` inside a transaction
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when it
    /// returns `Err`. A failed rollback is logged and the original error is
    /// returned.
    pub async fn scoped<T, F>(&mut self, work: F) -> TaskDbResult<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, TaskDbResult<T>>,
    {
        let mut tx = self.conn.begin().await?;

        match work(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                } else {
                    debug!(error = %err, "Transaction rolled back");
                }
                Err(err)
            }
        }
    }

    /// Gracefully closes the connection
    ///
    /// Errors while closing are logged, not returned: there is nothing left
    /// for the caller to do with the connection.
    pub async fn close(self) {
        info!("Closing database connection");
        if let Err(err) = self.conn.close().await {
            warn!(error = %err, "Error while closing database connection");
        } else {
            info!("Database connection closed");
        }
    }
}

/// Executes `SELECT 1` to verify the server is answering
pub async fn health_check(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(conn).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

// Integration tests require a running database
// These are in the tests/ directory and run with `cargo test -- --ignored`
