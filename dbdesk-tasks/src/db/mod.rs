/// Database layer for the task tracker
///
/// # Modules
///
/// - `session`: The single process-wide PostgreSQL connection and its scoped
///   transactions (commit on success, rollback on error)
/// - `schema`: Drop-and-recreate of the users, status and tasks tables
/// - Row types and queries are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::config::Settings;
/// use dbdesk_tasks::db::{schema, session::Session};
/// use dbdesk_tasks::TaskDbError;
///
/// # async fn example() -> Result<(), TaskDbError> {
/// let settings = Settings::load()?;
/// let mut session = Session::open(&settings.db).await?;
///
/// session
///     .scoped(|conn| Box::pin(async move { Ok(schema::initialize(conn).await?) }))
///     .await?;
///
/// session.close().await;
/// # Ok(())
/// # }
/// ```

pub mod schema;
pub mod session;
