/// Schema initializer
///
/// Drops and recreates the three tables of the task tracker. Running
/// [`initialize`] any number of times always leaves the same empty schema.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///   id SERIAL PRIMARY KEY,
///   fullname VARCHAR(100) NOT NULL,
///   email VARCHAR(100) UNIQUE NOT NULL
/// );
///
/// CREATE TABLE status (
///   id SERIAL PRIMARY KEY,
///   name VARCHAR(50) UNIQUE NOT NULL CHECK (name IN ('new', 'in progress', 'completed'))
/// );
///
/// CREATE TABLE tasks (
///   id SERIAL PRIMARY KEY,
///   title VARCHAR(100),
///   description TEXT,
///   status_id INTEGER REFERENCES status (id),
///   user_id INTEGER REFERENCES users (id) ON DELETE CASCADE ON UPDATE CASCADE
/// );
/// ```
use crate::config::PostgresSettings;
use crate::error::{TaskDbError, TaskDbResult};
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tracing::{debug, info};

/// Dependents first; `CASCADE` also removes constraints pointing at the table
pub const DROP_STATEMENTS: [&str; 3] = [
    "DROP TABLE IF EXISTS tasks CASCADE",
    "DROP TABLE IF EXISTS status CASCADE",
    "DROP TABLE IF EXISTS users CASCADE",
];

/// Referenced tables before the table referencing them
pub const CREATE_STATEMENTS: [&str; 3] = [
    r#"
    CREATE TABLE users (
      id SERIAL PRIMARY KEY,
      fullname VARCHAR(100) NOT NULL,
      email VARCHAR(100) UNIQUE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE status (
      id SERIAL PRIMARY KEY,
      name VARCHAR(50) UNIQUE NOT NULL CHECK (name IN ('new', 'in progress', 'completed'))
    )
    "#,
    r#"
    CREATE TABLE tasks (
      id SERIAL PRIMARY KEY,
      title VARCHAR(100),
      description TEXT,
      status_id INTEGER REFERENCES status (id),
      user_id INTEGER REFERENCES users (id)
        ON DELETE CASCADE
        ON UPDATE CASCADE
    )
    "#,
];

/// Row counts of every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCounts {
    pub users: i64,
    pub statuses: i64,
    pub tasks: i64,
}

/// Drops and recreates all tables
///
/// Run it inside [`Session::scoped`](crate::db::session::Session::scoped) so a
/// failing statement leaves the previous schema untouched.
pub async fn initialize(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    info!("Initializing schema");

    for statement in DROP_STATEMENTS.iter().chain(CREATE_STATEMENTS.iter()) {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    info!("All tables created");
    Ok(())
}

/// Counts the rows of the users, status and tasks tables
pub async fn table_counts(conn: &mut PgConnection) -> Result<TableCounts, sqlx::Error> {
    let (users, statuses, tasks): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users),
            (SELECT COUNT(*) FROM status),
            (SELECT COUNT(*) FROM tasks)
        "#,
    )
    .fetch_one(conn)
    .await?;

    Ok(TableCounts {
        users,
        statuses,
        tasks,
    })
}

/// Creates the configured database if it doesn't exist
///
/// Connects to the server's `postgres` maintenance database to check and
/// create. Returns `true` if the database was created.
///
/// # Errors
///
/// Returns [`TaskDbError::Connect`] if the server cannot be reached, and
/// [`TaskDbError::Database`] if the role may not create databases.
pub async fn ensure_database_exists(settings: &PostgresSettings) -> TaskDbResult<bool> {
    debug!(database = %settings.db_name, "Checking if database exists");

    let mut conn = PgConnection::connect_with(&settings.maintenance_options())
        .await
        .map_err(TaskDbError::Connect)?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&settings.db_name)
            .fetch_one(&mut conn)
            .await?;

    if !exists {
        info!(database = %settings.db_name, "Database does not exist, creating it");
        sqlx::query(&format!(
            "CREATE DATABASE {}",
            quote_identifier(&settings.db_name)
        ))
        .execute(&mut conn)
        .await?;
    }

    conn.close().await?;
    Ok(!exists)
}

/// Quotes an SQL identifier, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_order_removes_dependents_first() {
        assert!(DROP_STATEMENTS[0].contains("tasks"));
        assert!(DROP_STATEMENTS.iter().all(|s| s.ends_with("CASCADE")));
    }

    #[test]
    fn test_create_order_referenced_tables_first() {
        let position = |table: &str| {
            CREATE_STATEMENTS
                .iter()
                .position(|s| s.contains(&format!("CREATE TABLE {} (", table)))
                .expect("table is created")
        };
        assert!(position("users") < position("tasks"));
        assert!(position("status") < position("tasks"));
    }

    #[test]
    fn test_status_check_constraint_lists_three_names() {
        let status = CREATE_STATEMENTS[1];
        assert!(status.contains("CHECK (name IN ('new', 'in progress', 'completed'))"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("tasks"), "\"tasks\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    // Idempotence against a live database is covered in tests/db_tests.rs
}
