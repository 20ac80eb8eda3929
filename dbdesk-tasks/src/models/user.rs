/// User model and database operations
///
/// Users are created only by seeding; the menu can rename them but never
/// deletes them. Deleting a user would cascade to their tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///   id SERIAL PRIMARY KEY,
///   fullname VARCHAR(100) NOT NULL,
///   email VARCHAR(100) UNIQUE NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::models::user::{CreateUser, User};
/// use sqlx::postgres::PgConnection;
///
/// # async fn example(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
/// let user = User::create(conn, CreateUser {
///     fullname: "Ada Lovelace".to_string(),
///     email: "ada@example.com".to_string(),
/// }).await?;
///
/// // Partial match with SQL wildcards
/// let found = User::find_by_email(conn, "%@example.com").await?;
/// # Ok(())
/// # }
/// ```
use crate::outcome::Record;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnection;

/// A row of the users table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,

    pub fullname: String,

    /// Unique across all users
    pub email: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub fullname: String,
    pub email: String,
}

/// Full name only
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserName {
    pub fullname: String,
}

/// Full name and email
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserContact {
    pub fullname: String,
    pub email: String,
}

/// A user with the number of tasks assigned to them
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserWorkload {
    pub fullname: String,
    pub task_count: i64,
}

impl Record for UserName {
    const COLUMNS: &'static [&'static str] = &["fullname"];

    fn values(&self) -> Vec<String> {
        vec![self.fullname.clone()]
    }
}

impl Record for UserContact {
    const COLUMNS: &'static [&'static str] = &["fullname", "email"];

    fn values(&self) -> Vec<String> {
        vec![self.fullname.clone(), self.email.clone()]
    }
}

impl Record for UserWorkload {
    const COLUMNS: &'static [&'static str] = &["fullname", "task_count"];

    fn values(&self) -> Vec<String> {
        vec![self.fullname.clone(), self.task_count.to_string()]
    }
}

impl User {
    /// Inserts a user and returns it with its generated id
    ///
    /// # Errors
    ///
    /// Fails on a duplicate email (unique constraint violation).
    pub async fn create(conn: &mut PgConnection, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email)
            VALUES ($1, $2)
            RETURNING id, fullname, email
            "#,
        )
        .bind(data.fullname)
        .bind(data.email)
        .fetch_one(conn)
        .await
    }

    /// Finds users whose email matches a `LIKE` pattern
    ///
    /// Without wildcards this is an exact match; `%` and `_` allow partial
    /// matches.
    pub async fn find_by_email(
        conn: &mut PgConnection,
        pattern: &str,
    ) -> Result<Vec<UserContact>, sqlx::Error> {
        sqlx::query_as::<_, UserContact>(
            r#"
            SELECT fullname, email
            FROM users
            WHERE email LIKE $1
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .fetch_all(conn)
        .await
    }

    /// Users without any task
    pub async fn without_tasks(conn: &mut PgConnection) -> Result<Vec<UserName>, sqlx::Error> {
        // NOT EXISTS rather than NOT IN: tasks.user_id is nullable
        sqlx::query_as::<_, UserName>(
            r#"
            SELECT fullname
            FROM users
            WHERE NOT EXISTS (
                SELECT 1
                FROM tasks
                WHERE tasks.user_id = users.id
            )
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await
    }

    /// Renames a user
    ///
    /// Returns the number of rows updated (0 if the id doesn't exist).
    pub async fn update_fullname(
        conn: &mut PgConnection,
        id: i32,
        fullname: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET fullname = $1 WHERE id = $2")
            .bind(fullname)
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Every user with their task count, users without tasks included
    pub async fn workload(conn: &mut PgConnection) -> Result<Vec<UserWorkload>, sqlx::Error> {
        sqlx::query_as::<_, UserWorkload>(
            r#"
            SELECT users.fullname, COUNT(tasks.id) AS task_count
            FROM users
            LEFT JOIN tasks ON users.id = tasks.user_id
            GROUP BY users.id, users.fullname
            ORDER BY users.id
            "#,
        )
        .fetch_all(conn)
        .await
    }

    /// Lists all users ordered by id
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, fullname, email FROM users ORDER BY id")
            .fetch_all(conn)
            .await
    }
}
