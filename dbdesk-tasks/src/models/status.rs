/// Status lookup table
///
/// The table holds exactly three rows, one per [`TaskStatus`]; a check
/// constraint rejects any other name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE status (
///   id SERIAL PRIMARY KEY,
///   name VARCHAR(50) UNIQUE NOT NULL CHECK (name IN ('new', 'in progress', 'completed'))
/// );
/// ```
use crate::outcome::Record;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnection;
use std::fmt;
use std::str::FromStr;

/// The allowed task states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started; the default for tasks added from the menu
    New,

    #[serde(rename = "in progress")]
    InProgress,

    Completed,
}

impl TaskStatus {
    /// All states, in seeding order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::New, TaskStatus::InProgress, TaskStatus::Completed];

    /// Name stored in the status table
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::New => "new",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown task status: {}", s))
    }
}

/// A row of the status table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Status {
    pub id: i32,
    pub name: String,
}

/// Number of tasks in one status
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatusCount {
    pub name: String,
    pub task_count: i64,
}

impl Record for StatusCount {
    const COLUMNS: &'static [&'static str] = &["status", "task_count"];

    fn values(&self) -> Vec<String> {
        vec![self.name.clone(), self.task_count.to_string()]
    }
}

impl Status {
    /// Inserts a status row
    pub async fn create(conn: &mut PgConnection, status: TaskStatus) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Status>("INSERT INTO status (name) VALUES ($1) RETURNING id, name")
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Looks up the id of the status called `name`
    ///
    /// Returns `None` when no such status exists.
    pub async fn find_id_by_name(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM status WHERE name = $1")
            .bind(name)
            .fetch_optional(conn)
            .await
    }

    /// Lists all statuses ordered by id
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Status>("SELECT id, name FROM status ORDER BY id")
            .fetch_all(conn)
            .await
    }

    /// Counts tasks per status name
    ///
    /// Statuses without tasks are absent from the result.
    pub async fn task_counts(conn: &mut PgConnection) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status.name, COUNT(tasks.id) AS task_count
            FROM tasks
            JOIN status ON tasks.status_id = status.id
            GROUP BY status.name
            ORDER BY status.name
            "#,
        )
        .fetch_all(conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        let names: Vec<&str> = TaskStatus::ALL.iter().map(TaskStatus::as_str).collect();
        assert_eq!(names, ["new", "in progress", "completed"]);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("In Progress".parse::<TaskStatus>().is_err());
        assert!("done".parse::<TaskStatus>().is_err());
    }
}
