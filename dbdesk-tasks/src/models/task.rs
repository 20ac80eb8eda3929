/// Task model and database operations
///
/// Tasks belong to a user (deleted with them) and carry one of the three
/// statuses.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///   id SERIAL PRIMARY KEY,
///   title VARCHAR(100),
///   description TEXT,
///   status_id INTEGER REFERENCES status (id),
///   user_id INTEGER REFERENCES users (id) ON DELETE CASCADE ON UPDATE CASCADE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::models::status::{Status, TaskStatus};
/// use dbdesk_tasks::models::task::{CreateTask, Task};
/// use sqlx::postgres::PgConnection;
///
/// # async fn example(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
/// let status_id = Status::find_id_by_name(conn, TaskStatus::New.as_str()).await?;
///
/// let task = Task::create(conn, CreateTask {
///     title: Some("Write report".to_string()),
///     description: None,
///     status_id,
///     user_id: Some(1),
/// }).await?;
///
/// Task::delete(conn, task.id).await?;
/// # Ok(())
/// # }
/// ```
use crate::outcome::{nullable, Record};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnection;

/// A row of the tasks table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    pub title: Option<String>,

    pub description: Option<String>,

    pub status_id: Option<i32>,

    pub user_id: Option<i32>,
}

/// Input for creating a new task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i32>,
    pub user_id: Option<i32>,
}

/// Title and description
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskSummary {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Title, description and status name
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskWithStatus {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: String,
}

/// Task with the name and email of its owner
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskWithOwner {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fullname: String,
    pub email: String,
}

/// Owner name alongside a task and its status
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OwnedTask {
    pub fullname: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: String,
}

impl Record for TaskSummary {
    const COLUMNS: &'static [&'static str] = &["title", "description"];

    fn values(&self) -> Vec<String> {
        vec![nullable(&self.title), nullable(&self.description)]
    }
}

impl Record for TaskWithStatus {
    const COLUMNS: &'static [&'static str] = &["title", "description", "status"];

    fn values(&self) -> Vec<String> {
        vec![
            nullable(&self.title),
            nullable(&self.description),
            self.status.clone(),
        ]
    }
}

impl Record for TaskWithOwner {
    const COLUMNS: &'static [&'static str] = &["title", "description", "fullname", "email"];

    fn values(&self) -> Vec<String> {
        vec![
            nullable(&self.title),
            nullable(&self.description),
            self.fullname.clone(),
            self.email.clone(),
        ]
    }
}

impl Record for OwnedTask {
    const COLUMNS: &'static [&'static str] = &["fullname", "title", "description", "status"];

    fn values(&self) -> Vec<String> {
        vec![
            self.fullname.clone(),
            nullable(&self.title),
            nullable(&self.description),
            self.status.clone(),
        ]
    }
}

impl Task {
    /// Inserts a task and returns it with its generated id
    ///
    /// # Errors
    ///
    /// Fails if `status_id` or `user_id` reference missing rows.
    pub async fn create(conn: &mut PgConnection, data: CreateTask) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status_id, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status_id)
        .bind(data.user_id)
        .fetch_one(conn)
        .await
    }

    /// Tasks of one user
    pub async fn find_by_user(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        sqlx::query_as::<_, TaskSummary>(
            r#"
            SELECT title, description
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }

    /// Tasks whose status is called `status`
    ///
    /// The name is not checked here; an unknown name simply matches nothing.
    pub async fn find_by_status(
        conn: &mut PgConnection,
        status: &str,
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        sqlx::query_as::<_, TaskSummary>(
            r#"
            SELECT t.title, t.description
            FROM tasks t
            JOIN status s ON s.id = t.status_id
            WHERE s.name = $1
            ORDER BY t.id
            "#,
        )
        .bind(status)
        .fetch_all(conn)
        .await
    }

    /// Points a task at another status
    ///
    /// Returns the number of rows updated (0 if the task doesn't exist).
    pub async fn update_status(
        conn: &mut PgConnection,
        id: i32,
        status_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status_id = $1 WHERE id = $2")
            .bind(status_id)
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Tasks whose status is anything but `completed`
    pub async fn incomplete(conn: &mut PgConnection) -> Result<Vec<TaskWithStatus>, sqlx::Error> {
        sqlx::query_as::<_, TaskWithStatus>(
            r#"
            SELECT tasks.title, tasks.description, status.name AS status
            FROM tasks
            JOIN status ON tasks.status_id = status.id
            WHERE status.name != 'completed'
            ORDER BY tasks.id
            "#,
        )
        .fetch_all(conn)
        .await
    }

    /// Deletes a task
    ///
    /// Returns the number of rows deleted (0 if the task doesn't exist).
    pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Tasks whose owner's email matches a `LIKE` pattern, e.g. `%@example.com`
    pub async fn find_by_owner_email(
        conn: &mut PgConnection,
        pattern: &str,
    ) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT tasks.title, tasks.description, users.fullname, users.email
            FROM tasks
            JOIN users ON tasks.user_id = users.id
            WHERE users.email LIKE $1
            ORDER BY tasks.id
            "#,
        )
        .bind(pattern)
        .fetch_all(conn)
        .await
    }

    /// Tasks with a NULL or empty description
    pub async fn undescribed(conn: &mut PgConnection) -> Result<Vec<TaskSummary>, sqlx::Error> {
        sqlx::query_as::<_, TaskSummary>(
            r#"
            SELECT title, description
            FROM tasks
            WHERE description IS NULL OR description = ''
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await
    }

    /// Users and their tasks that are `in progress`
    pub async fn in_progress_with_owner(
        conn: &mut PgConnection,
    ) -> Result<Vec<OwnedTask>, sqlx::Error> {
        sqlx::query_as::<_, OwnedTask>(
            r#"
            SELECT users.fullname, tasks.title, tasks.description, status.name AS status
            FROM users
            INNER JOIN tasks ON users.id = tasks.user_id
            INNER JOIN status ON tasks.status_id = status.id
            WHERE status.name = 'in progress'
            ORDER BY users.id, tasks.id
            "#,
        )
        .fetch_all(conn)
        .await
    }

    /// Counts tasks whose user or status reference doesn't resolve
    pub async fn count_dangling(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks
            LEFT JOIN users ON tasks.user_id = users.id
            LEFT JOIN status ON tasks.status_id = status.id
            WHERE users.id IS NULL OR status.id IS NULL
            "#,
        )
        .fetch_one(conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_record_renders_null() {
        let summary = TaskSummary {
            title: Some("Call back".to_string()),
            description: None,
        };
        assert_eq!(summary.values(), ["Call back", "NULL"]);
    }

    #[test]
    fn test_owned_task_columns_match_values() {
        let task = OwnedTask {
            fullname: "Ada".to_string(),
            title: Some("t".to_string()),
            description: Some("d".to_string()),
            status: "in progress".to_string(),
        };
        assert_eq!(OwnedTask::COLUMNS.len(), task.values().len());
    }
}
