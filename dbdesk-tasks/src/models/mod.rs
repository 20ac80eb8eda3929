/// Row types and queries for the task tracker
///
/// Every query the menu can run lives next to the table it reads or writes.
///
/// # Models
///
/// - `user`: People tasks are assigned to
/// - `status`: The fixed lookup of task states
/// - `task`: Work items referencing a user and a status
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::models::task::Task;
/// use sqlx::postgres::PgConnection;
///
/// # async fn example(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
/// for task in Task::find_by_user(conn, 1).await? {
///     println!("{:?}", task.title);
/// }
/// # Ok(())
/// # }
/// ```

pub mod status;
pub mod task;
pub mod user;
