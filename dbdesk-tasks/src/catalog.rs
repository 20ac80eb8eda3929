/// Menu commands of the task tracker
///
/// [`COMMANDS`] is the flat dispatch table behind the menu: entry `n - 1`
/// is menu number `n`. Every entry declares the parameters it prompts for and
/// a handler that runs exactly one query (two for the commands that first
/// resolve a status id). [`TaskCatalog`] is the single driver for all of them:
///
/// ```text
/// dispatch(n)
///   ├─> prompt for COMMANDS[n].params (non-integer id → reported, nothing runs)
///   ├─> Session::scoped(handler)      (commit on success, rollback on error)
///   └─> print the Outcome
/// ```
use crate::db::session::Session;
use crate::error::{TaskDbError, TaskDbResult};
use crate::models::status::{Status, TaskStatus};
use crate::models::task::{CreateTask, Task};
use crate::models::user::User;
use crate::outcome::Outcome;
use async_trait::async_trait;
use dbdesk_shared::{Console, Dispatch, InvalidInputPolicy, Param, Params};
use futures::future::BoxFuture;
use sqlx::postgres::PgConnection;
use std::io::{BufRead, Write};
use tracing::debug;

/// Runs one command against the connection
pub type Handler = for<'c> fn(&'c mut PgConnection, Params) -> BoxFuture<'c, TaskDbResult<Outcome>>;

/// One menu entry
pub struct TaskCommand {
    /// Text shown in the menu
    pub label: &'static str,

    /// Parameters prompted for, in order, before the handler runs
    pub params: &'static [Param],

    pub handler: Handler,
}

const STATUS_PROMPT: &str = "Specify the task status ('new', 'in progress', 'completed'): ";

/// The menu, in menu order
pub static COMMANDS: [TaskCommand; 14] = [
    TaskCommand {
        label: "Get all tasks of a specific user",
        params: &[Param::integer("user id", "Specify the user ID: ")],
        handler: tasks_by_user,
    },
    TaskCommand {
        label: "Select a task by a certain status",
        params: &[Param::text("status", STATUS_PROMPT)],
        handler: tasks_by_status,
    },
    TaskCommand {
        label: "Update the status of a specific task",
        params: &[
            Param::integer("task id", "Specify the task ID for the status update: "),
            Param::text(
                "status",
                "Provide a new status of the task ('new', 'in progress', 'completed'): ",
            ),
        ],
        handler: update_task_status,
    },
    TaskCommand {
        label: "Get a list of users without tasks",
        params: &[],
        handler: users_without_tasks,
    },
    TaskCommand {
        label: "Add a new task for a specific user",
        params: &[
            Param::integer("user id", "Specify the user ID: "),
            Param::text("title", "Specify a title of the new task: "),
            Param::text("description", "Specify the task description: "),
        ],
        handler: add_task_for_user,
    },
    TaskCommand {
        label: "Get all tasks that have not yet been completed",
        params: &[],
        handler: incomplete_tasks,
    },
    TaskCommand {
        label: "Delete a specific task",
        params: &[Param::integer("task id", "Specify the task ID: ")],
        handler: delete_task,
    },
    TaskCommand {
        label: "Find users with a specific email",
        params: &[Param::text("email", "Specify the user email: ")],
        handler: users_by_email,
    },
    TaskCommand {
        label: "Update username",
        params: &[
            Param::integer("user id", "Specify the user ID: "),
            Param::text("fullname", "Provide the new fullname: "),
        ],
        handler: rename_user,
    },
    TaskCommand {
        label: "Get the number of tasks for each status",
        params: &[],
        handler: count_by_status,
    },
    TaskCommand {
        label: "Get tasks assigned to users with a specific email domain",
        params: &[Param::text("email domain", "Provide the email domain: ")],
        handler: tasks_by_email_domain,
    },
    TaskCommand {
        label: "Get a list of tasks without description",
        params: &[],
        handler: undescribed_tasks,
    },
    TaskCommand {
        label: "Select users and their tasks that are in progress",
        params: &[],
        handler: users_with_tasks_in_progress,
    },
    TaskCommand {
        label: "Get users and the number of their tasks",
        params: &[],
        handler: users_workload,
    },
];

/// Drives [`COMMANDS`] against a session
pub struct TaskCatalog<'s> {
    session: &'s mut Session,
}

impl<'s> TaskCatalog<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        TaskCatalog { session }
    }
}

#[async_trait]
impl<'s> Dispatch for TaskCatalog<'s> {
    type Error = TaskDbError;

    fn labels(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|command| command.label).collect()
    }

    async fn dispatch<R, W>(
        &mut self,
        index: usize,
        console: &mut Console<R, W>,
    ) -> Result<(), Self::Error>
    where
        R: BufRead + Send,
        W: Write + Send,
    {
        let command = &COMMANDS[index];
        let params = console.collect(command.params, InvalidInputPolicy::Abort)?;
        debug!(label = command.label, params = params.len(), "Parameters collected");

        let outcome = self
            .session
            .scoped(move |conn| (command.handler)(conn, params))
            .await?;

        console.say("")?;
        console.say(outcome)?;
        Ok(())
    }
}

fn tasks_by_user(conn: &mut PgConnection, params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let user_id = params.int(0)?;
        Ok(Outcome::rows(&Task::find_by_user(conn, user_id).await?))
    })
}

fn tasks_by_status(conn: &mut PgConnection, params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let status = params.text(0)?;
        Ok(Outcome::rows(&Task::find_by_status(conn, status).await?))
    })
}

fn update_task_status(
    conn: &mut PgConnection,
    params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let task_id = params.int(0)?;
        let status = params.text(1)?;

        let Some(status_id) = Status::find_id_by_name(&mut *conn, status).await? else {
            return Ok(Outcome::Notice(format!("No status named '{}'", status)));
        };

        let updated = Task::update_status(conn, task_id, status_id).await?;
        Ok(Outcome::completed(updated))
    })
}

fn users_without_tasks(
    conn: &mut PgConnection,
    _params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&User::without_tasks(conn).await?)) })
}

fn add_task_for_user(
    conn: &mut PgConnection,
    params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let user_id = params.int(0)?;
        let title = params.text(1)?.to_string();
        let description = params.text(2)?.to_string();

        let Some(status_id) = Status::find_id_by_name(&mut *conn, TaskStatus::New.as_str()).await?
        else {
            return Ok(Outcome::Notice(format!(
                "No status named '{}'",
                TaskStatus::New
            )));
        };

        let task = Task::create(
            conn,
            CreateTask {
                title: Some(title),
                description: Some(description),
                status_id: Some(status_id),
                user_id: Some(user_id),
            },
        )
        .await?;

        debug!(task_id = task.id, user_id, "Task added");
        Ok(Outcome::completed(1))
    })
}

fn incomplete_tasks(
    conn: &mut PgConnection,
    _params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&Task::incomplete(conn).await?)) })
}

fn delete_task(conn: &mut PgConnection, params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let task_id = params.int(0)?;
        Ok(Outcome::completed(Task::delete(conn, task_id).await?))
    })
}

fn users_by_email(conn: &mut PgConnection, params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let pattern = params.text(0)?;
        Ok(Outcome::rows(&User::find_by_email(conn, pattern).await?))
    })
}

fn rename_user(conn: &mut PgConnection, params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let user_id = params.int(0)?;
        let fullname = params.text(1)?;
        Ok(Outcome::completed(
            User::update_fullname(conn, user_id, fullname).await?,
        ))
    })
}

fn count_by_status(
    conn: &mut PgConnection,
    _params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&Status::task_counts(conn).await?)) })
}

fn tasks_by_email_domain(
    conn: &mut PgConnection,
    params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move {
        let pattern = params.text(0)?;
        Ok(Outcome::rows(&Task::find_by_owner_email(conn, pattern).await?))
    })
}

fn undescribed_tasks(
    conn: &mut PgConnection,
    _params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&Task::undescribed(conn).await?)) })
}

fn users_with_tasks_in_progress(
    conn: &mut PgConnection,
    _params: Params,
) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&Task::in_progress_with_owner(conn).await?)) })
}

fn users_workload(conn: &mut PgConnection, _params: Params) -> BoxFuture<'_, TaskDbResult<Outcome>> {
    Box::pin(async move { Ok(Outcome::rows(&User::workload(conn).await?)) })
}
