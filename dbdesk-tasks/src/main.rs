//! # dbdesk Tasks
//!
//! Creates the users/status/tasks schema, seeds it with synthetic data and
//! serves the query menu.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p dbdesk-tasks
//! ```
//!
//! Configuration is read from `config.ini` (section `[db]`) or
//! `DBDESK_TASKS__DB__*` environment variables. The process always exits with
//! status 0; failures are reported on the console.

use dbdesk_shared::{menu, Console};
use dbdesk_tasks::catalog::TaskCatalog;
use dbdesk_tasks::config::Settings;
use dbdesk_tasks::db::schema;
use dbdesk_tasks::db::session::Session;
use dbdesk_tasks::seed::{self, SeedCounts, SeedPlan};
use dbdesk_tasks::{TaskDbError, TaskDbResult};
use std::io::{BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the menu transcript on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbdesk_tasks=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("dbdesk tasks v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut console = Console::stdio();

    if let Err(err) = run(&mut console).await {
        tracing::error!(error = %err, "Task tracker stopped");
        if matches!(err, TaskDbError::Connect(_) | TaskDbError::Config(_)) {
            console.say("--> Error! Cannot create the database connection")?;
        }
        console.say(&err)?;
    }

    Ok(())
}

async fn run<R, W>(console: &mut Console<R, W>) -> TaskDbResult<()>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let settings = Settings::load()?;

    if schema::ensure_database_exists(&settings.db).await? {
        console.say(format_args!("--> Created database {}", settings.db.db_name))?;
    }

    let mut session = Session::open(&settings.db).await?;
    let result = prepare_and_serve(&mut session, &settings, console).await;
    session.close().await;

    result
}

async fn prepare_and_serve<R, W>(
    session: &mut Session,
    settings: &Settings,
    console: &mut Console<R, W>,
) -> TaskDbResult<()>
where
    R: BufRead + Send,
    W: Write + Send,
{
    session
        .scoped(|conn| Box::pin(async move { Ok(schema::initialize(conn).await?) }))
        .await?;
    console.say("--> All tables created")?;

    let mut rng = settings.seed.rng();
    let counts = SeedCounts::resolve(&settings.seed, &mut rng);
    let plan = SeedPlan::generate(&mut rng, counts);

    let report = session
        .scoped(move |conn| Box::pin(seed::seed_all(conn, plan)))
        .await?;
    console.say(format_args!(
        "--> Seeding operation is successful ({} users, {} statuses, {} tasks)",
        report.users, report.statuses, report.tasks
    ))?;

    let mut catalog = TaskCatalog::new(session);
    menu::run(&mut catalog, console).await?;

    Ok(())
}
