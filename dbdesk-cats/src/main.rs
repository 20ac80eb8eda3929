//! # dbdesk Cats
//!
//! Connects to MongoDB, makes sure the cat collection exists and serves the
//! CRUD menu.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p dbdesk-cats
//! ```
//!
//! Configuration is read from `config.ini` (section `[db]`) or
//! `DBDESK_CATS__DB__*` environment variables.

use dbdesk_cats::catalog::CatCatalog;
use dbdesk_cats::config::Settings;
use dbdesk_cats::store::{CatStore, MongoCatStore};
use dbdesk_cats::StoreResult;
use dbdesk_shared::{menu, Console};
use std::io::{BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbdesk_cats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("dbdesk cats v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut console = Console::stdio();

    if let Err(err) = run(&mut console).await {
        tracing::error!(error = %err, "Cat store stopped");
        console.say(&err)?;
    }

    Ok(())
}

async fn run<R, W>(console: &mut Console<R, W>) -> StoreResult<()>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let settings = Settings::load()?;
    let store = MongoCatStore::connect(&settings.db).await?;

    // An unreachable server is reported here; the menu still starts
    match store.ensure_collection().await {
        Ok(true) => console.say(format_args!(
            "Created {} collection in {}",
            settings.db.collect, settings.db.db_name
        ))?,
        Ok(false) => console.say(format_args!(
            "{} collection already exists in {}",
            settings.db.collect, settings.db.db_name
        ))?,
        Err(err) => {
            tracing::warn!(error = %err, "Collection check failed");
            console.say(&err)?;
        }
    }

    let mut catalog = CatCatalog::new(store);
    menu::run(&mut catalog, console).await?;

    Ok(())
}
