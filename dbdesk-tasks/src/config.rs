/// Configuration for the task tracker
///
/// Settings come from `config.ini` in the working directory and from
/// environment variables prefixed with `DBDESK_TASKS__`.
///
/// # `config.ini`
///
/// ```ini
/// [db]
/// user = postgres
/// pass = secret
/// domain = localhost
/// port = 5432
/// db_name = tasks
///
/// ; optional
/// [seed]
/// users = 5
/// tasks = 30
/// rng_seed = 42
/// ```
///
/// # Environment Variables
///
/// - `DBDESK_TASKS__DB__USER`, `DBDESK_TASKS__DB__PASS`, ...
/// - `DBDESK_TASKS__SEED__RNG_SEED`
/// - `RUST_LOG`: Log level (default: dbdesk_tasks=info)
use dbdesk_shared::{config, ConfigError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DBDESK_TASKS";

/// Complete task tracker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// PostgreSQL connection parameters
    pub db: PostgresSettings,

    /// Seeding overrides
    #[serde(default)]
    pub seed: SeedSettings,
}

/// PostgreSQL connection parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub user: String,

    pub pass: String,

    /// Host name
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub db_name: String,
}

/// Seeding overrides
///
/// Unset counts are drawn at random; an unset `rng_seed` draws from entropy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedSettings {
    pub users: Option<usize>,

    pub tasks: Option<usize>,

    pub rng_seed: Option<u64>,
}

fn default_domain() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

impl Settings {
    /// Loads settings from `.env`, `config.ini` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required key (`user`, `pass`, `db_name`) is missing
    /// or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        config::load(ENV_PREFIX)
    }
}

impl PostgresSettings {
    /// Connection options for the configured database
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.db_name)
    }

    /// Connection options for the server's maintenance database
    ///
    /// Used to create the configured database when it is missing.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.options_for("postgres")
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.domain)
            .port(self.port)
            .username(&self.user)
            .password(&self.pass)
            .database(database)
    }
}

impl SeedSettings {
    /// Random source for a seed run
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_settings_defaults() {
        let settings: Settings = config::from_ini_str(
            "[db]\nuser = postgres\npass = secret\ndb_name = tasks\n",
        )
        .expect("valid settings");

        assert_eq!(settings.db.domain, "localhost");
        assert_eq!(settings.db.port, 5432);
        assert_eq!(settings.db.db_name, "tasks");
        assert!(settings.seed.users.is_none());
        assert!(settings.seed.tasks.is_none());
        assert!(settings.seed.rng_seed.is_none());
    }

    #[test]
    fn test_settings_with_seed_section() {
        let settings: Settings = config::from_ini_str(
            "[db]\nuser = u\npass = p\ndomain = db.internal\nport = 6543\ndb_name = d\n\
             [seed]\nusers = 5\ntasks = 30\nrng_seed = 42\n",
        )
        .expect("valid settings");

        assert_eq!(settings.db.domain, "db.internal");
        assert_eq!(settings.db.port, 6543);
        assert_eq!(settings.seed.users, Some(5));
        assert_eq!(settings.seed.tasks, Some(30));
        assert_eq!(settings.seed.rng_seed, Some(42));
    }

    #[test]
    fn test_missing_db_name_is_error() {
        let result: Result<Settings, _> = config::from_ini_str("[db]\nuser = u\npass = p\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let settings = SeedSettings {
            rng_seed: Some(7),
            ..Default::default()
        };
        let a: u64 = settings.rng().gen();
        let b: u64 = settings.rng().gen();
        assert_eq!(a, b);
    }
}
