/// Configuration loading for the dbdesk utilities
///
/// Each utility describes its settings as a serde struct and loads it through
/// [`load`]. Sources are layered, later sources overriding earlier ones:
///
/// 1. `.env` in the working directory (exported into the process environment)
/// 2. `config.ini` (or `config.toml`, `config.json`, ...) in the working directory
/// 3. Environment variables named `<PREFIX>__<SECTION>__<KEY>`
///
/// # Example
///
/// ```no_run
/// use dbdesk_shared::config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     db: Db,
/// }
///
/// #[derive(Deserialize)]
/// struct Db {
///     user: String,
/// }
///
/// # fn example() -> Result<(), dbdesk_shared::ConfigError> {
/// // Reads [db] user=... from config.ini, or DBDESK_TASKS__DB__USER
/// let settings: Settings = config::load("DBDESK_TASKS")?;
/// # Ok(())
/// # }
/// ```
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use tracing::debug;

/// File stem looked up in the working directory
pub const CONFIG_FILE_STEM: &str = "config";

/// Loads settings from `.env`, the optional config file and the environment
///
/// # Errors
///
/// Returns an error if a source is malformed or a required key is missing
/// from every source.
pub fn load<T: DeserializeOwned>(env_prefix: &str) -> Result<T, ConfigError> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    debug!(env_prefix, file = CONFIG_FILE_STEM, "Loading configuration");

    let settings = Config::builder()
        .add_source(File::with_name(CONFIG_FILE_STEM).required(false))
        .add_source(Environment::with_prefix(env_prefix).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Deserializes settings from INI text
///
/// Used by tests and by callers that already hold the configuration contents.
pub fn from_ini_str<T: DeserializeOwned>(ini: &str) -> Result<T, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from_str(ini, FileFormat::Ini))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Settings {
        db: Db,
    }

    #[derive(Debug, Deserialize)]
    struct Db {
        user: String,
        pass: String,
        port: Option<u16>,
    }

    #[test]
    fn test_from_ini_str_reads_section() {
        let settings: Settings = from_ini_str(
            "[db]\nuser = postgres\npass = secret\nport = 6543\n",
        )
        .expect("valid ini");

        assert_eq!(settings.db.user, "postgres");
        assert_eq!(settings.db.pass, "secret");
        assert_eq!(settings.db.port, Some(6543));
    }

    #[test]
    fn test_from_ini_str_optional_key_missing() {
        let settings: Settings =
            from_ini_str("[db]\nuser = u\npass = p\n").expect("valid ini");
        assert_eq!(settings.db.port, None);
    }

    #[test]
    fn test_from_ini_str_missing_required_key() {
        let result: Result<Settings, _> = from_ini_str("[db]\nuser = u\n");
        assert!(result.is_err());
    }
}
