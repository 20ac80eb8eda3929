/// Error handling for the task tracker
///
/// Failure classes the utility distinguishes:
/// - connection failures when opening the session (`Connect`)
/// - per-query database errors (`Database`)
/// - user input that could not be parsed (`Input`)
/// - configuration that could not be loaded (`Config`)
/// - a seed plan with out-of-range references (`SeedPlan`)
use dbdesk_shared::{ConfigError, InputError};
use thiserror::Error;

/// Task tracker result type alias
pub type TaskDbResult<T> = Result<T, TaskDbError>;

/// Unified task tracker error type
#[derive(Debug, Error)]
pub enum TaskDbError {
    /// The database could not be reached or the connection was refused
    #[error("Cannot create the database connection: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// User input was invalid
    #[error(transparent)]
    Input(#[from] InputError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A seed plan refers to a user or status it does not contain
    #[error("Invalid seed plan: {0}")]
    SeedPlan(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_transparent() {
        let err: TaskDbError = InputError::NotAnInteger {
            field: "task id",
            value: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "task id must be an integer, got 'x'");
    }

    #[test]
    fn test_sqlx_error_converts_to_database() {
        let err: TaskDbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TaskDbError::Database(_)));
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_seed_plan_error_message() {
        let err = TaskDbError::SeedPlan("task 3 refers to user 9".to_string());
        assert_eq!(err.to_string(), "Invalid seed plan: task 3 refers to user 9");
    }
}
