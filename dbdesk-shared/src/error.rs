/// Error types shared by both utilities
///
/// Database errors stay in the crates that own the drivers; this module only
/// covers what the console and the configuration layer can produce.
use thiserror::Error;

/// Errors raised while reading user input from the console
#[derive(Debug, Error)]
pub enum InputError {
    /// A value that must be an integer could not be parsed
    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger {
        /// Name of the parameter being read
        field: &'static str,

        /// Raw text the user typed
        value: String,
    },

    /// Standard input reached end of file while a prompt was waiting
    #[error("Input stream closed")]
    Closed,

    /// A handler asked for a parameter its command never declared
    #[error("Missing parameter at position {index}")]
    MissingParameter {
        /// Zero-based position of the parameter
        index: usize,
    },

    /// Reading from or writing to the terminal failed
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
