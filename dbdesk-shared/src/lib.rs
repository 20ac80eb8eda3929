//! # dbdesk Shared Library
//!
//! This crate contains the pieces shared by the two dbdesk utilities: the
//! relational task tracker (`dbdesk-tasks`) and the cat document store
//! (`dbdesk-cats`).
//!
//! ## Module Organization
//!
//! - `config`: Layered configuration loading (`.env`, `config.ini`, environment)
//! - `console`: Prompting and parameter collection over any reader/writer pair
//! - `menu`: The numbered menu loop and its dispatch contract
//! - `error`: Input and configuration error types

pub mod config;
pub mod console;
pub mod error;
pub mod menu;

pub use console::{Console, InvalidInputPolicy, Param, ParamKind, Params, Value};
pub use error::{ConfigError, InputError};
pub use menu::{Dispatch, Selection};

/// Current version of the dbdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
