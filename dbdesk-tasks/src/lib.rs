//! # dbdesk Tasks
//!
//! Relational task tracker: creates a three-table PostgreSQL schema (users,
//! status, tasks), fills it with synthetic data and serves a numbered menu of
//! parameterized queries.
//!
//! ## Modules
//!
//! - `config`: Connection and seeding settings
//! - `db`: Connection session with scoped transactions, schema initializer
//! - `models`: Row types and the SQL for every query
//! - `seed`: Synthetic data generation and insertion
//! - `catalog`: The fourteen menu commands and their driver
//! - `outcome`: Printable command results
//! - `error`: Error type for this crate

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod outcome;
pub mod seed;

pub use error::{TaskDbError, TaskDbResult};
