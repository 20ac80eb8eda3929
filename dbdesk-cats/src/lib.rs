//! # dbdesk Cats
//!
//! CRUD utility for a MongoDB collection of cat documents, driven by a
//! numbered menu.
//!
//! ## Modules
//!
//! - `config`: Connection settings and target collection
//! - `models`: The cat document
//! - `store`: The `CatStore` contract with MongoDB and in-memory backends
//! - `catalog`: The seven menu commands and their driver
//! - `error`: Error type for this crate

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
