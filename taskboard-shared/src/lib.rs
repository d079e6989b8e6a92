//! # Taskboard Shared Library
//!
//! Domain types and data access used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and embedded migrations
//! - `models`: users, tasks and projects with their SQL
//! - `store`: accessor traits, PostgreSQL implementations and test doubles
//! - `serde_date`: wire format for nullable dates

pub mod db;
pub mod models;
pub mod serde_date;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
