//! # Taskboard API Server Library
//!
//! HTTP front end for the users, tasks and projects stored by
//! `taskboard-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors that reject with 400
//! - `routes`: API route handlers
//! - `server`: Serving and graceful shutdown

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;
