//! Core module - configuration, state, server and errors
//!
//! - [`Config`] - service configuration
//! - [`ServerState`] - shared state (campaign set, timezone)
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
