//! Command implementations for the Tune CLI.

pub mod auth;
pub mod fetch;
pub mod types;

pub use types::AuthCommand;
