//! # Prometheus rule CI
//!
//! Materializes the operator's rules into a file and checks them with
//! `promtool` running inside an OCI container.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod verifier;

pub use cli::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use verifier::*;
