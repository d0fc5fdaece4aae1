//! Strata Core
//!
//! Shared plumbing for the Strata crates: logging setup, profiling scopes
//! and the top-level [`config::Config`].

pub mod config;
pub mod logging;
pub mod profiling;
