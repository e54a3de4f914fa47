//! Test utilities shared across the story-sync workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable overrides restored on drop ([`EnvVarGuard`])
//! - A temporary CI output file wired to a caller-named variable
//!   ([`GithubOutputGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may not
//! be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod output;

// Re-export commonly used items
pub use env::{EnvVarGuard, env_lock};
pub use output::GithubOutputGuard;
