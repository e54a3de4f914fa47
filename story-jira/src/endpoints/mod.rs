//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by resource: issue search and mutation,
//! and agile sprint lookup and assignment.

pub mod issues;
pub mod sprints;
