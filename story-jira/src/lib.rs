//! # Jira API Client
//!
//! Provides the small slice of the Jira REST and Agile APIs that story-sync
//! needs: issue search, story creation and updates, and future-sprint lookup
//! and assignment. Every call goes through a single transport that retries
//! rate-limited and failed requests with exponential backoff.

mod client;
pub mod consts;
mod endpoints;
mod error;
pub mod models;

// Re-export the client
pub use client::{JiraClient, JiraResponse, RetryPolicy, create_jira_client};
pub use endpoints::issues::story_search_jql;
pub use error::JiraError;
// Re-export models
pub use models::{JiraAuth, JiraIssue, JiraIssueFields, Sprint};
