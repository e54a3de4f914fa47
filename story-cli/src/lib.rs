//! # story-sync
//!
//! Keeps a single Jira story in sync from CI: validates the action inputs,
//! creates or updates the story, and assigns it to a future sprint.

pub mod cli;
pub mod config;
pub mod consts;
pub mod description;
pub mod inputs;
pub mod output;
pub mod upsert;

use anyhow::{Context, Result};
use chrono::Utc;
use story_jira::create_jira_client;
use tracing::{debug, info};

use crate::config::Config;
use crate::upsert::{UpsertOutcome, upsert_story};

/// Run the upsert for `config` within its deadline
pub async fn run(config: &Config) -> Result<UpsertOutcome> {
  debug!(?config, "Starting story sync");

  let client = create_jira_client(&config.base_url, &config.user_email, &config.api_token)
    .context("Failed to create Jira client")?
    .with_retry_policy(config.retry_policy());

  let outcome = tokio::time::timeout(config.timeout, upsert_story(&client, &config.story(), Utc::now()))
    .await
    .with_context(|| format!("Story sync did not finish within {}s", config.timeout.as_secs()))??;

  info!(issue_key = %outcome.issue_key, action = %outcome.action, "Story sync finished");
  Ok(outcome)
}
