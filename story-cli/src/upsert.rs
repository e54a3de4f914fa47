//! # Story Upsert
//!
//! Converges Jira to the requested story: resolve the target sprint, look for
//! an open story with the same summary, then update it, leave it alone, or
//! create it, and finally assign it to the sprint.

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use story_jira::{JiraClient, story_search_jql};
use tracing::{debug, info};

use crate::config::StoryRequest;
use crate::description::{descriptions_match, with_timestamp};

/// What a run did to the story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
  /// No open story matched, so one was created
  Created,
  /// The matching story had a different description
  Updated,
  /// The matching story was already up to date
  Unchanged,
}

impl fmt::Display for UpsertAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Created => write!(f, "created"),
      Self::Updated => write!(f, "updated"),
      Self::Unchanged => write!(f, "unchanged"),
    }
  }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
  pub issue_key: String,
  pub action: UpsertAction,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
  ResolvingSprint,
  Searching,
  Updating,
  Creating,
  AssigningSprint,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ResolvingSprint => write!(f, "resolving the target sprint"),
      Self::Searching => write!(f, "searching for an existing story"),
      Self::Updating => write!(f, "updating the story description"),
      Self::Creating => write!(f, "creating the story"),
      Self::AssigningSprint => write!(f, "assigning the story to the sprint"),
    }
  }
}

fn failed_while(stage: Stage) -> String {
  format!("Failed while {stage}")
}

/// Create or update the story described by `story`, stamping written
/// descriptions with `now`.
///
/// Nothing is mutated unless the sprint resolves. Only the first search match
/// is considered.
pub async fn upsert_story(client: &JiraClient, story: &StoryRequest<'_>, now: DateTime<Utc>) -> Result<UpsertOutcome> {
  debug!(stage = %Stage::ResolvingSprint, board_id = story.board_id, sprint = story.sprint_name);
  let sprint_id = client
    .resolve_sprint_id(story.board_id, story.sprint_name)
    .await
    .with_context(|| failed_while(Stage::ResolvingSprint))?;

  debug!(stage = %Stage::Searching, project = story.project_key, summary = story.summary);
  let jql = story_search_jql(story.project_key, story.summary);
  let issues = client
    .search_issues(&jql)
    .await
    .with_context(|| failed_while(Stage::Searching))?;

  let description = with_timestamp(story.description, now);

  let (issue_key, action) = match issues.into_iter().next() {
    Some(existing) => {
      let stored = existing.fields.description.as_deref().unwrap_or_default();
      if descriptions_match(stored, story.description) {
        info!(issue_key = %existing.key, "Story description is unchanged, nothing to do");
        return Ok(UpsertOutcome {
          issue_key: existing.key,
          action: UpsertAction::Unchanged,
        });
      }

      info!(issue_key = %existing.key, "Story description changed, updating");
      client
        .update_issue_description(&existing.key, &description)
        .await
        .with_context(|| failed_while(Stage::Updating))?;
      (existing.key, UpsertAction::Updated)
    }
    None => {
      info!(project = story.project_key, summary = story.summary, "No open story found, creating one");
      let key = client
        .create_story(story.project_key, story.summary, &description, sprint_id)
        .await
        .with_context(|| failed_while(Stage::Creating))?;
      (key, UpsertAction::Created)
    }
  };

  client
    .assign_to_sprint(sprint_id, &issue_key)
    .await
    .with_context(|| failed_while(Stage::AssigningSprint))?;

  info!(issue_key = %issue_key, %action, sprint = story.sprint_name, "Story is in sync");
  Ok(UpsertOutcome { issue_key, action })
}
