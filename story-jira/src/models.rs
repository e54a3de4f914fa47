use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::STORY_ISSUE_TYPE;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  /// Account email used as the Basic auth user
  pub username: String,
  pub api_token: String,
}

impl fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Represents a Jira issue as returned by search
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
}

/// Represents the Jira issue fields story-sync reads
#[derive(Debug, Default, Deserialize)]
pub struct JiraIssueFields {
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

/// Search endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
}

/// Represents an agile sprint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sprint {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub state: Option<String>,
}

/// One page of sprints for a board
#[derive(Debug, Deserialize)]
pub(crate) struct SprintPage {
  #[serde(default)]
  pub values: Vec<Sprint>,
}

/// Payload for creating a story
#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
  pub fields: NewStoryFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewStoryFields<'a> {
  pub project: ProjectRef<'a>,
  pub summary: &'a str,
  pub description: &'a str,
  pub issuetype: IssueTypeRef,
  pub sprint: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProjectRef<'a> {
  pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IssueTypeRef {
  pub name: &'static str,
}

impl IssueTypeRef {
  pub(crate) const fn story() -> Self {
    Self { name: STORY_ISSUE_TYPE }
  }
}

/// Response to a successful create
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedIssue {
  pub key: String,
}

/// Payload for replacing an issue description
#[derive(Debug, Serialize)]
pub(crate) struct UpdateDescriptionRequest<'a> {
  pub fields: DescriptionFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DescriptionFields<'a> {
  pub description: &'a str,
}

/// Payload for moving issues into a sprint
#[derive(Debug, Serialize)]
pub(crate) struct SprintIssuesRequest<'a> {
  pub issues: Vec<&'a str>,
}
