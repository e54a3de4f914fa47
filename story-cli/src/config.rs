//! # Run Configuration
//!
//! Validates the input map once at startup and produces the immutable
//! [`Config`] every later step reads from.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use story_jira::RetryPolicy;
use story_jira::consts::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY};
use thiserror::Error;
use url::Url;

use crate::consts::{
  DEFAULT_TIMEOUT, INPUT_BOARD_ID, INPUT_DESCRIPTION, INPUT_JIRA_API_TOKEN, INPUT_JIRA_BASE_URL, INPUT_JIRA_USER_EMAIL,
  INPUT_PROJECT_KEY, INPUT_RETRIES, INPUT_RETRY_DELAY_MS, INPUT_SPRINT_NAME, INPUT_SUMMARY, INPUT_TIMEOUT_SECS,
  REQUIRED_INPUTS,
};
use crate::inputs::InputMap;

/// Errors raised while validating inputs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Missing required input: {0}")]
  MissingInput(&'static str),
  #[error("Invalid value for input '{name}': {reason}")]
  InvalidInput { name: &'static str, reason: String },
}

/// Validated settings for a single run
#[derive(Clone)]
pub struct Config {
  pub base_url: String,
  pub user_email: String,
  pub api_token: String,
  pub project_key: String,
  pub board_id: u64,
  pub summary: String,
  pub description: String,
  pub sprint_name: String,
  pub retries: u32,
  pub retry_delay: Duration,
  pub timeout: Duration,
}

/// The story a run should converge Jira to
#[derive(Debug, Clone, Copy)]
pub struct StoryRequest<'a> {
  pub project_key: &'a str,
  pub board_id: u64,
  pub summary: &'a str,
  pub description: &'a str,
  pub sprint_name: &'a str,
}

impl Config {
  /// Validate `inputs`, failing on the first missing required input
  pub fn from_inputs(inputs: &InputMap) -> Result<Self, ConfigError> {
    if let Some(missing) = REQUIRED_INPUTS.into_iter().find(|name| inputs.get(name).is_none()) {
      return Err(ConfigError::MissingInput(missing));
    }

    let required = |name: &'static str| inputs.get(name).map(str::to_string).ok_or(ConfigError::MissingInput(name));

    Ok(Self {
      base_url: normalize_base_url(&required(INPUT_JIRA_BASE_URL)?)?,
      user_email: required(INPUT_JIRA_USER_EMAIL)?,
      api_token: required(INPUT_JIRA_API_TOKEN)?,
      project_key: required(INPUT_PROJECT_KEY)?,
      board_id: parse_number(INPUT_BOARD_ID, &required(INPUT_BOARD_ID)?)?,
      summary: required(INPUT_SUMMARY)?,
      description: required(INPUT_DESCRIPTION)?,
      sprint_name: required(INPUT_SPRINT_NAME)?,
      retries: optional_number(inputs, INPUT_RETRIES)?.unwrap_or(DEFAULT_RETRIES),
      retry_delay: optional_number(inputs, INPUT_RETRY_DELAY_MS)?
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_RETRY_DELAY),
      timeout: run_timeout(inputs)?,
    })
  }

  pub const fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy::new(self.retries, self.retry_delay)
  }

  pub fn story(&self) -> StoryRequest<'_> {
    StoryRequest {
      project_key: &self.project_key,
      board_id: self.board_id,
      summary: &self.summary,
      description: &self.description,
      sprint_name: &self.sprint_name,
    }
  }
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("base_url", &self.base_url)
      .field("user_email", &self.user_email)
      .field("api_token", &"<redacted>")
      .field("project_key", &self.project_key)
      .field("board_id", &self.board_id)
      .field("summary", &self.summary)
      .field("sprint_name", &self.sprint_name)
      .field("retries", &self.retries)
      .field("retry_delay", &self.retry_delay)
      .field("timeout", &self.timeout)
      .finish_non_exhaustive()
  }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
  value.parse().map_err(|_| ConfigError::InvalidInput {
    name,
    reason: format!("'{value}' is not a non-negative integer"),
  })
}

fn optional_number<T: FromStr>(inputs: &InputMap, name: &'static str) -> Result<Option<T>, ConfigError> {
  inputs.get(name).map(|value| parse_number(name, value)).transpose()
}

/// Deadline for the whole run. Zero is rejected.
fn run_timeout(inputs: &InputMap) -> Result<Duration, ConfigError> {
  match optional_number::<u64>(inputs, INPUT_TIMEOUT_SECS)? {
    Some(0) => Err(ConfigError::InvalidInput {
      name: INPUT_TIMEOUT_SECS,
      reason: "must be at least 1 second".to_string(),
    }),
    Some(secs) => Ok(Duration::from_secs(secs)),
    None => Ok(DEFAULT_TIMEOUT),
  }
}

/// Normalize the Jira base URL: assume https:// when no scheme is given and
/// drop any trailing slash.
fn normalize_base_url(input: &str) -> Result<String, ConfigError> {
  let invalid = |reason: String| ConfigError::InvalidInput {
    name: INPUT_JIRA_BASE_URL,
    reason,
  };

  let lowered = input.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    input.to_string()
  } else if lowered.contains("://") {
    return Err(invalid(format!("'{input}' must use http or https")));
  } else {
    format!("https://{input}")
  };

  let url = Url::parse(&candidate).map_err(|err| invalid(format!("'{input}' is not a valid URL: {err}")))?;
  if url.host_str().is_none() {
    return Err(invalid(format!("'{input}' has no host")));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}
