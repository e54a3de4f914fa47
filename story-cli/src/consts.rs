//! Constants for story-sync
//!
//! Input names, environment variables, and defaults used when assembling the
//! run configuration.

use std::time::Duration;

/// Prefix CI runners use to expose action inputs as environment variables
pub const ENV_INPUT_PREFIX: &str = "INPUT_";

/// Environment variable naming the file that receives step outputs
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Name of the single output this tool produces
pub const OUTPUT_ISSUE_KEY: &str = "issue-key";

pub const INPUT_JIRA_BASE_URL: &str = "jira-base-url";
pub const INPUT_JIRA_USER_EMAIL: &str = "jira-user-email";
pub const INPUT_JIRA_API_TOKEN: &str = "jira-api-token";
pub const INPUT_PROJECT_KEY: &str = "project-key";
pub const INPUT_SUMMARY: &str = "summary";
pub const INPUT_DESCRIPTION: &str = "description";
pub const INPUT_BOARD_ID: &str = "board-id";
pub const INPUT_SPRINT_NAME: &str = "sprint-name";
pub const INPUT_RETRIES: &str = "retries";
pub const INPUT_RETRY_DELAY_MS: &str = "retry-delay-ms";
pub const INPUT_TIMEOUT_SECS: &str = "timeout-secs";

/// Inputs that must be present and non-empty, in the order they are checked
pub const REQUIRED_INPUTS: [&str; 8] = [
  INPUT_JIRA_BASE_URL,
  INPUT_JIRA_USER_EMAIL,
  INPUT_JIRA_API_TOKEN,
  INPUT_PROJECT_KEY,
  INPUT_SUMMARY,
  INPUT_DESCRIPTION,
  INPUT_BOARD_ID,
  INPUT_SPRINT_NAME,
];

/// Deadline for a whole run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
