//! # Command Line Interface
//!
//! Flags mirror the action inputs one to one, and each flag also reads its own
//! environment variable. Anything not given either way is read from the
//! matching `INPUT_*` variable set by the CI runner.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};

use crate::consts::{
  INPUT_BOARD_ID, INPUT_DESCRIPTION, INPUT_JIRA_API_TOKEN, INPUT_JIRA_BASE_URL, INPUT_JIRA_USER_EMAIL,
  INPUT_PROJECT_KEY, INPUT_RETRIES, INPUT_RETRY_DELAY_MS, INPUT_SPRINT_NAME, INPUT_SUMMARY, INPUT_TIMEOUT_SECS,
};
use crate::inputs::InputMap;

/// Top-level CLI command for story-sync
#[derive(Parser)]
#[command(name = "story-sync")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Create or update a Jira story and assign it to a future sprint")]
#[command(
  long_about = "Searches the project for an open story with the given summary. If one exists and its\n\
        description changed, the description is updated; if none exists, a story is created.\n\
        The story is then assigned to the named future sprint and its key is printed."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Jira base URL (e.g., https://company.atlassian.net)
  #[arg(long, env = "JIRA_BASE_URL")]
  pub jira_base_url: Option<String>,

  /// Email of the Jira account used for Basic auth
  #[arg(long, env = "JIRA_USER_EMAIL")]
  pub jira_user_email: Option<String>,

  /// Jira API token
  #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
  pub jira_api_token: Option<String>,

  /// Project key (e.g., PROJ)
  #[arg(long, env = "JIRA_PROJECT_KEY")]
  pub project_key: Option<String>,

  /// Story summary, used to find an existing story
  #[arg(long, env = "STORY_SUMMARY")]
  pub summary: Option<String>,

  /// Story description
  #[arg(long, env = "STORY_DESCRIPTION")]
  pub description: Option<String>,

  /// Id of the board whose future sprints are searched
  #[arg(long, env = "JIRA_BOARD_ID")]
  pub board_id: Option<String>,

  /// Exact name of the future sprint to assign the story to
  #[arg(long, env = "JIRA_SPRINT_NAME")]
  pub sprint_name: Option<String>,

  /// Retries for rate-limited or failed requests [default: 3]
  #[arg(long, env = "STORY_SYNC_RETRIES")]
  pub retries: Option<String>,

  /// Delay before the first retry in milliseconds, doubled per retry [default: 1000]
  #[arg(long, env = "STORY_SYNC_RETRY_DELAY_MS")]
  pub retry_delay_ms: Option<String>,

  /// Deadline for the whole run in seconds [default: 300]
  #[arg(long, env = "STORY_SYNC_TIMEOUT_SECS")]
  pub timeout_secs: Option<String>,
}

impl Cli {
  /// Inputs given as flags or through the flags' environment variables
  pub fn inputs(&self) -> InputMap {
    let mut inputs = InputMap::new();
    let flags = [
      (INPUT_JIRA_BASE_URL, &self.jira_base_url),
      (INPUT_JIRA_USER_EMAIL, &self.jira_user_email),
      (INPUT_JIRA_API_TOKEN, &self.jira_api_token),
      (INPUT_PROJECT_KEY, &self.project_key),
      (INPUT_SUMMARY, &self.summary),
      (INPUT_DESCRIPTION, &self.description),
      (INPUT_BOARD_ID, &self.board_id),
      (INPUT_SPRINT_NAME, &self.sprint_name),
      (INPUT_RETRIES, &self.retries),
      (INPUT_RETRY_DELAY_MS, &self.retry_delay_ms),
      (INPUT_TIMEOUT_SECS, &self.timeout_secs),
    ];

    for (name, value) in flags {
      if let Some(value) = value {
        inputs.insert(name, value.as_str());
      }
    }
    inputs
  }

  /// Action inputs from the environment, overridden by flags
  pub fn resolve_inputs(&self) -> InputMap {
    let mut inputs = InputMap::from_action_env();
    inputs.merge(self.inputs());
    inputs
  }
}
