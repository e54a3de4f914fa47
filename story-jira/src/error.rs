//! # Jira Errors
//!
//! Typed failures surfaced by the Jira client. Rate limiting and network
//! failures are only reported here once the retry budget is spent.

use reqwest::Method;
use thiserror::Error;

/// Errors returned by [`crate::JiraClient`] operations
#[derive(Debug, Error)]
pub enum JiraError {
  /// Jira answered with a non-success status other than 429
  #[error("Jira {method} {path} failed: HTTP {status} - {body}")]
  Remote {
    method: Method,
    path: String,
    status: u16,
    body: String,
  },

  /// Jira kept answering 429 until the retry budget ran out
  #[error("Jira {method} {path} is still rate limited after retries: HTTP {status} - {body}")]
  RateLimited {
    method: Method,
    path: String,
    status: u16,
    body: String,
  },

  /// The request never produced a response (connection, DNS, TLS, timeout)
  #[error("Jira {method} {path} could not be completed: {source}")]
  Transport {
    method: Method,
    path: String,
    #[source]
    source: reqwest::Error,
  },

  /// No future sprint on the board carries the requested name
  #[error("Sprint '{name}' not found among future sprints of board {board_id}")]
  SprintNotFound { board_id: u64, name: String },

  /// A success response did not have the shape the caller needed
  #[error("Unexpected Jira response for {what}: {detail}")]
  UnexpectedPayload { what: &'static str, detail: String },

  /// A request payload could not be encoded as JSON
  #[error("Failed to encode Jira request payload: {0}")]
  Encode(#[from] serde_json::Error),

  /// The underlying HTTP client could not be constructed
  #[error("Failed to build Jira HTTP client: {0}")]
  Client(#[source] reqwest::Error),
}

impl JiraError {
  /// HTTP status carried by the error, if Jira responded at all
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Remote { status, .. } | Self::RateLimited { status, .. } => Some(*status),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_remote_error_message_includes_status_and_body() {
    let err = JiraError::Remote {
      method: Method::PUT,
      path: "/rest/api/2/issue/PROJ-1".to_string(),
      status: 400,
      body: "{\"errors\":{\"description\":\"bad\"}}".to_string(),
    };

    let message = err.to_string();
    assert!(message.contains("PUT /rest/api/2/issue/PROJ-1"));
    assert!(message.contains("400"));
    assert!(message.contains("description"));
    assert_eq!(err.status(), Some(400));
  }

  #[test]
  fn test_sprint_not_found_message() {
    let err = JiraError::SprintNotFound {
      board_id: 42,
      name: "Sprint 7".to_string(),
    };

    assert_eq!(
      err.to_string(),
      "Sprint 'Sprint 7' not found among future sprints of board 42"
    );
    assert_eq!(err.status(), None);
  }
}
