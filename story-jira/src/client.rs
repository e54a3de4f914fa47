//! # Jira HTTP Transport
//!
//! Executes single JSON requests against Jira, classifying responses and
//! retrying rate-limited (429) or failed requests with exponential backoff.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::consts::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::JiraError;
use crate::models::JiraAuth;

/// How many times a request may be retried and how long to wait first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries left after the first attempt
  pub retries: u32,
  /// Delay before the first retry, doubled after every retry
  pub base_delay: Duration,
}

impl RetryPolicy {
  pub const fn new(retries: u32, base_delay: Duration) -> Self {
    Self { retries, base_delay }
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self::new(DEFAULT_RETRIES, DEFAULT_RETRY_DELAY)
  }
}

/// Body of a successful Jira response
#[derive(Debug, Clone, PartialEq)]
pub enum JiraResponse {
  /// 2xx with no content
  Empty,
  /// 2xx with a JSON document
  Json(Value),
  /// 2xx whose body was not valid JSON
  Raw(String),
}

impl JiraResponse {
  fn from_body(body: String) -> Self {
    if body.trim().is_empty() {
      return Self::Empty;
    }

    match serde_json::from_str(&body) {
      Ok(value) => Self::Json(value),
      Err(_) => Self::Raw(body),
    }
  }

  /// Decode a structured payload, naming `what` was expected on failure
  pub fn into_json<T: DeserializeOwned>(self, what: &'static str) -> Result<T, JiraError> {
    match self {
      Self::Json(value) => serde_json::from_value(value).map_err(|err| JiraError::UnexpectedPayload {
        what,
        detail: err.to_string(),
      }),
      Self::Raw(text) => Err(JiraError::UnexpectedPayload {
        what,
        detail: format!("response body is not JSON: {text}"),
      }),
      Self::Empty => Err(JiraError::UnexpectedPayload {
        what,
        detail: "response body is empty".to_string(),
      }),
    }
  }
}

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
  pub(crate) retry: RetryPolicy,
}

impl JiraClient {
  /// Create a new Jira client with the default retry policy
  pub fn new(base_url: &str, auth: JiraAuth) -> Result<Self, JiraError> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(JiraError::Client)?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
      retry: RetryPolicy::default(),
    })
  }

  /// Replace the retry policy used by [`JiraClient::send`]
  pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub const fn retry_policy(&self) -> RetryPolicy {
    self.retry
  }

  /// Send a request using the client's retry policy
  pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<JiraResponse, JiraError> {
    self.send_with_policy(method, path, body, self.retry).await
  }

  /// Send a request, retrying 429 responses and network failures.
  ///
  /// Each retry waits the current delay, then doubles it. Any other non-2xx
  /// status fails immediately.
  pub async fn send_with_policy(
    &self,
    method: Method,
    path: &str,
    body: Option<&Value>,
    policy: RetryPolicy,
  ) -> Result<JiraResponse, JiraError> {
    let url = format!("{}{}", self.base_url, path);
    let mut remaining = policy.retries;
    let mut delay = policy.base_delay;
    let mut attempt: u32 = 1;

    loop {
      debug!(%method, path, attempt, "Sending Jira request");

      match self.attempt(&method, &url, body).await {
        Ok((status, text)) => {
          debug!(%method, path, attempt, status = status.as_u16(), body = %text, "Jira responded");

          if status.is_success() {
            return Ok(JiraResponse::from_body(text));
          }

          if status != StatusCode::TOO_MANY_REQUESTS {
            error!(%method, path, status = status.as_u16(), body = %text, "Jira request failed");
            return Err(JiraError::Remote {
              method,
              path: path.to_string(),
              status: status.as_u16(),
              body: text,
            });
          }

          if remaining == 0 {
            error!(%method, path, attempt, body = %text, "Jira rate limit persisted after all retries");
            return Err(JiraError::RateLimited {
              method,
              path: path.to_string(),
              status: status.as_u16(),
              body: text,
            });
          }

          warn!(%method, path, attempt, remaining, delay_ms = delay.as_millis(), "Rate limited by Jira, backing off");
        }
        Err(source) => {
          if remaining == 0 {
            error!(%method, path, attempt, error = %source, "Jira request failed after all retries");
            return Err(JiraError::Transport {
              method,
              path: path.to_string(),
              source,
            });
          }

          warn!(%method, path, attempt, remaining, delay_ms = delay.as_millis(), error = %source, "Jira request failed, backing off");
        }
      }

      tokio::time::sleep(delay).await;
      remaining -= 1;
      delay = delay.saturating_mul(2);
      attempt += 1;
    }
  }

  /// One HTTP exchange; a body that cannot be read counts as a network failure
  async fn attempt(&self, method: &Method, url: &str, body: Option<&Value>) -> Result<(StatusCode, String), reqwest::Error> {
    let mut request = self
      .client
      .request(method.clone(), url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/json");

    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    Ok((status, text))
  }
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> Result<JiraClient, JiraError> {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}
