//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations: searching for an
//! open story by summary, creating a story, and replacing its description.

use reqwest::Method;
use tracing::{debug, error, info};
use url::form_urlencoded;

use crate::client::JiraClient;
use crate::consts::{ISSUE_PATH, SEARCH_PATH};
use crate::error::JiraError;
use crate::models::{
  CreateIssueRequest, CreatedIssue, DescriptionFields, IssueTypeRef, JiraIssue, NewStoryFields, ProjectRef,
  SearchResults, UpdateDescriptionRequest,
};

/// Characters Jira's text search (`~`) reads as query syntax
const TEXT_SEARCH_OPERATORS: &[char] = &[
  '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '~', '*', '?', ':', '/',
];

/// Build the JQL that finds open issues in `project_key` whose summary
/// contains `summary`.
///
/// The summary is matched literally: text search operators in it are escaped
/// so a summary like `Fix [CI] login` searches for those characters.
pub fn story_search_jql(project_key: &str, summary: &str) -> String {
  format!(
    "project = \"{}\" AND summary ~ \"{}\" AND status != Done",
    escape_jql(project_key),
    escape_text_search(summary)
  )
}

/// Escape a value for a quoted JQL string
fn escape_jql(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a value for a quoted JQL text search. Operators need a backslash
/// for the search engine, which itself is written `\\` inside the JQL string.
fn escape_text_search(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for ch in value.chars() {
    match ch {
      '"' => escaped.push_str("\\\""),
      '\\' => escaped.push_str("\\\\\\\\"),
      ch if TEXT_SEARCH_OPERATORS.contains(&ch) => {
        escaped.push_str("\\\\");
        escaped.push(ch);
      }
      ch => escaped.push(ch),
    }
  }
  escaped
}

impl JiraClient {
  /// Search issues with a JQL query, fetching only their descriptions
  pub async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>, JiraError> {
    let query = form_urlencoded::Serializer::new(String::new())
      .append_pair("jql", jql)
      .append_pair("fields", "description")
      .finish();
    let path = format!("{SEARCH_PATH}?{query}");

    let response = self
      .send(Method::GET, &path, None)
      .await
      .inspect_err(|err| error!(jql, error = %err, "Jira issue search failed"))?;
    let results: SearchResults = response.into_json("issue search")?;

    debug!(jql, count = results.issues.len(), "Jira issue search completed");
    Ok(results.issues)
  }

  /// Replace the description of an existing issue
  pub async fn update_issue_description(&self, issue_key: &str, description: &str) -> Result<(), JiraError> {
    let payload = UpdateDescriptionRequest {
      fields: DescriptionFields { description },
    };
    let body = serde_json::to_value(&payload)?;

    self
      .send(Method::PUT, &format!("{ISSUE_PATH}/{issue_key}"), Some(&body))
      .await
      .inspect_err(|err| error!(issue_key, error = %err, "Failed to update Jira issue description"))?;

    info!(issue_key, "Updated Jira issue description");
    Ok(())
  }

  /// Create a story in `project_key`, pre-populating its sprint, and return
  /// the new issue key
  pub async fn create_story(
    &self,
    project_key: &str,
    summary: &str,
    description: &str,
    sprint_id: u64,
  ) -> Result<String, JiraError> {
    let payload = CreateIssueRequest {
      fields: NewStoryFields {
        project: ProjectRef { key: project_key },
        summary,
        description,
        issuetype: IssueTypeRef::story(),
        sprint: sprint_id,
      },
    };
    let body = serde_json::to_value(&payload)?;

    let response = self
      .send(Method::POST, ISSUE_PATH, Some(&body))
      .await
      .inspect_err(|err| error!(project_key, error = %err, "Failed to create Jira story"))?;
    let created: CreatedIssue = response.into_json("issue creation")?;

    info!(issue_key = %created.key, project_key, "Created Jira story");
    Ok(created.key)
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::models::JiraAuth;

  fn test_client(base_url: &str) -> JiraClient {
    let auth = JiraAuth {
      username: "test_user".to_string(),
      api_token: "test_token".to_string(),
    };
    JiraClient::new(base_url, auth).unwrap()
  }

  #[test]
  fn test_story_search_jql() {
    assert_eq!(
      story_search_jql("PROJ", "Fix login bug"),
      "project = \"PROJ\" AND summary ~ \"Fix login bug\" AND status != Done"
    );
  }

  #[test]
  fn test_story_search_jql_escapes_quotes() {
    assert_eq!(
      story_search_jql(r#"PR"OJ"#, r#"Release "v2" \ notes"#),
      r#"project = "PR\"OJ" AND summary ~ "Release \"v2\" \\\\ notes" AND status != Done"#
    );
  }

  #[test]
  fn test_story_search_jql_escapes_text_search_operators() {
    assert_eq!(
      story_search_jql("PROJ", "Fix [CI] login: retry+backoff?"),
      r#"project = "PROJ" AND summary ~ "Fix \\[CI\\] login\\: retry\\+backoff\\?" AND status != Done"#
    );
    assert_eq!(
      story_search_jql("PROJ", "Fix login bug"),
      r#"project = "PROJ" AND summary ~ "Fix login bug" AND status != Done"#
    );
  }

  #[tokio::test]
  async fn test_search_issues() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());
    let jql = story_search_jql("PROJ", "Fix login bug");

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", jql.as_str()))
      .and(query_param("fields", "description"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "startAt": 0,
          "total": 2,
          "issues": [
              {"id": "10005", "key": "PROJ-5", "fields": {"description": "Fix login"}},
              {"id": "10006", "key": "PROJ-6", "fields": {"description": null}}
          ]
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = client.search_issues(&jql).await?;
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].key, "PROJ-5");
    assert_eq!(issues[0].fields.description.as_deref(), Some("Fix login"));
    assert_eq!(issues[1].fields.description, None);

    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_propagates_remote_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errorMessages": ["The value 'NOPE' does not exist for the field 'project'."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let err = client.search_issues("project = NOPE").await.unwrap_err();
    assert!(matches!(err, JiraError::Remote { status: 400, .. }));
    assert!(err.to_string().contains("does not exist"));

    Ok(())
  }

  #[tokio::test]
  async fn test_update_issue_description() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("PUT"))
      .and(path("/rest/api/2/issue/PROJ-5"))
      .and(basic_auth("test_user", "test_token"))
      .and(body_json(serde_json::json!({
          "fields": {"description": "Fix login flow"}
      })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    client.update_issue_description("PROJ-5", "Fix login flow").await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_create_story() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(basic_auth("test_user", "test_token"))
      .and(body_json(serde_json::json!({
          "fields": {
              "project": {"key": "PROJ"},
              "summary": "Fix login bug",
              "description": "Fix login",
              "issuetype": {"name": "Story"},
              "sprint": 7
          }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
          "id": "10010",
          "key": "PROJ-10",
          "self": "https://test.atlassian.net/rest/api/2/issue/10010"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let key = client.create_story("PROJ", "Fix login bug", "Fix login", 7).await?;
    assert_eq!(key, "PROJ-10");

    Ok(())
  }

  #[tokio::test]
  async fn test_create_story_without_key_is_unexpected_payload() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .respond_with(ResponseTemplate::new(201).set_body_string("created"))
      .mount(&mock_server)
      .await;

    let err = client.create_story("PROJ", "Fix login bug", "Fix login", 7).await.unwrap_err();
    assert!(matches!(err, JiraError::UnexpectedPayload { what: "issue creation", .. }));

    Ok(())
  }
}
