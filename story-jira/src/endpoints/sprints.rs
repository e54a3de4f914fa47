use reqwest::Method;
use tracing::{debug, error, info};

use crate::client::JiraClient;
use crate::consts::{AGILE_PATH, FUTURE_SPRINT_STATE};
use crate::error::JiraError;
use crate::models::{Sprint, SprintIssuesRequest, SprintPage};

impl JiraClient {
  /// Get the future sprints of a board. Only the first page is read.
  pub async fn future_sprints(&self, board_id: u64) -> Result<Vec<Sprint>, JiraError> {
    let path = format!("{AGILE_PATH}/board/{board_id}/sprint?state={FUTURE_SPRINT_STATE}");

    let response = self
      .send(Method::GET, &path, None)
      .await
      .inspect_err(|err| error!(board_id, error = %err, "Failed to fetch future sprints"))?;
    let page: SprintPage = response.into_json("sprint list")?;

    debug!(board_id, count = page.values.len(), "Fetched future sprints");
    Ok(page.values)
  }

  /// Resolve the id of the future sprint named exactly `sprint_name`
  pub async fn resolve_sprint_id(&self, board_id: u64, sprint_name: &str) -> Result<u64, JiraError> {
    let sprints = self.future_sprints(board_id).await?;

    let sprint = sprints
      .iter()
      .filter(|sprint| sprint.state.as_deref().is_none_or(|state| state == FUTURE_SPRINT_STATE))
      .find(|sprint| sprint.name == sprint_name)
      .ok_or_else(|| JiraError::SprintNotFound {
        board_id,
        name: sprint_name.to_string(),
      })
      .inspect_err(|err| error!(board_id, sprint_name, "{err}"))?;

    debug!(board_id, sprint_name, sprint_id = sprint.id, "Resolved sprint");
    Ok(sprint.id)
  }

  /// Move an issue into a sprint
  pub async fn assign_to_sprint(&self, sprint_id: u64, issue_key: &str) -> Result<(), JiraError> {
    let payload = SprintIssuesRequest {
      issues: vec![issue_key],
    };
    let body = serde_json::to_value(&payload)?;

    self
      .send(Method::POST, &format!("{AGILE_PATH}/sprint/{sprint_id}/issue"), Some(&body))
      .await
      .inspect_err(|err| error!(sprint_id, issue_key, error = %err, "Failed to assign issue to sprint"))?;

    info!(sprint_id, issue_key, "Assigned issue to sprint");
    Ok(())
  }
}
