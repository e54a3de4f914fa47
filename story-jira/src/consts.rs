//! Constants for the story-jira client.

use std::time::Duration;

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("story-sync/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Number of retries granted to a request that hits a rate limit or a network
/// failure
pub const DEFAULT_RETRIES: u32 = 3;

/// Delay before the first retry; each further retry doubles it
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Ceiling for a single HTTP exchange, after which it counts as a network
/// failure
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issue type used for every issue this client creates
pub const STORY_ISSUE_TYPE: &str = "Story";

/// Sprint state eligible for assignment
pub const FUTURE_SPRINT_STATE: &str = "future";

pub(crate) const SEARCH_PATH: &str = "/rest/api/2/search";
pub(crate) const ISSUE_PATH: &str = "/rest/api/2/issue";
pub(crate) const AGILE_PATH: &str = "/rest/agile/1.0";
