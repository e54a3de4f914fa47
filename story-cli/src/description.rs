//! # Description Timestamps
//!
//! Descriptions written to Jira end with a `Last updated:` trailer. The trailer
//! is stripped before comparing descriptions so re-running with unchanged
//! content never rewrites the issue.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Berlin;
use regex::Regex;

/// Label that starts the timestamp trailer
pub const TIMESTAMP_LABEL: &str = "Last updated: ";

// One or more trailers at the very end, each running to the end of its line.
static TIMESTAMP_TRAILER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?:\n\nLast updated: [^\n]*)+\z").expect("Failed to compile timestamp trailer regex"));

/// Remove the timestamp trailer from the end of `text`
pub fn strip_timestamp(text: &str) -> &str {
  match TIMESTAMP_TRAILER.find(text) {
    Some(trailer) => &text[..trailer.start()],
    None => text,
  }
}

/// Format `now` as Berlin local time, `DD.MM.YYYY HH:MM:SS`
pub fn timestamp_label(now: DateTime<Utc>) -> String {
  now.with_timezone(&Berlin).format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Replace any trailer on `text` with one for `now`
pub fn with_timestamp(text: &str, now: DateTime<Utc>) -> String {
  format!("{}\n\n{TIMESTAMP_LABEL}{}", strip_timestamp(text), timestamp_label(now))
}

/// Whether two descriptions say the same thing once trailers are ignored
pub fn descriptions_match(stored: &str, desired: &str) -> bool {
  strip_timestamp(stored) == strip_timestamp(desired)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn test_strip_timestamp_removes_trailer() {
    assert_eq!(strip_timestamp("Fix login\n\nLast updated: 01.01.2024 10:00:00"), "Fix login");
    assert_eq!(strip_timestamp("Fix login\n\nLast updated: whenever"), "Fix login");
  }

  #[test]
  fn test_strip_timestamp_leaves_other_text_alone() {
    assert_eq!(strip_timestamp("Fix login"), "Fix login");
    assert_eq!(strip_timestamp(""), "");
    // Label not preceded by a blank line
    assert_eq!(
      strip_timestamp("Fix login\nLast updated: 01.01.2024 10:00:00"),
      "Fix login\nLast updated: 01.01.2024 10:00:00"
    );
    // Label followed by more content
    let text = "Notes\n\nLast updated: yesterday\nStill relevant";
    assert_eq!(strip_timestamp(text), text);
  }

  #[test]
  fn test_strip_timestamp_restores_original_for_many_descriptions() {
    let descriptions = [
      "Fix login",
      "Multi\nline\n\ndescription",
      "Ends with newline\n",
      "Mentions Last updated: in the middle\n\nand continues",
      "",
    ];
    let timestamps = ["01.01.2024 10:00:00", "31.12.2025 23:59:59", ""];

    for description in descriptions {
      for timestamp in timestamps {
        let stamped = format!("{description}\n\nLast updated: {timestamp}");
        assert_eq!(strip_timestamp(&stamped), description, "{stamped:?}");
      }
    }
  }

  #[test]
  fn test_strip_timestamp_is_idempotent() {
    for text in [
      "Fix login",
      "Fix login\n\nLast updated: 01.01.2024 10:00:00",
      "Fix login\n\nLast updated: 01.01.2024 10:00:00\n\nLast updated: 02.01.2024 10:00:00",
    ] {
      let once = strip_timestamp(text);
      assert_eq!(strip_timestamp(once), once);
    }
  }

  #[test]
  fn test_timestamp_label_uses_berlin_time() {
    // Winter: CET, UTC+1
    let winter = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    assert_eq!(timestamp_label(winter), "01.01.2024 10:00:00");

    // Summer: CEST, UTC+2
    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 22, 30, 5).unwrap();
    assert_eq!(timestamp_label(summer), "16.07.2024 00:30:05");
  }

  #[test]
  fn test_with_timestamp_replaces_existing_trailer() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    assert_eq!(with_timestamp("Fix login", now), "Fix login\n\nLast updated: 01.01.2024 10:00:00");
    assert_eq!(
      with_timestamp("Fix login\n\nLast updated: 24.12.2023 18:00:00", now),
      "Fix login\n\nLast updated: 01.01.2024 10:00:00"
    );
  }

  #[test]
  fn test_descriptions_match_ignores_trailers() {
    assert!(descriptions_match("Fix login\n\nLast updated: 01.01.2024 10:00:00", "Fix login"));
    assert!(descriptions_match(
      "Fix login\n\nLast updated: 01.01.2024 10:00:00",
      "Fix login\n\nLast updated: 02.02.2024 11:00:00"
    ));
    assert!(!descriptions_match(
      "Fix login\n\nLast updated: 01.01.2024 10:00:00",
      "Fix login flow"
    ));
  }
}
