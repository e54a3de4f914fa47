//! # Input Map
//!
//! A flat, string-keyed view of the action inputs. Keys are normalized so
//! `INPUT_SPRINT-NAME`, `INPUT_SPRINT_NAME` and `--sprint-name` all land on
//! `sprint-name`.

use std::collections::BTreeMap;

use crate::consts::ENV_INPUT_PREFIX;

/// Raw inputs for a run, before validation
#[derive(Clone, Default)]
pub struct InputMap {
  values: BTreeMap<String, String>,
}

impl InputMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Collect action inputs from the process environment
  pub fn from_action_env() -> Self {
    Self::from_action_vars(std::env::vars())
  }

  /// Collect action inputs from `INPUT_*` variables
  pub fn from_action_vars<I>(vars: I) -> Self
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let mut inputs = Self::new();
    for (name, value) in vars {
      if let Some(input) = name.strip_prefix(ENV_INPUT_PREFIX) {
        inputs.insert(input, value);
      }
    }
    inputs
  }

  pub fn insert(&mut self, name: &str, value: impl Into<String>) {
    self.values.insert(normalize_name(name), value.into());
  }

  /// Look up an input. Surrounding whitespace is trimmed and blank values
  /// count as absent.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .values
      .get(&normalize_name(name))
      .map(|value| value.trim())
      .filter(|value| !value.is_empty())
  }

  /// Overlay `other` on top of this map; its non-blank values win
  pub fn merge(&mut self, other: Self) {
    for (name, value) in other.values {
      if !value.trim().is_empty() {
        self.values.insert(name, value);
      }
    }
  }

  /// Names of every input present, for logging without values
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }
}

fn normalize_name(name: &str) -> String {
  name
    .trim()
    .chars()
    .map(|c| match c {
      '_' | ' ' => '-',
      c => c.to_ascii_lowercase(),
    })
    .collect()
}
