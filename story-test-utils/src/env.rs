//! Environment variable management for testing
//!
//! The process environment is shared by every test thread, so tests that touch
//! it hold [`env_lock`] for their whole body.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or write process environment variables
pub fn env_lock() -> MutexGuard<'static, ()> {
  ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Overrides a single environment variable and restores the original value
/// when dropped
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Remember the current value of `name` without changing it
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Remember the current value of `name`, then set it to `value`
  pub fn set_to(name: &str, value: &str) -> Self {
    let guard = Self::new(name);
    guard.set(value);
    guard
  }

  pub fn set(&self, value: &str) {
    // SAFETY: callers hold `env_lock`, so no other test thread touches the
    // environment concurrently.
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  pub fn remove(&self) {
    // SAFETY: see `set`.
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      // SAFETY: see `set`.
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      // SAFETY: see `set`.
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
