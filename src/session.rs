//! In-memory session storage keyed by the sid cookie.
//!
//! Each entry owns its SessionState behind its own mutex; a handler runs a
//! whole transition under that lock, so concurrent requests for the same
//! session cannot interleave their read-modify-write. Sessions auto-expire
//! after a configurable duration of inactivity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config;
use crate::quiz::SessionState;

/// Session entry with last access time for expiration
struct SessionEntry {
  state: Arc<Mutex<SessionState>>,
  last_access: DateTime<Utc>,
}

/// Shared store of per-user session state. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct SessionStore {
  entries: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` with exclusive access to the session for `session_id`,
  /// creating a fresh session if none exists.
  pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
    let handle = {
      let mut entries = self.entries.lock().expect("Session store lock poisoned");

      // Clean up expired sessions occasionally (~10% chance)
      if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
        cleanup_expired(&mut entries);
      }

      let entry = entries
        .entry(session_id.to_string())
        .or_insert_with(|| SessionEntry {
          state: Arc::new(Mutex::new(SessionState::new())),
          last_access: Utc::now(),
        });
      entry.last_access = Utc::now();
      Arc::clone(&entry.state)
    };

    // Map lock released; the per-session lock covers the whole transition
    let mut state = handle.lock().expect("Session lock poisoned");
    f(&mut state)
  }

  #[cfg(test)]
  fn session_count(&self) -> usize {
    self.entries.lock().unwrap().len()
  }

  #[cfg(test)]
  fn backdate(&self, session_id: &str, hours: i64) {
    let mut entries = self.entries.lock().unwrap();
    if let Some(entry) = entries.get_mut(session_id) {
      entry.last_access = Utc::now() - Duration::hours(hours);
    }
  }

  #[cfg(test)]
  fn sweep(&self) {
    cleanup_expired(&mut self.entries.lock().unwrap());
  }
}

/// Clean up expired sessions
fn cleanup_expired(entries: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  entries.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
