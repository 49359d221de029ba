//! Application state shared across handlers.

use std::sync::Arc;

use crate::content::ContentRepository;
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Immutable content catalog, loaded once at startup
  pub content: Arc<ContentRepository>,

  /// Per-user session state store
  pub sessions: SessionStore,
}

impl AppState {
  pub fn new(content: ContentRepository) -> Self {
    Self {
      content: Arc::new(content),
      sessions: SessionStore::new(),
    }
  }
}
