use contractor_core::session::FormSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// In-memory form sessions keyed by user id.
///
/// Each session sits behind its own mutex: events of one user are processed
/// one at a time while different users proceed concurrently. Sessions are
/// never persisted.
pub struct SessionCache {
    sessions: Arc<RwLock<HashMap<i64, Arc<Mutex<FormSession>>>>>,
}

impl SessionCache {
    /// Creates a new empty SessionCache.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets a user's session if one exists.
    pub async fn get(&self, user_id: i64) -> Option<Arc<Mutex<FormSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).cloned()
    }

    /// Gets a user's session, creating a fresh one on first contact.
    pub async fn get_or_create(&self, user_id: i64) -> Arc<Mutex<FormSession>> {
        if let Some(session) = self.get(user_id).await {
            return session;
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(FormSession::new())))
            .clone()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
