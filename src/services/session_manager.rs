// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Entry {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    Customer,
    Advisor,
}

#[derive(Clone, Debug)]
pub struct Conversation {
    pub id: String,
    pub entries: Vec<Entry>,
    pub last_active: Instant,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), entries: Vec::new(), last_active: Instant::now() }
    }
}

/// Server-side conversation history keyed by the widget's session id.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    // Start a conversation under a fresh id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), Conversation::new(id.clone()));
        id
    }

    // Widgets generate their own ids, so unknown ids are adopted.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard.entry(id.to_string()).or_insert_with(|| Conversation::new(id));
        id.to_string()
    }

    /// Append to a conversation and touch `last_active`. Returns the new length.
    pub async fn append(&self, session_id: &str, speaker: Speaker, content: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let conversation = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Conversation::new(session_id));
        conversation.entries.push(Entry {
            speaker,
            content: content.into(),
            timestamp: Instant::now(),
        });
        conversation.last_active = Instant::now();
        conversation.entries.len()
    }

    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Entry>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|c| c.entries.clone())
    }

    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Drop conversations idle longer than the ttl. Returns how many went.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, c| now.duration_since(c.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_ids_are_adopted() {
        let mgr = SessionManager::new(Duration::from_secs(60));
        assert!(mgr.is_empty().await);
        assert_eq!(mgr.ensure_session("widget-123").await, "widget-123");
        assert_eq!(mgr.ensure_session("widget-123").await, "widget-123");
        assert_eq!(mgr.len().await, 1);
    }
}
