// src/services/sessions.rs
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::message::{Theme, User};
use crate::services::storage::KeyValueStore;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub theme: Theme,
    pub language: String,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(token: String, user: User) -> Self {
        Self {
            token,
            user,
            theme: Theme::default(),
            language: "en".to_string(),
            last_active: Utc::now(),
        }
    }
}

/// Token-addressed user sessions. The in-memory map is authoritative;
/// every mutation is mirrored to the configured store under `user:{token}`
/// so a file-backed store survives restarts.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("ttl", &self.ttl).finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            store,
            ttl,
        }
    }

    fn storage_key(token: &str) -> String {
        format!("user:{token}")
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_value(session) {
            Ok(value) => self.store.set(&Self::storage_key(&session.token), value),
            Err(err) => tracing::warn!(error = %err, "could not serialize session"),
        }
    }

    /// Create a session for a freshly authenticated user, returning its token.
    pub async fn create(&self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session::new(token.clone(), user);
        self.persist(&session);
        let mut guard = self.inner.write().await;
        guard.insert(token.clone(), session);
        token
    }

    /// Look up a session and touch its last-active time. Falls back to the
    /// configured store for tokens issued before the last restart.
    pub async fn get(&self, token: &str) -> Option<Session> {
        {
            let mut guard = self.inner.write().await;
            if let Some(session) = guard.get_mut(token) {
                session.last_active = Utc::now();
                return Some(session.clone());
            }
        }

        let value = self.store.get(&Self::storage_key(token))?;
        let mut session: Session = serde_json::from_value(value).ok()?;
        session.last_active = Utc::now();
        let mut guard = self.inner.write().await;
        guard.insert(token.to_string(), session.clone());
        Some(session)
    }

    /// Apply a mutation to a live session and persist the result.
    pub async fn update<F>(&self, token: &str, apply: F) -> Option<Session>
    where
        F: FnOnce(&mut Session),
    {
        // Revive store-backed sessions first so updates work across restarts.
        self.get(token).await?;
        let snapshot = {
            let mut guard = self.inner.write().await;
            let session = guard.get_mut(token)?;
            apply(session);
            session.last_active = Utc::now();
            session.clone()
        };
        self.persist(&snapshot);
        Some(snapshot)
    }

    pub async fn remove(&self, token: &str) -> bool {
        let removed = self.inner.write().await.remove(token).is_some();
        let in_store = self.store.remove(&Self::storage_key(token));
        removed || in_store
    }

    /// Drop sessions idle longer than the ttl. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::TimeDelta::MAX);
        let now = Utc::now();
        let mut guard = self.inner.write().await;
        let expired: Vec<String> = guard
            .iter()
            .filter(|(_, s)| now.signed_duration_since(s.last_active) >= ttl)
            .map(|(token, _)| token.clone())
            .collect();
        for token in &expired {
            guard.remove(token);
            self.store.remove(&Self::storage_key(token));
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
