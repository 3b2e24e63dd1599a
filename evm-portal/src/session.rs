//! In-memory attendee sessions
//!
//! A session is created on registration or login and identified by a random
//! v4 UUID that the browser sends back as a bearer token. Sessions expire a
//! fixed time after creation and are lost on restart.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Longest session lifetime honoured (one year)
const MAX_TTL_MINUTES: u64 = 525_600;

/// A logged-in attendee
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub attendee_id: i64,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Shared session table
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::minutes(ttl_minutes.min(MAX_TTL_MINUTES) as i64),
        }
    }

    /// Start a session and return its token
    pub async fn create(&self, attendee_id: i64, name: &str) -> (Uuid, Session) {
        let token = Uuid::new_v4();
        let session = Session {
            attendee_id,
            name: name.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(Utc::now()));
        sessions.insert(token, session.clone());
        debug!("Session opened for attendee {} ({} active)", attendee_id, sessions.len());

        (token, session)
    }

    /// Look up a live session; an expired one is dropped and treated as absent
    pub async fn get(&self, token: &Uuid) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }

        self.sessions.write().await.remove(token);
        debug!("Session expired");
        None
    }

    /// End a session; returns whether it existed
    pub async fn remove(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    #[cfg(test)]
    async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new(30);
        let (token, session) = store.create(7, "Asha").await;

        assert_eq!(session.attendee_id, 7);
        assert_eq!(store.get(&token).await, Some(session));
        assert_eq!(store.get(&Uuid::new_v4()).await, None);

        assert!(store.remove(&token).await);
        assert!(!store.remove(&token).await);
        assert_eq!(store.get(&token).await, None);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = SessionStore::new(0);
        let (token, _) = store.create(1, "Ravi").await;

        assert_eq!(store.get(&token).await, None);
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_tokens_are_distinct() {
        let store = SessionStore::new(30);
        let (a, _) = store.create(1, "Asha").await;
        let (b, _) = store.create(1, "Asha").await;
        assert_ne!(a, b);
        assert_eq!(store.active_count().await, 2);
    }
}
