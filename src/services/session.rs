use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::game::{GameError, GameSession};

/// In-memory store of live game sessions. Sessions are never persisted;
/// a restart ends every game, and "play again" discards the entry.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, GameSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session under a fresh id.
    pub async fn insert(&self, session: GameSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session);
        id
    }

    /// Snapshot of a session by id.
    pub async fn get(&self, id: &Uuid) -> Option<GameSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Run a state transition against a stored session. Returns `None` when
    /// the id is unknown; otherwise the transition's own result.
    pub async fn modify<F, T>(&self, id: &Uuid, f: F) -> Option<Result<T, GameError>>
    where
        F: FnOnce(&mut GameSession) -> Result<T, GameError>,
    {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(id).map(f)
    }

    /// Discard a session. Returns false when the id is unknown.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id).is_some()
    }
}
