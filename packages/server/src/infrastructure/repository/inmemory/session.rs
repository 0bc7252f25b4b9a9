//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する `SessionRegistry` trait の具体的な実装。
//! `tokio::sync::Mutex` で保護した HashMap を唯一の書き込み経路とし、
//! 全ての更新を直列化します。ロックは Gateway 呼び出しをまたいで保持しません。

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tsunagi_shared::time::{Clock, SystemClock};

use crate::domain::{
    ConnectionId, RegistryError, RoomId, Session, SessionRegistry, SessionUpdate, Timestamp,
};

/// インメモリ Session Registry 実装
pub struct InMemorySessionRegistry {
    sessions: Mutex<HashMap<ConnectionId, Session>>,
    /// セッション作成時刻の打刻に使う
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRegistry {
    /// システム時刻で打刻する Registry を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 任意の Clock で打刻する Registry を作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn insert(&self, connection_id: &ConnectionId) -> Result<Session, RegistryError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.entry(connection_id.clone()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyTracked(connection_id.to_string())),
            Entry::Vacant(entry) => {
                tracing::debug!("Session '{}' created", connection_id);
                let session = Session::new(
                    connection_id.clone(),
                    Timestamp::new(self.clock.now_millis()),
                );
                Ok(entry.insert(session).clone())
            }
        }
    }

    async fn upsert(&self, connection_id: &ConnectionId, update: SessionUpdate) -> Session {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(connection_id.clone()).or_insert_with(|| {
            tracing::debug!("Session '{}' created", connection_id);
            Session::new(
                connection_id.clone(),
                Timestamp::new(self.clock.now_millis()),
            )
        });
        session.apply(update);
        session.clone()
    }

    async fn update(
        &self,
        connection_id: &ConnectionId,
        update: SessionUpdate,
    ) -> Result<Session, RegistryError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::SessionNotFound(connection_id.to_string()))?;
        session.apply(update);
        Ok(session.clone())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(connection_id)
    }

    async fn get(&self, connection_id: &ConnectionId) -> Result<Session, RegistryError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(connection_id)
            .cloned()
            .ok_or_else(|| RegistryError::SessionNotFound(connection_id.to_string()))
    }

    async fn connection_ids_in_room(&self, room: &RoomId) -> Vec<ConnectionId> {
        let sessions = self.sessions.lock().await;
        sessions
            .values()
            .filter(|session| session.room() == Some(room))
            .map(|session| session.connection_id.clone())
            .collect()
    }

    async fn all_connection_ids(&self) -> Vec<ConnectionId> {
        let sessions = self.sessions.lock().await;
        sessions.keys().cloned().collect()
    }

    async fn sessions(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        let mut snapshot: Vec<Session> = sessions.values().cloned().collect();
        snapshot.sort_by_key(|session| session.connected_at);
        snapshot
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
