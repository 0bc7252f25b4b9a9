//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;
use tsunagi_shared::time::FixedClock;

use crate::{
    domain::{
        AuthToken, ConnectionId, Conversation, DisplayName, Identity, MessagePusher,
        SessionRegistry, SessionUpdate, UserId,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRegistry,
    },
};

pub const TEST_NOW: i64 = 1_700_000_000_000;

pub fn registry() -> Arc<InMemorySessionRegistry> {
    Arc::new(InMemorySessionRegistry::with_clock(Arc::new(
        FixedClock::new(TEST_NOW),
    )))
}

pub fn pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

pub fn identity(id: &str, name: &str) -> Identity {
    Identity::new(user_id(id), DisplayName::new(name.to_string()).unwrap())
}

pub fn token(user: &str) -> AuthToken {
    AuthToken::new(format!("token-{user}")).unwrap()
}

/// 接続を Registry と MessagePusher に登録し、受信側を返す
pub async fn connect(
    registry: &Arc<InMemorySessionRegistry>,
    pusher: &Arc<WebSocketMessagePusher>,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    registry.insert(&connection_id).await.unwrap();
    pusher.register_client(connection_id.clone(), tx).await;
    (connection_id, rx)
}

/// 認証済みにする
pub async fn authenticate(
    registry: &Arc<InMemorySessionRegistry>,
    connection_id: &ConnectionId,
    id: &str,
    name: &str,
) {
    registry
        .upsert(
            connection_id,
            SessionUpdate::Authenticated {
                identity: identity(id, name),
                credential: token(id),
            },
        )
        .await;
}

/// 認証済みにしたうえで相手とのルームに入れる
pub async fn join(
    registry: &Arc<InMemorySessionRegistry>,
    connection_id: &ConnectionId,
    me: (&str, &str),
    peer: &str,
) {
    authenticate(registry, connection_id, me.0, me.1).await;
    registry
        .upsert(
            connection_id,
            SessionUpdate::JoinedRoom(Conversation::between(&user_id(me.0), user_id(peer))),
        )
        .await;
}

/// 受信済みのメッセージを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut received = Vec::new();
    while let Ok(message) = rx.try_recv() {
        received.push(message);
    }
    received
}
