//! Broadcast Router
//!
//! ルームの所属を宛先として、シリアライズ済みのイベントを配信します。
//! 宛先はスナップショットを取った時点でそのルームにいる接続です。
//! 配信はベストエフォート（at-most-once、再送なし）。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, RoomId, SessionRegistry};

/// イベント配信のルーター
pub struct BroadcastRouter {
    /// Registry（ルーム所属のスナップショットに使う）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRouter {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 呼び出し元の接続にだけ送る
    pub async fn to_caller(
        &self,
        connection_id: &ConnectionId,
        json_message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(connection_id, json_message).await
    }

    /// ルームの全員に送る（送信者を含む）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信対象の接続 ID
    pub async fn to_room(
        &self,
        room: &RoomId,
        json_message: &str,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        let targets = self.registry.connection_ids_in_room(room).await;
        self.message_pusher
            .broadcast(targets.clone(), json_message)
            .await?;
        Ok(targets)
    }

    /// ルームの送信者以外に送る
    pub async fn to_room_except_caller(
        &self,
        room: &RoomId,
        caller: &ConnectionId,
        json_message: &str,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        let targets: Vec<ConnectionId> = self
            .registry
            .connection_ids_in_room(room)
            .await
            .into_iter()
            .filter(|id| id != caller)
            .collect();
        self.message_pusher
            .broadcast(targets.clone(), json_message)
            .await?;
        Ok(targets)
    }

    /// 全ての接続に送る
    pub async fn to_all(&self, json_message: &str) -> Result<Vec<ConnectionId>, MessagePushError> {
        let targets = self.registry.all_connection_ids().await;
        self.message_pusher
            .broadcast(targets.clone(), json_message)
            .await?;
        Ok(targets)
    }
}
