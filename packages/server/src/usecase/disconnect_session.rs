//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - セッションの削除と送信チャンネルの登録解除
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームにいる接続の切断（退出通知の対象を返す）
//! - エッジケース：認証前の切断、二重の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, MessagePusher, RoomId, SessionRegistry};

/// ルームに残る相手への退出通知の内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub identity: Identity,
    pub room: RoomId,
}

/// 切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - ルームにいた場合。残りのメンバーに通知する
    /// * `None` - ルームに入っていなかった、または既に削除済み
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Departure> {
        self.message_pusher.unregister_client(connection_id).await;

        let session = match self.registry.remove(connection_id).await {
            Some(session) => session,
            None => {
                tracing::debug!("Session '{}' was already removed", connection_id);
                return None;
            }
        };

        let conversation = session.conversation?;
        let identity = session.identity?;
        Some(Departure {
            identity,
            room: conversation.room,
        })
    }
}
