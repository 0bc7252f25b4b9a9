//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - 接続直後のセッション作成と送信チャンネルの登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 異常系：登録済みの接続 ID での接続試行

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, Session, SessionRegistry};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続を登録する
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 作成されたセッション（状態は Connected）
    /// * `Err(ConnectError)` - 接続 ID が既に使われている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Session, ConnectError> {
        // 1. セッションを作成（登録済みの接続 ID は拒否）
        let session = self.registry.insert(&connection_id).await?;

        // 2. 送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        Ok(session)
    }
}
