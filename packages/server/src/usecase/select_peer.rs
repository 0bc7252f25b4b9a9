//! UseCase: 相手選択処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SelectPeerUseCase::execute() メソッド
//! - ルームの解決、セッションの更新、二者間の履歴取得
//!
//! ### なぜこのテストが必要か
//! - 両者が同じルームに入ること（ルーム ID の順序非依存性）
//! - 履歴取得の失敗が相手選択を妨げないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：相手選択と履歴取得
//! - 異常系：認証前の相手選択
//! - エッジケース：Chat Store の障害（履歴は空）、相手の切り替え

use std::sync::Arc;

use crate::domain::{
    ChatRecord, ChatStoreGateway, ConnectionId, Conversation, SessionRegistry, SessionUpdate,
    UserId,
};

use super::error::SelectPeerError;

/// 相手選択の結果
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPeer {
    pub conversation: Conversation,
    /// 二者間の履歴（双方向）
    pub history: Vec<ChatRecord>,
}

/// 相手選択のユースケース
pub struct SelectPeerUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Chat Store Gateway（履歴の取得）
    chat_store: Arc<dyn ChatStoreGateway>,
}

impl SelectPeerUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, chat_store: Arc<dyn ChatStoreGateway>) -> Self {
        Self {
            registry,
            chat_store,
        }
    }

    /// 相手を選択してルームに入る
    ///
    /// 履歴の取得に失敗した場合は空の履歴を返す。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        peer_user_id: String,
    ) -> Result<SelectedPeer, SelectPeerError> {
        let session = self
            .registry
            .get(connection_id)
            .await
            .map_err(SelectPeerError::SessionNotFound)?;
        let (identity, token) = session
            .authenticated()
            .ok_or(SelectPeerError::NotAuthenticated)?;

        let peer = UserId::new(peer_user_id).map_err(SelectPeerError::InvalidPeer)?;
        let conversation = Conversation::between(&identity.user_id, peer);

        self.registry
            .update(
                connection_id,
                SessionUpdate::JoinedRoom(conversation.clone()),
            )
            .await
            .map_err(SelectPeerError::SessionNotFound)?;
        tracing::info!(
            "Connection '{}' ({}) joined room '{}'",
            connection_id,
            identity.user_id,
            conversation.room
        );

        let history = match self
            .chat_store
            .list_messages(&identity.user_id, &conversation.peer, token)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(
                    "Failed to load history for room '{}': {}",
                    conversation.room,
                    e
                );
                Vec::new()
            }
        };

        Ok(SelectedPeer {
            conversation,
            history,
        })
    }
}
