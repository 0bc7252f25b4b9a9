//! UseCase: 連絡先一覧の取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ListConnectionsUseCase::execute() メソッド
//! - セッションの識別情報とトークンで Connection Store を呼び出すこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：連絡先一覧の取得
//! - 異常系：認証前の呼び出し
//! - エッジケース：Connection Store の障害（空の一覧）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionStoreGateway, Contact, SessionRegistry};

use super::error::ListConnectionsError;

/// 連絡先一覧取得のユースケース
pub struct ListConnectionsUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Connection Store Gateway（承認済みの連絡先）
    connection_store: Arc<dyn ConnectionStoreGateway>,
}

impl ListConnectionsUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        connection_store: Arc<dyn ConnectionStoreGateway>,
    ) -> Self {
        Self {
            registry,
            connection_store,
        }
    }

    /// 連絡先一覧を取得する
    ///
    /// Gateway の失敗は空の一覧として扱う。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<Contact>, ListConnectionsError> {
        let session = self
            .registry
            .get(connection_id)
            .await
            .map_err(ListConnectionsError::SessionNotFound)?;
        let (identity, token) = session
            .authenticated()
            .ok_or(ListConnectionsError::NotAuthenticated)?;

        match self
            .connection_store
            .list_connections(&identity.user_id, token)
            .await
        {
            Ok(contacts) => Ok(contacts),
            Err(e) => {
                tracing::warn!(
                    "Failed to list connections for '{}': {}",
                    identity.user_id,
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}
