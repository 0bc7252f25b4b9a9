//! Session Registry trait 定義
//!
//! 接続 ID → Session の対応を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, RegistryError, RoomId, Session, SessionUpdate};

/// Session Registry trait
///
/// 全ての更新は他の接続に対してアトミックに見えなければならない。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// 新しいセッションを作成する
    ///
    /// 存在確認と作成は同じロックの中で行う。既に登録済みなら `AlreadyTracked`。
    async fn insert(&self, connection_id: &ConnectionId) -> Result<Session, RegistryError>;

    /// 部分更新を適用する。存在しなければ作成する
    async fn upsert(&self, connection_id: &ConnectionId, update: SessionUpdate) -> Session;

    /// 既存のセッションにのみ部分更新を適用する
    ///
    /// Gateway 呼び出しの後に使う。切断と競合した場合は `SessionNotFound` を返し、
    /// 切断済みのセッションを復活させない。
    async fn update(
        &self,
        connection_id: &ConnectionId,
        update: SessionUpdate,
    ) -> Result<Session, RegistryError>;

    /// セッションを削除し、削除されたセッションを返す
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// セッションを取得
    async fn get(&self, connection_id: &ConnectionId) -> Result<Session, RegistryError>;

    /// 指定したルームにいる接続 ID のスナップショット
    async fn connection_ids_in_room(&self, room: &RoomId) -> Vec<ConnectionId>;

    /// 全ての接続 ID のスナップショット
    async fn all_connection_ids(&self) -> Vec<ConnectionId>;

    /// 全てのセッションのスナップショット
    async fn sessions(&self) -> Vec<Session>;

    /// 接続数
    async fn count(&self) -> usize;
}
