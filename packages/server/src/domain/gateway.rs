//! Gateway trait 定義
//!
//! コアが利用する外部サービスの契約。コアはこれらのロジックを再実装せず、
//! リクエスト／レスポンスの形だけに依存します。HTTP 実装は
//! `infrastructure::gateway` にあります。
//!
//! タイムアウトは各実装の責務で、タイムアウトは `GatewayError::Unavailable` として返す。

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{
    AuthGrant, AuthToken, ChatDraft, ChatRecord, Contact, Credentials, GatewayError, GeoPoint,
    Hazard, HazardReport, PersistedMessage, PointOfInterest, UserId,
};

/// 認証サービス
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// 資格情報を検証し、識別情報とトークンを返す
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, GatewayError>;
}

/// 連絡先（承認済みの接続）サービス
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionStoreGateway: Send + Sync {
    async fn list_connections(
        &self,
        user_id: &UserId,
        token: &AuthToken,
    ) -> Result<Vec<Contact>, GatewayError>;
}

/// チャット永続化サービス
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatStoreGateway: Send + Sync {
    /// メッセージを保存する
    async fn create_message(
        &self,
        sender: &UserId,
        recipient: &UserId,
        draft: &ChatDraft,
        token: &AuthToken,
    ) -> Result<PersistedMessage, GatewayError>;

    /// 二者間のメッセージを双方向で取得する
    async fn list_messages(
        &self,
        a: &UserId,
        b: &UserId,
        token: &AuthToken,
    ) -> Result<Vec<ChatRecord>, GatewayError>;
}

/// 周辺スポット検索サービス
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PointsOfInterestGateway: Send + Sync {
    async fn nearby(
        &self,
        point: GeoPoint,
        token: &AuthToken,
    ) -> Result<Vec<PointOfInterest>, GatewayError>;
}

/// 道路状況サービス
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoadConditionGateway: Send + Sync {
    async fn report(
        &self,
        report: &HazardReport,
        token: &AuthToken,
    ) -> Result<Hazard, GatewayError>;

    async fn list(&self, token: &AuthToken) -> Result<Vec<Hazard>, GatewayError>;
}

/// コアが利用する全ての Gateway
#[derive(Clone)]
pub struct Gateways {
    pub auth: Arc<dyn AuthGateway>,
    pub connection_store: Arc<dyn ConnectionStoreGateway>,
    pub chat_store: Arc<dyn ChatStoreGateway>,
    pub points_of_interest: Arc<dyn PointsOfInterestGateway>,
    pub road_condition: Arc<dyn RoadConditionGateway>,
}
