//! UseCase: 道路状況の報告と取得

use std::sync::Arc;

use crate::domain::{
    AuthToken, ConnectionId, GeoPoint, Hazard, HazardReport, RoadConditionGateway,
    SessionRegistry,
};

use super::error::RoadConditionError;

/// 道路状況のユースケース
pub struct RoadConditionUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Road-Condition Gateway（道路状況サービス）
    road_condition: Arc<dyn RoadConditionGateway>,
}

impl RoadConditionUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        road_condition: Arc<dyn RoadConditionGateway>,
    ) -> Self {
        Self {
            registry,
            road_condition,
        }
    }

    /// 道路状況を報告し、作成されたレコードを返す
    ///
    /// 報告内容はそのまま転送し、妥当性は道路状況サービスが判定する。
    pub async fn report(
        &self,
        connection_id: &ConnectionId,
        kind: String,
        description: String,
        location: [f64; 2],
    ) -> Result<Hazard, RoadConditionError> {
        let token = self.credential(connection_id).await?;
        let report = HazardReport {
            kind,
            description,
            location: GeoPoint::from(location),
        };

        self.road_condition
            .report(&report, &token)
            .await
            .map_err(RoadConditionError::Gateway)
    }

    /// 道路状況の一覧を取得する
    pub async fn list(&self, connection_id: &ConnectionId) -> Result<Vec<Hazard>, RoadConditionError> {
        let token = self.credential(connection_id).await?;
        self.road_condition
            .list(&token)
            .await
            .map_err(RoadConditionError::Gateway)
    }

    async fn credential(&self, connection_id: &ConnectionId) -> Result<AuthToken, RoadConditionError> {
        let session = self
            .registry
            .get(connection_id)
            .await
            .map_err(RoadConditionError::SessionNotFound)?;
        session
            .credential
            .ok_or(RoadConditionError::NotAuthenticated)
    }
}
