//! Road-Condition Gateway over HTTP.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::{AuthToken, GatewayError, Hazard, HazardReport, RoadConditionGateway},
    infrastructure::dto::gateway::{DataEnvelope, RoadConditionData, RoadConditionRequest},
};

use super::HttpClient;

const ROAD_CONDITIONS_PATH: [&str; 3] = ["api", "v1", "roadConditions"];

/// `POST|GET /api/v1/roadConditions`
pub struct HttpRoadConditionGateway {
    http: HttpClient,
}

impl HttpRoadConditionGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoadConditionGateway for HttpRoadConditionGateway {
    async fn report(
        &self,
        report: &HazardReport,
        token: &AuthToken,
    ) -> Result<Hazard, GatewayError> {
        let request = RoadConditionRequest {
            kind: &report.kind,
            description: &report.description,
            location: report.location.into(),
        };

        let response: DataEnvelope<RoadConditionData<Value>> = self
            .http
            .post_json(&ROAD_CONDITIONS_PATH, &request, Some(token))
            .await?;

        Ok(Hazard(response.data.road_condition))
    }

    async fn list(&self, token: &AuthToken) -> Result<Vec<Hazard>, GatewayError> {
        let response: DataEnvelope<RoadConditionData<Value>> = self
            .http
            .get_json(&ROAD_CONDITIONS_PATH, Some(token))
            .await?;

        // the service answers with a list, or a single record when only one exists
        let hazards = match response.data.road_condition {
            Value::Array(items) => items.into_iter().map(Hazard).collect(),
            Value::Null => Vec::new(),
            single => vec![Hazard(single)],
        };
        Ok(hazards)
    }
}
