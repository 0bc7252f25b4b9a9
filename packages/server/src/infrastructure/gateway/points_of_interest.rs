//! Points-of-Interest Gateway over HTTP.

use async_trait::async_trait;

use crate::{
    domain::{AuthToken, GatewayError, GeoPoint, PointOfInterest, PointsOfInterestGateway},
    infrastructure::dto::gateway::{CommonSpotsData, DataEnvelope},
};

use super::HttpClient;

/// `GET /api/v1/commonspots/near/{lat}/{lng}`
pub struct HttpPointsOfInterestGateway {
    http: HttpClient,
}

impl HttpPointsOfInterestGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PointsOfInterestGateway for HttpPointsOfInterestGateway {
    async fn nearby(
        &self,
        point: GeoPoint,
        token: &AuthToken,
    ) -> Result<Vec<PointOfInterest>, GatewayError> {
        let latitude = point.latitude().to_string();
        let longitude = point.longitude().to_string();

        let response: DataEnvelope<CommonSpotsData> = self
            .http
            .get_json(
                &["api", "v1", "commonspots", "near", &latitude, &longitude],
                Some(token),
            )
            .await?;

        Ok(response.data.possible_common_spots.unwrap_or_default())
    }
}
