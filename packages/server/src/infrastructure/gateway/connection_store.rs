//! Connection Store Gateway over HTTP.

use async_trait::async_trait;

use crate::{
    domain::{AuthToken, ConnectionStoreGateway, Contact, GatewayError, UserId},
    infrastructure::dto::gateway::ConnectionsResponse,
};

use super::HttpClient;

/// `GET /api/v1/users/{userId}/connections`
pub struct HttpConnectionStoreGateway {
    http: HttpClient,
}

impl HttpConnectionStoreGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ConnectionStoreGateway for HttpConnectionStoreGateway {
    async fn list_connections(
        &self,
        user_id: &UserId,
        token: &AuthToken,
    ) -> Result<Vec<Contact>, GatewayError> {
        let response: ConnectionsResponse = self
            .http
            .get_json(
                &["api", "v1", "users", user_id.as_str(), "connections"],
                Some(token),
            )
            .await?;

        let contacts = response
            .connected_users
            .into_iter()
            .filter_map(|dto| match Contact::try_from(dto) {
                Ok(contact) => Some(contact),
                Err(e) => {
                    tracing::warn!("Skipping malformed contact for '{}': {}", user_id, e);
                    None
                }
            })
            .collect();
        Ok(contacts)
    }
}
