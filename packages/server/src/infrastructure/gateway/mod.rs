//! HTTP implementations of the gateway traits.
//!
//! Each gateway wraps an [`HttpClient`] pointed at one service's base URL.
//! The request timeout configured on the shared `reqwest::Client` bounds every
//! call; a timeout surfaces as `GatewayError::Unavailable`.

mod auth;
mod chat_store;
mod connection_store;
mod http_client;
mod points_of_interest;
mod road_condition;

pub use auth::HttpAuthGateway;
pub use chat_store::HttpChatStoreGateway;
pub use connection_store::HttpConnectionStoreGateway;
pub use http_client::{HttpClient, HttpError, build_reqwest_client};
pub use points_of_interest::HttpPointsOfInterestGateway;
pub use road_condition::HttpRoadConditionGateway;

use std::sync::Arc;

use crate::{config::GatewayConfig, domain::Gateways};

/// Build every gateway over one shared `reqwest::Client`.
pub fn build_http_gateways(config: &GatewayConfig) -> Result<Gateways, HttpError> {
    let client =
        build_reqwest_client(config.timeout).map_err(|e| HttpError::Transport(e.to_string()))?;
    let http = |base_url: &str| HttpClient::new(client.clone(), base_url);

    Ok(Gateways {
        auth: Arc::new(HttpAuthGateway::new(http(&config.auth_url)?)),
        connection_store: Arc::new(HttpConnectionStoreGateway::new(http(&config.store_url)?)),
        chat_store: Arc::new(HttpChatStoreGateway::new(http(&config.store_url)?)),
        points_of_interest: Arc::new(HttpPointsOfInterestGateway::new(http(&config.poi_url)?)),
        road_condition: Arc::new(HttpRoadConditionGateway::new(http(&config.road_url)?)),
    })
}
