//! Runtime configuration of the server.
//!
//! The binary fills these from CLI flags and environment variables; tests
//! build them directly.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_AUTH_URL: &str = "http://localhost:3000";
pub const DEFAULT_STORE_URL: &str = "http://localhost:3200";
pub const DEFAULT_POI_URL: &str = "http://localhost:3000";
pub const DEFAULT_ROAD_URL: &str = "http://localhost:3000";
pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 5000;

/// Listener and gateway settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub gateways: GatewayConfig,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gateways: GatewayConfig::default(),
        }
    }
}

/// Base URLs of the external services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub auth_url: String,
    pub store_url: String,
    pub poi_url: String,
    pub road_url: String,
    /// Per-request timeout; an expired request counts as the gateway being unavailable
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            poi_url: DEFAULT_POI_URL.to_string(),
            road_url: DEFAULT_ROAD_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_GATEWAY_TIMEOUT_MS),
        }
    }
}
