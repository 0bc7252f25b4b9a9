//! Tsunagi presence and routing server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-server
//! cargo run --bin tsunagi-server -- --host 0.0.0.0 --port 3100 --store-url http://store:3200
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tsunagi_server::{
    config::{
        DEFAULT_AUTH_URL, DEFAULT_GATEWAY_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_POI_URL,
        DEFAULT_PORT, DEFAULT_ROAD_URL, DEFAULT_STORE_URL, GatewayConfig, ServerConfig,
    },
    infrastructure::{
        gateway::build_http_gateways, message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionRegistry,
    },
    ui::{AppState, Server},
};
use tsunagi_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tsunagi-server")]
#[command(about = "Presence and routing server for pairwise chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TSUNAGI_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TSUNAGI_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Base URL of the auth service
    #[arg(long, env = "TSUNAGI_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    auth_url: String,

    /// Base URL of the chat and connection store
    #[arg(long, env = "TSUNAGI_STORE_URL", default_value = DEFAULT_STORE_URL)]
    store_url: String,

    /// Base URL of the points-of-interest service
    #[arg(long, env = "TSUNAGI_POI_URL", default_value = DEFAULT_POI_URL)]
    poi_url: String,

    /// Base URL of the road-condition service
    #[arg(long, env = "TSUNAGI_ROAD_URL", default_value = DEFAULT_ROAD_URL)]
    road_url: String,

    /// Timeout of every gateway request, in milliseconds
    #[arg(long, env = "TSUNAGI_GATEWAY_TIMEOUT_MS", default_value_t = DEFAULT_GATEWAY_TIMEOUT_MS)]
    gateway_timeout_ms: u64,

    /// Log level of the server crates (RUST_LOG takes precedence)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            gateways: GatewayConfig {
                auth_url: args.auth_url,
                store_url: args.store_url,
                poi_url: args.poi_url,
                road_url: args.road_url,
                timeout: Duration::from_millis(args.gateway_timeout_ms),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. Gateways
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Registry (in-memory)
    let registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create Gateways (HTTP implementation)
    let gateways = match build_http_gateways(&config.gateways) {
        Ok(gateways) => gateways,
        Err(e) => {
            tracing::error!("Invalid gateway configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Gateways: auth={} store={} poi={} road={} (timeout {:?})",
        config.gateways.auth_url,
        config.gateways.store_url,
        config.gateways.poi_url,
        config.gateways.road_url,
        config.gateways.timeout
    );

    // 4. Create UseCases
    let state = AppState::new(registry, message_pusher, gateways, Arc::new(SystemClock));

    // 5. Create and run the server
    if let Err(e) = Server::new(state).run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
