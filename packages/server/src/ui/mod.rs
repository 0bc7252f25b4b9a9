//! UI layer: the axum server, its WebSocket protocol and HTTP endpoints.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
