//! Request handlers.

pub mod http;
pub mod protocol;
pub mod websocket;

pub use http::{get_sessions, health_check};
pub use protocol::ProtocolHandler;
pub use websocket::websocket_handler;
