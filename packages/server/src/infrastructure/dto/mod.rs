//! Data Transfer Objects (DTOs).
//!
//! DTOs are organized by protocol:
//! - `websocket`: client commands and server events exchanged over `/ws`
//! - `http`: HTTP API response DTOs
//! - `gateway`: request/response bodies of the external services

pub mod conversion;
pub mod gateway;
pub mod http;
pub mod websocket;
