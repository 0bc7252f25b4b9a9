//! Tsunagi presence and routing server.
//!
//! Layers, innermost first:
//! - `domain`: session model, Room Resolver and the ports (registry, pusher, gateways)
//! - `usecase`: one use case per protocol command plus the Broadcast Router
//! - `infrastructure`: in-memory registry, WebSocket pusher, HTTP gateways, DTOs
//! - `ui`: axum server, WebSocket Protocol Handler and HTTP endpoints

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
